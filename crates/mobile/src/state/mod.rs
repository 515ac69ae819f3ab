pub mod location;
pub mod observer;
pub mod view;
