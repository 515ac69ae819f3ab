mod coordinate;
mod marker;
mod route;
mod viewport;

pub use coordinate::Coordinate;
pub use marker::Marker;
pub use route::{Route, RouteStep};
pub use viewport::{Span, Viewport};
