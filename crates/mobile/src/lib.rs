pub mod render;
pub mod state;

mod logging;

uniffi::setup_scaffolding!();

/// Install logging and the panic hook.
/// Call this once at startup from Kotlin/Swift
#[uniffi::export]
pub fn init_logging() {
    logging::setup_logging();
}
