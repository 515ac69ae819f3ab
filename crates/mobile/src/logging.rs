use std::{panic::PanicHookInfo, sync::Once};

use tracing_subscriber::{filter::FilterFn, layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) fn setup_logging() {
    static LOGGING_SETUP: Once = Once::new();

    LOGGING_SETUP.call_once(|| {
        if let Err(error) = install_subscriber() {
            eprintln!("waypoint: logging unavailable: {error}");
        }

        std::panic::set_hook(Box::new(panic_hook));
    })
}

fn install_subscriber() -> eyre::Result<()> {
    let filter = FilterFn::new(|metadata| {
        metadata
            .module_path()
            .unwrap_or_default()
            .starts_with("waypoint")
    });

    #[cfg(target_os = "android")]
    {
        use tracing_logcat::{LogcatMakeWriter, LogcatTag};
        use tracing_subscriber::fmt::format::Format;

        let tag = LogcatTag::Fixed("Waypoint-Rust".to_owned());
        let writer = LogcatMakeWriter::new(tag)?;
        let layer = tracing_subscriber::fmt::layer()
            .event_format(Format::default().with_level(false).without_time())
            .with_writer(writer)
            .with_ansi(false);
        tracing_subscriber::registry()
            .with(layer)
            .with(filter)
            .try_init()?;
    }

    // os_log on iOS picks up stderr from the app process
    #[cfg(not(target_os = "android"))]
    {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false);
        tracing_subscriber::registry()
            .with(layer)
            .with(filter)
            .try_init()?;
    }

    Ok(())
}

fn panic_hook(info: &PanicHookInfo) {
    let backtrace = std::backtrace::Backtrace::force_capture();
    tracing::error!("{info}\n{backtrace}");
}
