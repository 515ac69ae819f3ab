use std::{sync::Arc, thread};

use eyre::WrapErr;
use tokio::sync::watch;
use waypoint_core::MapSnapshot;

use crate::state::view::map::records::Snapshot;

/// Receives every published state change, starting with the current state.
#[uniffi::export(with_foreign)]
pub trait MapObserver: Send + Sync {
    fn on_state_changed(&self, snapshot: Snapshot);
}

/// Forward state changes to `observer` on a dedicated thread until the
/// coordinator goes away.
pub(crate) fn spawn_forwarder(
    mut receiver: watch::Receiver<MapSnapshot>,
    observer: Arc<dyn MapObserver>,
) -> eyre::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .wrap_err("failed to build observer runtime")?;

    thread::Builder::new()
        .name("waypoint-observer".to_owned())
        .spawn(move || {
            runtime.block_on(async move {
                loop {
                    let snapshot = Snapshot::from(&*receiver.borrow_and_update());
                    observer.on_state_changed(snapshot);

                    if receiver.changed().await.is_err() {
                        break;
                    }
                }
            });
            tracing::debug!("map state closed, observer detached");
        })
        .wrap_err("failed to spawn observer thread")?;

    Ok(())
}
