use std::{future::Future, io};
use tracing::warn;

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome<T> {
    Finished(T),
    Interrupted,
}

/// Drives `work` to completion unless `interrupt` fires first. An interrupt
/// source that fails to register is logged and ignored.
pub async fn until_interrupted<T>(
    work: impl Future<Output = T>,
    interrupt: impl Future<Output = io::Result<()>>,
) -> RunOutcome<T> {
    let interrupt = async {
        if let Err(err) = interrupt.await {
            warn!("Could not listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        value = work => RunOutcome::Finished(value),
        () = interrupt => RunOutcome::Interrupted,
    }
}
