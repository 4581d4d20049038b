//! Fetch worker thread
//!
//! Runs the national and per-state fetches concurrently on a tokio runtime
//! owned by a background thread. Each completion is sent to the UI thread
//! as a [`FetchMessage`] as soon as it arrives, in whatever order the two
//! requests finish; the UI drains them through a [`FetchBridge`] so every
//! store write happens on the UI thread.
//!
//! There is no retry: a failed fetch is reported once and the worker exits
//! after both requests have settled.

use crate::backend::fetcher::CovidClient;
use crate::error::{FetchResult, Result};
use crate::store::{PerStateIndex, TimeSeries};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

/// One message per fetch
const MSG_CHANNEL_CAPACITY: usize = 2;

/// Completion of one of the two fetches
#[derive(Debug)]
pub enum FetchMessage {
    National(FetchResult<TimeSeries>),
    States(FetchResult<PerStateIndex>),
}

impl FetchMessage {
    /// Short name of the fetch this message completes
    pub fn source(&self) -> &'static str {
        match self {
            FetchMessage::National(_) => "national",
            FetchMessage::States(_) => "state",
        }
    }
}

/// UI-side handle for receiving fetch completions
pub struct FetchBridge {
    msg_rx: Receiver<FetchMessage>,
}

impl FetchBridge {
    /// Create a bridge pair: `(bridge_for_ui, msg_tx)`
    pub fn new() -> (Self, Sender<FetchMessage>) {
        let (msg_tx, msg_rx) = bounded(MSG_CHANNEL_CAPACITY);
        (Self { msg_rx }, msg_tx)
    }

    /// Drain all pending messages
    pub fn drain(&self) -> Vec<FetchMessage> {
        let mut msgs = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            msgs.push(msg);
        }
        msgs
    }

    /// Try to receive a single message without blocking
    pub fn try_recv(&self) -> Option<FetchMessage> {
        self.msg_rx.try_recv().ok()
    }

    /// Block until a message arrives, the timeout elapses or the worker exits
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchMessage> {
        match self.msg_rx.recv_timeout(timeout) {
            Ok(msg) => Some(msg),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

fn deliver(tx: &Sender<FetchMessage>, msg: FetchMessage, on_update: &(dyn Fn() + Send + Sync)) {
    let source = msg.source();
    if tx.send(msg).is_err() {
        tracing::debug!("UI is gone, dropping {} fetch result", source);
        return;
    }
    on_update();
}

/// Start both fetches on a background thread
///
/// `on_update` runs after each message is queued, typically to request a
/// repaint so the UI drains the bridge promptly.
pub fn spawn_fetches<F>(
    client: CovidClient,
    on_update: F,
) -> Result<(FetchBridge, JoinHandle<()>)>
where
    F: Fn() + Send + Sync + 'static,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let (bridge, msg_tx) = FetchBridge::new();

    let handle = std::thread::Builder::new()
        .name("fetch-worker".to_string())
        .spawn(move || {
            runtime.block_on(async {
                let national = async {
                    let result = client.fetch_national().await;
                    match &result {
                        Ok(series) => {
                            tracing::info!("Fetched national series: {} days", series.len())
                        }
                        Err(e) => tracing::error!("National fetch failed: {}", e),
                    }
                    deliver(&msg_tx, FetchMessage::National(result), &on_update);
                };

                let states = async {
                    let result = client.fetch_states().await;
                    match &result {
                        Ok(index) => {
                            tracing::info!("Fetched state series for {} states", index.len())
                        }
                        Err(e) => tracing::error!("State fetch failed: {}", e),
                    }
                    deliver(&msg_tx, FetchMessage::States(result), &on_update);
                };

                tokio::join!(national, states);
            });
            tracing::debug!("Fetch worker finished");
        })?;

    Ok((bridge, handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    #[test]
    fn test_bridge_drains_in_send_order() {
        let (bridge, tx) = FetchBridge::new();
        assert!(bridge.try_recv().is_none());

        tx.send(FetchMessage::States(Err(FetchError::EmptyResponse)))
            .unwrap();
        tx.send(FetchMessage::National(Ok(TimeSeries::default())))
            .unwrap();

        let sources: Vec<_> = bridge.drain().iter().map(FetchMessage::source).collect();
        assert_eq!(sources, vec!["state", "national"]);
        assert!(bridge.drain().is_empty());
    }

    #[test]
    fn test_recv_timeout_on_closed_bridge() {
        let (bridge, tx) = FetchBridge::new();
        drop(tx);
        assert!(bridge.recv_timeout(Duration::from_millis(10)).is_none());
    }
}
