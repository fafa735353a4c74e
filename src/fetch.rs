// Fetch orchestration between the TUI and the backend
//
// The app state owns sequence numbering and the loading flag; this module
// owns the actual async calls. Commands arrive on one mpsc channel and
// completions leave on another, tagged with the sequence number they were
// issued under so the app can discard superseded results. Requests are
// spawned rather than awaited in the command loop, so overlapping fetches
// are possible and may complete out of order - last-write-wins resolution
// happens in `App::apply_records`.

use crate::client::ApiClient;
use crate::data::{BattedBall, Summary};
use crate::demo;
use crate::filters::Filters;
use std::time::Duration;
use tokio::sync::mpsc;

/// Simulated latency for demo mode, enough to see the loading state
const DEMO_LATENCY: Duration = Duration::from_millis(150);

/// Requests from the TUI to the fetcher
#[derive(Debug, Clone)]
pub enum FetchCommand {
    /// Fetch the record set for the given criteria.
    /// `seq` was assigned by `App::begin_records_fetch` at issue time.
    Records { seq: u64, filters: Filters },

    /// Fetch dataset-wide summary stats (no parameters)
    Summary,
}

/// Completions from the fetcher to the TUI
///
/// Errors travel as display strings: the anyhow chain is flattened at this
/// boundary so events stay cheap to clone, and no error ever propagates
/// into the render layer.
#[derive(Debug, Clone)]
pub enum DataEvent {
    Records {
        seq: u64,
        result: Result<Vec<BattedBall>, String>,
    },
    Summary(Result<Summary, String>),
}

/// Where fetches are served from
#[derive(Debug, Clone)]
pub enum FetchSource {
    /// The real backend over HTTP
    Api(ApiClient),
    /// The built-in mock dataset, filtered locally
    Demo,
}

impl FetchSource {
    async fn records(&self, filters: &Filters) -> Result<Vec<BattedBall>, String> {
        match self {
            FetchSource::Api(client) => client
                .fetch_events(filters)
                .await
                .map_err(|e| format!("{e:#}")),
            FetchSource::Demo => {
                tokio::time::sleep(DEMO_LATENCY).await;
                Ok(demo::apply_filters(&demo::dataset(), filters))
            }
        }
    }

    async fn summary(&self) -> Result<Summary, String> {
        match self {
            FetchSource::Api(client) => {
                client.fetch_summary().await.map_err(|e| format!("{e:#}"))
            }
            FetchSource::Demo => {
                tokio::time::sleep(DEMO_LATENCY).await;
                Ok(demo::summarize(&demo::dataset()))
            }
        }
    }
}

/// Run the fetcher until the command channel closes
///
/// Each command spawns its own task, so a slow request never blocks the
/// next one. No in-flight request is cancelled when superseded; its
/// completion is discarded by sequence number on the app side.
pub async fn run_fetcher(
    source: FetchSource,
    mut command_rx: mpsc::Receiver<FetchCommand>,
    event_tx: mpsc::Sender<DataEvent>,
) {
    while let Some(command) = command_rx.recv().await {
        let source = source.clone();
        let event_tx = event_tx.clone();

        match command {
            FetchCommand::Records { seq, filters } => {
                tokio::spawn(async move {
                    let result = source.records(&filters).await;
                    if let Err(ref message) = result {
                        tracing::error!(seq, "Records fetch failed: {message}");
                    } else {
                        tracing::debug!(seq, "Records fetch completed");
                    }
                    // Receiver gone means the TUI is shutting down
                    let _ = event_tx.send(DataEvent::Records { seq, result }).await;
                });
            }
            FetchCommand::Summary => {
                tokio::spawn(async move {
                    let result = source.summary().await;
                    if let Err(ref message) = result {
                        tracing::error!("Summary fetch failed: {message}");
                    }
                    let _ = event_tx.send(DataEvent::Summary(result)).await;
                });
            }
        }
    }

    tracing::debug!("Fetcher command channel closed, stopping");
}
