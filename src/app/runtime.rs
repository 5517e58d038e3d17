use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::dashboard::{Completion, Dashboard, FetchCommand};
use crate::fetch::MarketSource;

/// Runs fetch commands on tokio tasks and queues their tagged completions.
pub struct FetchRuntime {
    source: Arc<dyn MarketSource>,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

impl FetchRuntime {
    pub fn new(source: Arc<dyn MarketSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { source, tx, rx }
    }

    /// Spawn the request; must be called from within a tokio runtime.
    pub fn dispatch(&self, command: FetchCommand) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let completion = match command {
                FetchCommand::Markets { generation, query } => Completion::Markets {
                    generation,
                    result: source.top_assets(&query).await,
                },
                FetchCommand::Series { generation, query } => {
                    let result = source.price_history(&query).await;
                    Completion::Series {
                        generation,
                        asset_id: query.asset_id,
                        result,
                    }
                }
            };
            // The receiver only goes away when the dashboard shuts down.
            let _ = tx.send(completion);
        });
    }

    pub fn dispatch_opt(&self, command: Option<FetchCommand>) {
        if let Some(command) = command {
            self.dispatch(command);
        }
    }

    /// Apply every completion that has already arrived; returns how many were drained.
    pub fn drain(&mut self, dashboard: &mut Dashboard) -> usize {
        let mut drained = 0;
        while let Ok(completion) = self.rx.try_recv() {
            let next = dashboard.apply(completion);
            self.dispatch_opt(next);
            drained += 1;
        }
        drained
    }

    /// Wait until neither fetch is loading, applying completions as they arrive.
    pub async fn settle(&mut self, dashboard: &mut Dashboard) {
        while dashboard.is_loading() {
            let Some(completion) = self.rx.recv().await else {
                break;
            };
            let next = dashboard.apply(completion);
            self.dispatch_opt(next);
        }
        debug!("dashboard settled in {:?}", dashboard.phase());
    }
}
