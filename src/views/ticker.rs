// Rotating status messages
//
// Display-only: the ticker runs beside a request, never inside it. Stopping
// it (or dropping it) has no effect on the request being waited on.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_TICK: Duration = Duration::from_millis(2000);

pub const FEEDBACK_MESSAGES: &[&str] = &[
    "Analyse des retours en cours…",
    "Détection du sentiment…",
    "Identification des patterns…",
    "Extraction des demandes de features…",
];

pub const STORIES_MESSAGES: &[&str] = &[
    "Génération en cours…",
    "Découpage de la feature…",
    "Rédaction des critères d'acceptation…",
    "Estimation de la complexité…",
];

pub const PRIORITIZATION_MESSAGES: &[&str] = &[
    "Priorisation en cours…",
    "Estimation des scores RICE…",
    "Classement MoSCoW…",
];

pub struct StatusTicker {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl StatusTicker {
    /// Show `messages[0]` immediately, then the next one every `interval`,
    /// wrapping around until stopped.
    pub fn start<F>(messages: &'static [&'static str], interval: Duration, mut show: F) -> Self
    where
        F: FnMut(&'static str) + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            if messages.is_empty() {
                return;
            }
            let mut ticker = tokio::time::interval(interval);
            let mut index = 0;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        show(messages[index % messages.len()]);
                        index += 1;
                    }
                }
            }
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Stop the ticker and wait for its task to wind down
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for StatusTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
