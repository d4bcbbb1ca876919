// Per-view request state
//
// idle → in-flight → (success | failure) → idle. The in-flight flag is
// advisory: it stops this view from resubmitting, nothing more.

use std::future::Future;
use thiserror::Error;

use crate::client::AgentError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("A request is already in flight")]
    Busy,

    #[error("Nothing to submit")]
    EmptyInput,

    #[error("{0}")]
    Agent(#[from] AgentError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InFlight,
}

/// State held by one view: the phase, the displayed result, the last notification
#[derive(Debug)]
pub struct ViewState<T> {
    phase: Phase,
    result: Option<T>,
    notification: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            result: None,
            notification: None,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == Phase::InFlight
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Transient error message from the last failed request, if not yet dismissed
    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn dismiss(&mut self) {
        self.notification = None;
    }

    /// Whether the submit control would be enabled for `input`
    pub fn can_submit(&self, input: &str) -> bool {
        !self.is_in_flight() && !input.trim().is_empty()
    }

    /// Enter the in-flight phase, dropping the previously displayed result
    pub fn begin(&mut self) -> Result<(), SubmitError> {
        if self.is_in_flight() {
            return Err(SubmitError::Busy);
        }
        self.phase = Phase::InFlight;
        self.result = None;
        self.notification = None;
        Ok(())
    }

    /// Leave the in-flight phase. Success replaces the result; failure only
    /// records a notification.
    pub fn finish(&mut self, outcome: Result<T, AgentError>) -> Result<&T, SubmitError> {
        self.phase = Phase::Idle;
        match outcome {
            Ok(result) => Ok(self.result.insert(result)),
            Err(error) => {
                tracing::warn!(error = %error, "Request failed");
                self.notification = Some(error.message().to_string());
                Err(SubmitError::Agent(error))
            }
        }
    }

    /// Run one request through the full cycle.
    ///
    /// `input` is only checked for emptiness; the request itself is whatever
    /// `request` resolves to.
    pub async fn submit<F>(&mut self, input: &str, request: F) -> Result<&T, SubmitError>
    where
        F: Future<Output = Result<T, AgentError>>,
    {
        if self.is_in_flight() {
            return Err(SubmitError::Busy);
        }
        if input.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        self.begin()?;
        let outcome = request.await;
        self.finish(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_replaces_result() {
        let mut view: ViewState<u32> = ViewState::new();
        assert_eq!(view.phase(), Phase::Idle);

        let value = view.submit("texte", async { Ok(1) }).await.unwrap();
        assert_eq!(*value, 1);

        view.submit("texte", async { Ok(2) }).await.unwrap();
        assert_eq!(view.result(), Some(&2));
        assert_eq!(view.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_failure_sets_notification() {
        let mut view: ViewState<u32> = ViewState::new();
        let err = view
            .submit("texte", async { Err(AgentError::new("Erreur du service IA")) })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Erreur du service IA");
        assert_eq!(view.notification(), Some("Erreur du service IA"));
        assert!(view.result().is_none());
        assert!(!view.is_in_flight());

        view.dismiss();
        assert!(view.notification().is_none());
    }

    #[tokio::test]
    async fn test_empty_input_never_runs_request() {
        let mut view: ViewState<u32> = ViewState::new();
        let mut ran = false;
        let err = view
            .submit("   \n", async {
                ran = true;
                Ok(1)
            })
            .await
            .unwrap_err();
        assert_eq!(err, SubmitError::EmptyInput);
        assert!(!ran);
    }

    #[test]
    fn test_begin_rejected_while_in_flight() {
        let mut view: ViewState<u32> = ViewState::new();
        view.begin().unwrap();
        assert!(!view.can_submit("texte"));
        assert_eq!(view.begin(), Err(SubmitError::Busy));
        view.finish(Ok(3)).unwrap();
        assert!(view.can_submit("texte"));
    }

    #[test]
    fn test_begin_invalidates_previous_result() {
        let mut view: ViewState<u32> = ViewState::new();
        view.begin().unwrap();
        view.finish(Ok(3)).unwrap();
        view.begin().unwrap();
        assert!(view.result().is_none());
    }
}
