//! Form controller
//!
//! The controller owns the form state behind a mutex and drives every change
//! through the state machine. Only `submit` talks to the prediction service;
//! the lock is released while the request is in flight.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

use crate::api::{PredictRequest, PredictionService};
use crate::app::state::{FormState, RequestStatus, StateEvent, StateMachine};
use crate::domain::PredictionResult;

/// What happened to a call to [`FormController::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Both fields were blank, nothing was sent
    Rejected,
    /// The service answered and its payload was stored
    Succeeded,
    /// The request failed and the failure placeholder was stored
    Failed,
}

/// Coordinates the form fields, the in-flight flag and the last result
///
/// Cloning is cheap and every clone shares the same state, which lets a
/// submission run on its own task while the user keeps editing.
#[derive(Clone)]
pub struct FormController {
    state: Arc<Mutex<FormState>>,
    service: Arc<dyn PredictionService>,
}

impl FormController {
    /// Creates a controller with an empty form
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            service,
        }
    }

    /// Replaces the title field
    pub fn update_title(&self, title: impl Into<String>) {
        self.process_event(StateEvent::TitleEdited(title.into()));
    }

    /// Replaces the body field
    pub fn update_body(&self, body: impl Into<String>) {
        self.process_event(StateEvent::BodyEdited(body.into()));
    }

    /// Appends a line to the body field
    pub fn append_body_line(&self, line: &str) {
        let mut state = self.lock();
        let mut body = state.input.body.clone();
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(line);
        let current = std::mem::take(&mut *state);
        *state = StateMachine::process_event(current, StateEvent::BodyEdited(body));
    }

    /// Empties both fields and forgets the last result
    ///
    /// A request already in flight is not cancelled; when it completes it
    /// still stores its outcome.
    pub fn clear(&self) {
        self.process_event(StateEvent::Cleared);
    }

    /// Copy of the current form state
    pub fn snapshot(&self) -> FormState {
        self.lock().clone()
    }

    /// Current request status
    pub fn status(&self) -> RequestStatus {
        self.lock().status
    }

    /// Last stored result, if any
    pub fn result(&self) -> Option<PredictionResult> {
        self.lock().result.clone()
    }

    /// Sends the current fields to the prediction service
    ///
    /// Blank forms are ignored without touching the state. Otherwise the form
    /// goes pending, exactly one request is sent, and its outcome (payload or
    /// failure placeholder) replaces the result.
    pub async fn submit(&self) -> SubmitOutcome {
        match self.accept_submit() {
            Some(request) => self.send(request).await,
            None => SubmitOutcome::Rejected,
        }
    }

    /// Validates the fields and marks the form pending
    ///
    /// Returns the request to hand to [`FormController::send`], or `None`
    /// for a blank form. Runs synchronously so a caller can go pending
    /// before it spawns the request.
    pub fn accept_submit(&self) -> Option<PredictRequest> {
        let mut state = self.lock();
        if !state.input.is_submittable() {
            debug!("Submit ignored: title and body are blank");
            return None;
        }

        let current = std::mem::take(&mut *state);
        *state = StateMachine::process_event(current, StateEvent::SubmitAccepted);
        Some(PredictRequest::from(&state.input))
    }

    /// Sends an accepted request and stores its outcome
    pub async fn send(&self, request: PredictRequest) -> SubmitOutcome {
        info!("Requesting prediction");
        match self.service.predict(&request).await {
            Ok(result) => {
                let missing = result.missing_fields();
                if !missing.is_empty() {
                    warn!("Prediction payload lacks fields: {}", missing.join(", "));
                }
                info!(
                    "Prediction: {} ({})",
                    result.prediction.as_deref().unwrap_or("?"),
                    result.confidence_percent()
                );
                self.process_event(StateEvent::ResponseReceived(result));
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                warn!("Prediction request failed: {}", e);
                self.process_event(StateEvent::RequestFailed);
                SubmitOutcome::Failed
            }
        }
    }

    fn process_event(&self, event: StateEvent) -> FormState {
        let mut state = self.lock();
        let current = std::mem::take(&mut *state);
        *state = StateMachine::process_event(current, event);
        state.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    type Reply = Result<PredictionResult, ApiError>;

    /// Prediction service whose answers are released by the test
    #[derive(Default)]
    struct ScriptedService {
        replies: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
        requests: Mutex<Vec<PredictRequest>>,
    }

    impl ScriptedService {
        /// Queues one answer slot and returns the sender that fills it
        fn expect_call(&self) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.replies.lock().unwrap().push_back(rx);
            tx
        }

        fn requests(&self) -> Vec<PredictRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PredictionService for ScriptedService {
        async fn predict(&self, request: &PredictRequest) -> Reply {
            self.requests.lock().unwrap().push(request.clone());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected prediction request");
            reply.await.expect("reply sender dropped")
        }
    }

    fn setup() -> (FormController, Arc<ScriptedService>) {
        let service = Arc::new(ScriptedService::default());
        let controller = FormController::new(service.clone());
        (controller, service)
    }

    async fn wait_for_requests(service: &ScriptedService, count: usize) {
        while service.requests().len() < count {
            tokio::task::yield_now().await;
        }
    }

    fn status_error() -> ApiError {
        ApiError::Status { status: 503 }
    }

    #[tokio::test]
    async fn blank_form_is_not_sent() {
        let (controller, service) = setup();
        controller.update_title("   ");
        controller.update_body("\n\t");

        assert_eq!(controller.submit().await, SubmitOutcome::Rejected);
        assert!(service.requests().is_empty());
        assert_eq!(controller.status(), RequestStatus::Idle);
        assert!(controller.result().is_none());
    }

    #[tokio::test]
    async fn blank_submit_keeps_previous_result() {
        let (controller, service) = setup();
        controller.update_title("First");
        service
            .expect_call()
            .send(Ok(PredictionResult::new("Real", 1, 0.87)))
            .unwrap();
        assert_eq!(controller.submit().await, SubmitOutcome::Succeeded);

        controller.update_title("");
        let before = controller.snapshot();
        assert_eq!(controller.submit().await, SubmitOutcome::Rejected);
        assert_eq!(controller.snapshot(), before);
        assert_eq!(service.requests().len(), 1);
    }

    #[tokio::test]
    async fn title_only_sends_one_request() {
        let (controller, service) = setup();
        controller.update_title("Test");
        service
            .expect_call()
            .send(Ok(PredictionResult::new("Fake", 0, 0.42)))
            .unwrap();

        assert_eq!(controller.submit().await, SubmitOutcome::Succeeded);
        assert_eq!(
            service.requests(),
            vec![PredictRequest {
                title: "Test".to_string(),
                text: String::new(),
            }]
        );
        assert_eq!(controller.result(), Some(PredictionResult::new("Fake", 0, 0.42)));
    }

    #[tokio::test]
    async fn body_only_sends_one_request() {
        let (controller, service) = setup();
        controller.update_body("Only a body");
        service
            .expect_call()
            .send(Ok(PredictionResult::new("True", 1, 0.6)))
            .unwrap();

        controller.submit().await;
        assert_eq!(
            service.requests(),
            vec![PredictRequest {
                title: String::new(),
                text: "Only a body".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn failure_stores_placeholder() {
        let (controller, service) = setup();
        controller.update_title("Test");
        service.expect_call().send(Err(status_error())).unwrap();

        assert_eq!(controller.submit().await, SubmitOutcome::Failed);
        let result = controller.result().unwrap();
        assert_eq!(result.label, Some(-1));
        assert_eq!(result.prediction.as_deref(), Some("Error"));
        assert_eq!(result.confidence, Some(0.0));
    }

    #[tokio::test]
    async fn decode_failure_looks_like_any_other_failure() {
        let (controller, service) = setup();
        controller.update_title("Test");
        let decode = serde_json::from_str::<PredictionResult>("[]").unwrap_err();
        service.expect_call().send(Err(ApiError::Decode(decode))).unwrap();

        controller.submit().await;
        assert_eq!(controller.result(), Some(PredictionResult::failure()));
    }

    #[tokio::test]
    async fn pending_only_while_request_is_in_flight() {
        let (controller, service) = setup();
        controller.update_title("Test");
        controller.update_body("Body");
        let reply = service.expect_call();

        assert_eq!(controller.status(), RequestStatus::Idle);

        let task = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit().await })
        };
        wait_for_requests(&service, 1).await;

        assert_eq!(controller.status(), RequestStatus::Pending);
        assert!(controller.result().is_none());

        reply.send(Ok(PredictionResult::new("True", 1, 0.8))).unwrap();
        assert_eq!(task.await.unwrap(), SubmitOutcome::Succeeded);
        assert_eq!(controller.status(), RequestStatus::Idle);
    }

    #[tokio::test]
    async fn accepted_submit_is_pending_before_it_is_sent() {
        let (controller, service) = setup();
        controller.update_title("Test");

        let request = controller.accept_submit().unwrap();
        assert_eq!(controller.status(), RequestStatus::Pending);
        assert!(service.requests().is_empty());

        service
            .expect_call()
            .send(Ok(PredictionResult::new("Fake", 0, 0.42)))
            .unwrap();
        assert_eq!(controller.send(request).await, SubmitOutcome::Succeeded);
        assert_eq!(controller.status(), RequestStatus::Idle);
        assert_eq!(service.requests().len(), 1);
    }

    #[test]
    fn blank_form_is_not_accepted() {
        let (controller, _service) = setup();
        controller.update_body("  ");
        assert_eq!(controller.accept_submit(), None);
        assert_eq!(controller.status(), RequestStatus::Idle);
    }

    #[tokio::test]
    async fn clear_does_not_cancel_in_flight_request() {
        let (controller, service) = setup();
        controller.update_title("Test");
        let reply = service.expect_call();

        let task = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit().await })
        };
        wait_for_requests(&service, 1).await;

        controller.clear();
        let cleared = controller.snapshot();
        assert!(cleared.input.is_empty());
        assert!(cleared.result.is_none());
        assert_eq!(cleared.status, RequestStatus::Pending);

        reply.send(Ok(PredictionResult::new("Fake", 0, 0.42))).unwrap();
        task.await.unwrap();

        let after = controller.snapshot();
        assert!(after.input.is_empty());
        assert_eq!(after.result, Some(PredictionResult::new("Fake", 0, 0.42)));
        assert_eq!(after.status, RequestStatus::Idle);
    }

    #[tokio::test]
    async fn last_completed_request_wins() {
        let (controller, service) = setup();
        controller.update_title("First");
        let first_reply = service.expect_call();
        let second_reply = service.expect_call();

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit().await })
        };
        wait_for_requests(&service, 1).await;

        controller.update_title("Second");
        let second = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit().await })
        };
        wait_for_requests(&service, 2).await;

        // Second request finishes first, first request finishes last
        second_reply
            .send(Ok(PredictionResult::new("True", 1, 0.9)))
            .unwrap();
        second.await.unwrap();
        assert_eq!(controller.status(), RequestStatus::Idle);

        first_reply
            .send(Ok(PredictionResult::new("Fake", 0, 0.3)))
            .unwrap();
        first.await.unwrap();

        assert_eq!(controller.result(), Some(PredictionResult::new("Fake", 0, 0.3)));
        let titles: Vec<String> = service.requests().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn append_body_line_joins_with_newline() {
        let (controller, _service) = setup();
        controller.append_body_line("first");
        controller.append_body_line("second");
        assert_eq!(controller.snapshot().input.body, "first\nsecond");
    }
}
