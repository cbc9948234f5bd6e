//! Form state management
//!
//! Defines the form state, the request status and the transitions between
//! them. Transitions are pure: the controller feeds events in and stores
//! whatever comes out.

use crate::domain::{FormInput, PredictionResult};

/// Whether a prediction request is in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    /// Nothing in flight, the form can be submitted
    #[default]
    Idle,
    /// Waiting for the service to answer
    Pending,
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

/// Everything the form holds at a given moment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    /// Text currently in the title and body fields
    pub input: FormInput,
    /// Last completed result, `None` until a request finishes
    pub result: Option<PredictionResult>,
    /// In-flight flag
    pub status: RequestStatus,
}

/// Possible state transition events
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    /// Title field replaced
    TitleEdited(String),
    /// Body field replaced
    BodyEdited(String),
    /// A submit passed validation and its request is about to be sent
    SubmitAccepted,
    /// A request completed with a payload
    ResponseReceived(PredictionResult),
    /// A request failed for any reason
    RequestFailed,
    /// Clear button pressed
    Cleared,
}

/// State machine for form transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes an event and returns the new state
    ///
    /// Completions are applied whatever the current status is, so when
    /// requests overlap the last one to finish decides the result.
    pub fn process_event(current: FormState, event: StateEvent) -> FormState {
        let mut state = current;
        match event {
            StateEvent::TitleEdited(title) => state.input.title = title,
            StateEvent::BodyEdited(body) => state.input.body = body,
            StateEvent::SubmitAccepted => {
                state.status = RequestStatus::Pending;
                state.result = None;
            }
            StateEvent::ResponseReceived(result) => {
                state.result = Some(result);
                state.status = RequestStatus::Idle;
            }
            StateEvent::RequestFailed => {
                state.result = Some(PredictionResult::failure());
                state.status = RequestStatus::Idle;
            }
            // In-flight requests keep running, so the status is left alone
            StateEvent::Cleared => {
                state.input.reset();
                state.result = None;
            }
        }
        state
    }
}
