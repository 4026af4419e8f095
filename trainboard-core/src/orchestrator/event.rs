//! Inputs and outputs of the reducer.

use crate::error::{GatewayError, GuardViolation};
use crate::gateway::ArtifactKind;
use crate::model::{
    DatasetPreview, ModelKey, ModelPreset, ResetAck, RunId, SearchStrategy, TrainRequest,
    TrainResponse, UploadFile,
};

use super::state::{RunState, Step, Ticket};

/// Everything that can change the workflow: user actions plus completed
/// gateway calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Run once at startup; silently loads the service's default preview.
    Initialize,
    Upload(Option<UploadFile>),
    ChangeLimit(usize),
    SortPreview(String),
    GoTo(Step),
    SetTarget(String),
    ToggleModel(ModelKey),
    ApplyPreset(ModelPreset),
    SetCvFolds(u32),
    SetSearchStrategy(SearchStrategy),
    SetUseClassWeight(bool),
    SetMaxIterations(u32),
    Train,
    ToggleMatrixMode,
    Reset,
    Download(ArtifactKind),
    DismissError,
    DismissNotice,
    Completed { ticket: Ticket, outcome: Outcome },
}

/// Result of executing an [`Effect`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    InitialPreview(Result<DatasetPreview, GatewayError>),
    Uploaded(Result<DatasetPreview, GatewayError>),
    PreviewRefreshed {
        limit: usize,
        result: Result<DatasetPreview, GatewayError>,
    },
    Trained(Result<TrainResponse, GatewayError>),
    ResetDone(Result<ResetAck, GatewayError>),
    /// On success carries the saved file name.
    Downloaded {
        kind: ArtifactKind,
        result: Result<String, GatewayError>,
    },
}

/// A gateway call the reducer asks the runtime to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadDefaultPreview {
        ticket: Ticket,
        limit: usize,
    },
    Upload {
        ticket: Ticket,
        file: Option<UploadFile>,
    },
    FetchPreview {
        ticket: Ticket,
        limit: usize,
    },
    Train {
        ticket: Ticket,
        request: TrainRequest,
    },
    Reset {
        ticket: Ticket,
    },
    Download {
        ticket: Ticket,
        run_id: RunId,
        kind: ArtifactKind,
    },
}

impl Effect {
    pub fn ticket(&self) -> Ticket {
        match self {
            Effect::LoadDefaultPreview { ticket, .. }
            | Effect::Upload { ticket, .. }
            | Effect::FetchPreview { ticket, .. }
            | Effect::Train { ticket, .. }
            | Effect::Reset { ticket }
            | Effect::Download { ticket, .. } => *ticket,
        }
    }
}

/// New state plus at most one gateway call to perform.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: RunState,
    pub effect: Option<Effect>,
    /// Set when the event was ignored because a precondition failed
    pub rejected: Option<GuardViolation>,
}

impl Transition {
    pub fn stay(state: RunState) -> Self {
        Self {
            state,
            effect: None,
            rejected: None,
        }
    }

    pub fn with_effect(state: RunState, effect: Effect) -> Self {
        Self {
            state,
            effect: Some(effect),
            rejected: None,
        }
    }

    pub fn rejected(state: RunState, violation: GuardViolation) -> Self {
        Self {
            state,
            effect: None,
            rejected: Some(violation),
        }
    }
}
