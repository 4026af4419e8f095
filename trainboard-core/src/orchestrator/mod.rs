//! Run orchestration for the Dataset -> Configure -> Results stepper.

mod event;
mod reducer;
mod runner;
mod state;

pub use event::{Effect, Event, Outcome, Transition};
pub use reducer::Orchestrator;
pub use runner::{execute, Workflow};
pub use state::{
    Notice, NoticeLevel, Pending, PendingKind, RunState, Step, Ticket, TrainConfig,
};
