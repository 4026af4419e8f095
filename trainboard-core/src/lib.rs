pub mod analytics;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod orchestrator;
pub mod preview;

pub use config::{default_config, parse_config, AppConfig};
pub use error::{GatewayError, GuardViolation, ShapeMismatch};
pub use gateway::{Artifact, ArtifactKind, ArtifactSink, Gateway, HttpGateway};
pub use orchestrator::{execute, Event, Orchestrator, RunState, Step, Workflow};
pub use preview::PreviewTable;
