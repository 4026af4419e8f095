//! Executes reducer effects against a [`Gateway`].

use tracing::debug;

use crate::error::GuardViolation;
use crate::gateway::{ArtifactSink, Gateway};

use super::event::{Effect, Event, Outcome};
use super::reducer::Orchestrator;
use super::state::RunState;

/// Perform one effect and package its result as the completion event.
///
/// Gateway failures are carried inside the outcome; this never fails.
pub async fn execute<G, S>(gateway: &G, sink: &S, effect: Effect) -> Event
where
    G: Gateway + ?Sized,
    S: ArtifactSink + ?Sized,
{
    let ticket = effect.ticket();
    let outcome = match effect {
        Effect::LoadDefaultPreview { limit, .. } => {
            Outcome::InitialPreview(gateway.fetch_preview(limit).await)
        }
        Effect::Upload { file, .. } => Outcome::Uploaded(gateway.upload_dataset(file).await),
        Effect::FetchPreview { limit, .. } => Outcome::PreviewRefreshed {
            limit,
            result: gateway.fetch_preview(limit).await,
        },
        Effect::Train { request, .. } => Outcome::Trained(gateway.train(&request).await),
        Effect::Reset { .. } => Outcome::ResetDone(gateway.reset_run().await),
        Effect::Download { run_id, kind, .. } => {
            let result = match gateway.download_artifact(&run_id, kind).await {
                Ok(artifact) => sink.save(&artifact).map(|()| artifact.file_name),
                Err(e) => Err(e),
            };
            Outcome::Downloaded { kind, result }
        }
    };
    Event::Completed { ticket, outcome }
}

/// Owns a [`RunState`] and drives it to quiescence: every effect is run
/// and its completion fed back before `dispatch` returns.
///
/// Suited to sequential callers such as tests and scripts. Interactive
/// front ends that must stay responsive while a call is in flight use
/// [`Orchestrator::reduce`] and [`execute`] directly.
pub struct Workflow<G, S> {
    orchestrator: Orchestrator,
    gateway: G,
    sink: S,
    state: RunState,
}

impl<G: Gateway, S: ArtifactSink> Workflow<G, S> {
    pub fn new(orchestrator: Orchestrator, gateway: G, sink: S) -> Self {
        let state = orchestrator.initial_state();
        Self {
            orchestrator,
            gateway,
            sink,
            state,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Reduce one event without running its effect.
    pub fn apply(&mut self, event: Event) -> (Option<Effect>, Option<GuardViolation>) {
        let state = std::mem::replace(&mut self.state, self.orchestrator.initial_state());
        let transition = self.orchestrator.reduce(state, event);
        self.state = transition.state;
        (transition.effect, transition.rejected)
    }

    /// Reduce `event` and run the resulting effects to completion.
    ///
    /// Returns the guard violation if the event itself was rejected.
    pub async fn dispatch(&mut self, event: Event) -> Option<GuardViolation> {
        let (mut effect, rejected) = self.apply(event);
        while let Some(next) = effect {
            debug!("Running effect for ticket {}", next.ticket().0);
            let completion = execute(&self.gateway, &self.sink, next).await;
            effect = self.apply(completion).0;
        }
        rejected
    }
}
