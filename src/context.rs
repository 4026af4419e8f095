use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use trainboard_core::orchestrator::{execute, Effect};
use trainboard_core::{Event, HttpGateway, Orchestrator, RunState};

use crate::api::BrowserDownload;

/// Where effects are executed.
pub struct Runtime {
    pub gateway: HttpGateway,
    pub sink: BrowserDownload,
}

/// Shared handle to the workflow, provided to every component on the page.
///
/// All state changes go through [`WorkflowContext::dispatch`]; components
/// only read `state`.
#[derive(Clone, Copy)]
pub struct WorkflowContext {
    pub state: RwSignal<RunState>,
    orchestrator: StoredValue<Orchestrator>,
    runtime: StoredValue<Rc<Runtime>, LocalStorage>,
}

impl WorkflowContext {
    pub fn new(orchestrator: Orchestrator, runtime: Runtime) -> Self {
        let state = RwSignal::new(orchestrator.initial_state());
        Self {
            state,
            orchestrator: StoredValue::new(orchestrator),
            runtime: StoredValue::new_local(Rc::new(runtime)),
        }
    }

    /// Reduce `event` into the state and start any gateway call it asks for.
    pub fn dispatch(&self, event: Event) {
        let current = self.state.get_untracked();
        let transition = self.orchestrator.with_value(|o| o.reduce(current, event));
        self.state.set(transition.state);
        if let Some(effect) = transition.effect {
            self.run(effect);
        }
    }

    /// Settings that do not live in the run state (offered preview sizes).
    pub fn preview_limits(&self) -> Vec<usize> {
        self.orchestrator
            .with_value(|o| o.config().dataset.limits.clone())
    }

    fn run(&self, effect: Effect) {
        let ctx = *self;
        let runtime = self.runtime.get_value();
        spawn_local(async move {
            let completion = execute(&runtime.gateway, &runtime.sink, effect).await;
            ctx.dispatch(completion);
        });
    }
}

pub fn use_workflow() -> WorkflowContext {
    expect_context::<WorkflowContext>()
}
