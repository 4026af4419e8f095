//! The workflow reducer: `(state, event) -> (state, effect)`.
//!
//! All state changes happen here. Gateway calls are described as
//! [`Effect`]s and come back as [`Event::Completed`], so every transition
//! is a synchronous, testable function.

use tracing::{debug, info, warn};

use crate::analytics::resolve_best;
use crate::config::AppConfig;
use crate::error::{GatewayError, GuardViolation};
use crate::gateway::ArtifactKind;
use crate::model::{DatasetPreview, ResetAck, TrainResponse, UploadFile};
use crate::preview::PreviewTable;

use super::event::{Effect, Event, Outcome, Transition};
use super::state::{Notice, NoticeLevel, Pending, PendingKind, RunState, Step, Ticket};

pub struct Orchestrator {
    config: AppConfig,
}

impl Orchestrator {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn initial_state(&self) -> RunState {
        RunState::new(&self.config)
    }

    pub fn reduce(&self, mut state: RunState, event: Event) -> Transition {
        match event {
            // Edits and downloads are locked while a request is in flight; the
            // form keeps showing what was sent.
            Event::SortPreview(_)
            | Event::SetTarget(_)
            | Event::ToggleModel(_)
            | Event::ApplyPreset(_)
            | Event::SetCvFolds(_)
            | Event::SetSearchStrategy(_)
            | Event::SetUseClassWeight(_)
            | Event::SetMaxIterations(_)
            | Event::Download(_)
                if state.busy =>
            {
                reject(state, GuardViolation::Busy, "action while busy")
            }
            Event::Initialize => self.initialize(state),
            Event::Upload(file) => self.upload(state, file),
            Event::ChangeLimit(limit) => self.change_limit(state, limit),
            Event::SortPreview(column) => sort_preview(state, &column),
            Event::GoTo(step) => go_to(state, step),
            Event::SetTarget(target) => set_target(state, target),
            Event::ToggleModel(key) => {
                state.config.toggle_model(key);
                Transition::stay(state)
            }
            Event::ApplyPreset(preset) => {
                state.config.apply_preset(preset);
                Transition::stay(state)
            }
            Event::SetCvFolds(folds) => {
                state.config.set_cv_folds(folds);
                Transition::stay(state)
            }
            Event::SetSearchStrategy(strategy) => {
                state.config.search_strategy = strategy;
                Transition::stay(state)
            }
            Event::SetUseClassWeight(enabled) => {
                state.config.use_class_weight = enabled;
                Transition::stay(state)
            }
            Event::SetMaxIterations(iterations) => {
                state.config.max_iterations = iterations.max(1);
                Transition::stay(state)
            }
            Event::Train => train(state),
            Event::ToggleMatrixMode => {
                state.matrix_mode = state.matrix_mode.toggled();
                Transition::stay(state)
            }
            Event::Reset => reset(state),
            Event::Download(kind) => download(state, kind),
            Event::DismissError => {
                state.last_error = None;
                Transition::stay(state)
            }
            Event::DismissNotice => {
                state.notice = None;
                Transition::stay(state)
            }
            Event::Completed { ticket, outcome } => self.complete(state, ticket, outcome),
        }
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    fn initialize(&self, mut state: RunState) -> Transition {
        if state.preview.is_some() || state.pending.is_some() {
            debug!("Initialize ignored: workflow already started");
            return Transition::stay(state);
        }
        let ticket = begin(&mut state, PendingKind::InitialLoad);
        let limit = state.preview_limit;
        Transition::with_effect(state, Effect::LoadDefaultPreview { ticket, limit })
    }

    fn upload(&self, mut state: RunState, file: Option<UploadFile>) -> Transition {
        if let Err(violation) = state.upload_guard() {
            return reject(state, violation, "upload");
        }
        match &file {
            Some(f) => info!("Uploading dataset '{}' ({} bytes)", f.name, f.bytes.len()),
            None => info!("Loading the service's default dataset"),
        }
        state.last_error = None;
        state.notice = None;
        state.busy = true;
        let ticket = begin(&mut state, PendingKind::Upload);
        Transition::with_effect(state, Effect::Upload { ticket, file })
    }

    fn change_limit(&self, mut state: RunState, limit: usize) -> Transition {
        if !self.config.dataset.limits.contains(&limit) {
            return reject(state, GuardViolation::UnsupportedLimit, "preview limit change");
        }
        if state.busy {
            return reject(state, GuardViolation::Busy, "preview limit change");
        }
        if state.preview.is_none() {
            return reject(state, GuardViolation::NoPreview, "preview limit change");
        }
        info!("Fetching preview with {} rows", limit);
        state.busy = true;
        let ticket = begin(&mut state, PendingKind::PreviewRefresh);
        Transition::with_effect(state, Effect::FetchPreview { ticket, limit })
    }

    // =========================================================================
    // OUTCOMES
    // =========================================================================

    fn complete(&self, mut state: RunState, ticket: Ticket, outcome: Outcome) -> Transition {
        // Downloads never hold the workflow, so they are not matched against
        // the pending request.
        if let Outcome::Downloaded { kind, result } = outcome {
            return finish_download(state, kind, result);
        }

        let Some(pending) = settle(&mut state, ticket) else {
            debug!("Discarding superseded response (ticket {})", ticket.0);
            return Transition::stay(state);
        };
        let navigated = state.step != pending.issued_on;

        match outcome {
            Outcome::InitialPreview(result) => self.finish_initial_load(state, result),
            Outcome::Uploaded(result) => self.finish_upload(state, result, navigated),
            Outcome::PreviewRefreshed { limit, result } => {
                finish_refresh(state, limit, result, &self.config.dataset.canonical_target)
            }
            Outcome::Trained(result) => finish_train(state, result, navigated),
            Outcome::ResetDone(result) => self.finish_reset(state, result),
            Outcome::Downloaded { .. } => Transition::stay(state),
        }
    }

    fn finish_initial_load(
        &self,
        mut state: RunState,
        result: Result<DatasetPreview, GatewayError>,
    ) -> Transition {
        match result {
            Ok(dataset) => {
                info!(
                    "Default dataset available: {} rows, {} columns",
                    dataset.row_count, dataset.column_count
                );
                state.target = dataset.default_target(&self.config.dataset.canonical_target);
                state.preview = Some(PreviewTable::new(dataset, state.preview_limit));
            }
            // A missing default dataset is not worth bothering the user about
            Err(e) => debug!("Default preview unavailable: {}", e),
        }
        Transition::stay(state)
    }

    fn finish_upload(
        &self,
        mut state: RunState,
        result: Result<DatasetPreview, GatewayError>,
        navigated: bool,
    ) -> Transition {
        match result {
            Ok(dataset) => {
                info!(
                    "Dataset loaded: {} rows, {} columns",
                    dataset.row_count, dataset.column_count
                );
                state.notice = Some(Notice::new(
                    NoticeLevel::Success,
                    format!(
                        "Dataset loaded: {} rows, {} columns",
                        dataset.row_count, dataset.column_count
                    ),
                ));
                state.target = dataset.default_target(&self.config.dataset.canonical_target);
                state.preview_limit = self.config.dataset.default_limit;
                state.preview = Some(PreviewTable::new(dataset, state.preview_limit));
                if navigated {
                    info!("Upload finished after navigation, staying on {}", state.step);
                } else {
                    state.step = Step::Configure;
                }
            }
            Err(e) => {
                warn!("Upload failed: {}", e);
                state.last_error = Some(e.to_string());
            }
        }
        Transition::stay(state)
    }

    fn finish_reset(
        &self,
        state: RunState,
        result: Result<ResetAck, GatewayError>,
    ) -> Transition {
        let mut fresh = RunState {
            config: state.config,
            next_ticket: state.next_ticket,
            ..self.initial_state()
        };
        match result {
            Ok(_) => {
                info!("Run state cleared");
                fresh.notice = Some(Notice::new(NoticeLevel::Info, "Workspace reset"));
            }
            Err(e) => {
                warn!("Reset failed on the service: {}", e);
                fresh.last_error = Some(e.to_string());
            }
        }
        Transition::stay(fresh)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn reject(state: RunState, violation: GuardViolation, action: &str) -> Transition {
    warn!("Ignoring {}: {}", action, violation);
    Transition::rejected(state, violation)
}

/// Issue a ticket and record it as the awaited request.
fn begin(state: &mut RunState, kind: PendingKind) -> Ticket {
    let ticket = state.issue_ticket();
    state.pending = Some(Pending {
        ticket,
        kind,
        issued_on: state.step,
    });
    ticket
}

/// Clear the pending request if `ticket` is the one awaited.
fn settle(state: &mut RunState, ticket: Ticket) -> Option<Pending> {
    match state.pending {
        Some(pending) if pending.ticket == ticket => {
            state.pending = None;
            state.busy = false;
            Some(pending)
        }
        _ => None,
    }
}

fn sort_preview(mut state: RunState, column: &str) -> Transition {
    if state.preview.is_none() {
        return reject(state, GuardViolation::NoPreview, "sort");
    }
    if !state.columns().iter().any(|c| c == column) {
        debug!("Sort requested on unknown column '{}'", column);
    } else if let Some(preview) = state.preview.as_mut() {
        preview.toggle_sort(column);
    }
    Transition::stay(state)
}

fn go_to(mut state: RunState, step: Step) -> Transition {
    if let Err(violation) = state.can_go_to(step) {
        return reject(state, violation, "navigation");
    }
    if state.step != step {
        debug!("Step {} -> {}", state.step, step);
        state.step = step;
    }
    Transition::stay(state)
}

fn set_target(mut state: RunState, target: String) -> Transition {
    if !state.columns().contains(&target) {
        return reject(state, GuardViolation::TargetNotInColumns, "target change");
    }
    state.target = Some(target);
    Transition::stay(state)
}

fn train(mut state: RunState) -> Transition {
    let request = match state.train_guard() {
        Ok(request) => request,
        Err(violation) => return reject(state, violation, "train"),
    };
    info!(
        "Training {} models on target '{}' ({}-fold CV, {} search)",
        request.selected_models.len(),
        request.target,
        request.cv_folds,
        request.search_strategy.as_str()
    );
    state.last_error = None;
    state.notice = None;
    state.busy = true;
    let ticket = begin(&mut state, PendingKind::Train);
    Transition::with_effect(state, Effect::Train { ticket, request })
}

/// Reset is accepted at any time; a request still in flight is superseded
/// and its response discarded.
fn reset(mut state: RunState) -> Transition {
    if let Some(pending) = state.pending {
        info!("Reset supersedes pending {:?} request", pending.kind);
    }
    state.busy = true;
    let ticket = begin(&mut state, PendingKind::Reset);
    Transition::with_effect(state, Effect::Reset { ticket })
}

fn download(mut state: RunState, kind: ArtifactKind) -> Transition {
    let Some(run_id) = state.run_id.clone() else {
        state.notice = Some(Notice::new(
            NoticeLevel::Warning,
            "Train a model before downloading",
        ));
        return reject(state, GuardViolation::NoRun, "download");
    };
    info!("Downloading {} for run {}", kind.label(), run_id);
    state.notice = Some(Notice::new(
        NoticeLevel::Info,
        format!("Downloading {}...", kind.label()),
    ));
    let ticket = state.issue_ticket();
    Transition::with_effect(
        state,
        Effect::Download {
            ticket,
            run_id,
            kind,
        },
    )
}

fn finish_refresh(
    mut state: RunState,
    limit: usize,
    result: Result<DatasetPreview, GatewayError>,
    canonical_target: &str,
) -> Transition {
    match result {
        Ok(dataset) => {
            let target_kept = state
                .target
                .as_deref()
                .is_some_and(|t| dataset.has_column(t));
            if !target_kept {
                state.target = dataset.default_target(canonical_target);
            }
            state.preview_limit = limit;
            state.preview = Some(PreviewTable::new(dataset, limit));
        }
        Err(e) => {
            warn!("Preview refresh failed: {}", e);
            state.last_error = Some(e.to_string());
        }
    }
    Transition::stay(state)
}

fn finish_train(
    mut state: RunState,
    result: Result<TrainResponse, GatewayError>,
    navigated: bool,
) -> Transition {
    match result {
        Ok(response) => {
            let best_name = resolve_best(&response.results, response.best.as_ref())
                .map(|r| r.name.clone());
            info!(
                "Training finished: {} results, run {}, best {:?}",
                response.results.len(),
                response.run_id,
                best_name
            );
            let text = match &best_name {
                Some(name) => format!("Training complete. Best model: {}", name),
                None => "Training complete".to_string(),
            };
            state.notice = Some(Notice::new(NoticeLevel::Success, text));
            state.results = Some(response.results);
            state.best = response.best;
            state.run_id = Some(response.run_id);
            if navigated {
                info!("Training finished after navigation, staying on {}", state.step);
            } else {
                state.step = Step::Results;
            }
        }
        Err(e) => {
            warn!("Training failed: {}", e);
            state.last_error = Some(e.to_string());
        }
    }
    Transition::stay(state)
}

fn finish_download(
    mut state: RunState,
    kind: ArtifactKind,
    result: Result<String, GatewayError>,
) -> Transition {
    match result {
        Ok(file_name) => {
            info!("Saved {} as {}", kind.label(), file_name);
            state.notice = Some(Notice::new(
                NoticeLevel::Success,
                format!("Saved {}", file_name),
            ));
        }
        Err(e) => {
            warn!("{} download failed: {}", kind.label(), e);
            state.last_error = Some(e.to_string());
        }
    }
    Transition::stay(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use crate::model::{ModelKey, RunId};
    use serde_json::json;

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(default_config())
    }

    fn dataset(columns: &[&str]) -> DatasetPreview {
        let row: serde_json::Map<String, serde_json::Value> = columns
            .iter()
            .map(|c| (c.to_string(), json!(1)))
            .collect();
        DatasetPreview {
            row_count: 10,
            column_count: columns.len(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: vec![row],
        }
    }

    fn response() -> TrainResponse {
        serde_json::from_value(json!({
            "run_id": "r1",
            "results": [
                {"key": "logreg", "name": "Logistic Regression", "metrics": {"f1_macro": 0.7}},
                {"key": "dt", "name": "Decision Tree", "metrics": {"f1_macro": 0.9}}
            ],
            "best_overall": {"key": "dt", "name": "Decision Tree"}
        }))
        .unwrap()
    }

    /// Feed `event`, returning the new state and the requested effect.
    fn step(o: &Orchestrator, state: RunState, event: Event) -> (RunState, Option<Effect>) {
        let t = o.reduce(state, event);
        (t.state, t.effect)
    }

    fn uploaded(o: &Orchestrator, columns: &[&str]) -> RunState {
        let (state, effect) = step(o, o.initial_state(), Event::Upload(None));
        let ticket = effect.unwrap().ticket();
        let (state, _) = step(
            o,
            state,
            Event::Completed {
                ticket,
                outcome: Outcome::Uploaded(Ok(dataset(columns))),
            },
        );
        state
    }

    #[test]
    fn test_upload_success_advances_and_picks_target() {
        let o = orchestrator();
        let state = uploaded(&o, &["age", "income", "label"]);
        assert_eq!(state.step, Step::Configure);
        assert_eq!(state.target.as_deref(), Some("label"));
        assert!(!state.busy);
        assert!(state.pending.is_none());

        let state = uploaded(&o, &["NObeyesdad", "age"]);
        assert_eq!(state.target.as_deref(), Some("NObeyesdad"));
    }

    #[test]
    fn test_upload_sets_busy_and_blocks_second_upload() {
        let o = orchestrator();
        let (state, effect) = step(&o, o.initial_state(), Event::Upload(None));
        assert!(state.busy);
        assert!(matches!(effect, Some(Effect::Upload { file: None, .. })));

        let t = o.reduce(state, Event::Upload(None));
        assert_eq!(t.rejected, Some(GuardViolation::Busy));
        assert!(t.effect.is_none());
    }

    #[test]
    fn test_upload_failure_stays_on_dataset() {
        let o = orchestrator();
        let (state, effect) = step(&o, o.initial_state(), Event::Upload(None));
        let (state, _) = step(
            &o,
            state,
            Event::Completed {
                ticket: effect.unwrap().ticket(),
                outcome: Outcome::Uploaded(Err(GatewayError::Transport("refused".into()))),
            },
        );
        assert_eq!(state.step, Step::Dataset);
        assert!(state.preview.is_none());
        assert!(!state.busy);
        assert_eq!(state.last_error.as_deref(), Some("Network error: refused"));
    }

    #[test]
    fn test_initial_load_is_silent() {
        let o = orchestrator();
        let (state, effect) = step(&o, o.initial_state(), Event::Initialize);
        assert!(!state.busy);
        let ticket = match effect {
            Some(Effect::LoadDefaultPreview { ticket, limit }) => {
                assert_eq!(limit, 5);
                ticket
            }
            other => panic!("unexpected effect {:?}", other),
        };
        let (state, _) = step(
            &o,
            state,
            Event::Completed {
                ticket,
                outcome: Outcome::InitialPreview(Err(GatewayError::Status {
                    status: 500,
                    message: "no default".into(),
                })),
            },
        );
        assert!(state.last_error.is_none());
        assert_eq!(state.step, Step::Dataset);
        assert!(state.pending.is_none());
    }

    #[test]
    fn test_initial_load_does_not_advance_step() {
        let o = orchestrator();
        let (state, effect) = step(&o, o.initial_state(), Event::Initialize);
        let (state, _) = step(
            &o,
            state,
            Event::Completed {
                ticket: effect.unwrap().ticket(),
                outcome: Outcome::InitialPreview(Ok(dataset(&["NObeyesdad", "age"]))),
            },
        );
        assert_eq!(state.step, Step::Dataset);
        assert_eq!(state.target.as_deref(), Some("NObeyesdad"));
        assert!(state.can_go_to(Step::Configure).is_ok());
    }

    #[test]
    fn test_navigation_guards() {
        let o = orchestrator();
        let t = o.reduce(o.initial_state(), Event::GoTo(Step::Configure));
        assert_eq!(t.rejected, Some(GuardViolation::NoPreview));
        assert_eq!(t.state.step, Step::Dataset);

        let state = uploaded(&o, &["a", "b"]);
        let t = o.reduce(state, Event::GoTo(Step::Results));
        assert_eq!(t.rejected, Some(GuardViolation::NoResults));

        let (state, _) = step(&o, t.state, Event::GoTo(Step::Dataset));
        assert_eq!(state.step, Step::Dataset);
        assert!(state.preview.is_some(), "backward navigation keeps the preview");
    }

    #[test]
    fn test_train_success_and_failure() {
        let o = orchestrator();
        let state = uploaded(&o, &["age", "income", "label"]);
        let (state, _) = step(&o, state, Event::ApplyPreset(crate::model::ModelPreset::Fast));
        let (state, effect) = step(&o, state, Event::Train);
        let ticket = match effect {
            Some(Effect::Train { ticket, request }) => {
                assert_eq!(request.selected_models, vec![ModelKey::Logreg, ModelKey::Dt]);
                assert_eq!(request.target, "label");
                ticket
            }
            other => panic!("unexpected effect {:?}", other),
        };
        assert!(state.busy);

        let failed = o
            .reduce(
                state.clone(),
                Event::Completed {
                    ticket,
                    outcome: Outcome::Trained(Err(GatewayError::Status {
                        status: 500,
                        message: "Training failed".into(),
                    })),
                },
            )
            .state;
        assert_eq!(failed.step, Step::Configure);
        assert_eq!(failed.last_error.as_deref(), Some("Training failed"));
        assert!(failed.results.is_none());

        let (state, _) = step(
            &o,
            state,
            Event::Completed {
                ticket,
                outcome: Outcome::Trained(Ok(response())),
            },
        );
        assert_eq!(state.step, Step::Results);
        assert_eq!(state.run_id, Some(RunId("r1".into())));
        assert_eq!(state.best.as_ref().map(|b| b.key), Some(ModelKey::Dt));
        assert!(!state.busy);
    }

    #[test]
    fn test_train_rejected_without_models() {
        let o = orchestrator();
        let mut state = uploaded(&o, &["a", "label"]);
        state.config.selected_models.clear();
        let t = o.reduce(state, Event::Train);
        assert_eq!(t.rejected, Some(GuardViolation::NoModelsSelected));
        assert!(t.effect.is_none());
        assert!(!t.state.busy);
    }

    #[test]
    fn test_late_training_response_keeps_step() {
        let o = orchestrator();
        let state = uploaded(&o, &["a", "label"]);
        let (state, effect) = step(&o, state, Event::Train);
        let (state, _) = step(&o, state, Event::GoTo(Step::Dataset));
        let (state, _) = step(
            &o,
            state,
            Event::Completed {
                ticket: effect.unwrap().ticket(),
                outcome: Outcome::Trained(Ok(response())),
            },
        );
        assert_eq!(state.step, Step::Dataset);
        assert!(state.results.is_some());
        assert!(!state.busy);
    }

    #[test]
    fn test_reset_supersedes_pending_request() {
        let o = orchestrator();
        let state = uploaded(&o, &["a", "label"]);
        let (state, train) = step(&o, state, Event::Train);
        let (state, reset) = step(&o, state, Event::Reset);

        let (state, _) = step(
            &o,
            state,
            Event::Completed {
                ticket: train.unwrap().ticket(),
                outcome: Outcome::Trained(Ok(response())),
            },
        );
        assert!(state.results.is_none(), "superseded response must be dropped");
        assert!(state.busy);

        let (state, _) = step(
            &o,
            state,
            Event::Completed {
                ticket: reset.unwrap().ticket(),
                outcome: Outcome::ResetDone(Ok(ResetAck { ok: true })),
            },
        );
        assert_eq!(state.step, Step::Dataset);
        assert!(state.preview.is_none());
        assert!(state.target.is_none());
        assert!(!state.busy);
    }

    #[test]
    fn test_reset_keeps_training_settings() {
        let o = orchestrator();
        let (state, _) = step(&o, o.initial_state(), Event::SetCvFolds(8));
        let (state, effect) = step(&o, state, Event::Reset);
        let (state, _) = step(
            &o,
            state,
            Event::Completed {
                ticket: effect.unwrap().ticket(),
                outcome: Outcome::ResetDone(Err(GatewayError::Status {
                    status: 500,
                    message: "Reset failed".into(),
                })),
            },
        );
        assert_eq!(state.config.cv_folds, 8);
        assert_eq!(state.last_error.as_deref(), Some("Reset failed"));
        assert_eq!(state.step, Step::Dataset);
    }

    #[test]
    fn test_download_without_run_is_reported() {
        let o = orchestrator();
        let t = o.reduce(o.initial_state(), Event::Download(ArtifactKind::Model));
        assert_eq!(t.rejected, Some(GuardViolation::NoRun));
        assert!(t.effect.is_none());
        assert_eq!(
            t.state.notice.map(|n| n.level),
            Some(NoticeLevel::Warning)
        );
    }

    #[test]
    fn test_change_limit_refetches_and_resets_sort() {
        let o = orchestrator();
        let state = uploaded(&o, &["a", "label"]);
        let (state, _) = step(&o, state, Event::SortPreview("a".into()));
        assert!(state.preview.as_ref().unwrap().sort().is_some());

        let t = o.reduce(state.clone(), Event::ChangeLimit(7));
        assert_eq!(t.rejected, Some(GuardViolation::UnsupportedLimit));

        let (state, effect) = step(&o, state, Event::ChangeLimit(25));
        let ticket = match effect {
            Some(Effect::FetchPreview { ticket, limit: 25 }) => ticket,
            other => panic!("unexpected effect {:?}", other),
        };
        let (state, _) = step(
            &o,
            state,
            Event::Completed {
                ticket,
                outcome: Outcome::PreviewRefreshed {
                    limit: 25,
                    result: Ok(dataset(&["a", "label"])),
                },
            },
        );
        assert_eq!(state.preview_limit, 25);
        assert!(state.preview.as_ref().unwrap().sort().is_none());
        assert_eq!(state.target.as_deref(), Some("label"));
    }

    #[test]
    fn test_set_target_must_be_a_column() {
        let o = orchestrator();
        let state = uploaded(&o, &["a", "b", "label"]);
        let (state, _) = step(&o, state, Event::SetTarget("a".into()));
        assert_eq!(state.target.as_deref(), Some("a"));
        let t = o.reduce(state, Event::SetTarget("zzz".into()));
        assert_eq!(t.rejected, Some(GuardViolation::TargetNotInColumns));
        assert_eq!(t.state.target.as_deref(), Some("a"));
    }

    #[test]
    fn test_edits_are_locked_while_training() {
        let o = orchestrator();
        let state = uploaded(&o, &["a", "label"]);
        let (state, effect) = step(&o, state, Event::Train);
        let sent = match effect {
            Some(Effect::Train { request, .. }) => request,
            other => panic!("unexpected effect {:?}", other),
        };
        assert!(state.busy);

        for event in [
            Event::ToggleModel(ModelKey::Logreg),
            Event::SetTarget("a".into()),
            Event::ApplyPreset(crate::model::ModelPreset::Fast),
            Event::SetCvFolds(3),
            Event::SetUseClassWeight(false),
            Event::SetMaxIterations(99),
            Event::SortPreview("a".into()),
        ] {
            let t = o.reduce(state.clone(), event);
            assert_eq!(t.rejected, Some(GuardViolation::Busy));
            assert!(t.effect.is_none());
            assert_eq!(t.state.target.as_deref(), Some(sent.target.as_str()));
            assert_eq!(t.state.config, state.config);
            assert!(t.state.preview.as_ref().unwrap().sort().is_none());
        }

        // Display-only toggles stay available
        let t = o.reduce(state, Event::ToggleMatrixMode);
        assert_eq!(t.rejected, None);
    }

    #[test]
    fn test_download_waits_for_pending_request() {
        let o = orchestrator();
        let state = uploaded(&o, &["a", "label"]);
        let (state, effect) = step(&o, state, Event::Train);
        let (state, _) = step(
            &o,
            state,
            Event::Completed {
                ticket: effect.unwrap().ticket(),
                outcome: Outcome::Trained(Ok(response())),
            },
        );
        let (state, _) = step(&o, state, Event::Train);
        assert!(state.busy);

        let t = o.reduce(state, Event::Download(ArtifactKind::Model));
        assert_eq!(t.rejected, Some(GuardViolation::Busy));
        assert!(t.effect.is_none());
    }

    #[test]
    fn test_refresh_falls_back_to_canonical_target() {
        let o = orchestrator();
        let state = uploaded(&o, &["a", "label"]);
        assert_eq!(state.target.as_deref(), Some("label"));

        let (state, effect) = step(&o, state, Event::ChangeLimit(10));
        let (state, _) = step(
            &o,
            state,
            Event::Completed {
                ticket: effect.unwrap().ticket(),
                outcome: Outcome::PreviewRefreshed {
                    limit: 10,
                    result: Ok(dataset(&["NObeyesdad", "a", "b"])),
                },
            },
        );
        assert_eq!(state.target.as_deref(), Some("NObeyesdad"));
    }
}
