//! Workflow state held by the orchestrator.

use std::collections::BTreeSet;
use std::fmt;

use crate::analytics::NormalizeMode;
use crate::config::{AppConfig, TrainingDefaults};
use crate::error::GuardViolation;
use crate::model::{
    BestOverall, ModelKey, ModelPreset, ModelResult, RunId, Scoring, SearchStrategy, TrainRequest,
};
use crate::preview::PreviewTable;

// =============================================================================
// STEPS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Step {
    #[default]
    Dataset,
    Configure,
    Results,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Dataset, Step::Configure, Step::Results];

    pub fn label(self) -> &'static str {
        match self {
            Step::Dataset => "Dataset",
            Step::Configure => "Configure",
            Step::Results => "Results",
        }
    }

    /// 1-based position shown in the stepper.
    pub fn number(self) -> usize {
        match self {
            Step::Dataset => 1,
            Step::Configure => 2,
            Step::Results => 3,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Dataset => None,
            Step::Configure => Some(Step::Dataset),
            Step::Results => Some(Step::Configure),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// TRAINING CONFIGURATION
// =============================================================================

/// Editable training settings on the Configure step.
///
/// The target column is held on [`RunState`] because it follows the loaded
/// dataset; everything here survives uploads and resets.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub test_size: f64,
    pub random_seed: u64,
    pub cv_folds: u32,
    pub cv_min: u32,
    pub cv_max: u32,
    pub scoring: Scoring,
    pub use_class_weight: bool,
    pub search_strategy: SearchStrategy,
    pub max_iterations: u32,
    pub selected_models: BTreeSet<ModelKey>,
}

impl TrainConfig {
    pub fn from_defaults(defaults: &TrainingDefaults) -> Self {
        Self {
            test_size: defaults.test_size,
            random_seed: defaults.random_seed,
            cv_folds: defaults.cv_folds,
            cv_min: defaults.cv_min,
            cv_max: defaults.cv_max,
            scoring: defaults.scoring,
            use_class_weight: defaults.use_class_weight,
            search_strategy: defaults.search,
            max_iterations: defaults.max_iterations,
            selected_models: defaults.selected_models.iter().copied().collect(),
        }
    }

    pub fn is_selected(&self, key: ModelKey) -> bool {
        self.selected_models.contains(&key)
    }

    pub fn toggle_model(&mut self, key: ModelKey) {
        if !self.selected_models.remove(&key) {
            self.selected_models.insert(key);
        }
    }

    pub fn apply_preset(&mut self, preset: ModelPreset) {
        self.selected_models = preset.models().iter().copied().collect();
    }

    pub fn set_cv_folds(&mut self, folds: u32) {
        self.cv_folds = folds.clamp(self.cv_min, self.cv_max);
    }

    /// Build the request body for `target`, checking every precondition.
    pub fn request_for(
        &self,
        target: &str,
        columns: &[String],
    ) -> Result<TrainRequest, GuardViolation> {
        if !columns.iter().any(|c| c == target) {
            return Err(GuardViolation::TargetNotInColumns);
        }
        if self.selected_models.is_empty() {
            return Err(GuardViolation::NoModelsSelected);
        }
        if self.cv_folds < 2 {
            return Err(GuardViolation::InvalidCvFolds);
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(GuardViolation::InvalidTestSize);
        }
        Ok(TrainRequest {
            target: target.to_string(),
            test_size: self.test_size,
            random_seed: self.random_seed,
            cv_folds: self.cv_folds,
            scoring: self.scoring,
            use_class_weight: self.use_class_weight,
            selected_models: self.selected_models.iter().copied().collect(),
            search_strategy: self.search_strategy,
            max_iterations: self.max_iterations,
        })
    }
}

// =============================================================================
// FEEDBACK
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice-info",
            NoticeLevel::Success => "notice-success",
            NoticeLevel::Warning => "notice-warning",
            NoticeLevel::Error => "notice-error",
        }
    }
}

/// Transient, non-blocking feedback. `last_error` is separate and stays
/// until dismissed or replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

// =============================================================================
// IN-FLIGHT REQUESTS
// =============================================================================

/// Identifies one issued effect; outcomes are matched back by ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    InitialLoad,
    Upload,
    PreviewRefresh,
    Train,
    Reset,
}

/// The state-changing request currently awaited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    pub ticket: Ticket,
    pub kind: PendingKind,
    /// Step the user was on when the request was issued
    pub issued_on: Step,
}

// =============================================================================
// RUN STATE
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub step: Step,
    pub preview: Option<PreviewTable>,
    /// Row window requested for the preview
    pub preview_limit: usize,
    pub target: Option<String>,
    pub config: TrainConfig,
    pub results: Option<Vec<ModelResult>>,
    pub best: Option<BestOverall>,
    pub run_id: Option<RunId>,
    pub busy: bool,
    pub last_error: Option<String>,
    pub notice: Option<Notice>,
    pub matrix_mode: NormalizeMode,
    pub pending: Option<Pending>,
    pub(crate) next_ticket: u64,
}

impl RunState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            step: Step::Dataset,
            preview: None,
            preview_limit: config.dataset.default_limit,
            target: None,
            config: TrainConfig::from_defaults(&config.training),
            results: None,
            best: None,
            run_id: None,
            busy: false,
            last_error: None,
            notice: None,
            matrix_mode: NormalizeMode::default(),
            pending: None,
            next_ticket: 1,
        }
    }

    pub(crate) fn issue_ticket(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    pub fn columns(&self) -> &[String] {
        self.preview.as_ref().map(PreviewTable::columns).unwrap_or(&[])
    }

    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }

    /// Whether navigating to `step` is currently allowed.
    pub fn can_go_to(&self, step: Step) -> Result<(), GuardViolation> {
        match step {
            Step::Dataset => Ok(()),
            Step::Configure if self.preview.is_none() => Err(GuardViolation::NoPreview),
            Step::Configure => Ok(()),
            Step::Results if self.results.is_none() => Err(GuardViolation::NoResults),
            Step::Results => Ok(()),
        }
    }

    pub fn upload_guard(&self) -> Result<(), GuardViolation> {
        if self.busy {
            Err(GuardViolation::Busy)
        } else {
            Ok(())
        }
    }

    /// The request a Train action would send, or why it cannot be sent.
    pub fn train_guard(&self) -> Result<TrainRequest, GuardViolation> {
        if self.busy {
            return Err(GuardViolation::Busy);
        }
        let preview = self.preview.as_ref().ok_or(GuardViolation::NoPreview)?;
        let target = self
            .target
            .as_deref()
            .ok_or(GuardViolation::TargetNotInColumns)?;
        self.config.request_for(target, preview.columns())
    }

    pub fn download_guard(&self) -> Result<&RunId, GuardViolation> {
        self.run_id.as_ref().ok_or(GuardViolation::NoRun)
    }
}
