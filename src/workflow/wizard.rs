//! Questionnaire state machine
//!
//! ```text
//! BranchSelect -> SubjectSelect -> MarksEntry -> Results
//! ```
//!
//! A flat catalog starts at `SubjectSelect` and has no branch step. Every
//! rejected operation leaves the wizard exactly as it was.

use tracing::{debug, info, warn};

use crate::error::WizardError;
use crate::models::{parse_mark, Catalog, MarksMap, PredictionRequest, RoadmapContext};
use crate::workflow::results::{PredictionOutcome, ResultsBoard, ResultsView};
use crate::workflow::session::{Session, WizardStep};

/// One subject checkbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectToggle {
    pub subject: String,
    pub checked: bool,
}

/// One mark field; `value` is the raw text typed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkInput {
    pub subject: String,
    pub value: String,
}

/// Questionnaire wizard
#[derive(Debug, Clone)]
pub struct Wizard {
    catalog: Catalog,
    step: WizardStep,
    session: Session,
    toggles: Vec<SubjectToggle>,
    mark_inputs: Vec<MarkInput>,
    results: Option<ResultsView>,
    notice: Option<String>,
    submissions: u64,
    /// Branch and subjects as they were at the latest submission
    submitted: RoadmapContext,
}

impl Wizard {
    pub fn new(catalog: Catalog) -> Self {
        let toggles = match catalog.subjects() {
            Some(subjects) => unchecked(subjects),
            None => Vec::new(),
        };
        let step = first_step(&catalog);

        Self {
            catalog,
            step,
            session: Session::default(),
            toggles,
            mark_inputs: Vec::new(),
            results: None,
            notice: None,
            submissions: 0,
            submitted: RoadmapContext::default(),
        }
    }

    // ========== Accessors ==========

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn toggles(&self) -> &[SubjectToggle] {
        &self.toggles
    }

    pub fn mark_inputs(&self) -> &[MarkInput] {
        &self.mark_inputs
    }

    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    /// Board of the current results, if the prediction succeeded with matches
    pub fn board_mut(&mut self) -> Option<&mut ResultsBoard> {
        match self.results.as_mut() {
            Some(ResultsView::Board(board)) => Some(board),
            _ => None,
        }
    }

    /// Number of the latest submission (0 before the first)
    pub fn submission(&self) -> u64 {
        self.submissions
    }

    /// Validation message shown inline, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Steps the stepper lists (no branch step for a flat catalog)
    pub fn steps(&self) -> Vec<WizardStep> {
        WizardStep::ALL
            .into_iter()
            .filter(|s| *s != WizardStep::BranchSelect || self.catalog.has_branches())
            .collect()
    }

    // ========== Transitions ==========

    /// Enters the assessment at its first step
    pub fn start(&mut self) {
        self.step = first_step(&self.catalog);
        self.notice = None;
    }

    /// Clears every answer and results and returns to the first step.
    ///
    /// The submission counter keeps counting, so roadmap replies for the old
    /// board can never land on a later one.
    pub fn restart(&mut self) {
        self.toggles = match self.catalog.subjects() {
            Some(subjects) => unchecked(subjects),
            None => Vec::new(),
        };
        self.session = Session::default();
        self.mark_inputs.clear();
        self.results = None;
        self.start();
        info!("🔄 Assessment restarted");
    }

    /// Picks a branch and lists its subjects, all unchecked
    pub fn select_branch(&mut self, branch: &str) -> Result<(), WizardError> {
        self.expect_step(WizardStep::BranchSelect)?;

        let subjects = match &self.catalog {
            Catalog::Flat(_) => return Err(WizardError::NoBranches),
            Catalog::Branched(_) => self
                .catalog
                .subjects_for(branch)
                .ok_or_else(|| WizardError::UnknownBranch(branch.to_string()))?,
        };

        self.toggles = unchecked(subjects);
        self.session.branch = Some(branch.to_string());
        self.session.selected_subjects.clear();
        self.notice = None;
        self.step = WizardStep::SubjectSelect;

        info!("🎓 Branch selected: {} ({} subjects)", branch, self.toggles.len());
        Ok(())
    }

    /// Checks or unchecks one subject.
    ///
    /// Selected subjects are recomputed from the checkboxes, so they always
    /// follow catalog order whatever the click order was.
    pub fn toggle_subject(&mut self, subject: &str, checked: bool) -> Result<(), WizardError> {
        self.expect_step(WizardStep::SubjectSelect)?;

        let toggle = self
            .toggles
            .iter_mut()
            .find(|t| t.subject == subject)
            .ok_or_else(|| WizardError::UnknownSubject(subject.to_string()))?;
        toggle.checked = checked;

        self.session.selected_subjects = self
            .toggles
            .iter()
            .filter(|t| t.checked)
            .map(|t| t.subject.clone())
            .collect();

        debug!("Selection now {:?}", self.session.selected_subjects);
        Ok(())
    }

    /// Opens marks entry with one empty field per selected subject
    pub fn proceed_to_marks(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::SubjectSelect)?;

        if self.session.selected_subjects.is_empty() {
            let err = WizardError::NoSubjectsSelected;
            self.notice = Some(err.to_string());
            return Err(err);
        }

        self.mark_inputs = self
            .session
            .selected_subjects
            .iter()
            .map(|subject| MarkInput {
                subject: subject.clone(),
                value: String::new(),
            })
            .collect();
        self.notice = None;
        self.step = WizardStep::MarksEntry;
        Ok(())
    }

    /// Returns to an earlier step; later state is kept
    pub fn go_back(&mut self, target: WizardStep) -> Result<(), WizardError> {
        let reachable = target < self.step
            && (target != WizardStep::BranchSelect || self.catalog.has_branches());
        if !reachable {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to: target,
            });
        }

        self.step = target;
        self.notice = None;
        Ok(())
    }

    /// Types into one mark field
    pub fn set_mark(&mut self, subject: &str, raw: &str) -> Result<(), WizardError> {
        self.expect_step(WizardStep::MarksEntry)?;

        let input = self
            .mark_inputs
            .iter_mut()
            .find(|m| m.subject == subject)
            .ok_or_else(|| WizardError::UnknownSubject(subject.to_string()))?;
        input.value = raw.to_string();
        Ok(())
    }

    /// Reads every mark field; blank or non-numeric fields count as 0
    pub fn snapshot_marks(&self) -> MarksMap {
        self.mark_inputs
            .iter()
            .map(|m| (m.subject.clone(), parse_mark(&m.value)))
            .collect()
    }

    /// Snapshots the marks, shows the loading view and returns the
    /// prediction request built from that snapshot.
    pub fn submit_marks(&mut self) -> Result<PredictionRequest, WizardError> {
        self.expect_step(WizardStep::MarksEntry)?;

        let marks = self.snapshot_marks();
        let request = PredictionRequest::new(self.session.branch.clone(), marks);

        self.submissions += 1;
        self.submitted = self.session.roadmap_context();
        self.results = Some(ResultsView::Loading {
            branch: self.session.branch.clone(),
        });
        self.step = WizardStep::Results;

        info!(
            "📤 Submission #{} {} feature vector {:?}",
            self.submissions, self.session, request.marks
        );
        Ok(request)
    }

    /// Replaces the loading view with the outcome of `submission`.
    ///
    /// Outcomes of an older submission, or arriving when nothing is loading
    /// (after a restart), are dropped. Returns whether the outcome was shown.
    pub fn apply_prediction(&mut self, submission: u64, outcome: PredictionOutcome) -> bool {
        let loading = matches!(self.results, Some(ResultsView::Loading { .. }));
        if submission != self.submissions || !loading {
            debug!(
                "Dropped prediction for submission #{} (current #{})",
                submission, self.submissions
            );
            return false;
        }

        let view = match outcome {
            PredictionOutcome::Matches(predictions) => ResultsView::Board(ResultsBoard::new(
                self.submissions,
                self.submitted.clone(),
                predictions,
            )),
            PredictionOutcome::NoMatches => ResultsView::NoMatches,
            PredictionOutcome::Failed(reason) => {
                warn!("⚠️ Prediction failed: {}", reason);
                ResultsView::Failed { reason }
            }
        };
        self.results = Some(view);
        true
    }

    fn expect_step(&self, step: WizardStep) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::WrongStep(self.step))
        }
    }
}

fn first_step(catalog: &Catalog) -> WizardStep {
    if catalog.has_branches() {
        WizardStep::BranchSelect
    } else {
        WizardStep::SubjectSelect
    }
}

fn unchecked(subjects: &[String]) -> Vec<SubjectToggle> {
    subjects
        .iter()
        .map(|subject| SubjectToggle {
            subject: subject.clone(),
            checked: false,
        })
        .collect()
}
