//! Session state
//!
//! What the student has told the questionnaire so far: branch and the
//! selected subjects. Owned by the wizard and handed out by reference.

use std::fmt;

use crate::models::RoadmapContext;

/// Wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    BranchSelect,
    SubjectSelect,
    MarksEntry,
    Results,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::BranchSelect,
        WizardStep::SubjectSelect,
        WizardStep::MarksEntry,
        WizardStep::Results,
    ];

    /// 1-based position shown in the stepper
    pub fn number(self) -> u8 {
        match self {
            WizardStep::BranchSelect => 1,
            WizardStep::SubjectSelect => 2,
            WizardStep::MarksEntry => 3,
            WizardStep::Results => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::BranchSelect => "Branch",
            WizardStep::SubjectSelect => "Subjects",
            WizardStep::MarksEntry => "Marks",
            WizardStep::Results => "Results",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Current branch and selected subjects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// `None` until a branch is chosen, and always for a flat catalog
    pub branch: Option<String>,
    /// Checked subjects in catalog order, no duplicates
    pub selected_subjects: Vec<String>,
}

impl Session {
    pub fn is_selected(&self, subject: &str) -> bool {
        self.selected_subjects.iter().any(|s| s == subject)
    }

    /// Snapshot for roadmap prompts
    pub fn roadmap_context(&self) -> RoadmapContext {
        RoadmapContext {
            branch: self.branch.clone(),
            subjects: self.selected_subjects.clone(),
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[branch {} | {} subjects]",
            self.branch.as_deref().unwrap_or("-"),
            self.selected_subjects.len()
        )
    }
}
