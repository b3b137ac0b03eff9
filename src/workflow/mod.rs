//! Workflow layer
//!
//! The questionnaire itself: session state, the step machine and the results
//! page. No network access here; services feed outcomes in.

pub mod results;
pub mod session;
pub mod wizard;

pub use results::{
    PredictionOutcome, ResultCard, ResultsBoard, ResultsView, RoadmapState, RoadmapTicket,
};
pub use session::{Session, WizardStep};
pub use wizard::{MarkInput, SubjectToggle, Wizard};
