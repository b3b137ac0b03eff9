//! # PathFinder
//!
//! A career-path questionnaire: pick a branch, pick studied subjects, enter
//! marks, and get ranked career predictions with on-demand roadmaps from a
//! remote analysis service.
//!
//! ## Architecture
//!
//! ### ① Clients
//! - `clients/` - thin HTTP wrappers, one per endpoint
//! - `PredictionClient` - `POST /predict`
//! - `RoadmapClient` - `POST /chat`
//! - `HealthClient` - `GET /`
//!
//! ### ② Services
//! - `services/` - turn client results into what the results page shows
//! - `PredictionService` - failures and empty lists become outcomes, never errors
//! - `RoadmapService` - prompt building and per-card roadmap requests
//!
//! ### ③ Workflow
//! - `workflow/` - the questionnaire itself, free of I/O
//! - `Wizard` - step machine (branch → subjects → marks → results)
//! - `ResultsBoard` - result cards with independent roadmap states
//!
//! ### ④ Orchestration
//! - `orchestrator/` - terminal loop, owns the wizard and services and
//!   spawns roadmap requests
//!
//! `models/` holds the catalog and wire types, `render/` turns wizard state
//! into an escaped UI tree (HTML or terminal text).
//!
//! ## Modules

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod utils;
pub mod workflow;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{CareerPrediction, Catalog, CatalogMode, MarksMap, PredictionRequest};
pub use orchestrator::App;
pub use workflow::{PredictionOutcome, ResultsView, Wizard, WizardStep};
