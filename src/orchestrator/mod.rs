//! Orchestration layer
//!
//! The only layer that owns long-lived resources: the wizard, the HTTP
//! services and the channel that brings prediction and roadmap replies back from spawned
//! tasks. It schedules work and redraws; business rules stay in `workflow`.
//!
//! ```text
//! orchestrator::App (stdin loop, spawned request tasks)
//!     ↓
//! workflow::Wizard (steps, session, results board)
//!     ↓
//! services (prediction / roadmap)
//!     ↓
//! clients (HTTP: /predict, /chat, /)
//! ```

pub mod app;

pub use app::{parse_command, App, Command, AppEvent};
