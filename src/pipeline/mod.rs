//! Subject processing pipeline.

mod audit;
mod batch;
mod orchestrator;

pub use audit::{AuditEntry, audit_subject};
pub use batch::{BatchSummary, SubjectFailure, process_batch};
pub use orchestrator::{
    Collaborators, OrchestratorOptions, SessionOrchestrator, SessionReport, SubjectReport,
};
