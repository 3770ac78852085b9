//! Check execution orchestration.
//!
//! - [`executor`] - The [`AuditRunner`]: gate, perform, capture
//! - [`options`] - [`RunnerOptions`] and [`RunFilter`]
//! - [`record`] - [`AuditRecord`] and the per-execution [`ExecutionState`]

pub mod executor;
pub mod options;
pub mod record;

pub use executor::{AuditRunner, RunProgress};
pub use options::{RunFilter, RunnerOptions};
pub use record::{AuditRecord, ExecutionState};
