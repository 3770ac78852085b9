//! Result aggregation and the report snapshot.
//!
//! - [`aggregator`] - [`ResultAggregator`] and [`CategoryStatus`]
//! - [`snapshot`] - [`AuditSnapshot`], the stable shape handed to reporting surfaces

pub mod aggregator;
pub mod snapshot;

pub use aggregator::{CategoryStatus, ResultAggregator};
pub use snapshot::{AuditSnapshot, CategoryReport, ReportEntry, Summary};
