//! Persisted state between invocations.

pub mod last_run;

pub use last_run::LastRun;
