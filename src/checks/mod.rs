//! Built-in checks.
//!
//! Each module exposes an `ID`, a `definition()` with default messages and
//! the check type itself. [`register_builtins`] wires them into a
//! [`CheckRegistry`] in declaration order.

pub mod backend_cache;
pub mod imageapi_optimize;
pub mod js_css_aggregation;
pub mod patched_modules;
pub mod release_notes;

use std::sync::Arc;

pub use backend_cache::BackendCacheSettings;
pub use imageapi_optimize::ImageApiOptimize;
pub use js_css_aggregation::JsCssAggregation;
pub use patched_modules::PatchedModules;
pub use release_notes::ReleaseNotesHelpFiles;

use crate::check::{CheckDefinition, CheckRegistry};
use crate::environment::{AuditEnvironment, PatchReportSource};
use crate::error::Result;

/// Definitions of every built-in check in declaration order.
pub fn builtin_definitions() -> Vec<CheckDefinition> {
    vec![
        backend_cache::definition(),
        js_css_aggregation::definition(),
        imageapi_optimize::definition(),
        release_notes::definition(),
        patched_modules::definition(),
    ]
}

/// Register all built-in checks.
pub fn register_builtins(
    registry: &mut CheckRegistry,
    patch_reports: Arc<dyn PatchReportSource>,
) -> Result<()> {
    registry.register(backend_cache::definition(), |ctx| {
        Box::new(BackendCacheSettings::new(ctx))
    })?;
    registry.register(js_css_aggregation::definition(), |ctx| {
        Box::new(JsCssAggregation::new(ctx))
    })?;
    registry.register(imageapi_optimize::definition(), |ctx| {
        Box::new(ImageApiOptimize::new(ctx))
    })?;
    registry.register(release_notes::definition(), |ctx| {
        Box::new(ReleaseNotesHelpFiles::new(ctx))
    })?;
    registry.register(patched_modules::definition(), move |ctx| {
        Box::new(PatchedModules::new(ctx, Arc::clone(&patch_reports)))
    })?;
    Ok(())
}

/// A registry holding every built-in check.
pub fn builtin_registry(
    env: AuditEnvironment,
    patch_reports: Arc<dyn PatchReportSource>,
) -> Result<CheckRegistry> {
    let mut registry = CheckRegistry::new(env);
    register_builtins(&mut registry, patch_reports)?;
    Ok(registry)
}
