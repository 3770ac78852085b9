//! The audit runner: gate, execute, capture.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::options::{RunFilter, RunnerOptions};
use super::record::{AuditRecord, ExecutionState};
use crate::check::{
    AuditReason, AuditStatus, Check, CheckDefinition, CheckId, CheckRegistry, Explanation,
};
use crate::config::CheckOverrides;
use crate::error::{AuditError, Result};
use crate::messages::{MessageStore, MessageType};
use crate::report::ResultAggregator;
use crate::requirements::{GateDecision, RequirementsGate};

/// Progress events emitted during `run_all`.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A check is about to be evaluated.
    Starting {
        id: &'a CheckId,
        index: usize,
        total: usize,
    },
    /// A check finished and was merged.
    Finished { record: &'a AuditRecord },
}

/// What the worker thread hands back.
struct Evaluation {
    reason: AuditReason,
    explanations: BTreeMap<MessageType, Explanation>,
}

/// Executes checks from a registry.
///
/// Every fault local to one check (gate collaborator errors, errors or
/// panics escaping `perform`, timeouts) ends up in that check's record; a
/// run always returns one record per selected check.
#[derive(Debug, Clone)]
pub struct AuditRunner {
    registry: Arc<CheckRegistry>,
    messages: MessageStore,
    overrides: CheckOverrides,
    options: RunnerOptions,
}

impl AuditRunner {
    /// Create a runner with default options and no overrides.
    pub fn new(registry: Arc<CheckRegistry>, messages: MessageStore) -> Self {
        Self {
            registry,
            messages,
            overrides: CheckOverrides::default(),
            options: RunnerOptions::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: CheckOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_options(mut self, options: RunnerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    pub fn messages(&self) -> &MessageStore {
        &self.messages
    }

    pub fn overrides(&self) -> &CheckOverrides {
        &self.overrides
    }

    /// Effective definition of one check.
    pub fn definition(&self, id: &str) -> Result<CheckDefinition> {
        Ok(self.overrides.effective(self.registry.definition(id)?))
    }

    /// Effective definitions of all checks, in declaration order.
    pub fn definitions(&self) -> Vec<CheckDefinition> {
        self.registry
            .definitions()
            .map(|definition| self.overrides.effective(definition))
            .collect()
    }

    /// Enabled checks matching a filter, in declaration order.
    pub fn select(&self, filter: &RunFilter) -> Vec<CheckDefinition> {
        self.definitions()
            .into_iter()
            .filter(|definition| definition.enabled && filter.matches(definition))
            .collect()
    }

    /// Run a single check, whether enabled or not.
    ///
    /// Fails only with [`AuditError::UnknownCheck`].
    pub fn run_one(&self, id: &str) -> Result<AuditRecord> {
        let definition = self.definition(id)?;
        let check = self.registry.get(id)?;
        Ok(self.execute(definition, check))
    }

    /// Run all enabled checks matching the filter into a fresh aggregate.
    pub fn run_all(&self, filter: &RunFilter) -> ResultAggregator {
        let mut aggregator = ResultAggregator::new();
        self.run_all_with_progress(filter, &mut aggregator, |_| {});
        aggregator
    }

    /// Run all enabled checks matching the filter, merging into `aggregator`.
    ///
    /// With more than one worker, checks are evaluated on a bounded pool;
    /// results are still merged from this thread in declaration order.
    pub fn run_all_with_progress(
        &self,
        filter: &RunFilter,
        aggregator: &mut ResultAggregator,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) {
        let selected = self.select(filter);
        let total = selected.len();
        let started = Instant::now();
        info!(checks = total, workers = self.options.workers, "Starting audit run");

        let records = if self.options.workers > 1 && total > 1 {
            for (index, definition) in selected.iter().enumerate() {
                on_progress(RunProgress::Starting {
                    id: &definition.id,
                    index,
                    total,
                });
            }
            self.execute_parallel(selected)
        } else {
            let mut records = Vec::with_capacity(total);
            for (index, definition) in selected.into_iter().enumerate() {
                on_progress(RunProgress::Starting {
                    id: &definition.id,
                    index,
                    total,
                });
                records.push(self.execute_definition(definition));
            }
            records
        };

        for record in records {
            let id = record.check_id().clone();
            aggregator.merge(record);
            if let Some(record) = aggregator.get(id.as_str()) {
                on_progress(RunProgress::Finished { record });
            }
        }

        info!(
            checks = total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Audit run finished"
        );
    }

    fn execute_parallel(&self, selected: Vec<CheckDefinition>) -> Vec<AuditRecord> {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.workers)
            .build()
        {
            Ok(pool) => pool.install(|| {
                selected
                    .into_par_iter()
                    .map(|definition| self.execute_definition(definition))
                    .collect()
            }),
            Err(e) => {
                warn!("Failed to build worker pool, running serially: {}", e);
                selected
                    .into_iter()
                    .map(|definition| self.execute_definition(definition))
                    .collect()
            }
        }
    }

    fn execute_definition(&self, definition: CheckDefinition) -> AuditRecord {
        match self.registry.get(definition.id.as_str()) {
            Ok(check) => self.execute(definition, check),
            // Definitions come from the registry, so this only guards a
            // registry/definition mismatch.
            Err(e) => {
                let reason = AuditReason::fail(definition.id.clone()).with_reason(e.to_string());
                self.finish(
                    definition,
                    reason,
                    BTreeMap::new(),
                    ExecutionState::NotStarted,
                    Instant::now(),
                )
            }
        }
    }

    fn execute(&self, definition: CheckDefinition, check: Box<dyn Check>) -> AuditRecord {
        let started = Instant::now();
        let id = definition.id.clone();
        let check: Arc<dyn Check> = Arc::from(check);
        let gate = RequirementsGate::new(self.registry.environment().clone());
        let state = Arc::new(Mutex::new(ExecutionState::NotStarted));

        debug!(check = %id, "Executing check");

        let (tx, rx) = mpsc::channel();
        let worker_state = Arc::clone(&state);
        let worker_id = id.clone();
        let spawned = thread::Builder::new()
            .name(format!("check-{}", id))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    evaluate(&gate, &worker_id, check.as_ref(), &worker_state)
                }));
                let evaluation = outcome.unwrap_or_else(|payload| {
                    set_state(&worker_state, ExecutionState::Executed);
                    fault(&worker_id, panic_message(payload.as_ref()))
                });
                let _ = tx.send(evaluation);
            });

        let evaluation = match spawned {
            Err(e) => fault(&id, format!("could not start worker thread: {}", e)),
            Ok(_) => {
                let received = match self.options.timeout {
                    Some(timeout) => rx.recv_timeout(timeout).map_err(|e| match e {
                        mpsc::RecvTimeoutError::Timeout => AuditError::CheckTimedOut {
                            check: id.to_string(),
                            timeout_ms: timeout.as_millis(),
                        },
                        mpsc::RecvTimeoutError::Disconnected => worker_lost(&id),
                    }),
                    None => rx.recv().map_err(|_| worker_lost(&id)),
                };
                received.unwrap_or_else(|e| {
                    warn!(check = %id, "{}", e);
                    Evaluation {
                        reason: AuditReason::fail(id.clone()).with_reason(e.to_string()),
                        explanations: BTreeMap::new(),
                    }
                })
            }
        };

        let reached = state.lock().map(|s| *s).unwrap_or(ExecutionState::Executed);
        self.finish(
            definition,
            evaluation.reason,
            evaluation.explanations,
            reached,
            started,
        )
    }

    fn finish(
        &self,
        definition: CheckDefinition,
        reason: AuditReason,
        explanations: BTreeMap<MessageType, Explanation>,
        state: ExecutionState,
        started: Instant,
    ) -> AuditRecord {
        let id = definition.id.as_str();
        let message = match reason.status {
            AuditStatus::Pass => self
                .messages
                .render(id, MessageType::SuccessMessage, &reason.arguments),
            AuditStatus::Fail => self
                .messages
                .render(id, MessageType::FailMessage, &reason.arguments),
            AuditStatus::Skip => String::new(),
        };

        debug!(check = id, status = %reason.status, %state, "Check finished");

        AuditRecord {
            definition,
            reason,
            message,
            explanations,
            duration_ms: started.elapsed().as_millis() as u64,
            state,
            finished_at: Utc::now(),
        }
    }
}

/// Gate and perform one check. Runs on the worker thread.
fn evaluate(
    gate: &RequirementsGate,
    id: &CheckId,
    check: &dyn Check,
    state: &Mutex<ExecutionState>,
) -> Evaluation {
    // Panics raised by collaborators while gating are environment errors.
    let decision = panic::catch_unwind(AssertUnwindSafe(|| gate.evaluate(id, check)))
        .unwrap_or_else(|payload| {
            Err(AuditError::Environment {
                check: id.to_string(),
                message: panic_message(payload.as_ref()),
            })
        });
    set_state(state, ExecutionState::Gated);

    match decision {
        Ok(GateDecision::Proceed) => {}
        Ok(GateDecision::Reject(rejection)) => {
            debug!(
                check = %id,
                requirement = %rejection.requirement,
                "Skipped by requirements gate"
            );
            return Evaluation {
                reason: AuditReason::skip(id.clone(), rejection.reason)
                    .with_argument("requirement", rejection.requirement.to_string()),
                explanations: BTreeMap::new(),
            };
        }
        Err(e) => {
            warn!(check = %id, "{}", e);
            return Evaluation {
                reason: AuditReason::skip(id.clone(), e.to_string()),
                explanations: BTreeMap::new(),
            };
        }
    }

    let performed = check.perform();
    set_state(state, ExecutionState::Executed);

    let mut reason = match performed {
        Ok(reason) => reason,
        Err(e) => return fault(id, format!("{:#}", e)),
    };

    reason.check_id = id.clone();
    if reason.is_skip() {
        warn!(check = %id, "Check returned skip from perform, recording as fail");
        reason.status = AuditStatus::Fail;
    }

    let explanations = match check.reason_renderable() {
        Some(renderer) => MessageType::ALL
            .into_iter()
            .filter_map(|kind| {
                renderer
                    .render_reason(&reason, kind)
                    .filter(|explanation| !explanation.is_empty())
                    .map(|explanation| (kind, explanation))
            })
            .collect(),
        None => BTreeMap::new(),
    };

    Evaluation {
        reason,
        explanations,
    }
}

fn fault(id: &CheckId, message: String) -> Evaluation {
    let error = AuditError::CheckExecutionFault {
        check: id.to_string(),
        message,
    };
    warn!(check = %id, "{}", error);
    Evaluation {
        reason: AuditReason::fail(id.clone()).with_reason(error.to_string()),
        explanations: BTreeMap::new(),
    }
}

fn worker_lost(id: &CheckId) -> AuditError {
    AuditError::CheckExecutionFault {
        check: id.to_string(),
        message: "worker thread exited without a result".to_string(),
    }
}

fn set_state(state: &Mutex<ExecutionState>, next: ExecutionState) {
    if let Ok(mut current) = state.lock() {
        *current = next;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{ReasonRenderable, Requirement, RequirementsAware, Severity};
    use crate::environment::{AuditEnvironment, MemoryStore, StaticModuleProbe};
    use crate::report::CategoryStatus;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    struct Fixed(AuditReason);

    impl Check for Fixed {
        fn perform(&self) -> anyhow::Result<AuditReason> {
            Ok(self.0.clone())
        }
    }

    struct Instrumented {
        called: Arc<AtomicBool>,
    }

    impl Check for Instrumented {
        fn perform(&self) -> anyhow::Result<AuditReason> {
            self.called.store(true, Ordering::SeqCst);
            Ok(AuditReason::pass("instrumented"))
        }

        fn requirements_aware(&self) -> Option<&dyn RequirementsAware> {
            Some(self)
        }
    }

    impl RequirementsAware for Instrumented {
        fn requirements(&self) -> Vec<Requirement> {
            vec![Requirement::Module("hacked".into())]
        }
    }

    struct Panics;

    impl Check for Panics {
        fn perform(&self) -> anyhow::Result<AuditReason> {
            panic!("boom")
        }
    }

    struct Errors;

    impl Check for Errors {
        fn perform(&self) -> anyhow::Result<AuditReason> {
            anyhow::bail!("settings service unavailable")
        }
    }

    struct Sleeps;

    impl Check for Sleeps {
        fn perform(&self) -> anyhow::Result<AuditReason> {
            thread::sleep(Duration::from_secs(5));
            Ok(AuditReason::pass("sleeps"))
        }
    }

    struct Listed;

    impl Check for Listed {
        fn perform(&self) -> anyhow::Result<AuditReason> {
            Ok(AuditReason::fail("listed")
                .with_reason("Bad styles")
                .with_argument("list", vec!["Large", "Thumbnail"]))
        }

        fn reason_renderable(&self) -> Option<&dyn ReasonRenderable> {
            Some(self)
        }
    }

    impl ReasonRenderable for Listed {
        fn render_reason(&self, reason: &AuditReason, kind: MessageType) -> Option<Explanation> {
            (kind == MessageType::FailMessage).then(|| {
                Explanation::list(
                    Some(reason.reason_text().to_string()),
                    vec!["Large".into(), "Thumbnail".into()],
                )
            })
        }
    }

    fn definition(id: &str, category: &str, severity: Severity) -> CheckDefinition {
        CheckDefinition::new(id, id, category, severity)
    }

    fn runner_with(registry: CheckRegistry) -> AuditRunner {
        let messages = MessageStore::new(Arc::new(MemoryStore::new()))
            .with_defaults(registry.definitions());
        AuditRunner::new(Arc::new(registry), messages)
    }

    fn empty_registry() -> CheckRegistry {
        CheckRegistry::new(AuditEnvironment::in_memory())
    }

    #[test]
    fn unknown_check_is_an_error() {
        let runner = runner_with(empty_registry());
        assert!(matches!(
            runner.run_one("missing"),
            Err(AuditError::UnknownCheck { .. })
        ));
    }

    #[test]
    fn unmet_requirement_skips_without_performing() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let mut registry = empty_registry();
        registry
            .register(definition("patched", "core", Severity::High), move |_| {
                Box::new(Instrumented {
                    called: Arc::clone(&flag),
                })
            })
            .unwrap();

        let record = runner_with(registry).run_one("patched").unwrap();
        assert_eq!(record.status(), AuditStatus::Skip);
        assert!(record.reason.reason_text().contains("hacked"));
        assert_eq!(record.state, ExecutionState::Gated);
        assert_eq!(record.message, "");
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn met_requirement_performs() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let env = AuditEnvironment::in_memory()
            .with_modules(Arc::new(StaticModuleProbe::new(["hacked"])));
        let mut registry = CheckRegistry::new(env);
        registry
            .register(definition("patched", "core", Severity::High), move |_| {
                Box::new(Instrumented {
                    called: Arc::clone(&flag),
                })
            })
            .unwrap();

        let record = runner_with(registry).run_one("patched").unwrap();
        assert_eq!(record.status(), AuditStatus::Pass);
        assert_eq!(record.state, ExecutionState::Executed);
        assert!(called.load(Ordering::SeqCst));
    }

    #[test]
    fn panic_becomes_fail_and_run_continues() {
        let mut registry = empty_registry();
        registry
            .register(definition("panics", "x", Severity::Low), |_| Box::new(Panics))
            .unwrap();
        registry
            .register(definition("passes", "x", Severity::Low), |_| {
                Box::new(Fixed(AuditReason::pass("passes")))
            })
            .unwrap();

        let aggregator = runner_with(registry).run_all(&RunFilter::all());
        assert_eq!(aggregator.len(), 2);

        let panicked = aggregator.get("panics").unwrap();
        assert_eq!(panicked.status(), AuditStatus::Fail);
        assert!(panicked.reason.reason_text().contains("boom"));
        assert_eq!(aggregator.get("passes").unwrap().status(), AuditStatus::Pass);
    }

    #[test]
    fn error_becomes_fail_with_message() {
        let mut registry = empty_registry();
        registry
            .register(definition("errors", "x", Severity::Low), |_| Box::new(Errors))
            .unwrap();

        let record = runner_with(registry).run_one("errors").unwrap();
        assert_eq!(record.status(), AuditStatus::Fail);
        assert!(record
            .reason
            .reason_text()
            .contains("settings service unavailable"));
    }

    #[test]
    fn timeout_becomes_fail() {
        let mut registry = empty_registry();
        registry
            .register(definition("sleeps", "x", Severity::Low), |_| Box::new(Sleeps))
            .unwrap();

        let runner = runner_with(registry)
            .with_options(RunnerOptions::default().with_timeout(Some(Duration::from_millis(50))));
        let record = runner.run_one("sleeps").unwrap();
        assert_eq!(record.status(), AuditStatus::Fail);
        assert!(record.reason.reason_text().contains("timed out"));
    }

    #[test]
    fn skip_from_perform_is_recorded_as_fail() {
        let mut registry = empty_registry();
        registry
            .register(definition("sneaky", "x", Severity::Low), |_| {
                Box::new(Fixed(AuditReason::skip(CheckId::new("sneaky"), "nope")))
            })
            .unwrap();

        let record = runner_with(registry).run_one("sneaky").unwrap();
        assert_eq!(record.status(), AuditStatus::Fail);
    }

    #[test]
    fn check_id_is_stamped_by_runner() {
        let mut registry = empty_registry();
        registry
            .register(definition("real_id", "x", Severity::Low), |_| {
                Box::new(Fixed(AuditReason::pass("wrong_id")))
            })
            .unwrap();

        let record = runner_with(registry).run_one("real_id").unwrap();
        assert_eq!(record.reason.check_id.as_str(), "real_id");
    }

    #[test]
    fn rerun_is_deterministic() {
        let mut registry = empty_registry();
        registry
            .register(definition("cache", "performance", Severity::High), |_| {
                Box::new(Fixed(
                    AuditReason::fail("cache").with_reason("cache backend is database"),
                ))
            })
            .unwrap();
        let runner = runner_with(registry);

        let first = runner.run_one("cache").unwrap();
        let second = runner.run_one("cache").unwrap();
        assert_eq!(first.status(), second.status());
        assert_eq!(first.reason.reason, second.reason.reason);
    }

    #[test]
    fn failing_high_severity_check_lands_in_its_category() {
        let mut registry = empty_registry();
        registry
            .register(definition("cache", "performance", Severity::High), |_| {
                Box::new(Fixed(
                    AuditReason::fail("cache").with_reason("cache backend is database"),
                ))
            })
            .unwrap();

        let aggregator = runner_with(registry).run_all(&RunFilter::all());
        let records = aggregator.category("performance");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status(), AuditStatus::Fail);
        assert_eq!(records[0].definition.severity, Severity::High);
        assert_eq!(records[0].state, ExecutionState::Reported);
        assert_eq!(
            aggregator.category_status("performance"),
            Some(CategoryStatus::Fail)
        );
    }

    #[test]
    fn attaches_status_messages() {
        let mut registry = empty_registry();
        registry
            .register(
                definition("cache", "performance", Severity::High)
                    .with_message(MessageType::FailMessage, "Backend is ${backend}")
                    .with_message(MessageType::SuccessMessage, "Fine"),
                |_| {
                    Box::new(Fixed(
                        AuditReason::fail("cache").with_argument("backend", "database"),
                    ))
                },
            )
            .unwrap();

        let record = runner_with(registry).run_one("cache").unwrap();
        assert_eq!(record.message, "Backend is database");
    }

    #[test]
    fn renderable_checks_produce_explanations() {
        let mut registry = empty_registry();
        registry
            .register(definition("listed", "x", Severity::Low), |_| Box::new(Listed))
            .unwrap();

        let record = runner_with(registry).run_one("listed").unwrap();
        let explanation = record.explanation(MessageType::FailMessage).unwrap();
        assert_eq!(explanation.to_string(), "Bad styles\n  - Large\n  - Thumbnail");
        assert!(record.explanation(MessageType::Action).is_none());
    }

    #[test]
    fn disabled_checks_are_not_run_by_run_all_but_run_one_works() {
        let mut registry = empty_registry();
        registry
            .register(definition("off", "x", Severity::Low).disabled(), |_| {
                Box::new(Fixed(AuditReason::pass("off")))
            })
            .unwrap();
        let runner = runner_with(registry);

        assert!(runner.run_all(&RunFilter::all()).is_empty());
        assert_eq!(runner.run_one("off").unwrap().status(), AuditStatus::Pass);
    }

    #[test]
    fn filter_limits_run() {
        let mut registry = empty_registry();
        for (id, category, severity) in [
            ("a", "performance", Severity::High),
            ("b", "performance", Severity::Low),
            ("c", "security", Severity::High),
        ] {
            registry
                .register(definition(id, category, severity), move |_| {
                    Box::new(Fixed(AuditReason::pass(id)))
                })
                .unwrap();
        }
        let runner = runner_with(registry);

        let aggregator = runner.run_all(&RunFilter::all().category("performance"));
        assert_eq!(aggregator.len(), 2);

        let aggregator = runner.run_all(&RunFilter::all().severity(Severity::High));
        let ids: Vec<&str> = aggregator.records().map(|r| r.check_id().as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn parallel_run_keeps_declaration_order() {
        let performed = Arc::new(AtomicUsize::new(0));
        let mut registry = empty_registry();
        for i in 0..8 {
            let counter = Arc::clone(&performed);
            let id = format!("check_{}", i);
            registry
                .register(definition(&id, "x", Severity::Low), move |ctx| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Box::new(Fixed(AuditReason::pass(ctx.definition.id.clone())))
                })
                .unwrap();
        }

        let runner = runner_with(registry)
            .with_options(RunnerOptions::default().with_workers(4));
        let mut finished = Vec::new();
        let mut aggregator = ResultAggregator::new();
        runner.run_all_with_progress(&RunFilter::all(), &mut aggregator, |event| {
            if let RunProgress::Finished { record } = event {
                finished.push(record.check_id().to_string());
            }
        });

        let expected: Vec<String> = (0..8).map(|i| format!("check_{}", i)).collect();
        assert_eq!(finished, expected);
        assert_eq!(performed.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn gate_collaborator_failure_skips() {
        struct Down;
        impl crate::environment::ModuleProbe for Down {
            fn exists(&self, _name: &str) -> anyhow::Result<bool> {
                anyhow::bail!("probe offline")
            }
        }

        let env = AuditEnvironment::in_memory().with_modules(Arc::new(Down));
        let mut registry = CheckRegistry::new(env);
        registry
            .register(definition("patched", "core", Severity::High), |_| {
                Box::new(Instrumented {
                    called: Arc::new(AtomicBool::new(false)),
                })
            })
            .unwrap();

        let record = runner_with(registry).run_one("patched").unwrap();
        assert_eq!(record.status(), AuditStatus::Skip);
        assert!(record.reason.reason_text().contains("probe offline"));
    }

    struct CrashingGate;

    impl Check for CrashingGate {
        fn perform(&self) -> anyhow::Result<AuditReason> {
            Ok(AuditReason::pass("crashing_gate"))
        }

        fn requirements_aware(&self) -> Option<&dyn RequirementsAware> {
            Some(self)
        }
    }

    impl RequirementsAware for CrashingGate {
        fn requirements(&self) -> Vec<Requirement> {
            vec![Requirement::Custom("patch_report".into())]
        }

        fn verify_custom(
            &self,
            _name: &str,
        ) -> anyhow::Result<crate::requirements::RequirementStatus> {
            panic!("report collaborator crashed")
        }
    }

    #[test]
    fn gate_panic_skips_as_environment_error() {
        let mut registry = empty_registry();
        registry
            .register(definition("crashing_gate", "core", Severity::High), |_| {
                Box::new(CrashingGate)
            })
            .unwrap();

        let record = runner_with(registry).run_one("crashing_gate").unwrap();
        assert_eq!(record.status(), AuditStatus::Skip);
        assert_eq!(record.state, ExecutionState::Gated);
        assert!(record
            .reason
            .reason_text()
            .contains("report collaborator crashed"));
    }
}
