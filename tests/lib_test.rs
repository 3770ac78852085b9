//! Library integration tests.

use advaudit::AuditError;

#[test]
fn error_types_are_public() {
    let err = AuditError::UnknownCheck { id: "test".into() };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> advaudit::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use advaudit::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["advaudit", "check", "js_css_aggregation", "--json"]);
    if let Some(Commands::Check(args)) = cli.command {
        assert_eq!(args.id, "js_css_aggregation");
        assert!(args.json);
    } else {
        panic!("Expected Check command");
    }
}

#[test]
fn builtin_checks_are_public() {
    let ids: Vec<String> = advaudit::checks::builtin_definitions()
        .into_iter()
        .map(|d| d.id.to_string())
        .collect();
    assert_eq!(
        ids,
        vec![
            "backend_cache_settings",
            "js_css_aggregation",
            "imageapi_optimize_check",
            "release_notes_help_files",
            "patched_modules_check",
        ]
    );
}
