mod common;

use common::{SHINIT_VARS, TestContext};
use serial_test::serial;
use shinit::{
    AppError, DiscoverOptions, Eligibility, LoadMode, LoadOptions, ShellKind, ShellMarkers,
};

fn clear_shinit_env() {
    for var in SHINIT_VARS {
        unsafe {
            std::env::remove_var(var);
        }
    }
}

fn options(ctx: &TestContext, markers: ShellMarkers) -> LoadOptions {
    LoadOptions {
        entry: Some(ctx.entry()),
        cwd: ctx.project().to_path_buf(),
        markers,
        mode: LoadMode::BestEffort,
        program: "shinit".to_string(),
    }
}

#[test]
#[serial]
fn load_returns_script_and_outcome() {
    clear_shinit_env();
    let ctx = TestContext::new();
    let app = ctx.write("app.env", "APP=1\n");
    let module = ctx.write("init.d/00_a.sh", "echo a\n");
    ctx.write("init.d/01_example.sh", "echo example\n");

    let (script, outcome) =
        shinit::load(&options(&ctx, ShellMarkers::bash("5.2.15(1)-release"))).unwrap();

    assert_eq!(outcome.shell.kind, ShellKind::Bash);
    assert_eq!(outcome.paths.entry_dir, ctx.project());
    assert_eq!(outcome.loaded().cloned().collect::<Vec<_>>(), vec![app.clone(), module.clone()]);
    assert_eq!(outcome.modules.skipped.len(), 1);
    assert_eq!(outcome.failures().count(), 0);
    assert!(script.contains(&TestContext::source_line(&app)));
    assert!(script.contains(&format!("'shinit' normalize '{}'", app.display())));
    assert!(!script.contains(&format!("normalize '{}'", module.display())));
}

#[test]
#[serial]
fn load_rejects_unknown_shell() {
    clear_shinit_env();
    let ctx = TestContext::new();

    let err = shinit::load(&options(&ctx, ShellMarkers::default())).unwrap_err();

    assert!(matches!(err, AppError::UnsupportedShell));
    assert_eq!(err.exit_code(), 2);
}

#[test]
#[serial]
fn discover_reports_without_side_effects() {
    clear_shinit_env();
    let ctx = TestContext::new();
    ctx.write("init.d/00_a.sh", "echo a\n");
    ctx.set_mode(&ctx.module_dir(), 0o755);

    let report = shinit::discover(&DiscoverOptions {
        entry: Some(ctx.entry()),
        cwd: ctx.project().to_path_buf(),
    })
    .unwrap();

    assert_eq!(report.modules.files.len(), 1);
    assert_eq!(report.modules.files[0].eligibility, Eligibility::Load);
    assert_eq!(ctx.mode(&ctx.module_dir()), 0o755);
}

#[test]
#[serial]
fn normalize_reads_policy_when_called() {
    clear_shinit_env();
    let ctx = TestContext::new();
    let app = ctx.write("app.env", "APP=1\n");
    ctx.set_mode(&app, 0o644);

    unsafe {
        std::env::set_var("CHMOD_MODE", "640");
    }
    assert!(shinit::normalize(&app).unwrap());
    assert_eq!(ctx.mode(&app), 0o640);

    unsafe {
        std::env::set_var("DISABLE_INIT_CHMOD", "1");
        std::env::set_var("DISABLE_INIT_CHOWN", "1");
    }
    ctx.set_mode(&app, 0o644);
    assert!(!shinit::normalize(&app).unwrap());
    assert_eq!(ctx.mode(&app), 0o644);
    clear_shinit_env();
}

#[test]
fn hook_is_available_for_both_shells() {
    for shell in ShellKind::ALL {
        let snippet = shinit::hook(shell, "shinit", false);
        assert!(snippet.contains(shell.source_path_expr()));
    }
}
