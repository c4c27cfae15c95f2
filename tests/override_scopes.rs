use std::error::Error;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use sysconfig::config::SystemConfig;
use sysconfig::errors::SysConfigError;
use sysconfig::scope::{self, GlobalSystemConfig, SystemConfigContext};
use sysconfig::types::LogLevel;
use sysconfig_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn baseline() -> SystemConfig {
    SystemConfig::from_pairs([("log_level", "info"), ("root_dir", "/var/lib/daemon")])
        .expect("valid baseline")
}

fn isolated_context() -> SystemConfigContext {
    SystemConfigContext::with_global(baseline(), Arc::new(GlobalSystemConfig::new()))
}

// The only test in this binary that touches the process-wide slot.
#[test]
fn process_wide_scope_is_restored_to_none() -> TestResult {
    init_tracing();
    let ctx = SystemConfigContext::new(baseline());
    let view = ctx.view();

    assert!(scope::current_override().is_none());
    assert_eq!(view.system_config().log_level, Some(LogLevel::Info));

    let inside = scope::with_override([("log_level", "debug")], || {
        assert!(scope::current_override().is_some());
        view.system_config().log_level
    })?;

    assert_eq!(inside, Some(LogLevel::Debug));
    assert!(scope::current_override().is_none());
    assert_eq!(view.system_config(), *ctx.baseline());
    Ok(())
}

#[test]
fn every_resolve_inside_the_scope_sees_the_override() -> TestResult {
    let ctx = isolated_context();
    let override_cfg = SystemConfig::from_pairs([("process_name", "override")])?;

    ctx.global().with_override(override_cfg.clone(), || {
        for _ in 0..3 {
            assert_eq!(*ctx.view().system_config(), override_cfg);
        }
    })?;

    assert_eq!(ctx.view().system_config(), *ctx.baseline());
    Ok(())
}

#[test]
fn nested_scopes_unwind_in_order() -> TestResult {
    let ctx = isolated_context();
    let global = ctx.global().clone();
    let view = ctx.view();

    global.with_override([("log_level", "warn")], || -> TestResult {
        global.with_override([("log_level", "error")], || {
            assert_eq!(view.system_config().log_level, Some(LogLevel::Error));
        })?;
        assert_eq!(view.system_config().log_level, Some(LogLevel::Warn));
        Ok(())
    })??;

    assert_eq!(view.system_config().log_level, Some(LogLevel::Info));
    Ok(())
}

fn panicking_body() {
    panic!("body panicked");
}

#[test]
fn failing_body_restores_the_previous_value() -> TestResult {
    let ctx = isolated_context();
    let global = ctx.global().clone();

    let result: Result<(), SysConfigError> = global
        .with_override([("root_dir", "/inner")], || {
            Err(SysConfigError::ConfigError("body failed".into()))
        })?;
    assert!(result.is_err());
    assert!(global.current().is_none());

    let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
        global.with_override([("root_dir", "/inner")], panicking_body)
    }));
    assert!(unwound.is_err());
    assert!(global.current().is_none());
    assert_eq!(ctx.view().system_config().root_dir.as_deref(), Some("/var/lib/daemon"));
    Ok(())
}

#[test]
fn guard_restores_when_dropped() -> TestResult {
    let global = GlobalSystemConfig::new();
    {
        let _outer = global.enter(SystemConfig::from_pairs([("log_level", "trace")])?);
        {
            let _inner = global.enter(SystemConfig::blank());
            assert_eq!(global.current().map(|c| c.is_blank()), Some(true));
        }
        assert_eq!(
            global.current().and_then(|c| c.log_level),
            Some(LogLevel::Trace)
        );
    }
    assert!(global.current().is_none());
    Ok(())
}

#[test]
fn local_override_snapshots_then_changes_one_key() -> TestResult {
    let ctx = isolated_context();
    let mut view = ctx.view();

    let before = view.system_config();
    view.system_config_override([("root_dir", "/mine")])?;
    let after = view.system_config();

    let mut expected = before.as_ref().clone();
    expected.root_dir = Some("/mine".into());
    assert_eq!(*after, expected);
    assert!(view.has_local_override());
    Ok(())
}

#[test]
fn local_override_is_invisible_to_other_callers() -> TestResult {
    let ctx = isolated_context();
    let mut first = ctx.view();
    let second = ctx.view();

    first.system_config_override([("log_level", "fatal")])?;

    assert_eq!(first.system_config().log_level, Some(LogLevel::Fatal));
    assert_eq!(second.system_config().log_level, Some(LogLevel::Info));
    assert_eq!(ctx.baseline().log_level, Some(LogLevel::Info));
    assert!(ctx.global().current().is_none());
    Ok(())
}

#[test]
fn local_override_shadows_later_global_scopes() -> TestResult {
    let ctx = isolated_context();
    let mut view = ctx.view();
    view.system_config_override([("process_name", "pinned")])?;

    ctx.global().with_override([("process_name", "scoped")], || {
        assert_eq!(view.system_config().process_name.as_deref(), Some("pinned"));
        assert_eq!(ctx.view().system_config().process_name.as_deref(), Some("scoped"));
    })?;
    Ok(())
}

#[test]
fn repeated_local_overrides_accumulate() -> TestResult {
    let ctx = isolated_context();
    let mut view = ctx.view();

    view.system_config_override([("file_permission", "0640")])?;
    let first = view.system_config();
    view.system_config_override_with(|cfg| {
        cfg.dir_permission = Some(0o750);
        Ok(())
    })?;

    let cfg = view.system_config();
    assert_eq!(cfg.file_permission, Some(0o640));
    assert_eq!(cfg.dir_permission, Some(0o750));
    assert_eq!(first.dir_permission, None);
    Ok(())
}
