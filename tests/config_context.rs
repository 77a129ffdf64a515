// Tests for config persistence inside an isolated TestContext.
use confline::config::{ChartConfig, Config};
use confline::context::{AppContext, StandardContext, TestContext};
use std::fs;

#[test]
fn test_load_missing_config_is_detected() {
    let ctx = TestContext::new();
    let err = Config::load(&ctx).unwrap_err();
    assert!(Config::is_missing_config_error(&err));
}

#[test]
fn test_load_or_init_writes_defaults() {
    let ctx = TestContext::new();
    let cfg = Config::load_or_init(&ctx).unwrap();
    assert_eq!(cfg, Config::default());
    assert!(ctx.get_config_file_path().unwrap().exists());

    let reloaded = Config::load(&ctx).unwrap();
    assert_eq!(reloaded, cfg);
}

#[test]
fn test_partial_config_fills_defaults() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    fs::write(
        &path,
        "feed_url = \"http://localhost:1234/sheet.csv\"\n\n[chart]\nrow_height = 30\n",
    )
    .unwrap();

    let cfg = Config::load(&ctx).unwrap();
    assert_eq!(cfg.feed_url, "http://localhost:1234/sheet.csv");
    assert_eq!(cfg.default_range_months, 18);
    assert!(!cfg.allow_insecure_certs);
    assert_eq!(cfg.chart.row_height, 30);
    assert_eq!(cfg.chart.min_height, ChartConfig::default().min_height);
}

#[test]
fn test_syntax_error_is_not_treated_as_missing() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    fs::write(&path, "feed_url = [unterminated").unwrap();

    let err = Config::load(&ctx).unwrap_err();
    assert!(!Config::is_missing_config_error(&err));
    assert!(Config::load_or_init(&ctx).is_err());
    // The broken file is left alone
    assert_eq!(fs::read_to_string(&path).unwrap(), "feed_url = [unterminated");
}

#[test]
fn test_save_round_trip() {
    let ctx = TestContext::new();
    let cfg = Config {
        allow_insecure_certs: true,
        default_range_months: 6,
        ..Config::default()
    };
    cfg.save(&ctx).unwrap();
    assert_eq!(Config::load(&ctx).unwrap(), cfg);
    assert!(
        Config::get_path_string(&ctx)
            .unwrap()
            .ends_with("config.toml")
    );
}

#[test]
fn test_standard_context_override_root() {
    let test_ctx = TestContext::new();
    let ctx = StandardContext::new(Some(test_ctx.root.clone()));
    assert_eq!(
        ctx.get_config_dir().unwrap(),
        test_ctx.root.join("config")
    );
    assert_eq!(
        ctx.get_log_file_path().unwrap(),
        test_ctx.root.join("cache").join("confline.log")
    );
}

#[test]
fn test_context_removed_on_drop() {
    let root = {
        let ctx = TestContext::new();
        ctx.get_cache_dir().unwrap();
        ctx.root.clone()
    };
    assert!(!root.exists());
}
