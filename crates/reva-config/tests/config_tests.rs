// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for config loading, merging, and validation.

use reva_config::{RevaConfig, load_config_from_path, load_config_from_str, validate};

#[test]
fn empty_toml_yields_defaults() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config.agent.name, "reva");
    assert!(config.providers.is_empty());
    assert!(config.routing.fallback_enabled);
}

#[test]
fn full_config_parses() {
    let toml = r#"
        [agent]
        name = "hearthside"
        log_level = "debug"

        [providers.openai]
        api_key = "sk-test"
        default_model = "gpt-4o-mini"
        cost_rank = 1
        daily_request_limit = 500

        [providers.anthropic]
        default_model = "claude-sonnet-4-20250514"
        cost_rank = 2

        [routing]
        cost_optimization = true
        fallback_enabled = false
        chat_timeout_secs = 15
        tool_timeout_secs = 90

        [routing.preferences]
        simple = ["openai:gpt-4o-mini"]
        property_search = ["anthropic:claude-sonnet-4-20250514", "openai:gpt-4o"]
        market_analysis = ["anthropic:claude-sonnet-4-20250514"]
        general = ["openai:gpt-4o-mini"]

        [cache]
        ai_ttl_secs = 600
        data_ttl_secs = 7200

        [cascade]
        high_confidence = 0.9
        medium_confidence = 0.7
        low_confidence = 0.5
    "#;

    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.agent.name, "hearthside");
    assert_eq!(config.providers.len(), 2);
    assert_eq!(config.providers["openai"].cost_rank, 1);
    assert_eq!(
        config.providers["openai"].daily_request_limit,
        Some(500)
    );
    assert!(!config.routing.fallback_enabled);
    assert_eq!(config.routing.preferences.property_search.len(), 2);
    assert_eq!(config.cache.ai_ttl_secs, 600);
    assert!(validate(&config).is_empty());
}

#[test]
fn unknown_keys_are_rejected() {
    let result = load_config_from_str("[agent]\nnmae = \"typo\"\n");
    assert!(result.is_err());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = load_config_from_str("[routing]\nchat_timeout_secs = 5\n").unwrap();
    assert_eq!(config.routing.chat_timeout_secs, 5);
    assert_eq!(config.routing.tool_timeout_secs, 120);
    assert!(config.routing.cost_optimization);
}

#[test]
fn load_from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reva.toml");
    std::fs::write(&path, "[agent]\nname = \"filecfg\"\n").unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.agent.name, "filecfg");
}

#[test]
fn validation_reports_all_issues_at_once() {
    let mut config = RevaConfig::default();
    config.routing.chat_timeout_secs = 0;
    config.routing.tool_timeout_secs = 0;
    config.routing.preferences.general.push("ghost:model".into());

    let issues = validate(&config);
    assert_eq!(issues.len(), 3);
}
