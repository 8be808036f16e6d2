//! `quire sync`: one mirror pass per configured rule.

mod common;

use common::*;

#[test]
fn sync_mirrors_content_and_config_origins() {
    let env = TestEnv::new();
    write_site(&env);

    let result = env.run(&["sync"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert_eq!(env.read("data/content/pages/about.md"), ABOUT_PAGE);
    assert_eq!(env.read("data/content/pages/first-post/index.md"), POST_PAGE);
    assert_eq!(env.read("data/config/manifest.webmanifest"), MANIFEST);
    assert!(result.stdout.contains("Mirrored 2 rules"));
}

#[test]
fn sync_removes_files_deleted_at_the_source() {
    let env = TestEnv::new();
    write_site(&env);
    assert!(env.run(&["sync"]).is_success());

    std::fs::remove_file(env.path("sources/content/pages/upcoming.md")).unwrap();
    let result = env.run(&["sync"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(!env.path("data/content/pages/upcoming.md").exists());
    assert!(env.path("data/content/pages/about.md").exists());
}

#[test]
fn sync_json_reports_each_rule() {
    let env = TestEnv::new();
    write_site(&env);

    let result = env.run(&["sync", "--json"]);

    assert!(result.is_success(), "{}", result.combined_output());
    let lines = result.json_lines();
    let rules: Vec<&str> = lines.iter().filter_map(|l| l["rule"].as_str()).collect();
    assert_eq!(rules, vec!["content", "config"]);
    assert_eq!(lines[0]["event"], "mirrored");
    assert_eq!(lines[0]["files"], 3);
}

#[test]
fn sync_rule_from_config_file_with_pattern() {
    let env = TestEnv::new();
    env.write("assets/logo.svg", ICON_SVG);
    env.write("assets/notes.txt", "skip me");
    env.write(
        "quire.toml",
        r#"
[storage]
root = "data"

[[sync]]
name = "graphics"
source = "assets"
pattern = "*.svg"
"#,
    );

    let result = env.run_with_env(&["sync"], &[]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert_eq!(env.read("data/graphics/logo.svg"), ICON_SVG);
    assert!(!env.path("data/graphics/notes.txt").exists());
}

#[test]
fn sync_without_rules_fails() {
    let env = TestEnv::new();

    let result = env.run_with_env(&["sync"], &[]);

    assert!(!result.is_success());
    assert!(result.stderr.contains("no sync rules configured"));
}

#[test]
fn sync_warns_about_unknown_config_keys() {
    let env = TestEnv::new();
    write_site(&env);
    env.write("quire.toml", "[content]\nextention = \"md\"\n");

    let result = env.run(&["sync"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(
        result
            .stderr
            .contains("Unknown config key 'extention' in quire.toml:2. Did you mean 'extension'?"),
        "stderr: {}",
        result.stderr
    );
}

#[test]
fn sync_missing_source_fails() {
    let env = TestEnv::new();
    let missing = env.path("nowhere");

    let result = env.run_with_env(
        &["sync"],
        &[
            ("QUIRE_CONTENT_PATH", missing.as_path()),
            ("QUIRE_DATA_PATH", env.data_path().as_path()),
        ],
    );

    assert!(!result.is_success());
    assert!(result.stderr.contains("directory not found"), "{}", result.stderr);
}
