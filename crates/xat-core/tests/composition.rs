//! End-to-end composition behavior

use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use xat_core::compose::DEFAULT_PLUGIN_RENAMES;
use xat_core::{
    ComposeOptions, ComposeTask, ConfigFactory, ConfigFragment, ErrorKind, FragmentSequence,
    ProjectManifest, RenameTable, RuleEntry, StaticPluginLoader, compose, rename_sequence,
};

fn options(value: serde_json::Value) -> ComposeOptions {
    ComposeOptions::from_value(value).unwrap()
}

fn factory(value: serde_json::Value, dir: &TempDir) -> ConfigFactory {
    ConfigFactory::new(options(value))
        .with_loader(Arc::new(StaticPluginLoader::permissive()))
        .with_manifest(ProjectManifest::from_dependencies([
            ("typescript", "^5.6.0"),
            ("react", "^19.0.0"),
        ]))
        .with_cwd(dir.path())
        .with_editor_detector(|| false)
}

#[tokio::test]
async fn test_compose_then_rename() {
    let a = ConfigFragment::named("a").rule("x/r1", RuleEntry::error());
    let b = ConfigFragment::named("b").rule("x/r1", RuleEntry::off());

    let sequence = compose(vec![a.into(), b.into()]).await.unwrap();
    let renamed = rename_sequence(sequence, &RenameTable::new([("x", "y")]).unwrap());

    insta::assert_snapshot!(serde_json::to_string_pretty(&renamed).unwrap(), @r#"
    [
      {
        "name": "a",
        "rules": {
          "y/r1": "error"
        }
      },
      {
        "name": "b",
        "rules": {
          "y/r1": "off"
        }
      }
    ]
    "#);
    assert_eq!(renamed.effective_rules()["y/r1"], RuleEntry::off());
}

#[tokio::test]
async fn test_order_is_concatenation_of_tasks() {
    let tasks: Vec<ComposeTask> = vec![
        vec![ConfigFragment::named("f1/a"), ConfigFragment::named("f1/b")].into(),
        Vec::<ConfigFragment>::new().into(),
        ComposeTask::deferred(async { Ok(vec![ConfigFragment::named("f3/a")]) }),
        ComposeTask::deferred(async { Ok(Vec::new()) }),
        ConfigFragment::named("f5/a").into(),
    ];

    let sequence = compose(tasks).await.unwrap();
    assert_eq!(sequence.names(), vec!["f1/a", "f1/b", "f3/a", "f5/a"]);
}

#[tokio::test]
async fn test_rename_reaches_nested_rule_names() {
    let fragment = ConfigFragment::named("a")
        .rule("x/sub/r", RuleEntry::error())
        .rule("@stylistic/jsx/indent", RuleEntry::warn());
    let sequence = compose(vec![fragment.into()]).await.unwrap();

    let table = RenameTable::new([("x", "y"), ("@stylistic", "style")]).unwrap();
    let renamed = rename_sequence(sequence, &table);
    assert_eq!(
        renamed.effective_rules().keys().collect::<Vec<_>>(),
        vec!["y/sub/r", "style/jsx/indent"]
    );
}

#[tokio::test]
async fn test_composition_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let first = factory(json!({}), &dir).build().await.unwrap();
    let second = factory(json!({}), &dir).build().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_rename_is_idempotent_and_total() {
    let dir = TempDir::new().unwrap();
    let sequence = factory(json!({}), &dir).build().await.unwrap();

    let again = rename_sequence(sequence.clone(), &RenameTable::default());
    assert_eq!(again, sequence);

    for fragment in sequence.iter() {
        for key in fragment.plugins.keys() {
            assert!(
                DEFAULT_PLUGIN_RENAMES.iter().all(|(from, _)| key != from),
                "plugin key {key} was not renamed"
            );
        }
        for id in fragment.rules.keys() {
            assert!(
                DEFAULT_PLUGIN_RENAMES
                    .iter()
                    .all(|(from, _)| !id.starts_with(&format!("{from}/"))),
                "rule {id} was not renamed"
            );
        }
    }
}

#[tokio::test]
async fn test_editor_mode_only_touches_autofix() {
    let dir = TempDir::new().unwrap();
    let editor = factory(json!({ "isInEditor": true }), &dir)
        .build()
        .await
        .unwrap();
    let cli = factory(json!({ "isInEditor": false }), &dir)
        .build()
        .await
        .unwrap();

    assert_eq!(editor.names(), cli.names());
    let mut suppressed = 0;
    for (e, c) in editor.iter().zip(cli.iter()) {
        assert_eq!(e.files, c.files);
        assert_eq!(e.ignores, c.ignores);
        assert_eq!(e.plugins, c.plugins);
        assert_eq!(
            e.rules.keys().collect::<Vec<_>>(),
            c.rules.keys().collect::<Vec<_>>()
        );
        for (id, entry) in &e.rules {
            let baseline = &c.rules[id];
            assert_eq!(entry.severity, baseline.severity);
            assert_eq!(entry.options, baseline.options);
            if entry.autofix != baseline.autofix {
                assert!(entry.is_active());
                suppressed += 1;
            }
        }
    }
    assert!(suppressed > 0);
}

#[tokio::test]
async fn test_disabled_features_leave_no_fragments() {
    let dir = TempDir::new().unwrap();
    let sequence = factory(
        json!({ "yaml": false, "react": false, "formatters": false, "test": false }),
        &dir,
    )
    .build()
    .await
    .unwrap();

    for prefix in ["xat/yaml", "xat/react", "xat/formatters", "xat/test"] {
        assert!(
            sequence.names().iter().all(|n| !n.starts_with(prefix)),
            "{prefix} should be absent"
        );
    }
    assert!(sequence.names().iter().any(|n| n.starts_with("xat/typescript")));
}

#[tokio::test]
async fn test_files_rejected_before_any_provider_runs() {
    let dir = TempDir::new().unwrap();
    let loader = Arc::new(StaticPluginLoader::permissive());

    let err = ConfigFactory::new(options(json!({ "files": ["**/*.ts"] })))
        .with_loader(loader.clone())
        .with_manifest(ProjectManifest::empty())
        .with_cwd(dir.path())
        .build()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Usage);
    assert!(err.to_string().contains("files"));
    assert_eq!(loader.load_count(), 0);
}

#[tokio::test]
async fn test_missing_framework_plugin_fails_whole_call() {
    let dir = TempDir::new().unwrap();
    // react is detected from the manifest but its lint plugins are not installed
    let err = ConfigFactory::new(options(json!({ "formatters": false })))
        .with_manifest(ProjectManifest::from_dependencies([("react", "^19.0.0")]))
        .with_cwd(dir.path())
        .with_editor_detector(|| false)
        .build()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Dependency);
    assert!(err.to_string().contains("'react'"));
}

#[tokio::test]
async fn test_user_override_wins_in_effective_view() {
    let dir = TempDir::new().unwrap();
    let sequence: FragmentSequence = factory(json!({ "formatters": false }), &dir)
        .with_config(ConfigFragment::named("user").rule("no-console", RuleEntry::off()))
        .build()
        .await
        .unwrap();

    let rules = sequence.effective_rules_for("src/main.ts");
    assert_eq!(rules["no-console"], RuleEntry::off());
}
