#![allow(clippy::unwrap_used)]
//! Subcommands run against a directory store.

use latre_test::component::shell::{Command, run};

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn import_list_export_remove() {
    let env = TestEnv::new().await;
    let settings = env.settings();
    let source = env.source("in.vcf", &format!("{ALICE_K}{CAROL}"));

    let import = Command::Import {
        sources: vec![source],
        no_batch_add: false,
    };
    let json = run(&import, &env.store, &settings, true).await.unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["imported"], 2);
    assert_eq!(report["added"].as_array().unwrap().len(), 2);

    let listing = run(&Command::List, &env.store, &settings, false)
        .await
        .unwrap();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\tAlice K.\t555-1, 555-2"));

    let out = env.path("all.vcf");
    let export = Command::Export {
        output: out.clone(),
        split: false,
        no_photos: true,
    };
    run(&export, &env.store, &settings, false).await.unwrap();
    assert!(std::fs::read_to_string(&out).unwrap().contains("FN:Carol"));

    let uid = lines[0].split('\t').next().unwrap().to_string();
    let remove = Command::Remove { uids: vec![uid] };
    assert_eq!(
        run(&remove, &env.store, &settings, false).await.unwrap(),
        "Removed 1 contacts"
    );
    assert_eq!(env.all().await.len(), 1);
}
