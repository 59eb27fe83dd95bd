#![allow(clippy::unwrap_used)]
//! Pipeline-level guarantees: no lost numbers, no duplicates, idempotence.

use chrono::{TimeZone, Utc};

use latre_test::component::import::{ImportOptions, import_files};

use super::helpers::*;

const OLD: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nUID:old\r\nREV:2021-01-01T00:00:00Z\r\nFN:January\r\nNOTE:from january\r\nTEL:555-1\r\nEND:VCARD\r\n";
const NEW: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nUID:new\r\nREV:2021-06-01T00:00:00Z\r\nFN:June\r\nTEL:555-1\r\nTEL:555-2\r\nEND:VCARD\r\n";

#[test_log::test(tokio::test)]
async fn second_import_is_a_no_op() {
    let env = TestEnv::new().await;
    let phone = env.source("phone.vcf", &format!("{ALICE}{BOB_21}{NO_PHONE}"));
    let laptop = env.source("laptop.vcf", &format!("{ALICE_K}{CAROL}"));
    let sources = [phone, laptop];

    let first = import_files(&env.store, &sources, ImportOptions::default()).await;
    assert!(!first.has_failures());
    let stored = env.all().await;

    let second = import_files(&env.store, &sources, ImportOptions::default()).await;
    assert!(second.added.is_empty());
    assert!(second.modified.is_empty());
    assert!(second.removed.is_empty());
    assert_eq!(second.unchanged, stored.len());
    assert_eq!(env.all().await, stored);
}

#[test_log::test(tokio::test)]
async fn no_number_is_lost_and_none_is_shared() {
    let env = TestEnv::new().await;
    env.seed(
        "x",
        "BEGIN:VCARD\r\nVERSION:3.0\r\nUID:x\r\nFN:X\r\nTEL:555-1\r\nTEL:555-8\r\nEND:VCARD\r\n",
    );
    env.seed(
        "y",
        "BEGIN:VCARD\r\nVERSION:3.0\r\nUID:y\r\nFN:Y\r\nTEL:555-2\r\nEND:VCARD\r\n",
    );

    // Bridges both stored contacts and overlaps within the batch.
    let source = env.source(
        "in.vcf",
        &format!(
            "{ALICE}{ALICE_K}{}{BOB_21}",
            "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Z\r\nTEL:555-2\r\nTEL:555-6\r\nEND:VCARD\r\n"
        ),
    );

    let report = import_files(&env.store, &[source], ImportOptions::default()).await;
    assert!(!report.has_failures());

    let all = env.all().await;
    assert_no_shared_phones(&all);
    assert_eq!(
        all_phones(&all),
        ["555-1", "555-2", "555-3", "555-6", "555-8"]
    );
}

#[test_log::test(tokio::test)]
async fn newer_stored_duplicate_survives() {
    let env = TestEnv::new().await;
    env.seed("old", OLD);
    env.seed("new", NEW);
    let source = env.source(
        "in.vcf",
        "BEGIN:VCARD\r\nVERSION:3.0\r\nTEL:555-1\r\nEND:VCARD\r\n",
    );

    let report = import_files(&env.store, &[source], ImportOptions::default()).await;
    assert_eq!(report.modified, ["new"]);
    assert_eq!(report.removed, ["old"]);

    let all = env.all().await;
    assert_eq!(all.len(), 1);
    let survivor = &all[0];
    assert_eq!(survivor.uid(), Some("new"));
    assert_eq!(survivor.formatted_name(), Some("June"));
    assert_eq!(survivor.first_value("NOTE"), Some("from january"));
    assert!(survivor.revision() > Some(Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap()));
    assert!(!env.store.root().join("old.vcf").exists());
}

#[test_log::test(tokio::test)]
async fn overlapping_batch_folds_to_the_later_record() {
    let env = TestEnv::new().await;
    let source = env.source("in.vcf", &format!("{ALICE}{ALICE_K}"));

    import_files(&env.store, &[source], ImportOptions::default()).await;

    let all = env.all().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].formatted_name(), Some("Alice K."));
    assert_eq!(all[0].first_value("N"), Some("K.;Alice;;;"));
    assert_eq!(all_phones(&all), ["555-1", "555-2"]);
}

#[test_log::test(tokio::test)]
async fn unchanged_contact_file_is_not_rewritten() {
    let env = TestEnv::new().await;
    env.seed(
        "1",
        "BEGIN:VCARD\r\nVERSION:3.0\r\nUID:1\r\nREV:2021-01-01T00:00:00Z\r\nFN:Carol\r\nTEL:555-9\r\nEND:VCARD\r\n",
    );
    let before = std::fs::read(env.store.root().join("1.vcf")).unwrap();
    let source = env.source(
        "in.vcf",
        "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Carol\r\nTEL:555-9\r\nEND:VCARD\r\n",
    );

    let report = import_files(&env.store, &[source], ImportOptions::default()).await;

    assert_eq!(report.unchanged, 1);
    assert_eq!(std::fs::read(env.store.root().join("1.vcf")).unwrap(), before);
}

#[test_log::test(tokio::test)]
async fn broken_name_fails_only_its_contact() {
    let env = TestEnv::new().await;
    let source = env.source("mixed.vcf", &format!("{ALICE}{BROKEN_QP}{CAROL}"));

    let report = import_files(&env.store, &[source], ImportOptions::default()).await;

    assert_eq!(report.summary(), "2 of 3 contacts imported");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(env.all().await.len(), 2);
}

#[test_log::test(tokio::test)]
async fn one_by_one_matches_batch_add() {
    let batched = TestEnv::new().await;
    let single = TestEnv::new().await;
    let content = format!("{ALICE_K}{BOB_21}{CAROL}");

    let source = batched.source("in.vcf", &content);
    import_files(&batched.store, &[source], ImportOptions::default()).await;

    let source = single.source("in.vcf", &content);
    import_files(
        &single.store,
        &[source],
        ImportOptions {
            batch_add: false,
            ..ImportOptions::default()
        },
    )
    .await;

    assert_eq!(
        all_phones(&batched.all().await),
        all_phones(&single.all().await)
    );
}

#[test_log::test(tokio::test)]
async fn unrelated_records_on_one_contact_settle_after_one_import() {
    let env = TestEnv::new().await;
    env.seed(
        "x",
        "BEGIN:VCARD\r\nVERSION:3.0\r\nUID:x\r\nFN:Xavier\r\nTEL:555-1\r\nTEL:555-2\r\nEND:VCARD\r\n",
    );
    let source = env.source(
        "in.vcf",
        "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Anna\r\nTEL:555-1\r\nEND:VCARD\r\n\
         BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Bert\r\nTEL:555-2\r\nEND:VCARD\r\n",
    );

    let first = import_files(&env.store, &[source.clone()], ImportOptions::default()).await;
    assert_eq!(first.modified, ["x"]);
    assert_eq!(first.summary(), "2 of 2 contacts imported");
    let stored = env.all().await;

    let second = import_files(&env.store, &[source], ImportOptions::default()).await;
    assert!(second.modified.is_empty());
    assert_eq!(second.unchanged, 2);
    assert_eq!(env.all().await, stored);
    assert_eq!(stored[0].formatted_name(), Some("Bert"));
}
