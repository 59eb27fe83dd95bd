#![allow(clippy::unwrap_used)]
//! Import into the directory store and export back out.

use latre_test::component::export::{ExportOptions, export_to_dir, export_to_file};
use latre_test::component::import::{ImportOptions, import_files};
use latre_test::component::store::{ContactStore, MemoryStore};
use latre_test::component::vcard::parse;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn imported_contacts_persist_as_files() {
    let env = TestEnv::new().await;
    let source = env.source("phone.vcf", &format!("{ALICE_K}{BOB_21}{CAROL}"));

    let report = import_files(&env.store, &[source], ImportOptions::default()).await;
    assert_eq!(report.summary(), "3 of 3 contacts imported");

    let files = std::fs::read_dir(env.store.root()).unwrap().count();
    assert_eq!(files, 3);

    let reopened = env.reopen().await;
    let all = reopened.all().await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|r| r.uid().is_some() && r.revision().is_some()));

    let bob = all.iter().find(|r| r.phones().contains("555-3")).unwrap();
    let name = bob.name().unwrap().unwrap();
    assert_eq!(name.family, "Nguyễn");
    assert_eq!(name.given, "Quân");
}

#[test_log::test(tokio::test)]
async fn file_uris_are_accepted() {
    let env = TestEnv::new().await;
    env.source("a.vcf", ALICE);

    let report = import_files(
        &env.store,
        &[file_uri(&env.path("a.vcf"))],
        ImportOptions::default(),
    )
    .await;

    assert!(!report.has_failures());
    assert_eq!(env.all().await.len(), 1);
}

#[test_log::test(tokio::test)]
async fn remote_uris_fail_alone() {
    let env = TestEnv::new().await;
    let local = env.source("a.vcf", ALICE);

    let report = import_files(
        &env.store,
        &["https://example.com/contacts.vcf".to_string(), local],
        ImportOptions::default(),
    )
    .await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source, "https://example.com/contacts.vcf");
    assert_eq!(report.summary(), "1 of 1 contacts imported");
}

#[test_log::test(tokio::test)]
async fn exported_file_imports_into_an_equivalent_store() {
    let env = TestEnv::new().await;
    let source = env.source("in.vcf", &format!("{ALICE_K}{BOB_21}{CAROL}{NO_PHONE}"));
    import_files(&env.store, &[source], ImportOptions::default()).await;

    let exported = env.path("out.vcf");
    export_to_file(&env.all().await, &exported, ExportOptions::default())
        .await
        .unwrap();

    let text = std::fs::read_to_string(&exported).unwrap();
    assert_eq!(parse(&text).unwrap().records.len(), 4);

    let fresh = MemoryStore::new();
    let report = import_files(
        &fresh,
        &[exported.to_string_lossy().into_owned()],
        ImportOptions::default(),
    )
    .await;
    assert_eq!(report.summary(), "4 of 4 contacts imported");

    let mut before: Vec<_> = env.all().await.iter().filter_map(|r| r.display_name()).collect();
    let mut after: Vec<_> = fresh
        .all()
        .await
        .unwrap()
        .iter()
        .filter_map(|r| r.display_name())
        .collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
    assert_eq!(all_phones(&env.all().await), all_phones(&fresh.all().await.unwrap()));
}

#[test_log::test(tokio::test)]
async fn split_export_names_files_after_contacts() {
    let env = TestEnv::new().await;
    let source = env.source("in.vcf", &format!("{ALICE}{CAROL}{NO_PHONE}"));
    import_files(&env.store, &[source], ImportOptions::default()).await;

    let out = env.path("split");
    let written = export_to_dir(&env.all().await, &out, ExportOptions::default())
        .await
        .unwrap();

    let mut names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["alice.vcf", "carol.vcf", "dana.vcf"]);
}

#[test_log::test(tokio::test)]
async fn stored_photo_is_inlined_on_export() {
    let env = TestEnv::new().await;
    let photo = env.path("face.jpg");
    std::fs::write(&photo, b"jpeg").unwrap();
    let source = env.source(
        "in.vcf",
        &format!(
            "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Eve\r\nTEL:555-7\r\nPHOTO;VALUE=uri:{}\r\nEND:VCARD\r\n",
            file_uri(&photo)
        ),
    );
    import_files(&env.store, &[source], ImportOptions::default()).await;

    let out = env.path("eve.vcf");
    export_to_file(&env.all().await, &out, ExportOptions::default())
        .await
        .unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("PHOTO;ENCODING=b;TYPE=JPEG:anBlZw=="));
}
