#![allow(dead_code, clippy::unwrap_used)]
//! Test helpers for integration tests.
//!
//! Every test gets its own temporary directory holding the source files and
//! a directory-backed store; both disappear when the `TestEnv` is dropped.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use latre_test::component::config::{
    ExportConfig, ImportConfig, LoggingConfig, Settings, StoreConfig,
};
use latre_test::component::store::{ContactStore, VdirStore};
use latre_test::component::vcard::ContactRecord;

pub const ALICE: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Alice\r\nN:A;Alice;;;\r\nTEL:555-1\r\nEND:VCARD\r\n";

pub const ALICE_K: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Alice K.\r\nN:K.;Alice;;;\r\nTEL:555-1\r\nTEL:555-2\r\nEND:VCARD\r\n";

pub const BOB_21: &str = "BEGIN:VCARD\r\nVERSION:2.1\r\nN;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:Nguy=E1=BB=85n;Qu=C3=A2n\r\nTEL;CELL:555-3\r\nEND:VCARD\r\n";

pub const CAROL: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Carol\r\nEMAIL:carol@example.com\r\nX-PHONETIC-FIRST-NAME:Ka-rol\r\nTEL:555-9\r\nEND:VCARD\r\n";

pub const NO_PHONE: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Dana\r\nEMAIL:dana@example.com\r\nEND:VCARD\r\n";

pub const BROKEN_QP: &str = "BEGIN:VCARD\r\nVERSION:2.1\r\nN;ENCODING=QUOTED-PRINTABLE:broken without colon pairs\r\nTEL:555-4\r\nEND:VCARD\r\n";

pub struct TestEnv {
    dir: TempDir,
    pub store: VdirStore,
}

impl TestEnv {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = VdirStore::open(dir.path().join("store")).await.unwrap();
        Self { dir, store }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes a source file and returns its path as an import source.
    pub fn source(&self, name: &str, content: &str) -> String {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    /// Places a contact file straight into the store directory, keeping its
    /// `UID` and `REV` as written.
    pub fn seed(&self, uid: &str, content: &str) {
        std::fs::write(self.store.root().join(format!("{uid}.vcf")), content).unwrap();
    }

    pub async fn reopen(&self) -> VdirStore {
        VdirStore::open(self.store.root()).await.unwrap()
    }

    pub async fn all(&self) -> Vec<ContactRecord> {
        self.store.all().await.unwrap()
    }

    pub fn settings(&self) -> Settings {
        Settings {
            store: StoreConfig {
                path: self.store.root().to_path_buf(),
            },
            import: ImportConfig {
                max_parallel_reads: 2,
                batch_add: true,
            },
            export: ExportConfig {
                inline_photos: true,
            },
            logging: LoggingConfig {
                level: "debug".into(),
            },
        }
    }
}

pub fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Panics if two stored records share a phone number.
pub fn assert_no_shared_phones(records: &[ContactRecord]) {
    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            assert!(
                !a.shares_phone_with(b),
                "{:?} and {:?} share a number",
                a.uid(),
                b.uid()
            );
        }
    }
}

pub fn all_phones(records: &[ContactRecord]) -> Vec<String> {
    let mut phones: Vec<String> = records
        .iter()
        .flat_map(|r| r.phones().iter().cloned())
        .collect();
    phones.sort();
    phones
}
