//! Directory-backed store.
//!
//! Each contact lives in `<uid>.vcf` inside the store directory. Writes go
//! to a hidden temporary file first and are renamed into place, so a reader
//! never sees a half-written contact.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;

use latre_core::constants::VCARD_SUFFIX;
use latre_core::error::CoreError;
use latre_rfc::rfc::filter::AddressbookFilter;
use latre_rfc::rfc::vcard::{ContactRecord, parse, serialize};

use crate::error::{StoreError, StoreResult};
use crate::memory::stamp_new;
use crate::store::ContactStore;

/// A store over a directory of single-contact vCard files.
#[derive(Debug)]
pub struct VdirStore {
    root: PathBuf,
    // Serializes writers; readers go straight to the filesystem.
    write_lock: Mutex<()>,
}

impl VdirStore {
    /// Opens the store at `root`, creating the directory if needed.
    ///
    /// ## Errors
    /// Returns an I/O error if the directory cannot be created.
    #[tracing::instrument]
    pub async fn open(root: impl AsRef<Path> + std::fmt::Debug) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        tracing::debug!("Opened directory store");

        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, uid: &str) -> StoreResult<PathBuf> {
        let acceptable = !uid.is_empty()
            && !uid.starts_with('.')
            && !uid.contains(['/', '\\'])
            && !uid.chars().any(char::is_control);

        if !acceptable {
            return Err(CoreError::InvalidInput(format!("{uid:?} is not a usable uid")).into());
        }
        Ok(self.root.join(format!("{uid}{VCARD_SUFFIX}")))
    }

    async fn read_record(path: &Path) -> StoreResult<ContactRecord> {
        let text = tokio::fs::read_to_string(path).await?;
        let document = parse(&text).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(failure) = document.failures.into_iter().next() {
            return Err(StoreError::Parse {
                path: path.to_path_buf(),
                source: failure.error,
            });
        }

        document
            .records
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(path.display().to_string()))
    }

    async fn write_record(&self, path: &Path, record: &ContactRecord) -> StoreResult<()> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp = self.root.join(format!(".{file_name}.tmp"));

        tokio::fs::write(&temp, serialize(record)).await?;
        tokio::fs::rename(&temp, path).await?;
        Ok(())
    }

    /// Reads every contact file, skipping unreadable ones with a warning.
    async fn scan(&self) -> StoreResult<Vec<ContactRecord>> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut paths = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_contact = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| !n.starts_with('.') && n.ends_with(VCARD_SUFFIX));
            if is_contact {
                paths.push(path);
            }
        }
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::read_record(&path).await {
                Ok(record) => records.push(record),
                Err(error) => {
                    tracing::warn!(path = %path.display(), error = %error, "Skipping unreadable contact file");
                }
            }
        }

        Ok(records)
    }

    /// Reads the record with the given uid.
    ///
    /// ## Errors
    /// Returns `NotFound` for an unknown uid, or a parse error if the file is
    /// corrupt.
    pub async fn get(&self, uid: &str) -> StoreResult<ContactRecord> {
        let path = self.path_for(uid)?;
        match Self::read_record(&path).await {
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(uid.to_string()))
            }
            other => other,
        }
    }
}

impl ContactStore for VdirStore {
    async fn query(&self, filter: &AddressbookFilter) -> StoreResult<Vec<ContactRecord>> {
        let records = self.scan().await?;
        let matches: Vec<_> = records.into_iter().filter(|r| filter.matches(r)).collect();

        tracing::trace!(matches = matches.len(), "Queried directory store");
        Ok(matches)
    }

    async fn add(&self, mut record: ContactRecord) -> StoreResult<String> {
        let _guard = self.write_lock.lock().await;

        let uid = stamp_new(&mut record);
        let path = self.path_for(&uid)?;
        if tokio::fs::try_exists(&path).await? {
            return Err(StoreError::Conflict(uid));
        }
        self.write_record(&path, &record).await?;

        tracing::debug!(uid = %uid, "Added contact");
        Ok(uid)
    }

    async fn modify(&self, record: &ContactRecord) -> StoreResult<()> {
        let uid = record
            .uid()
            .ok_or_else(|| StoreError::NotFound("record has no uid".to_string()))?;

        let _guard = self.write_lock.lock().await;

        let path = self.path_for(uid)?;
        if !tokio::fs::try_exists(&path).await? {
            return Err(StoreError::NotFound(uid.to_string()));
        }

        let mut updated = record.clone();
        updated.set_revision(Utc::now());
        self.write_record(&path, &updated).await?;

        tracing::debug!(uid, "Modified contact");
        Ok(())
    }

    async fn remove(&self, uid: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let path = self.path_for(uid)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(uid, "Removed contact");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(uid.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
