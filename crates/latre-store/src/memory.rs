//! In-memory store.

use chrono::Utc;
use tokio::sync::Mutex;

use latre_rfc::rfc::filter::AddressbookFilter;
use latre_rfc::rfc::vcard::ContactRecord;

use crate::error::{StoreError, StoreResult};
use crate::store::ContactStore;

/// A store keeping records in insertion order behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<ContactRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records as-is.
    ///
    /// Existing `UID` and `REV` lines are kept; records without a uid get one.
    #[must_use]
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ContactRecord>,
    {
        let records = records
            .into_iter()
            .map(|mut record| {
                if !record.is_persisted() {
                    record.set_uid(&new_uid());
                }
                record
            })
            .collect();

        Self {
            records: Mutex::new(records),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Returns a copy of the record with the given uid.
    pub async fn get(&self, uid: &str) -> Option<ContactRecord> {
        self.records
            .lock()
            .await
            .iter()
            .find(|r| r.uid() == Some(uid))
            .cloned()
    }
}

pub(crate) fn new_uid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Gives a record a fresh uid and the current revision.
pub(crate) fn stamp_new(record: &mut ContactRecord) -> String {
    let uid = new_uid();
    record.set_uid(&uid);
    record.set_revision(Utc::now());
    uid
}

impl ContactStore for MemoryStore {
    async fn query(&self, filter: &AddressbookFilter) -> StoreResult<Vec<ContactRecord>> {
        let records = self.records.lock().await;
        let matches: Vec<_> = records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();

        tracing::trace!(matches = matches.len(), "Queried memory store");
        Ok(matches)
    }

    async fn add(&self, mut record: ContactRecord) -> StoreResult<String> {
        let uid = stamp_new(&mut record);
        self.records.lock().await.push(record);

        tracing::debug!(uid = %uid, "Added contact");
        Ok(uid)
    }

    async fn add_batch(&self, records: Vec<ContactRecord>) -> StoreResult<Vec<String>> {
        let mut stored = self.records.lock().await;
        let mut uids = Vec::with_capacity(records.len());

        for mut record in records {
            uids.push(stamp_new(&mut record));
            stored.push(record);
        }

        tracing::debug!(count = uids.len(), "Added contacts");
        Ok(uids)
    }

    async fn modify(&self, record: &ContactRecord) -> StoreResult<()> {
        let uid = record
            .uid()
            .ok_or_else(|| StoreError::NotFound("record has no uid".to_string()))?;

        let mut records = self.records.lock().await;
        let slot = records
            .iter_mut()
            .find(|r| r.uid() == Some(uid))
            .ok_or_else(|| StoreError::NotFound(uid.to_string()))?;

        let mut updated = record.clone();
        updated.set_revision(Utc::now());
        *slot = updated;

        tracing::debug!(uid, "Modified contact");
        Ok(())
    }

    async fn remove(&self, uid: &str) -> StoreResult<()> {
        let mut records = self.records.lock().await;
        let position = records
            .iter()
            .position(|r| r.uid() == Some(uid))
            .ok_or_else(|| StoreError::NotFound(uid.to_string()))?;
        records.remove(position);

        tracing::debug!(uid, "Removed contact");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, phone: &str) -> ContactRecord {
        ContactRecord::from_lines([format!("FN:{name}"), format!("TEL:{phone}")])
    }

    #[test_log::test(tokio::test)]
    async fn add_assigns_uid_and_revision() {
        let store = MemoryStore::new();
        let mut incoming = contact("Alice", "555-1");
        incoming.set_uid("from-the-file");

        let uid = store.add(incoming).await.unwrap();
        assert_ne!(uid, "from-the-file");

        let stored = store.get(&uid).await.unwrap();
        assert_eq!(stored.uid(), Some(uid.as_str()));
        assert!(stored.revision().is_some());
    }

    #[test_log::test(tokio::test)]
    async fn query_by_phone() {
        let store = MemoryStore::new();
        store
            .add_batch(vec![contact("Alice", "555-1"), contact("Bob", "555-2")])
            .await
            .unwrap();

        let hits = store
            .query(&AddressbookFilter::any_phone(["555-2", "555-3"]))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].formatted_name(), Some("Bob"));

        assert_eq!(store.all().await.unwrap().len(), 2);
    }

    #[test_log::test(tokio::test)]
    async fn modify_replaces_and_restamps() {
        let old = chrono::DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut seeded = contact("Alice", "555-1");
        seeded.set_uid("a");
        seeded.set_revision(old);
        let store = MemoryStore::with_records([seeded]);

        let mut changed = store.get("a").await.unwrap();
        changed.set_lines("FN", vec!["FN:Alice K.".into()]);
        store.modify(&changed).await.unwrap();

        let stored = store.get("a").await.unwrap();
        assert_eq!(stored.formatted_name(), Some("Alice K."));
        assert!(stored.revision().unwrap() > old);
    }

    #[test_log::test(tokio::test)]
    async fn unknown_uids_are_not_found() {
        let store = MemoryStore::new();
        let mut ghost = contact("Ghost", "000");
        assert!(matches!(
            store.modify(&ghost).await,
            Err(StoreError::NotFound(_))
        ));

        ghost.set_uid("nope");
        assert!(matches!(
            store.modify(&ghost).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.remove("nope").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[test_log::test(tokio::test)]
    async fn remove_deletes() {
        let store = MemoryStore::new();
        let uid = store.add(contact("Alice", "555-1")).await.unwrap();
        store.remove(&uid).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[test_log::test(tokio::test)]
    async fn seeded_records_keep_identity() {
        let mut seeded = contact("Alice", "555-1");
        seeded.set_uid("fixed");
        let store = MemoryStore::with_records([seeded, contact("Bob", "555-2")]);

        assert_eq!(store.len().await, 2);
        assert!(store.get("fixed").await.is_some());
        assert!(store.all().await.unwrap().iter().all(ContactRecord::is_persisted));
    }
}
