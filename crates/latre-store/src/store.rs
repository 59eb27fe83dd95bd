use latre_rfc::rfc::filter::AddressbookFilter;
use latre_rfc::rfc::vcard::ContactRecord;

use crate::error::StoreResult;

/// Capability over an address book: predicate queries and record mutations.
///
/// Records are addressed by the uid the store assigns on [`add`]. Every
/// mutation stamps the record's `REV`.
///
/// [`add`]: ContactStore::add
pub trait ContactStore {
    /// Returns every record the filter matches.
    ///
    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn query(
        &self,
        filter: &AddressbookFilter,
    ) -> impl Future<Output = StoreResult<Vec<ContactRecord>>>;

    /// Stores a new record and returns the uid assigned to it.
    ///
    /// Any `UID` the record already carries is replaced.
    ///
    /// ## Errors
    /// Returns an error if the record cannot be written.
    fn add(&self, record: ContactRecord) -> impl Future<Output = StoreResult<String>>;

    /// Stores several new records, returning their uids in input order.
    ///
    /// ## Errors
    /// Returns the first error encountered; records added before it stay.
    fn add_batch(
        &self,
        records: Vec<ContactRecord>,
    ) -> impl Future<Output = StoreResult<Vec<String>>> {
        async move {
            let mut uids = Vec::with_capacity(records.len());
            for record in records {
                uids.push(self.add(record).await?);
            }
            Ok(uids)
        }
    }

    /// Replaces the stored record with the same uid.
    ///
    /// ## Errors
    /// Returns `NotFound` if the record has no uid or the uid is unknown.
    fn modify(&self, record: &ContactRecord) -> impl Future<Output = StoreResult<()>>;

    /// Deletes a record.
    ///
    /// ## Errors
    /// Returns `NotFound` if the uid is unknown.
    fn remove(&self, uid: &str) -> impl Future<Output = StoreResult<()>>;

    /// Returns every stored record.
    ///
    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn all(&self) -> impl Future<Output = StoreResult<Vec<ContactRecord>>> {
        async move { self.query(&AddressbookFilter::default()).await }
    }
}
