//! Storage seam for SWIFT code records.
//!
//! The engine only talks to storage through [`SwiftCodeStore`]. The
//! PostgreSQL implementation lives in `swiftreg-db`; [`crate::memory`]
//! provides an in-process one.

use std::fmt;

use async_trait::async_trait;

use crate::model::BankBranch;

/// An unexpected storage failure (connectivity, constraint, decoding).
///
/// Carried through the engine untouched and surfaced to the caller.
#[derive(Debug)]
pub struct StoreError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl StoreError {
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(err))
    }

    /// Borrow the underlying error, e.g. to downcast to the backend's type.
    pub fn source_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value style access to stored records, keyed by the 11-character code.
///
/// Codes passed in are already uppercase. Listing methods return records
/// ordered by code. The frequency queries return distinct values ordered by
/// occurrence count (descending), ties broken by storage order.
#[async_trait]
pub trait SwiftCodeStore: Send + Sync {
    async fn find_by_code(&self, swift_code: &str) -> StoreResult<Option<BankBranch>>;

    /// Records whose code starts with `prefix`, optionally filtered by the
    /// headquarters flag.
    async fn find_by_prefix(
        &self,
        prefix: &str,
        headquarters: Option<bool>,
    ) -> StoreResult<Vec<BankBranch>>;

    async fn find_by_country(&self, country_iso2: &str) -> StoreResult<Vec<BankBranch>>;

    /// Distinct country names stored for `country_iso2`, most frequent first.
    async fn country_names_by_frequency(&self, country_iso2: &str) -> StoreResult<Vec<String>>;

    /// Distinct bank names among codes starting with `bank_code`, most
    /// frequent first.
    async fn bank_names_by_frequency(&self, bank_code: &str) -> StoreResult<Vec<String>>;

    /// Insert unless the code is already present. Returns `false` when a
    /// record with the same code exists; the check and the write are atomic.
    async fn insert(&self, record: &BankBranch) -> StoreResult<bool>;

    /// Insert many records at once, skipping codes already present.
    /// Returns the number of rows written.
    async fn insert_batch(&self, records: &[BankBranch]) -> StoreResult<u64>;

    async fn delete_by_code(&self, swift_code: &str) -> StoreResult<u64>;

    /// Delete every record whose code starts with `prefix`, atomically.
    async fn delete_by_prefix(&self, prefix: &str) -> StoreResult<u64>;

    async fn count(&self) -> StoreResult<u64>;

    async fn health_check(&self) -> StoreResult<()>;
}
