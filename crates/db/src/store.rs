//! [`SwiftCodeStore`] over the `swift_codes` table.

use async_trait::async_trait;
use swiftreg_core::model::BankBranch;
use swiftreg_core::store::{StoreError, StoreResult, SwiftCodeStore};

use crate::models::swift_code::SwiftCodeRow;
use crate::repositories::SwiftCodeRepo;
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgSwiftCodeStore {
    pool: DbPool,
}

impl PgSwiftCodeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_branches(rows: Vec<SwiftCodeRow>) -> Vec<BankBranch> {
    rows.into_iter().map(BankBranch::from).collect()
}

#[async_trait]
impl SwiftCodeStore for PgSwiftCodeStore {
    async fn find_by_code(&self, swift_code: &str) -> StoreResult<Option<BankBranch>> {
        let row = SwiftCodeRepo::find_by_code(&self.pool, swift_code)
            .await
            .map_err(StoreError::new)?;
        Ok(row.map(BankBranch::from))
    }

    async fn find_by_prefix(
        &self,
        prefix: &str,
        headquarters: Option<bool>,
    ) -> StoreResult<Vec<BankBranch>> {
        SwiftCodeRepo::find_by_prefix(&self.pool, prefix, headquarters)
            .await
            .map(into_branches)
            .map_err(StoreError::new)
    }

    async fn find_by_country(&self, country_iso2: &str) -> StoreResult<Vec<BankBranch>> {
        SwiftCodeRepo::find_by_country(&self.pool, country_iso2)
            .await
            .map(into_branches)
            .map_err(StoreError::new)
    }

    async fn country_names_by_frequency(&self, country_iso2: &str) -> StoreResult<Vec<String>> {
        SwiftCodeRepo::country_names_by_frequency(&self.pool, country_iso2)
            .await
            .map_err(StoreError::new)
    }

    async fn bank_names_by_frequency(&self, bank_code: &str) -> StoreResult<Vec<String>> {
        SwiftCodeRepo::bank_names_by_frequency(&self.pool, bank_code)
            .await
            .map_err(StoreError::new)
    }

    async fn insert(&self, record: &BankBranch) -> StoreResult<bool> {
        SwiftCodeRepo::insert(&self.pool, record)
            .await
            .map_err(StoreError::new)
    }

    async fn insert_batch(&self, records: &[BankBranch]) -> StoreResult<u64> {
        let written = SwiftCodeRepo::insert_batch(&self.pool, records)
            .await
            .map_err(StoreError::new)?;
        tracing::debug!(rows = records.len(), written, "Batch inserted into swift_codes");
        Ok(written)
    }

    async fn delete_by_code(&self, swift_code: &str) -> StoreResult<u64> {
        SwiftCodeRepo::delete_by_code(&self.pool, swift_code)
            .await
            .map_err(StoreError::new)
    }

    async fn delete_by_prefix(&self, prefix: &str) -> StoreResult<u64> {
        SwiftCodeRepo::delete_by_prefix(&self.pool, prefix)
            .await
            .map_err(StoreError::new)
    }

    async fn count(&self) -> StoreResult<u64> {
        let count = SwiftCodeRepo::count(&self.pool)
            .await
            .map_err(StoreError::new)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool)
            .await
            .map_err(StoreError::new)
    }
}
