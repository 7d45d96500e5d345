//! In-process [`SwiftCodeStore`] backed by an insertion-ordered map.
//!
//! Used when no database is configured and as the store behind tests.
//! Insertion order stands in for storage order in the frequency queries.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::model::BankBranch;
use crate::store::{StoreResult, SwiftCodeStore};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<IndexMap<String, BankBranch>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Distinct values ordered by occurrence count, ties by first occurrence.
fn by_frequency<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // Stable sort keeps first-occurrence order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(v, _)| v.to_string()).collect()
}

fn sorted_by_code(mut records: Vec<BankBranch>) -> Vec<BankBranch> {
    records.sort_by(|a, b| a.swift_code.cmp(&b.swift_code));
    records
}

#[async_trait]
impl SwiftCodeStore for InMemoryStore {
    async fn find_by_code(&self, swift_code: &str) -> StoreResult<Option<BankBranch>> {
        Ok(self.records.read().await.get(swift_code).cloned())
    }

    async fn find_by_prefix(
        &self,
        prefix: &str,
        headquarters: Option<bool>,
    ) -> StoreResult<Vec<BankBranch>> {
        let records = self.records.read().await;
        let matching = records
            .values()
            .filter(|r| r.swift_code.starts_with(prefix))
            .filter(|r| headquarters.map_or(true, |hq| r.is_headquarters == hq))
            .cloned()
            .collect();
        Ok(sorted_by_code(matching))
    }

    async fn find_by_country(&self, country_iso2: &str) -> StoreResult<Vec<BankBranch>> {
        let records = self.records.read().await;
        let matching = records
            .values()
            .filter(|r| r.country_iso2 == country_iso2)
            .cloned()
            .collect();
        Ok(sorted_by_code(matching))
    }

    async fn country_names_by_frequency(&self, country_iso2: &str) -> StoreResult<Vec<String>> {
        let records = self.records.read().await;
        Ok(by_frequency(
            records
                .values()
                .filter(|r| r.country_iso2 == country_iso2)
                .map(|r| r.country_name.as_str()),
        ))
    }

    async fn bank_names_by_frequency(&self, bank_code: &str) -> StoreResult<Vec<String>> {
        let records = self.records.read().await;
        Ok(by_frequency(
            records
                .values()
                .filter(|r| r.swift_code.starts_with(bank_code))
                .map(|r| r.bank_name.as_str()),
        ))
    }

    async fn insert(&self, record: &BankBranch) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.swift_code) {
            return Ok(false);
        }
        records.insert(record.swift_code.clone(), record.clone());
        Ok(true)
    }

    async fn insert_batch(&self, batch: &[BankBranch]) -> StoreResult<u64> {
        let mut records = self.records.write().await;
        let mut inserted = 0;
        for record in batch {
            if !records.contains_key(&record.swift_code) {
                records.insert(record.swift_code.clone(), record.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn delete_by_code(&self, swift_code: &str) -> StoreResult<u64> {
        let removed = self.records.write().await.shift_remove(swift_code);
        Ok(u64::from(removed.is_some()))
    }

    async fn delete_by_prefix(&self, prefix: &str) -> StoreResult<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|code, _| !code.starts_with(prefix));
        Ok((before - records.len()) as u64)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
