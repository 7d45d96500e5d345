//! Cross-record checks run against existing data before a create.
//!
//! Only used for individual creates; the bulk loader trusts its source file.

use crate::classifier;
use crate::error::{CoreError, CoreResult};
use crate::store::SwiftCodeStore;
use crate::validation::CheckedCandidate;

/// Read-only checks of a candidate against the store.
pub struct ConsistencyChecker<'a> {
    store: &'a dyn SwiftCodeStore,
}

impl<'a> ConsistencyChecker<'a> {
    pub fn new(store: &'a dyn SwiftCodeStore) -> Self {
        Self { store }
    }

    /// Run every check in order: duplicate code, headquarters uniqueness,
    /// country name agreement, bank name agreement. The first failure wins.
    pub async fn check(&self, candidate: &CheckedCandidate) -> CoreResult<()> {
        self.check_duplicate(&candidate.submitted_code).await?;
        if candidate.record.is_headquarters {
            self.check_headquarters_unique(&candidate.record.swift_code)
                .await?;
        }
        self.check_country_name(&candidate.record.country_iso2, &candidate.record.country_name)
            .await?;
        self.check_bank_name(candidate.record.bank_code(), &candidate.record.bank_name)
            .await
    }

    /// Fail if a record with exactly this code already exists.
    pub async fn check_duplicate(&self, swift_code: &str) -> CoreResult<()> {
        if self.store.find_by_code(swift_code).await?.is_some() {
            tracing::warn!(swift_code, "Record already exists");
            return Err(CoreError::DuplicateRecord(swift_code.to_string()));
        }
        Ok(())
    }

    /// Fail if the bank already has a headquarters for this prefix.
    pub async fn check_headquarters_unique(&self, swift_code: &str) -> CoreResult<()> {
        let hq_code = classifier::headquarters_code(swift_code);
        if self.store.find_by_code(&hq_code).await?.is_some() {
            tracing::warn!(swift_code, %hq_code, "Headquarters already exists");
            return Err(CoreError::DuplicateHeadquarters(
                classifier::bank_prefix(swift_code).to_string(),
            ));
        }
        Ok(())
    }

    /// The country name must equal the most frequent name already stored
    /// for the ISO-2 code. Accepted unconditionally when none is stored.
    pub async fn check_country_name(&self, country_iso2: &str, country_name: &str) -> CoreResult<()> {
        let stored = self.store.country_names_by_frequency(country_iso2).await?;
        agree_with_first(stored, country_name, "country name", "ISO 2 code", country_iso2)
    }

    /// The bank name must equal the most frequent name already stored for
    /// the bank code. Accepted unconditionally when none is stored.
    pub async fn check_bank_name(&self, bank_code: &str, bank_name: &str) -> CoreResult<()> {
        let stored = self.store.bank_names_by_frequency(bank_code).await?;
        agree_with_first(stored, bank_name, "bank name", "bank code", bank_code)
    }
}

fn agree_with_first(
    stored: Vec<String>,
    provided: &str,
    field: &'static str,
    scope: &'static str,
    key: &str,
) -> CoreResult<()> {
    if stored.len() > 1 {
        tracing::warn!(
            field,
            key,
            distinct = stored.len(),
            "Possible inconsistent data: several values stored for the same key"
        );
    }

    match stored.into_iter().next() {
        None => {
            tracing::debug!(field, key, provided, "No stored value, accepting");
            Ok(())
        }
        Some(expected) if expected == provided => Ok(()),
        Some(expected) => {
            tracing::warn!(field, key, %expected, provided, "Field mismatch with stored data");
            Err(CoreError::FieldMismatch {
                field,
                scope,
                expected,
                provided: provided.to_string(),
            })
        }
    }
}
