//! Registry operations: create, lookup, lookup by country, delete.
//!
//! The only component that writes to the store. Codes and ISO-2 values are
//! accepted in any case and uppercased before they reach the store.

use std::sync::Arc;

use crate::classifier;
use crate::consistency::ConsistencyChecker;
use crate::error::{CoreError, CoreResult};
use crate::model::{
    BankBranch, BranchSummary, CountrySwiftCodes, HeadquartersDetails, NewBankBranch,
    SwiftCodeDetails,
};
use crate::store::SwiftCodeStore;
use crate::validation;

#[derive(Clone)]
pub struct RegistryService {
    store: Arc<dyn SwiftCodeStore>,
}

impl RegistryService {
    pub fn new(store: Arc<dyn SwiftCodeStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn SwiftCodeStore> {
        &self.store
    }

    /// Validate and store a new record.
    ///
    /// Structural checks run first, then the consistency checks against the
    /// store, then the insert. Nothing is written when any step fails.
    pub async fn create(&self, candidate: NewBankBranch) -> CoreResult<BankBranch> {
        let candidate = candidate.trimmed();
        tracing::info!(swift_code = ?candidate.swift_code, "Creating SWIFT code");

        let checked = validation::check_candidate(&candidate)?;
        ConsistencyChecker::new(self.store.as_ref())
            .check(&checked)
            .await?;

        // Headquarters are always stored under `prefix + XXX`, so the atomic
        // insert-if-absent also settles a concurrent second headquarters.
        if !self.store.insert(&checked.record).await? {
            let code = checked.record.swift_code;
            tracing::warn!(swift_code = %code, "Lost insert race, record already present");
            return Err(if checked.record.is_headquarters {
                CoreError::DuplicateHeadquarters(classifier::bank_prefix(&code).to_string())
            } else {
                CoreError::DuplicateRecord(code)
            });
        }

        tracing::info!(swift_code = %checked.record.swift_code, "SWIFT code created");
        Ok(checked.record)
    }

    /// Fetch a record by code (8 or 11 characters, any case).
    ///
    /// A headquarters comes back with every non-headquarters record sharing
    /// its 8-character prefix; a branch comes back alone.
    pub async fn lookup(&self, swift_code: &str) -> CoreResult<SwiftCodeDetails> {
        tracing::info!(swift_code, "Fetching SWIFT code");
        validation::check_code_length(swift_code)?;

        let code = classifier::canonicalize(&swift_code.to_ascii_uppercase());
        let record = self
            .store
            .find_by_code(&code)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "SWIFT code",
                key: swift_code.to_string(),
            })?;

        if !classifier::is_headquarters(&code) {
            tracing::info!(swift_code = %code, "Identified as branch");
            return Ok(SwiftCodeDetails::Branch(record));
        }

        let branches: Vec<BranchSummary> = self
            .store
            .find_by_prefix(classifier::bank_prefix(&code), Some(false))
            .await?
            .iter()
            .map(BankBranch::summary)
            .collect();
        tracing::info!(swift_code = %code, count = branches.len(), "Identified as headquarters");

        Ok(SwiftCodeDetails::Headquarters(HeadquartersDetails {
            headquarters: record,
            branches,
        }))
    }

    /// Every record registered for a country, with the country name most
    /// frequently stored for it.
    pub async fn lookup_by_country(&self, country_iso2: &str) -> CoreResult<CountrySwiftCodes> {
        tracing::info!(country_iso2, "Fetching SWIFT codes for country");
        validation::check_iso2_length(country_iso2)?;

        let iso2 = country_iso2.to_ascii_uppercase();
        let country_name = self
            .store
            .country_names_by_frequency(&iso2)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::NotFound {
                entity: "ISO 2 code",
                key: country_iso2.to_string(),
            })?;

        let swift_codes: Vec<BranchSummary> = self
            .store
            .find_by_country(&iso2)
            .await?
            .iter()
            .map(BankBranch::summary)
            .collect();
        tracing::info!(country_iso2 = %iso2, count = swift_codes.len(), "Found SWIFT codes");

        Ok(CountrySwiftCodes {
            country_iso2: iso2,
            country_name,
            swift_codes,
        })
    }

    /// Delete by code. An 8-character code removes the headquarters and all
    /// of its branches; an 11-character code removes that record only.
    /// Returns the number of records removed, 0 when nothing matched.
    pub async fn delete(&self, swift_code: &str) -> CoreResult<u64> {
        tracing::info!(swift_code, "Deleting SWIFT code");
        validation::check_code_length(swift_code)?;

        let code = swift_code.to_ascii_uppercase();
        let deleted = if code.len() == classifier::BIC8_LEN {
            tracing::info!(swift_code = %code, "BIC8 given, deleting headquarters and branches");
            self.store.delete_by_prefix(&code).await?
        } else {
            self.store.delete_by_code(&code).await?
        };

        tracing::info!(swift_code = %code, deleted, "Delete completed");
        Ok(deleted)
    }
}
