//! Registry records and the shapes returned by lookups.
//!
//! Wire names follow the public API (`swiftCode`, `countryISO2`,
//! `isHeadquarter`, ...).

use serde::{Deserialize, Serialize};

use crate::classifier;

// ---------------------------------------------------------------------------
// Stored record
// ---------------------------------------------------------------------------

/// A stored SWIFT code: a bank headquarters or one of its branches.
///
/// `swift_code` is always the uppercase 11-character form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankBranch {
    pub address: Option<String>,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    #[serde(rename = "isHeadquarter")]
    pub is_headquarters: bool,
    pub swift_code: String,
}

impl BankBranch {
    /// Institution code (first 4 characters of the SWIFT code).
    pub fn bank_code(&self) -> &str {
        classifier::bank_code(&self.swift_code)
    }

    /// Country code embedded in the SWIFT code.
    pub fn country_code(&self) -> String {
        classifier::country_code(&self.swift_code)
    }

    pub fn summary(&self) -> BranchSummary {
        BranchSummary {
            address: self.address.clone(),
            bank_name: self.bank_name.clone(),
            country_iso2: self.country_iso2.clone(),
            is_headquarters: self.is_headquarters,
            swift_code: self.swift_code.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Create candidate
// ---------------------------------------------------------------------------

/// A record submitted for creation. Required fields are optional here so
/// that missing ones can be reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBankBranch {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default, rename = "countryISO2")]
    pub country_iso2: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default, rename = "isHeadquarter")]
    pub is_headquarters: bool,
    #[serde(default)]
    pub swift_code: Option<String>,
}

impl NewBankBranch {
    /// Trim every text field; blank values become `None`.
    pub fn trimmed(self) -> Self {
        Self {
            address: clean_field(self.address),
            bank_name: clean_field(self.bank_name),
            country_iso2: clean_field(self.country_iso2),
            country_name: clean_field(self.country_name),
            is_headquarters: self.is_headquarters,
            swift_code: clean_field(self.swift_code),
        }
    }
}

/// Trim a raw text value, mapping blank input to `None`.
pub(crate) fn clean_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Query results
// ---------------------------------------------------------------------------

/// Compact entry used in branch lists and country listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSummary {
    pub address: Option<String>,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    #[serde(rename = "isHeadquarter")]
    pub is_headquarters: bool,
    pub swift_code: String,
}

/// A headquarters together with every branch sharing its 8-character prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadquartersDetails {
    #[serde(flatten)]
    pub headquarters: BankBranch,
    pub branches: Vec<BranchSummary>,
}

/// Result of a single-code lookup.
///
/// Serialized untagged: a headquarters always carries a `branches` array,
/// a branch never has the key at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SwiftCodeDetails {
    Headquarters(HeadquartersDetails),
    Branch(BankBranch),
}

impl SwiftCodeDetails {
    pub fn record(&self) -> &BankBranch {
        match self {
            SwiftCodeDetails::Headquarters(hq) => &hq.headquarters,
            SwiftCodeDetails::Branch(record) => record,
        }
    }
}

/// Every SWIFT code registered for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySwiftCodes {
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub swift_codes: Vec<BranchSummary>,
}
