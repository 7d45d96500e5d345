//! Row model for the `swift_codes` table.

use sqlx::FromRow;
use swiftreg_core::model::BankBranch;

/// A row from the `swift_codes` table.
#[derive(Debug, Clone, FromRow)]
pub struct SwiftCodeRow {
    pub id: i64,
    pub swift_code: String,
    pub country_iso2: String,
    pub country_name: String,
    pub bank_name: String,
    pub address: Option<String>,
    pub is_headquarters: bool,
}

impl From<SwiftCodeRow> for BankBranch {
    fn from(row: SwiftCodeRow) -> Self {
        BankBranch {
            address: row.address,
            bank_name: row.bank_name,
            country_iso2: row.country_iso2,
            country_name: row.country_name,
            is_headquarters: row.is_headquarters,
            swift_code: row.swift_code,
        }
    }
}
