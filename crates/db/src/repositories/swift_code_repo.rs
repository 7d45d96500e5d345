//! Repository for the `swift_codes` table.

use sqlx::PgPool;
use swiftreg_core::model::BankBranch;

use crate::models::swift_code::SwiftCodeRow;

/// Column list for `swift_codes` queries.
const SWIFT_CODE_COLUMNS: &str = "\
    id, swift_code, country_iso2, country_name, bank_name, address, is_headquarters";

/// Provides queries and writes for SWIFT code records.
pub struct SwiftCodeRepo;

impl SwiftCodeRepo {
    pub async fn find_by_code(
        pool: &PgPool,
        swift_code: &str,
    ) -> Result<Option<SwiftCodeRow>, sqlx::Error> {
        let query = format!("SELECT {SWIFT_CODE_COLUMNS} FROM swift_codes WHERE swift_code = $1");
        sqlx::query_as::<_, SwiftCodeRow>(&query)
            .bind(swift_code)
            .fetch_optional(pool)
            .await
    }

    /// Rows whose code starts with `prefix`, ordered by code. A `None`
    /// headquarters filter returns both kinds.
    pub async fn find_by_prefix(
        pool: &PgPool,
        prefix: &str,
        headquarters: Option<bool>,
    ) -> Result<Vec<SwiftCodeRow>, sqlx::Error> {
        let query = format!(
            "SELECT {SWIFT_CODE_COLUMNS} FROM swift_codes \
             WHERE swift_code LIKE $1 \
               AND ($2::BOOLEAN IS NULL OR is_headquarters = $2) \
             ORDER BY swift_code"
        );
        sqlx::query_as::<_, SwiftCodeRow>(&query)
            .bind(like_prefix(prefix))
            .bind(headquarters)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_country(
        pool: &PgPool,
        country_iso2: &str,
    ) -> Result<Vec<SwiftCodeRow>, sqlx::Error> {
        let query = format!(
            "SELECT {SWIFT_CODE_COLUMNS} FROM swift_codes \
             WHERE country_iso2 = $1 \
             ORDER BY swift_code"
        );
        sqlx::query_as::<_, SwiftCodeRow>(&query)
            .bind(country_iso2)
            .fetch_all(pool)
            .await
    }

    /// Distinct country names for an ISO-2 code, most frequent first.
    /// Ties go to the name stored first.
    pub async fn country_names_by_frequency(
        pool: &PgPool,
        country_iso2: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT country_name FROM swift_codes \
             WHERE country_iso2 = $1 \
             GROUP BY country_name \
             ORDER BY COUNT(*) DESC, MIN(id)",
        )
        .bind(country_iso2)
        .fetch_all(pool)
        .await
    }

    /// Distinct bank names among codes starting with `bank_code`, most
    /// frequent first. Ties go to the name stored first.
    pub async fn bank_names_by_frequency(
        pool: &PgPool,
        bank_code: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT bank_name FROM swift_codes \
             WHERE swift_code LIKE $1 \
             GROUP BY bank_name \
             ORDER BY COUNT(*) DESC, MIN(id)",
        )
        .bind(like_prefix(bank_code))
        .fetch_all(pool)
        .await
    }

    /// Insert a record unless its code already exists.
    ///
    /// Returns `false` when the unique constraint on `swift_code` swallowed
    /// the insert.
    pub async fn insert(pool: &PgPool, record: &BankBranch) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO swift_codes \
                (swift_code, country_iso2, country_name, bank_name, address, is_headquarters) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (swift_code) DO NOTHING",
        )
        .bind(&record.swift_code)
        .bind(&record.country_iso2)
        .bind(&record.country_name)
        .bind(&record.bank_name)
        .bind(&record.address)
        .bind(record.is_headquarters)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Batch-insert records in one statement, skipping codes already stored
    /// (or repeated within the batch). Returns the number of rows written.
    pub async fn insert_batch(pool: &PgPool, records: &[BankBranch]) -> Result<u64, sqlx::Error> {
        if records.is_empty() {
            return Ok(0);
        }

        let codes: Vec<&str> = records.iter().map(|r| r.swift_code.as_str()).collect();
        let iso2s: Vec<&str> = records.iter().map(|r| r.country_iso2.as_str()).collect();
        let countries: Vec<&str> = records.iter().map(|r| r.country_name.as_str()).collect();
        let banks: Vec<&str> = records.iter().map(|r| r.bank_name.as_str()).collect();
        let addresses: Vec<Option<&str>> = records.iter().map(|r| r.address.as_deref()).collect();
        let hq_flags: Vec<bool> = records.iter().map(|r| r.is_headquarters).collect();

        let result = sqlx::query(
            "INSERT INTO swift_codes \
                (swift_code, country_iso2, country_name, bank_name, address, is_headquarters) \
             SELECT * FROM UNNEST($1::text[], $2::text[], $3::text[], $4::text[], $5::text[], $6::boolean[]) \
             ON CONFLICT (swift_code) DO NOTHING",
        )
        .bind(&codes)
        .bind(&iso2s)
        .bind(&countries)
        .bind(&banks)
        .bind(&addresses)
        .bind(&hq_flags)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_by_code(pool: &PgPool, swift_code: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM swift_codes WHERE swift_code = $1")
            .bind(swift_code)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every row whose code starts with `prefix` in one statement.
    pub async fn delete_by_prefix(pool: &PgPool, prefix: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM swift_codes WHERE swift_code LIKE $1")
            .bind(like_prefix(prefix))
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM swift_codes")
            .fetch_one(pool)
            .await
    }
}

/// `LIKE` pattern matching values that start with `prefix` literally.
///
/// `%` and `_` in the input would otherwise act as wildcards, so a
/// delete of `"________"` would wipe the table.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
