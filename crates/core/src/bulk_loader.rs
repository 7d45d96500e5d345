//! One-shot batch ingestion of a SWIFT code dataset.
//!
//! Each row is checked structurally (required fields, code length, country
//! match); failing rows are logged and skipped so a bad row never aborts the
//! run. Accepted rows are staged and flushed to the store in fixed-size
//! batches. Cross-record consistency checks are not applied: the dataset is
//! loaded as-is.

use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::classifier;
use crate::error::CoreResult;
use crate::import;
use crate::model::BankBranch;
use crate::store::SwiftCodeStore;
use crate::validation;

/// Rows staged before each flush to the store.
pub const DEFAULT_BATCH_SIZE: usize = 200;

/// Raw cells of one input row. Blank cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub country_iso2: Option<String>,
    pub swift_code: Option<String>,
    pub bank_name: Option<String>,
    pub address: Option<String>,
    pub country_name: Option<String>,
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Records written to the store.
    pub imported: u64,
    /// Rows rejected by validation or unreadable.
    pub skipped: u64,
    /// Valid rows whose code was already stored (or repeated in the input).
    pub duplicates: u64,
    /// Number of batch flushes.
    pub batches: u64,
}

pub struct BulkLoader {
    store: Arc<dyn SwiftCodeStore>,
    batch_size: usize,
}

impl BulkLoader {
    pub fn new(store: Arc<dyn SwiftCodeStore>) -> Self {
        Self {
            store,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Load `path` unless the store already holds records.
    ///
    /// Returns `None` when the import was skipped because data is present.
    pub async fn load_file_if_empty(&self, path: &Path) -> CoreResult<Option<ImportSummary>> {
        tracing::info!(path = %path.display(), "Initializing SWIFT codes from file if store is empty");
        if self.store.count().await? > 0 {
            tracing::info!("Skipping import, records already in store");
            return Ok(None);
        }
        let rows = import::open(path)?;
        self.load(rows).await.map(Some)
    }

    /// Validate, stage and flush every row.
    pub async fn load<I, E>(&self, rows: I) -> CoreResult<ImportSummary>
    where
        I: IntoIterator<Item = Result<RawRow, E>>,
        E: Display,
    {
        let mut summary = ImportSummary::default();
        let mut staged: Vec<BankBranch> = Vec::with_capacity(self.batch_size);

        for (idx, row) in rows.into_iter().enumerate() {
            // +2: one for the header, one for 1-based line numbers.
            let line = idx + 2;
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    tracing::warn!(line, error = %err, "Unreadable row skipped");
                    summary.skipped += 1;
                    continue;
                }
            };

            match stage_row(&row) {
                Ok(record) => staged.push(record),
                Err(err) => {
                    tracing::warn!(line, swift_code = ?row.swift_code, error = %err, "Row skipped");
                    summary.skipped += 1;
                    continue;
                }
            }

            if staged.len() == self.batch_size {
                self.flush(&mut staged, &mut summary).await?;
            }
        }
        if !staged.is_empty() {
            self.flush(&mut staged, &mut summary).await?;
        }

        tracing::info!(
            imported = summary.imported,
            skipped = summary.skipped,
            duplicates = summary.duplicates,
            batches = summary.batches,
            "Import completed"
        );
        Ok(summary)
    }

    async fn flush(&self, staged: &mut Vec<BankBranch>, summary: &mut ImportSummary) -> CoreResult<()> {
        let written = self.store.insert_batch(staged).await?;
        summary.imported += written;
        summary.duplicates += staged.len() as u64 - written;
        summary.batches += 1;
        tracing::debug!(written, batch = summary.batches, "Batch flushed");
        staged.clear();
        Ok(())
    }
}

/// Structural checks for one row, then build the stored record.
fn stage_row(row: &RawRow) -> CoreResult<BankBranch> {
    let fields = validation::require_fields(
        row.swift_code.as_deref(),
        row.country_iso2.as_deref(),
        row.bank_name.as_deref(),
        row.country_name.as_deref(),
    )?;
    validation::check_code_length(fields.swift_code)?;
    validation::check_country_match(fields.swift_code, fields.country_iso2)?;

    let code = fields.swift_code.to_ascii_uppercase();
    Ok(BankBranch {
        address: row.address.clone(),
        bank_name: fields.bank_name.to_string(),
        country_iso2: fields.country_iso2.to_ascii_uppercase(),
        country_name: fields.country_name.to_uppercase(),
        is_headquarters: classifier::is_headquarters(&code),
        swift_code: classifier::canonicalize(&code),
    })
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::io::Write;

    use super::*;
    use crate::memory::InMemoryStore;

    fn row(iso2: &str, code: &str, bank: &str, country: &str) -> RawRow {
        RawRow {
            country_iso2: Some(iso2.into()),
            swift_code: Some(code.into()),
            bank_name: Some(bank.into()),
            address: None,
            country_name: Some(country.into()),
        }
    }

    fn ok_rows(rows: Vec<RawRow>) -> Vec<Result<RawRow, Infallible>> {
        rows.into_iter().map(Ok).collect()
    }

    fn loader(store: &Arc<InMemoryStore>) -> BulkLoader {
        BulkLoader::new(store.clone())
    }

    #[tokio::test]
    async fn imports_valid_rows_and_skips_invalid() {
        let store = Arc::new(InMemoryStore::new());
        let rows = ok_rows(vec![
            row("AL", "AAISALTRXXX", "UNITED BANK OF ALBANIA SH.A", "ALBANIA"),
            row("BG", "ADCRBGS1XXX", "ADAMANT CAPITAL PARTNERS AD", "BULGARIA"),
            // Embedded country (UZ) does not match the declared one.
            row("UY", "AFAAUZM1XXX", "AFINIDAD AFAP S.A.", "URUGUAY"),
            RawRow {
                bank_name: None,
                ..row("BG", "ABIEBGS1XXX", "ABV INVESTMENTS LTD", "BULGARIA")
            },
            row("BG", "ABIEBGS", "ABV", "BULGARIA"),
            row("LV", "AIZKLV22", "ABLV BANK, AS IN LIQUIDATION", "latvia"),
        ]);

        let summary = loader(&store).load(rows).await.unwrap();

        assert_eq!(summary.imported, 3);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.batches, 1);

        let latvia = store.find_by_code("AIZKLV22XXX").await.unwrap().unwrap();
        assert!(latvia.is_headquarters);
        assert_eq!(latvia.country_name, "LATVIA");
        assert!(store.find_by_code("AFAAUZM1XXX").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unreadable_rows_are_counted_as_skipped() {
        let store = Arc::new(InMemoryStore::new());
        let rows: Vec<Result<RawRow, String>> = vec![
            Err("bad utf-8".into()),
            Ok(row("PL", "PKOPPLPWXXX", "PKO", "POLAND")),
        ];

        let summary = loader(&store).load(rows).await.unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[tokio::test]
    async fn branches_are_classified_from_the_code() {
        let store = Arc::new(InMemoryStore::new());
        let rows = ok_rows(vec![
            row("PL", "PKOPPLPWXXX", "PKO", "POLAND"),
            row("PL", "pkopplpw001", "PKO", "Poland"),
        ]);

        loader(&store).load(rows).await.unwrap();

        let branch = store.find_by_code("PKOPPLPW001").await.unwrap().unwrap();
        assert!(!branch.is_headquarters);
        assert_eq!(branch.country_name, "POLAND");
    }

    #[tokio::test]
    async fn consistency_checks_are_not_applied() {
        let store = Arc::new(InMemoryStore::new());
        let rows = ok_rows(vec![
            row("PL", "PKOPPLPWXXX", "PKO", "POLAND"),
            row("PL", "PKOPPLPW001", "SOMETHING ELSE", "POLSKA"),
        ]);

        let summary = loader(&store).load(rows).await.unwrap();
        assert_eq!(summary.imported, 2);
    }

    #[tokio::test]
    async fn flushes_in_batches() {
        let store = Arc::new(InMemoryStore::new());
        let rows = ok_rows(
            (0..5)
                .map(|i| row("PL", &format!("PKOPPLPW00{i}"), "PKO", "POLAND"))
                .collect(),
        );

        let summary = loader(&store)
            .with_batch_size(2)
            .load(rows)
            .await
            .unwrap();

        assert_eq!(summary.imported, 5);
        assert_eq!(summary.batches, 3);
        assert_eq!(store.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn repeated_codes_are_counted_as_duplicates() {
        let store = Arc::new(InMemoryStore::new());
        let rows = ok_rows(vec![
            row("PL", "PKOPPLPW", "PKO", "POLAND"),
            row("PL", "PKOPPLPWXXX", "PKO", "POLAND"),
        ]);

        let summary = loader(&store).load(rows).await.unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.duplicates, 1);
    }

    #[tokio::test]
    async fn file_load_runs_only_on_empty_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "COUNTRY ISO2 CODE,SWIFT CODE,CODE TYPE,NAME,ADDRESS,TOWN NAME,COUNTRY NAME,TIME ZONE"
        )
        .unwrap();
        writeln!(
            file,
            "PL,PKOPPLPWXXX,BIC11,PKO BANK POLSKI S.A.,PULAWSKA 15,WARSZAWA,POLAND,Europe/Warsaw"
        )
        .unwrap();
        writeln!(
            file,
            "PL,PKOPPLPW001,BIC11,PKO BANK POLSKI S.A.,,WARSZAWA,POLAND,Europe/Warsaw"
        )
        .unwrap();

        let store = Arc::new(InMemoryStore::new());
        let first = loader(&store).load_file_if_empty(file.path()).await.unwrap();
        assert_eq!(first.map(|s| s.imported), Some(2));

        let second = loader(&store).load_file_if_empty(file.path()).await.unwrap();
        assert_eq!(second, None);
        assert_eq!(store.count().await.unwrap(), 2);

        let branch = store.find_by_code("PKOPPLPW001").await.unwrap().unwrap();
        assert_eq!(branch.address, None);
    }
}
