//! CSV source for the bulk loader.
//!
//! Expects a header row followed by rows in the registry export layout:
//!
//! ```text
//! COUNTRY ISO2 CODE,SWIFT CODE,CODE TYPE,NAME,ADDRESS,TOWN NAME,COUNTRY NAME,TIME ZONE
//! ```
//!
//! Cells are picked by position; the remaining columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::bulk_loader::RawRow;
use crate::model::clean_field;

pub const COL_COUNTRY_ISO2: usize = 0;
pub const COL_SWIFT_CODE: usize = 1;
pub const COL_BANK_NAME: usize = 3;
pub const COL_ADDRESS: usize = 4;
pub const COL_COUNTRY_NAME: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to open import file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV record: {0}")]
    Csv(#[from] csv::Error),
}

impl RawRow {
    fn from_record(record: &csv::StringRecord) -> Self {
        let cell = |idx: usize| clean_field(record.get(idx).map(str::to_string));
        Self {
            country_iso2: cell(COL_COUNTRY_ISO2),
            swift_code: cell(COL_SWIFT_CODE),
            bank_name: cell(COL_BANK_NAME),
            address: cell(COL_ADDRESS),
            country_name: cell(COL_COUNTRY_NAME),
        }
    }
}

/// Stream rows from any CSV reader. Short rows are tolerated; their
/// missing cells come back as `None`.
pub fn read_rows<R: Read>(reader: R) -> impl Iterator<Item = Result<RawRow, ImportError>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
        .into_records()
        .map(|record| {
            record
                .map(|r| RawRow::from_record(&r))
                .map_err(ImportError::from)
        })
}

/// Open a CSV file and stream its rows.
pub fn open(path: &Path) -> Result<impl Iterator<Item = Result<RawRow, ImportError>>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(read_rows(file))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assert_matches::assert_matches;

    use super::*;

    const HEADER: &str =
        "COUNTRY ISO2 CODE,SWIFT CODE,CODE TYPE,NAME,ADDRESS,TOWN NAME,COUNTRY NAME,TIME ZONE\n";

    #[test]
    fn reads_cells_by_position() {
        let data = format!(
            "{HEADER}AL,AAISALTRXXX,BIC11,UNITED BANK OF ALBANIA SH.A, HYRJA 3 RR. DRITAN HOXHA ND. 11 ,TIRANA,ALBANIA,Europe/Tirane\n"
        );
        let rows: Vec<_> = read_rows(data.as_bytes()).collect::<Result<_, _>>().unwrap();

        assert_eq!(
            rows,
            vec![RawRow {
                country_iso2: Some("AL".into()),
                swift_code: Some("AAISALTRXXX".into()),
                bank_name: Some("UNITED BANK OF ALBANIA SH.A".into()),
                address: Some("HYRJA 3 RR. DRITAN HOXHA ND. 11".into()),
                country_name: Some("ALBANIA".into()),
            }]
        );
    }

    #[test]
    fn blank_and_missing_cells_are_none() {
        let data = format!("{HEADER}BG,ADCRBGS1XXX,BIC11,ADAMANT CAPITAL PARTNERS AD,  ,SOFIA\n");
        let rows: Vec<_> = read_rows(data.as_bytes()).collect::<Result<_, _>>().unwrap();

        assert_eq!(rows[0].address, None);
        assert_eq!(rows[0].country_name, None);
        assert_eq!(rows[0].swift_code.as_deref(), Some("ADCRBGS1XXX"));
    }

    #[test]
    fn header_only_yields_nothing() {
        assert_eq!(read_rows(HEADER.as_bytes()).count(), 0);
    }

    #[test]
    fn open_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{HEADER}PL,PKOPPLPWXXX,BIC11,PKO BANK POLSKI S.A.,PULAWSKA 15,WARSZAWA,POLAND,Europe/Warsaw\n"
        )
        .unwrap();

        let rows: Vec<_> = open(file.path()).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country_iso2.as_deref(), Some("PL"));
    }

    #[test]
    fn open_missing_file_fails() {
        let err = open(Path::new("/nonexistent/swift_codes.csv")).err();
        assert_matches!(err, Some(ImportError::Open { .. }));
    }
}
