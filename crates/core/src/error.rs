use crate::import::ImportError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing required field(s) in record: {}", .0.join(", "))]
    MissingField(Vec<&'static str>),

    #[error("Incorrect length of {field}: {value}")]
    InvalidLength { field: &'static str, value: String },

    #[error(
        "Headquarters flag ({declared}) does not match SWIFT code {swift_code}: \
         headquarters codes have 8 characters or end with XXX"
    )]
    InvalidHeadquartersFlag { swift_code: String, declared: bool },

    #[error(
        "Provided ISO 2 code doesn't match the one extracted from SWIFT code. \
         ISO2: {iso2}, country code from SWIFT code: {embedded}"
    )]
    CountryCodeMismatch { iso2: String, embedded: String },

    #[error("Record already exists for SWIFT code {0}")]
    DuplicateRecord(String),

    #[error("Headquarters already exists for bank {0}")]
    DuplicateHeadquarters(String),

    #[error("Provided {field} '{provided}' doesn't match '{expected}' stored for the same {scope}")]
    FieldMismatch {
        field: &'static str,
        scope: &'static str,
        expected: String,
        provided: String,
    },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

impl CoreError {
    /// True for the structural record checks (missing field, length,
    /// headquarters flag, embedded country code).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::MissingField(_)
                | CoreError::InvalidLength { .. }
                | CoreError::InvalidHeadquartersFlag { .. }
                | CoreError::CountryCodeMismatch { .. }
        )
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_lists_every_field() {
        let err = CoreError::MissingField(vec!["swiftCode", "countryName"]);
        assert_eq!(
            err.to_string(),
            "Missing required field(s) in record: swiftCode, countryName"
        );
    }

    #[test]
    fn validation_kinds() {
        assert!(CoreError::MissingField(vec!["bankName"]).is_validation());
        assert!(CoreError::CountryCodeMismatch {
            iso2: "PL".into(),
            embedded: "DE".into(),
        }
        .is_validation());
        assert!(!CoreError::DuplicateRecord("PKOPPLPWXXX".into()).is_validation());
        assert!(!CoreError::NotFound {
            entity: "SWIFT code",
            key: "PKOPPLPWXXX".into(),
        }
        .is_validation());
    }
}
