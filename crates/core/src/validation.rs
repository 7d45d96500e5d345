//! Structural checks on a single candidate record.
//!
//! Each check fails with its own [`CoreError`] kind and never coerces the
//! input. All checks expect trimmed, non-empty values; comparisons are made
//! on uppercase forms.

use crate::classifier;
use crate::error::{CoreError, CoreResult};
use crate::model::{BankBranch, NewBankBranch};

/// The four required values of a record, once known to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredFields<'a> {
    pub swift_code: &'a str,
    pub country_iso2: &'a str,
    pub bank_name: &'a str,
    pub country_name: &'a str,
}

/// Fail with every absent required field listed, not just the first one.
pub fn require_fields<'a>(
    swift_code: Option<&'a str>,
    country_iso2: Option<&'a str>,
    bank_name: Option<&'a str>,
    country_name: Option<&'a str>,
) -> CoreResult<RequiredFields<'a>> {
    if let (Some(swift_code), Some(country_iso2), Some(bank_name), Some(country_name)) =
        (swift_code, country_iso2, bank_name, country_name)
    {
        return Ok(RequiredFields {
            swift_code,
            country_iso2,
            bank_name,
            country_name,
        });
    }

    let missing = [
        ("swiftCode", swift_code.is_none()),
        ("countryISO2", country_iso2.is_none()),
        ("bankName", bank_name.is_none()),
        ("countryName", country_name.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();

    Err(CoreError::MissingField(missing))
}

/// Codes are ASCII only, so byte length equals character length and the
/// classifier can slice them by position.
pub fn check_code_length(swift_code: &str) -> CoreResult<()> {
    match swift_code.len() {
        classifier::BIC8_LEN | classifier::BIC11_LEN if swift_code.is_ascii() => Ok(()),
        _ => Err(CoreError::InvalidLength {
            field: "SWIFT code",
            value: swift_code.to_string(),
        }),
    }
}

pub fn check_iso2_length(country_iso2: &str) -> CoreResult<()> {
    if country_iso2.len() == 2 && country_iso2.is_ascii() {
        Ok(())
    } else {
        Err(CoreError::InvalidLength {
            field: "ISO 2 code",
            value: country_iso2.to_string(),
        })
    }
}

/// The declared headquarters flag must agree with the shape of the code.
pub fn check_headquarters_flag(swift_code: &str, declared: bool) -> CoreResult<()> {
    if classifier::is_headquarters(&swift_code.to_ascii_uppercase()) == declared {
        Ok(())
    } else {
        Err(CoreError::InvalidHeadquartersFlag {
            swift_code: swift_code.to_string(),
            declared,
        })
    }
}

/// The country code embedded at positions 5-6 must equal the declared ISO-2.
pub fn check_country_match(swift_code: &str, country_iso2: &str) -> CoreResult<()> {
    let embedded = classifier::country_code(swift_code);
    if embedded.eq_ignore_ascii_case(country_iso2) {
        Ok(())
    } else {
        Err(CoreError::CountryCodeMismatch {
            iso2: country_iso2.to_string(),
            embedded,
        })
    }
}

/// A candidate that passed every structural check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedCandidate {
    /// The code as submitted, uppercased but not canonicalized.
    pub submitted_code: String,
    /// The record in its stored form.
    pub record: BankBranch,
}

/// Run the structural checks for a create request, in order: required
/// fields, code length, ISO-2 length, headquarters flag, country match.
/// The first failing check wins.
pub fn check_candidate(candidate: &NewBankBranch) -> CoreResult<CheckedCandidate> {
    let RequiredFields {
        swift_code,
        country_iso2,
        bank_name,
        country_name,
    } = require_fields(
        candidate.swift_code.as_deref(),
        candidate.country_iso2.as_deref(),
        candidate.bank_name.as_deref(),
        candidate.country_name.as_deref(),
    )?;

    check_code_length(swift_code)?;
    check_iso2_length(country_iso2)?;
    tracing::debug!(swift_code, "Code lengths valid");

    check_headquarters_flag(swift_code, candidate.is_headquarters)?;
    tracing::debug!(
        swift_code,
        is_headquarters = candidate.is_headquarters,
        "Headquarters flag valid"
    );

    check_country_match(swift_code, country_iso2)?;
    tracing::debug!(swift_code, country_iso2, "Country code matches ISO 2");

    let submitted_code = swift_code.to_ascii_uppercase();
    Ok(CheckedCandidate {
        record: BankBranch {
            address: candidate.address.clone(),
            bank_name: bank_name.to_string(),
            country_iso2: country_iso2.to_ascii_uppercase(),
            country_name: country_name.to_uppercase(),
            is_headquarters: candidate.is_headquarters,
            swift_code: classifier::canonicalize(&submitted_code),
        },
        submitted_code,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn candidate(code: &str, iso2: &str, hq: bool) -> NewBankBranch {
        NewBankBranch {
            address: Some("Pulawska 15, Warszawa".into()),
            bank_name: Some("PKO Bank Polski".into()),
            country_iso2: Some(iso2.into()),
            country_name: Some("Poland".into()),
            is_headquarters: hq,
            swift_code: Some(code.into()),
        }
    }

    #[test]
    fn require_fields_reports_all_missing() {
        let err = require_fields(None, Some("PL"), None, None).unwrap_err();
        assert_matches!(
            err,
            CoreError::MissingField(fields) if fields == vec!["swiftCode", "bankName", "countryName"]
        );
    }

    #[test]
    fn require_fields_accepts_complete_record() {
        assert!(require_fields(Some("PKOPPLPW"), Some("PL"), Some("PKO"), Some("POLAND")).is_ok());
    }

    #[test]
    fn code_length_must_be_8_or_11() {
        assert!(check_code_length("PKOPPLPW").is_ok());
        assert!(check_code_length("PKOPPLPWXXX").is_ok());
        assert_matches!(
            check_code_length("PKOPPLPWXX"),
            Err(CoreError::InvalidLength { field: "SWIFT code", .. })
        );
        assert_matches!(check_code_length("PKOPPLP"), Err(CoreError::InvalidLength { .. }));
    }

    #[test]
    fn code_length_counts_characters_not_bytes() {
        // 10 characters, 11 bytes.
        assert_matches!(
            check_code_length("ĄKOPPLPW0X"),
            Err(CoreError::InvalidLength { field: "SWIFT code", .. })
        );
        // 7 characters, 8 bytes.
        assert_matches!(check_code_length("ĄKOPPLP"), Err(CoreError::InvalidLength { .. }));
        // Right character count, still not a BIC.
        assert_matches!(check_code_length("ĄKOPPLPW"), Err(CoreError::InvalidLength { .. }));
    }

    #[test]
    fn iso2_length_must_be_2() {
        assert!(check_iso2_length("PL").is_ok());
        assert_matches!(
            check_iso2_length("POL"),
            Err(CoreError::InvalidLength { field: "ISO 2 code", .. })
        );
        assert_matches!(
            check_iso2_length("Ą"),
            Err(CoreError::InvalidLength { field: "ISO 2 code", .. })
        );
    }

    #[test]
    fn headquarters_flag_must_match_code_shape() {
        assert!(check_headquarters_flag("PKOPPLPWXXX", true).is_ok());
        assert!(check_headquarters_flag("PKOPPLPW", true).is_ok());
        assert!(check_headquarters_flag("PKOPPLPW001", false).is_ok());
        assert!(check_headquarters_flag("pkopplpwxxx", true).is_ok());
        assert_matches!(
            check_headquarters_flag("PKOPPLPWXXX", false),
            Err(CoreError::InvalidHeadquartersFlag { declared: false, .. })
        );
        assert_matches!(
            check_headquarters_flag("PKOPPLPW001", true),
            Err(CoreError::InvalidHeadquartersFlag { declared: true, .. })
        );
    }

    #[test]
    fn country_match_is_case_insensitive() {
        assert!(check_country_match("PKOPPLPWXXX", "PL").is_ok());
        assert!(check_country_match("pkopplpwxxx", "pl").is_ok());
    }

    #[test]
    fn country_mismatch_has_its_own_kind() {
        let err = check_country_match("PKOPDEPWXXX", "PL").unwrap_err();
        assert_matches!(
            err,
            CoreError::CountryCodeMismatch { ref iso2, ref embedded } if iso2 == "PL" && embedded == "DE"
        );
    }

    #[test]
    fn check_candidate_normalizes_record() {
        let checked = check_candidate(&candidate("pkopplpw", "pl", true)).unwrap();

        assert_eq!(checked.submitted_code, "PKOPPLPW");
        assert_eq!(checked.record.swift_code, "PKOPPLPWXXX");
        assert_eq!(checked.record.country_iso2, "PL");
        assert_eq!(checked.record.country_name, "POLAND");
        assert_eq!(checked.record.bank_name, "PKO Bank Polski");
        assert_eq!(checked.record.address.as_deref(), Some("Pulawska 15, Warszawa"));
        assert!(checked.record.is_headquarters);
    }

    #[test]
    fn check_candidate_runs_checks_in_order() {
        // Missing fields win over a bad length.
        let mut c = candidate("PKOPPLP", "PL", false);
        c.bank_name = None;
        assert_matches!(check_candidate(&c), Err(CoreError::MissingField(_)));

        // Length wins over the headquarters flag.
        assert_matches!(
            check_candidate(&candidate("PKOPPLP", "PL", true)),
            Err(CoreError::InvalidLength { .. })
        );

        // Headquarters flag wins over the country match.
        assert_matches!(
            check_candidate(&candidate("PKOPDEPW001", "PL", true)),
            Err(CoreError::InvalidHeadquartersFlag { .. })
        );

        assert_matches!(
            check_candidate(&candidate("PKOPDEPWXXX", "PL", true)),
            Err(CoreError::CountryCodeMismatch { .. })
        );
    }
}
