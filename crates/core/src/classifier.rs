//! SWIFT/BIC code classification.
//!
//! A BIC is either 8 characters (BIC8, always a headquarters) or 11
//! characters (BIC11), where the branch suffix `XXX` marks the headquarters.
//! Every function here assumes an ASCII code whose length was already
//! validated with [`crate::validation::check_code_length`].

/// Branch suffix that marks an 11-character headquarters code.
pub const HEADQUARTERS_SUFFIX: &str = "XXX";

/// Length of a BIC without the branch suffix.
pub const BIC8_LEN: usize = 8;

/// Length of a full BIC including the branch suffix.
pub const BIC11_LEN: usize = 11;

/// Whether `code` denotes a bank's headquarters.
///
/// ```
/// use swiftreg_core::classifier::is_headquarters;
///
/// assert!(is_headquarters("PKOPPLPW"));
/// assert!(is_headquarters("PKOPPLPWXXX"));
/// assert!(!is_headquarters("PKOPPLPW001"));
/// ```
pub fn is_headquarters(code: &str) -> bool {
    code.len() == BIC8_LEN || (code.len() == BIC11_LEN && code.ends_with(HEADQUARTERS_SUFFIX))
}

/// Canonical 11-character form: BIC8 codes get the `XXX` suffix appended,
/// BIC11 codes are returned unchanged.
pub fn canonicalize(code: &str) -> String {
    if code.len() == BIC8_LEN {
        format!("{code}{HEADQUARTERS_SUFFIX}")
    } else {
        code.to_string()
    }
}

/// The 8-character bank + country + location prefix shared by a
/// headquarters and its branches.
pub fn bank_prefix(code: &str) -> &str {
    code.get(..BIC8_LEN).unwrap_or(code)
}

/// Institution code: the first 4 characters.
pub fn bank_code(code: &str) -> &str {
    code.get(..4).unwrap_or(code)
}

/// Embedded ISO-2 country code (characters 5-6), uppercased.
pub fn country_code(code: &str) -> String {
    code.get(4..6).unwrap_or_default().to_ascii_uppercase()
}

/// Headquarters code for the family `code` belongs to.
pub fn headquarters_code(code: &str) -> String {
    format!("{}{HEADQUARTERS_SUFFIX}", bank_prefix(code))
}
