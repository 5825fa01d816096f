//! Configuration constants and validation functions for the splitter.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, SplitterError};
use crate::types::{NumericId, SizeSpec};

/// Default size of the train split (absolute count).
pub const TRAIN_DEFAULT: f64 = 300.0;

/// Default size of the dev split (absolute count).
pub const DEV_DEFAULT: f64 = 34.0;

/// Default proportion of the corpus to use.
pub const TOTAL_DEFAULT: f64 = 1.0;

/// Names of the output subdirectories, in materialization order.
///
/// Entries with these names are never part of the corpus.
pub const RESERVED_NAMES: [&str; 3] = ["train", "dev", "test"];

/// Runs of ASCII decimal digits. `\d` would also match other Unicode digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGIT_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// Extract the numeric identifier of a filename.
///
/// The identifier is the last maximal run of decimal digits in the name,
/// so `passage_12_v3.xml` yields `3`.
///
/// Identifiers of any length are accepted; see [`NumericId`] for ordering.
///
/// # Errors
/// `SplitterError::MissingNumericId` if the name contains no digits.
///
/// # Examples
/// ```
/// use corpus_splitter::config::resolve_numeric_id;
///
/// assert_eq!(resolve_numeric_id("passage_007b.txt").unwrap().value(), Some(7));
/// assert!(resolve_numeric_id("readme.txt").is_err());
/// ```
pub fn resolve_numeric_id(filename: &str) -> Result<NumericId> {
    DIGIT_RUN_PATTERN
        .find_iter(filename)
        .last()
        .map(|digits| NumericId::from_digits(digits.as_str()))
        .ok_or_else(|| SplitterError::MissingNumericId(filename.to_string()))
}

/// Whether a directory entry belongs to the corpus.
///
/// Excludes the reserved bucket directories and hidden entries.
pub fn is_corpus_entry(name: &str) -> bool {
    !RESERVED_NAMES.contains(&name) && !name.starts_with('.')
}

/// Interpret a numeric size argument as a [`SizeSpec`].
///
/// Values up to and including `1.0` are fractions of the corpus, so `1.0`
/// means the whole corpus rather than a single file. Larger values are
/// absolute counts and must be whole numbers.
///
/// # Examples
/// ```
/// use corpus_splitter::config::parse_size_spec;
/// use corpus_splitter::SizeSpec;
///
/// assert_eq!(parse_size_spec(300.0).unwrap(), SizeSpec::Count(300));
/// assert_eq!(parse_size_spec(0.5).unwrap(), SizeSpec::Fraction(0.5));
/// assert!(parse_size_spec(-1.0).is_err());
/// ```
pub fn parse_size_spec(value: f64) -> Result<SizeSpec> {
    if !value.is_finite() || value < 0.0 {
        return Err(SplitterError::InvalidSize(format!(
            "{value} (expected a fraction in [0, 1] or a count above 1)"
        )));
    }

    if value <= 1.0 {
        return Ok(SizeSpec::Fraction(value));
    }

    if value.fract() != 0.0 {
        return Err(SplitterError::InvalidSize(format!(
            "{value} (counts above 1 must be whole numbers)"
        )));
    }

    // Saturates at usize::MAX, which then fails the capacity check
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = value as usize;
    Ok(SizeSpec::Count(count))
}

/// Validate the subsample proportion.
///
/// # Errors
/// `SplitterError::InvalidTotal` unless `0 < total <= 1`.
pub fn validate_total(total: f64) -> Result<()> {
    if total.is_finite() && total > 0.0 && total <= 1.0 {
        Ok(())
    } else {
        Err(SplitterError::InvalidTotal(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_numeric_id_last_run() {
        assert_eq!(resolve_numeric_id("passage_007b.txt").unwrap().value(), Some(7));
        assert_eq!(resolve_numeric_id("f10.txt").unwrap().value(), Some(10));
        assert_eq!(resolve_numeric_id("doc2_part15.xml").unwrap().value(), Some(15));
        assert_eq!(resolve_numeric_id("123").unwrap().value(), Some(123));
    }

    #[test]
    fn test_resolve_numeric_id_missing() {
        let err = resolve_numeric_id("readme.txt").unwrap_err();
        assert!(matches!(err, SplitterError::MissingNumericId(name) if name == "readme.txt"));
    }

    #[test]
    fn test_resolve_numeric_id_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not decimal digits for our purposes
        assert!(resolve_numeric_id("passage_\u{0663}.txt").is_err());
    }

    #[test]
    fn test_resolve_numeric_id_beyond_u64() {
        let long = resolve_numeric_id("capture_20240101123000123456789.wav").unwrap();
        assert_eq!(long.as_str(), "20240101123000123456789");
        assert!(long > resolve_numeric_id("capture_99.wav").unwrap());
    }

    #[test]
    fn test_is_corpus_entry() {
        assert!(is_corpus_entry("f1.txt"));
        assert!(is_corpus_entry("training"));
        assert!(!is_corpus_entry("train"));
        assert!(!is_corpus_entry("dev"));
        assert!(!is_corpus_entry("test"));
        assert!(!is_corpus_entry(".gitignore"));
        assert!(!is_corpus_entry(".hidden5"));
    }

    #[test]
    fn test_parse_size_spec_boundaries() {
        assert_eq!(parse_size_spec(0.0).unwrap(), SizeSpec::Fraction(0.0));
        assert_eq!(parse_size_spec(1.0).unwrap(), SizeSpec::Fraction(1.0));
        assert_eq!(parse_size_spec(2.0).unwrap(), SizeSpec::Count(2));
        assert_eq!(parse_size_spec(34.0).unwrap(), SizeSpec::Count(34));
    }

    #[test]
    fn test_parse_size_spec_invalid() {
        assert!(parse_size_spec(-0.5).is_err());
        assert!(parse_size_spec(2.5).is_err());
        assert!(parse_size_spec(f64::NAN).is_err());
        assert!(parse_size_spec(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_total() {
        assert!(validate_total(1.0).is_ok());
        assert!(validate_total(0.25).is_ok());
        assert!(validate_total(0.0).is_err());
        assert!(validate_total(1.5).is_err());
        assert!(validate_total(-0.1).is_err());
        assert!(validate_total(f64::NAN).is_err());
    }
}
