//! Core data types for the splitter.

use std::cmp::Ordering;
use std::fmt;

/// Requested size of the train or dev split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeSpec {
    /// Absolute number of files.
    Count(usize),

    /// Proportion of the (subsampled) corpus, in `[0, 1]`.
    ///
    /// Values outside that range are rejected by [`crate::partition::partition`].
    Fraction(f64),
}

impl SizeSpec {
    /// Resolve to a concrete count once the corpus size is known.
    ///
    /// Fractions are floored, matching how the subsample size is computed.
    #[must_use]
    pub fn resolve(&self, available: usize) -> usize {
        match *self {
            Self::Count(count) => count,
            Self::Fraction(fraction) => floor_fraction(available, fraction),
        }
    }

    /// Check that a fraction lies in `[0, 1]`.
    ///
    /// # Errors
    /// `SplitterError::InvalidSize` for fractions outside `[0, 1]` or not finite.
    pub fn validate(&self) -> crate::error::Result<()> {
        match *self {
            Self::Count(_) => Ok(()),
            Self::Fraction(fraction) if (0.0..=1.0).contains(&fraction) => Ok(()),
            Self::Fraction(fraction) => Err(crate::error::SplitterError::InvalidSize(format!(
                "fraction {fraction} (expected a value in [0, 1])"
            ))),
        }
    }
}

/// Numeric identifier of a corpus file: a run of decimal digits.
///
/// Stored without leading zeros and ordered by value, so identifiers of any
/// length compare correctly without overflowing an integer type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericId(String);

impl NumericId {
    /// Build from a run of ASCII digits.
    pub(crate) fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Digits of the identifier, without leading zeros.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier as a `u64`, if it fits.
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Ord for NumericId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for NumericId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NumericId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `floor(len * fraction)`, clamped to `len`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub(crate) fn floor_fraction(len: usize, fraction: f64) -> usize {
    ((len as f64 * fraction).floor() as usize).min(len)
}

/// One of the three output subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Train,
    Dev,
    Test,
}

impl Bucket {
    /// All buckets, in materialization order.
    pub const ALL: [Bucket; 3] = [Bucket::Train, Bucket::Dev, Bucket::Test];

    /// Name of the bucket's subdirectory.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Dev => "dev",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the corpus is ordered before it is cut into buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorpusOrder {
    /// Ascending by numeric identifier, ties broken by name.
    #[default]
    Numeric,

    /// Random permutation.
    Shuffled,
}

/// How files are placed into the bucket directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterializeMode {
    /// Full copy of each file.
    #[default]
    Copy,

    /// Symbolic link to the original, degrading to a copy when links are unavailable.
    Link,
}

impl MaterializeMode {
    /// Label printed before the files of a bucket.
    #[must_use]
    pub fn label(&self, bucket: Bucket) -> String {
        match self {
            Self::Copy => format!("Copying to {bucket}: "),
            Self::Link => format!("Creating link in {bucket} to: "),
        }
    }
}

/// Resolved split sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSizes {
    pub train: usize,
    pub dev: usize,
    pub test: usize,
}

impl SplitSizes {
    /// Total number of files across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.train + self.dev + self.test
    }
}

impl fmt::Display for SplitSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files to split: {}/{}/{}",
            self.total(),
            self.train,
            self.dev,
            self.test
        )
    }
}

/// A three-way partition of the corpus.
///
/// The buckets are disjoint and together hold every file of the corpus they
/// were cut from, each in corpus order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub train: Vec<String>,
    pub dev: Vec<String>,
    pub test: Vec<String>,
}

impl Partition {
    /// Files assigned to a bucket.
    #[must_use]
    pub fn files(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Train => &self.train,
            Bucket::Dev => &self.dev,
            Bucket::Test => &self.test,
        }
    }

    /// Buckets with their files, in materialization order.
    pub fn buckets(&self) -> impl Iterator<Item = (Bucket, &[String])> {
        Bucket::ALL
            .into_iter()
            .map(move |bucket| (bucket, self.files(bucket)))
    }

    #[must_use]
    pub fn sizes(&self) -> SplitSizes {
        SplitSizes {
            train: self.train.len(),
            dev: self.dev.len(),
            test: self.test.len(),
        }
    }

    /// Total number of files in the partition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes().total()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_spec_resolve_count() {
        assert_eq!(SizeSpec::Count(3).resolve(10), 3);
        // Counts are not clamped; the capacity check reports them
        assert_eq!(SizeSpec::Count(30).resolve(10), 30);
    }

    #[test]
    fn test_size_spec_resolve_fraction_floors() {
        assert_eq!(SizeSpec::Fraction(0.5).resolve(10), 5);
        assert_eq!(SizeSpec::Fraction(0.2).resolve(10), 2);
        assert_eq!(SizeSpec::Fraction(0.25).resolve(10), 2);
        assert_eq!(SizeSpec::Fraction(0.99).resolve(10), 9);
        assert_eq!(SizeSpec::Fraction(1.0).resolve(7), 7);
        assert_eq!(SizeSpec::Fraction(0.0).resolve(7), 0);
    }

    #[test]
    fn test_size_spec_validate() {
        assert!(SizeSpec::Count(500).validate().is_ok());
        assert!(SizeSpec::Fraction(0.0).validate().is_ok());
        assert!(SizeSpec::Fraction(1.0).validate().is_ok());
        assert!(SizeSpec::Fraction(1.5).validate().is_err());
        assert!(SizeSpec::Fraction(-0.1).validate().is_err());
        assert!(SizeSpec::Fraction(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_numeric_id_orders_by_value() {
        let mut ids: Vec<NumericId> = ["10", "9", "0010", "000", "100000000000000000000000", "2"]
            .into_iter()
            .map(NumericId::from_digits)
            .collect();
        ids.sort();
        let digits: Vec<&str> = ids.iter().map(NumericId::as_str).collect();
        assert_eq!(
            digits,
            vec!["0", "2", "9", "10", "10", "100000000000000000000000"]
        );
    }

    #[test]
    fn test_numeric_id_value() {
        assert_eq!(NumericId::from_digits("007").value(), Some(7));
        assert_eq!(NumericId::from_digits("99999999999999999999999").value(), None);
    }

    #[test]
    fn test_bucket_names() {
        let names: Vec<&str> = Bucket::ALL.iter().map(Bucket::as_str).collect();
        assert_eq!(names, vec!["train", "dev", "test"]);
        assert_eq!(names, crate::config::RESERVED_NAMES.to_vec());
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(MaterializeMode::Copy.label(Bucket::Train), "Copying to train: ");
        assert_eq!(
            MaterializeMode::Link.label(Bucket::Dev),
            "Creating link in dev to: "
        );
    }

    #[test]
    fn test_split_sizes_display() {
        let sizes = SplitSizes {
            train: 3,
            dev: 2,
            test: 5,
        };
        assert_eq!(sizes.to_string(), "10 files to split: 3/2/5");
    }

    #[test]
    fn test_partition_buckets_order() {
        let partition = Partition {
            train: vec!["a1".to_string()],
            dev: vec!["b2".to_string()],
            test: vec!["c3".to_string(), "d4".to_string()],
        };
        let buckets: Vec<(Bucket, usize)> = partition
            .buckets()
            .map(|(bucket, files)| (bucket, files.len()))
            .collect();
        assert_eq!(
            buckets,
            vec![(Bucket::Train, 1), (Bucket::Dev, 1), (Bucket::Test, 2)]
        );
        assert_eq!(partition.len(), 4);
        assert!(!partition.is_empty());
    }
}
