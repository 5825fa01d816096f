//! End-to-end split run: list the corpus, partition it and materialize it.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{validate_total, DEV_DEFAULT, TOTAL_DEFAULT, TRAIN_DEFAULT};
use crate::corpus::list_corpus;
use crate::error::Result;
use crate::materialize::{materialize, MaterializeReport};
use crate::partition::partition;
use crate::report::Progress;
use crate::types::{CorpusOrder, MaterializeMode, Partition, SizeSpec};

/// Options for a split run.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOptions {
    pub train: SizeSpec,
    pub dev: SizeSpec,
    /// Proportion of the corpus to use, in `(0, 1]`.
    pub total: f64,
    pub order: CorpusOrder,
    pub mode: MaterializeMode,
    /// Seed for shuffling and subsampling; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SplitOptions {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn default() -> Self {
        Self {
            train: SizeSpec::Count(TRAIN_DEFAULT as usize),
            dev: SizeSpec::Count(DEV_DEFAULT as usize),
            total: TOTAL_DEFAULT,
            order: CorpusOrder::Numeric,
            mode: MaterializeMode::Copy,
            seed: None,
        }
    }
}

impl SplitOptions {
    #[must_use]
    pub fn new(train: SizeSpec, dev: SizeSpec) -> Self {
        Self {
            train,
            dev,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_total(mut self, total: f64) -> Self {
        self.total = total;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: CorpusOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: MaterializeMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Result of a completed split run.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub partition: Partition,
    pub report: MaterializeReport,
}

/// Compute the partition of `directory` without touching the filesystem.
///
/// # Errors
/// Format, empty-corpus, capacity and listing errors; see [`split_corpus`].
pub fn plan_split<R: Rng + ?Sized>(
    directory: &Path,
    options: &SplitOptions,
    rng: &mut R,
) -> Result<Partition> {
    validate_total(options.total)?;

    let corpus = list_corpus(directory, options.order, rng)?;
    let result = partition(corpus, options.train, options.dev, options.total, rng)?;

    tracing::info!(
        directory = %directory.display(),
        train = result.train.len(),
        dev = result.dev.len(),
        test = result.test.len(),
        "Planned split"
    );

    Ok(result)
}

/// Split the corpus in `directory` into `train/`, `dev/` and `test/`.
///
/// # Arguments
/// * `directory` - Directory holding the corpus; buckets are created inside it
/// * `options` - Sizes, ordering, placement mode and seed
/// * `progress` - Receives the summary and per-file events
///
/// # Errors
/// * `SplitterError::InvalidTotal` for a total outside `(0, 1]`
/// * `SplitterError::MissingNumericId` in numeric order for a name without digits
/// * `SplitterError::EmptyCorpus` if there is nothing to split
/// * `SplitterError::Capacity` if train + dev exceed the corpus
/// * `SplitterError::Filesystem` for any failing filesystem operation
///
/// All but the last are reported before anything is written.
pub fn split_corpus(
    directory: &Path,
    options: &SplitOptions,
    progress: &mut dyn Progress,
) -> Result<SplitOutcome> {
    let mut rng = options.rng();
    let partition = plan_split(directory, options, &mut rng)?;
    let report = materialize(directory, &partition, options.mode, progress)?;

    Ok(SplitOutcome { partition, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitterError;
    use crate::report::NoProgress;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_options() {
        let options = SplitOptions::default();
        assert_eq!(options.train, SizeSpec::Count(300));
        assert_eq!(options.dev, SizeSpec::Count(34));
        assert_eq!(options.total, 1.0);
        assert_eq!(options.order, CorpusOrder::Numeric);
        assert_eq!(options.mode, MaterializeMode::Copy);
        assert!(options.seed.is_none());
    }

    #[test]
    fn test_plan_split_rejects_bad_total() {
        let dir = tempdir().unwrap();
        let options = SplitOptions::new(SizeSpec::Count(1), SizeSpec::Count(1)).with_total(0.0);

        let err = plan_split(dir.path(), &options, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, SplitterError::InvalidTotal(_)));
    }

    #[test]
    fn test_capacity_error_leaves_directory_untouched() {
        let dir = tempdir().unwrap();
        for i in 1..=5 {
            fs::write(dir.path().join(format!("f{i}.txt")), "x").unwrap();
        }
        let options = SplitOptions::new(SizeSpec::Count(4), SizeSpec::Count(4));

        let err = split_corpus(dir.path(), &options, &mut NoProgress).unwrap_err();

        assert!(matches!(err, SplitterError::Capacity { .. }));
        for bucket in ["train", "dev", "test"] {
            assert!(!dir.path().join(bucket).exists());
        }
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let dir = tempdir().unwrap();
        for i in 1..=30 {
            fs::write(dir.path().join(format!("f{i}.txt")), "x").unwrap();
        }
        let options = SplitOptions::new(SizeSpec::Count(10), SizeSpec::Count(5))
            .with_order(CorpusOrder::Shuffled)
            .with_total(0.8)
            .with_seed(1234);

        let first = plan_split(dir.path(), &options, &mut options.rng()).unwrap();
        let second = plan_split(dir.path(), &options, &mut options.rng()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.sizes().total(), 24);
    }
}
