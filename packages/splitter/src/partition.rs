//! Three-way partitioning of an ordered corpus.
//!
//! Pure computation over the in-memory file list; nothing here touches the
//! filesystem, so every error is reported before any bucket is created.

use rand::seq::index;
use rand::Rng;

use crate::error::{Result, SplitterError};
use crate::types::{floor_fraction, Partition, SizeSpec};

/// Draw `floor(len * total)` files without replacement.
///
/// The result is in the random order the sampler produced. `total >= 1.0`
/// returns the corpus unchanged and does not consume randomness.
pub fn subsample<R: Rng + ?Sized>(corpus: Vec<String>, total: f64, rng: &mut R) -> Vec<String> {
    if total >= 1.0 {
        return corpus;
    }

    let amount = floor_fraction(corpus.len(), total);
    let mut slots: Vec<Option<String>> = corpus.into_iter().map(Some).collect();
    index::sample(rng, slots.len(), amount)
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

/// Partition a corpus into train, dev and test buckets.
///
/// After optional subsampling by `total`, the first `train` files go to the
/// train bucket, the next `dev` files to the dev bucket, and the rest to the
/// test bucket.
///
/// # Arguments
/// * `corpus` - Files in corpus order
/// * `train` - Size of the train bucket
/// * `dev` - Size of the dev bucket
/// * `total` - Proportion of the corpus to use, in `(0, 1]`
/// * `rng` - Random source for subsampling
///
/// # Errors
/// * `SplitterError::InvalidSize` if a fraction lies outside `[0, 1]`
/// * `SplitterError::EmptyCorpus` if no files remain after subsampling
/// * `SplitterError::Capacity` if `train + dev` exceeds the remaining files
pub fn partition<R: Rng + ?Sized>(
    corpus: Vec<String>,
    train: SizeSpec,
    dev: SizeSpec,
    total: f64,
    rng: &mut R,
) -> Result<Partition> {
    train.validate()?;
    dev.validate()?;

    let mut files = subsample(corpus, total, rng);
    if files.is_empty() {
        return Err(SplitterError::EmptyCorpus);
    }

    let available = files.len();
    let train = train.resolve(available);
    let dev = dev.resolve(available);
    tracing::debug!(available, train, dev, "Resolved split sizes");

    match train.checked_add(dev) {
        Some(requested) if requested <= available => {}
        _ => {
            return Err(SplitterError::Capacity {
                train,
                dev,
                available,
            })
        }
    }

    let test = files.split_off(train + dev);
    let dev_files = files.split_off(train);

    Ok(Partition {
        train: files,
        dev: dev_files,
        test,
    })
}
