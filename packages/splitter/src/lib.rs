//! Corpus splitter - partition a directory of numbered files into train, dev
//! and test directories.
//!
//! The corpus is every entry of a directory except hidden ones and the
//! `train`, `dev` and `test` directories themselves. It is ordered by the
//! numeric ID in each filename (or shuffled), cut into a train prefix, a dev
//! slice and a test remainder, and each bucket is filled with copies of or
//! links to the original files.
//!
//! # Example
//!
//! ```
//! use corpus_splitter::{partition, SizeSpec};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let corpus: Vec<String> = (1..=10).map(|i| format!("f{i}.txt")).collect();
//! let mut rng = StdRng::seed_from_u64(0);
//! let result = partition(corpus, SizeSpec::Count(3), SizeSpec::Fraction(0.2), 1.0, &mut rng).unwrap();
//!
//! assert_eq!(result.train, ["f1.txt", "f2.txt", "f3.txt"]);
//! assert_eq!(result.dev, ["f4.txt", "f5.txt"]);
//! assert_eq!(result.test.len(), 5);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Defaults, reserved names and argument validation
//! - [`types`]: Core data types (SizeSpec, Bucket, Partition, etc.)
//! - [`error`]: Error types and Result alias
//! - [`corpus`]: Corpus listing and ordering
//! - [`partition`]: Subsampling and three-way partitioning
//! - [`materialize`]: Bucket directories, copies and links
//! - [`report`]: Console output
//! - [`splitter`]: End-to-end split run
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod materialize;
pub mod partition;
pub mod report;
pub mod splitter;
pub mod types;

// Re-export main functions
pub use corpus::list_corpus;
pub use materialize::{materialize, LinkStrategy, Materializer, SymlinkStrategy};
pub use partition::partition;
pub use splitter::{plan_split, split_corpus, SplitOptions, SplitOutcome};

// Re-export commonly used items
pub use config::resolve_numeric_id;
pub use error::{Result, SplitterError};
pub use types::{
    Bucket, CorpusOrder, MaterializeMode, NumericId, Partition, SizeSpec, SplitSizes,
};
