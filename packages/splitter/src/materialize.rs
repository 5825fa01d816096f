//! Placing a partition on the filesystem.
//!
//! Each bucket becomes a subdirectory of the corpus directory holding copies
//! of (or symbolic links to) its files under their original names.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SplitterError};
use crate::report::Progress;
use crate::types::{Bucket, MaterializeMode, Partition};

/// Name of the temporary link used to probe for symlink support.
///
/// Hidden, so a leftover probe is never mistaken for a corpus file.
pub const LINK_PROBE_NAME: &str = ".split-corpus-link-probe";

/// Trait for creating links to corpus files.
///
/// Implementations decide whether a target directory can hold links at all
/// and how a single link is made.
pub trait LinkStrategy {
    /// Whether links can be created inside `directory`.
    fn supports_links(&self, directory: &Path) -> bool;

    /// Create `link` pointing at `original`.
    fn link(&self, original: &Path, link: &Path) -> io::Result<()>;
}

/// Strategy using the platform's symbolic links.
pub struct SymlinkStrategy;

impl LinkStrategy for SymlinkStrategy {
    fn supports_links(&self, directory: &Path) -> bool {
        let probe = directory.join(LINK_PROBE_NAME);
        let _ = fs::remove_file(&probe);

        match self.link(directory, &probe) {
            Ok(()) => {
                if let Err(e) = fs::remove_file(&probe) {
                    tracing::debug!(path = %probe.display(), error = %e, "Could not remove link probe");
                }
                true
            }
            Err(e) => {
                tracing::debug!(directory = %directory.display(), error = %e, "Symlink probe failed");
                false
            }
        }
    }

    fn link(&self, original: &Path, link: &Path) -> io::Result<()> {
        symlink(original, link)
    }
}

#[cfg(unix)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(original, link)
}

#[cfg(not(any(unix, windows)))]
fn symlink(_original: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}

/// Counts of how files ended up in the buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Mode actually used after the link capability check.
    pub mode: MaterializeMode,
    pub linked: usize,
    pub copied: usize,
}

/// Writes partitions to disk using a [`LinkStrategy`] for link mode.
pub struct Materializer<L: LinkStrategy> {
    strategy: L,
}

impl<L: LinkStrategy> Materializer<L> {
    /// Create a new materializer.
    #[must_use]
    pub fn new(strategy: L) -> Self {
        Self { strategy }
    }

    /// Create the bucket directories under `directory` and fill them.
    ///
    /// Existing bucket directories are reused, and an existing entry with the
    /// same name as a placed file is replaced. In link mode, support for links
    /// is checked once; without it the whole run copies. A link that still
    /// fails for an individual file is replaced by a copy of that file.
    ///
    /// # Errors
    /// Any failure to create a directory, remove a stale entry or copy a file
    /// aborts immediately, leaving the buckets partially filled.
    pub fn materialize(
        &self,
        directory: &Path,
        partition: &Partition,
        mode: MaterializeMode,
        progress: &mut dyn Progress,
    ) -> Result<MaterializeReport> {
        for bucket in Bucket::ALL {
            let bucket_dir = directory.join(bucket.as_str());
            fs::create_dir_all(&bucket_dir)
                .map_err(SplitterError::filesystem("create directory", &bucket_dir))?;
        }

        let mode = self.effective_mode(directory, mode);
        // Link targets must not depend on the working directory
        let root = std::path::absolute(directory)
            .map_err(SplitterError::filesystem("resolve", directory))?;

        progress.summary(&partition.sizes())?;

        let mut report = MaterializeReport {
            mode,
            ..MaterializeReport::default()
        };
        for (bucket, files) in partition.buckets() {
            progress.bucket_started(bucket, mode)?;
            let bucket_dir = directory.join(bucket.as_str());

            for name in files {
                let original = root.join(name);
                let target = bucket_dir.join(name);
                remove_existing(&target)?;

                if mode == MaterializeMode::Link && self.try_link(&original, &target) {
                    report.linked += 1;
                } else {
                    fs::copy(&original, &target)
                        .map_err(SplitterError::filesystem("copy", &original))?;
                    report.copied += 1;
                }
                progress.file_placed(bucket, name)?;
            }

            progress.bucket_finished(bucket)?;
        }
        progress.finish()?;

        tracing::info!(
            directory = %directory.display(),
            linked = report.linked,
            copied = report.copied,
            "Materialized partition"
        );

        Ok(report)
    }

    fn effective_mode(&self, directory: &Path, requested: MaterializeMode) -> MaterializeMode {
        if requested == MaterializeMode::Copy {
            return MaterializeMode::Copy;
        }

        let probe_dir = directory.join(Bucket::Train.as_str());
        if self.strategy.supports_links(&probe_dir) {
            MaterializeMode::Link
        } else {
            tracing::warn!(
                directory = %directory.display(),
                "Symbolic links are not available, copying files instead"
            );
            MaterializeMode::Copy
        }
    }

    fn try_link(&self, original: &Path, target: &Path) -> bool {
        match self.strategy.link(original, target) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    path = %target.display(),
                    error = %e,
                    "Failed to create link, copying instead"
                );
                false
            }
        }
    }
}

/// Remove a file or link left at `target` by an earlier run.
///
/// Copying onto a stale link would write through it into the original.
fn remove_existing(target: &Path) -> Result<()> {
    match fs::symlink_metadata(target) {
        Ok(_) => {
            fs::remove_file(target).map_err(SplitterError::filesystem("replace", target))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SplitterError::filesystem("inspect", target)(e)),
    }
}

/// Materialize a partition with platform symbolic links for link mode.
///
/// See [`Materializer::materialize`].
pub fn materialize(
    directory: &Path,
    partition: &Partition,
    mode: MaterializeMode,
    progress: &mut dyn Progress,
) -> Result<MaterializeReport> {
    Materializer::new(SymlinkStrategy).materialize(directory, partition, mode, progress)
}
