//! Console reporting for a split run.

use std::io::Write;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::types::{Bucket, MaterializeMode, SplitSizes};

/// Receives progress events while a partition is materialized.
pub trait Progress {
    /// Called once, after the bucket directories exist and before any file is placed.
    fn summary(&mut self, sizes: &SplitSizes) -> Result<()>;

    /// Called before the files of a bucket are placed.
    fn bucket_started(&mut self, bucket: Bucket, mode: MaterializeMode) -> Result<()>;

    /// Called after each file is placed.
    fn file_placed(&mut self, bucket: Bucket, name: &str) -> Result<()>;

    /// Called after the last file of a bucket is placed.
    fn bucket_finished(&mut self, bucket: Bucket) -> Result<()>;

    /// Called once when all buckets are done.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Lists every bucket and the files placed into it.
///
/// Output looks like:
///
/// ```text
/// 10 files to split: 3/2/5
/// Copying to train: f1.txt f2.txt f3.txt
/// Copying to dev: f4.txt f5.txt
/// Copying to test: f6.txt f7.txt f8.txt f9.txt f10.txt
/// ```
pub struct ConsoleProgress<W: Write> {
    out: W,
    colors: bool,
}

impl<W: Write> ConsoleProgress<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            colors: console::colors_enabled(),
        }
    }

    /// Force colored labels on or off.
    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Consume the reporter and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn summary(&mut self, sizes: &SplitSizes) -> Result<()> {
        writeln!(self.out, "{sizes}")?;
        Ok(())
    }

    fn bucket_started(&mut self, bucket: Bucket, mode: MaterializeMode) -> Result<()> {
        let label = style(mode.label(bucket)).bold().force_styling(self.colors);
        write!(self.out, "{label}")?;
        self.out.flush()?;
        Ok(())
    }

    fn file_placed(&mut self, _bucket: Bucket, name: &str) -> Result<()> {
        write!(self.out, "{name} ")?;
        self.out.flush()?;
        Ok(())
    }

    fn bucket_finished(&mut self, _bucket: Bucket) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }
}

/// Prints only the summary line, with a transient progress bar on stderr.
///
/// The bar is hidden when stderr is not a terminal and cleared when done.
pub struct QuietProgress<W: Write> {
    out: W,
    bar: Option<ProgressBar>,
}

impl<W: Write> QuietProgress<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out, bar: None }
    }

    /// Consume the reporter and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Progress for QuietProgress<W> {
    fn summary(&mut self, sizes: &SplitSizes) -> Result<()> {
        writeln!(self.out, "{sizes}")?;

        let bar = ProgressBar::new(sizes.total() as u64);
        #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
                .expect("valid template"),
        );
        self.bar = Some(bar);
        Ok(())
    }

    fn bucket_started(&mut self, bucket: Bucket, _mode: MaterializeMode) -> Result<()> {
        if let Some(bar) = &self.bar {
            bar.set_message(bucket.as_str());
        }
        Ok(())
    }

    fn file_placed(&mut self, _bucket: Bucket, _name: &str) -> Result<()> {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
        Ok(())
    }

    fn bucket_finished(&mut self, _bucket: Bucket) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        Ok(())
    }
}

/// Discards all events.
pub struct NoProgress;

impl Progress for NoProgress {
    fn summary(&mut self, _sizes: &SplitSizes) -> Result<()> {
        Ok(())
    }

    fn bucket_started(&mut self, _bucket: Bucket, _mode: MaterializeMode) -> Result<()> {
        Ok(())
    }

    fn file_placed(&mut self, _bucket: Bucket, _name: &str) -> Result<()> {
        Ok(())
    }

    fn bucket_finished(&mut self, _bucket: Bucket) -> Result<()> {
        Ok(())
    }
}
