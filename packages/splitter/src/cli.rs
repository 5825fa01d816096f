//! Command-line interface for the splitter.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{parse_size_spec, DEV_DEFAULT, TOTAL_DEFAULT, TRAIN_DEFAULT};
use crate::error::Result;
use crate::report::{ConsoleProgress, QuietProgress};
use crate::splitter::{split_corpus, SplitOptions};
use crate::types::{CorpusOrder, MaterializeMode};

/// Split a directory of files into "train", "dev" and "test" directories.
///
/// All files not in either "train" or "dev" will go into "test".
#[derive(Debug, Parser)]
#[command(name = "split-corpus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory to split (default: current directory)
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Size of train split: a count, or a fraction of the corpus if at most 1
    #[arg(short, long, default_value_t = TRAIN_DEFAULT)]
    pub train: f64,

    /// Size of dev split: a count, or a fraction of the corpus if at most 1
    #[arg(short, long, default_value_t = DEV_DEFAULT)]
    pub dev: f64,

    /// Proportion of data to use
    #[arg(long, default_value_t = TOTAL_DEFAULT)]
    pub total: f64,

    /// Create symbolic links instead of copying
    #[arg(short, long)]
    pub link: bool,

    /// Less output
    #[arg(short, long)]
    pub quiet: bool,

    /// Shuffle corpus instead of ordering by numeric ID
    #[arg(short, long)]
    pub shuffle: bool,

    /// Seed for shuffling and subsampling (default: random)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Build split options from the parsed arguments.
    pub fn options(&self) -> Result<SplitOptions> {
        let train = parse_size_spec(self.train)?;
        let dev = parse_size_spec(self.dev)?;
        let mut options = SplitOptions::new(train, dev)
            .with_total(self.total)
            .with_order(if self.shuffle {
                CorpusOrder::Shuffled
            } else {
                CorpusOrder::Numeric
            })
            .with_mode(if self.link {
                MaterializeMode::Link
            } else {
                MaterializeMode::Copy
            });
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        Ok(options)
    }
}

/// Rewrite the single-dash `-total` spelling to `--total`.
///
/// Both `-total VALUE` and `-total=VALUE` are accepted. Everything after a
/// `--` separator is left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut positional = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if positional {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    positional = true;
                    arg
                }
                Some("-total") => OsString::from("--total"),
                Some(value) if value.starts_with("-total=") => OsString::from(format!("-{value}")),
                _ => arg,
            }
        })
        .collect()
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    split_command(&cli)
}

/// Execute a split.
fn split_command(cli: &Cli) -> Result<()> {
    let options = cli.options()?;
    tracing::debug!(directory = %cli.directory.display(), ?options, "Starting split");

    let stdout = io::stdout().lock();
    if cli.quiet {
        split_corpus(&cli.directory, &options, &mut QuietProgress::new(stdout))?;
    } else {
        split_corpus(&cli.directory, &options, &mut ConsoleProgress::new(stdout))?;
    }

    Ok(())
}
