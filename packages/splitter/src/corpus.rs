//! Corpus discovery.

use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{is_corpus_entry, resolve_numeric_id};
use crate::error::{Result, SplitterError};
use crate::types::CorpusOrder;

/// List the corpus files of a directory.
///
/// Returns the names of the direct entries of `directory`, excluding the
/// reserved bucket directories and hidden entries. With
/// [`CorpusOrder::Numeric`] the names are sorted by their numeric identifier,
/// and a name without one aborts the listing. With [`CorpusOrder::Shuffled`]
/// the names are sorted by name and then shuffled with `rng`, so a seeded
/// generator gives the same order however the filesystem enumerates entries.
///
/// # Errors
/// * `SplitterError::Filesystem` if the directory cannot be read
/// * `SplitterError::NonUtf8FileName` for entries that are not valid UTF-8
/// * `SplitterError::MissingNumericId` in numeric order for names without digits
pub fn list_corpus<R: Rng + ?Sized>(
    directory: &Path,
    order: CorpusOrder,
    rng: &mut R,
) -> Result<Vec<String>> {
    let entries =
        fs::read_dir(directory).map_err(SplitterError::filesystem("read directory", directory))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(SplitterError::filesystem("read directory", directory))?;
        let name = entry
            .file_name()
            .into_string()
            .map_err(SplitterError::NonUtf8FileName)?;
        if is_corpus_entry(&name) {
            names.push(name);
        }
    }

    match order {
        CorpusOrder::Numeric => {
            let mut keyed = names
                .into_iter()
                .map(|name| Ok((resolve_numeric_id(&name)?, name)))
                .collect::<Result<Vec<_>>>()?;
            keyed.sort();
            names = keyed.into_iter().map(|(_, name)| name).collect();
        }
        CorpusOrder::Shuffled => {
            names.sort();
            names.shuffle(rng);
        }
    }

    tracing::debug!(
        directory = %directory.display(),
        count = names.len(),
        ?order,
        "Listed corpus"
    );

    Ok(names)
}
