//! Extract a range of episodes from an aggregate file into standalone files.
//!
//! The aggregate holds one group per episode under `data`, each named
//! `<prefix>_<index>`. Every episode whose index falls in the requested
//! inclusive range is deep-copied into `episode_<index>.hdf5`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::container::{join, Container, Mode, NodeKind};
use crate::error::{Error, Result};

/// Top-level group holding the episodes.
pub const DATA_GROUP: &str = "data";

/// Parse the integer after the last `_` of an episode group name.
///
/// A name without `_` is parsed whole. The index must fit in an `i64`; a
/// longer digit run is a [`Error::Parse`] like any other malformed name.
pub fn episode_index(name: &str) -> Result<i64> {
    let suffix = name.rsplit('_').next().unwrap_or(name);
    suffix.trim().parse().map_err(|_| Error::Parse {
        name: name.to_string(),
    })
}

/// File name for the extracted episode `index`.
pub fn episode_file_name(index: i64) -> String {
    format!("episode_{}.hdf5", index)
}

/// Copy every episode of `aggregate` with `start <= index <= end` into its own
/// file under `output_dir`, returning the files written in processing order.
///
/// A child whose name has no integer suffix aborts the whole extraction,
/// including children that would have been skipped.
pub fn extract_range(aggregate: &Path, output_dir: &Path, start: i64, end: i64) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;
    let source = Container::open(aggregate, Mode::Read)?;

    let mut written = Vec::new();
    let mut seen = HashSet::new();
    for child in source.list_children(DATA_GROUP)? {
        let index = episode_index(&child.name)?;
        if !(start..=end).contains(&index) {
            debug!(name = %child.name, index, "outside requested range");
            continue;
        }
        if child.kind != NodeKind::Group {
            return Err(Error::schema(
                join(DATA_GROUP, &child.name),
                "episode entry is a dataset, expected a group",
            ));
        }
        if !seen.insert(index) {
            warn!(name = %child.name, index, "episode index already extracted, overwriting");
        }

        let output = output_dir.join(episode_file_name(index));
        let mut dest = Container::open(&output, Mode::Create)?;
        source.copy_subtree(&join(DATA_GROUP, &child.name), &mut dest, "")?;
        dest.close()?;

        info!(name = %child.name, output = %output.display(), "extracted episode");
        written.push(output);
    }
    Ok(written)
}
