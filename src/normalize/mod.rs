//! Raw episode → normalized episode conversion.
//!
//! A raw episode keeps camera images and joint traces under `obs/` next to
//! the action arrays. The normalized layout is flat: five renamed datasets
//! with fixed dtypes plus the `sim` and `init_action` attributes. The
//! mapping lives in [`schema`].
//!
//! - [`batch`] - directory discovery and per-episode driver
//! - [`schema`] - the fixed field table

pub mod batch;
pub mod schema;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::container::{ArrayData, AttrValue, Container, Mode};
use crate::error::{Error, Result};
use schema::{FieldMapping, CMDS, FIELD_MAP, INIT_ACTION_ATTR, SIM_ATTR, SIM_VALUE};

pub use batch::{discover_episodes, output_file_name, run_batch, BatchEvent, BatchReport};

/// A normalized episode held in memory, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEpisode {
    fields: Vec<(&'static str, ArrayData)>,
    init_action: ArrayData,
}

impl NormalizedEpisode {
    /// Read every mapped source field from `raw` and coerce it.
    ///
    /// All sources are read before anything is returned, so a missing field
    /// is reported before any output exists.
    pub fn from_raw(raw: &Container) -> Result<Self> {
        let mut fields = Vec::with_capacity(FIELD_MAP.len());
        for FieldMapping {
            source,
            target,
            dtype,
        } in FIELD_MAP
        {
            let data = raw.read_array(source)?;
            debug!(source, target, from = %data.dtype(), to = %dtype, "coercing field");
            fields.push((*target, data.cast(*dtype)));
        }

        let init_action = fields
            .iter()
            .find(|(target, _)| *target == CMDS)
            .and_then(|(_, cmds)| cmds.first_row())
            .ok_or_else(|| Error::schema(CMDS, "cmds has no rows to take init_action from"))?;

        Ok(Self {
            fields,
            init_action,
        })
    }

    /// Target dataset by its normalized name.
    pub fn field(&self, target: &str) -> Option<&ArrayData> {
        self.fields
            .iter()
            .find(|(name, _)| *name == target)
            .map(|(_, data)| data)
    }

    pub fn init_action(&self) -> &ArrayData {
        &self.init_action
    }

    /// Write the datasets and attributes to the root of `out`.
    pub fn write_to(&self, out: &mut Container) -> Result<()> {
        for (target, data) in &self.fields {
            out.write_array(target, data)?;
        }
        out.write_attribute("", SIM_ATTR, &AttrValue::scalar_bool(SIM_VALUE))?;
        out.write_attribute("", INIT_ACTION_ATTR, &AttrValue::Array(self.init_action.clone()))?;
        Ok(())
    }
}

/// Normalize the raw episode at `input` into a new file at `output`.
///
/// The output is assembled in `<output>.partial` and renamed into place once
/// complete; on failure the partial file is removed and `output` is left as
/// it was. An existing `output` is replaced.
pub fn normalize_episode(input: &Path, output: &Path) -> Result<()> {
    let raw = Container::open(input, Mode::Read)?;
    let episode = NormalizedEpisode::from_raw(&raw)?;
    raw.close()?;

    if let Some(dir) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let partial = partial_path(output);
    let written = Container::open(&partial, Mode::Create).and_then(|mut out| {
        episode.write_to(&mut out)?;
        out.close()
    });
    if let Err(e) = written {
        discard_partial(&partial);
        return Err(e);
    }
    fs::rename(&partial, output)?;

    info!(input = %input.display(), output = %output.display(), "normalized episode");
    Ok(())
}

/// Remove a partial output left by a failed write. A file that was never
/// created is fine; any other failure is logged and otherwise ignored.
fn discard_partial(partial: &Path) {
    match fs::remove_file(partial) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
            warn!(path = %partial.display(), error = %e, "could not remove partial output");
        }
        _ => {}
    }
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}
