//! Human-readable dump of a container's structure and values.
//!
//! The report lists each dataset with its rendered value and each group with
//! a header line. Traversal is bounded: at most `max_groups` groups are
//! expanded, and datasets longer than `max_rows` along their first axis are
//! cut after that many rows.
//!
//! - [`report`] - report file naming

mod report;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use crate::config::DumpConfig;
use crate::container::{join, Container, DatasetValue, Mode, NodeKind};
use crate::error::Result;

pub use report::report_path;

/// Traversal and rendering limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    /// Groups popped from the work list before traversal stops.
    pub max_groups: usize,
    /// Rows rendered per dataset before truncating.
    pub max_rows: usize,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            max_groups: 100,
            max_rows: 100,
        }
    }
}

impl From<&DumpConfig> for DumpOptions {
    fn from(config: &DumpConfig) -> Self {
        Self {
            max_groups: config.max_groups,
            max_rows: config.max_rows,
        }
    }
}

/// Counters describing one dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpStats {
    /// Groups popped and expanded (root included).
    pub groups_visited: usize,
    /// `Group:` header lines written.
    pub groups_seen: usize,
    /// `Dataset:` entries written.
    pub datasets: usize,
    /// Datasets rendered with a truncation note.
    pub truncated: usize,
    /// Groups still on the work list when traversal stopped.
    pub pending: usize,
}

/// Writes the structure report for a container.
#[derive(Debug, Clone, Default)]
pub struct Dumper {
    options: DumpOptions,
}

impl Dumper {
    pub fn new(options: DumpOptions) -> Self {
        Self { options }
    }

    /// Dump `container` into `out`.
    ///
    /// Groups are expanded from a LIFO work list seeded with the root, so
    /// sibling groups are expanded in reverse discovery order. `on_group` is
    /// called with each popped group's path (`""` for the root). Traversal
    /// ends silently after `max_groups` pops, even if groups remain.
    ///
    /// `max_groups` caps expansions, not `Group:` lines. Every child of an
    /// expanded group gets its header, so a group with many subgroups can
    /// push the header count past `max_groups` (see [`DumpStats::groups_seen`]).
    ///
    /// Datasets of any element type are written; types that cannot be shown
    /// as values are written as a type and shape description.
    pub fn dump<W: Write>(
        &self,
        container: &Container,
        out: &mut W,
        mut on_group: impl FnMut(&str),
    ) -> Result<DumpStats> {
        let mut stats = DumpStats::default();
        let mut stack = vec![String::new()];

        while stats.groups_visited < self.options.max_groups {
            let Some(prefix) = stack.pop() else { break };
            stats.groups_visited += 1;
            on_group(&prefix);

            for child in container.list_children(&prefix)? {
                let full = join(&prefix, &child.name);
                match child.kind {
                    NodeKind::Dataset => {
                        let value = container.read_value(&full)?;
                        let rendered = render_value(&value, self.options.max_rows);
                        if rendered.truncated {
                            stats.truncated += 1;
                        }
                        writeln!(out, "Dataset: {}", full)?;
                        write!(out, "Value:\n{}\n\n", rendered.text)?;
                        stats.datasets += 1;
                    }
                    NodeKind::Group => {
                        writeln!(out, "Group: {}", full)?;
                        stats.groups_seen += 1;
                        stack.push(full);
                    }
                }
            }
        }

        stats.pending = stack.len();
        if stats.pending > 0 {
            debug!(pending = stats.pending, "group limit reached");
        }
        Ok(stats)
    }
}

/// A dataset value rendered for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedValue {
    pub text: String,
    pub truncated: bool,
}

/// Render `data`, keeping only the first `max_rows` rows of a longer array.
pub fn render_value(data: &DatasetValue, max_rows: usize) -> RenderedValue {
    match data.rows() {
        Some(rows) if rows > max_rows => RenderedValue {
            text: format!(
                "{}\n... (truncated, total rows: {})",
                data.head(max_rows).render(),
                rows
            ),
            truncated: true,
        },
        _ => RenderedValue {
            text: data.render(),
            truncated: false,
        },
    }
}

/// Result of [`view_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOutcome {
    pub report: PathBuf,
    pub stats: DumpStats,
}

/// Dump `input` into a timestamped report under `config.log_dir`.
pub fn view_file(input: &Path, config: &DumpConfig, on_group: impl FnMut(&str)) -> Result<ViewOutcome> {
    let container = Container::open(input, Mode::Read)?;

    fs::create_dir_all(&config.log_dir)?;
    let report = report_path(input, &config.log_dir, Local::now());
    let mut out = BufWriter::new(fs::File::create(&report)?);

    let stats = Dumper::new(DumpOptions::from(config)).dump(&container, &mut out, on_group)?;
    out.flush()?;

    info!(input = %input.display(), report = %report.display(), ?stats, "wrote report");
    Ok(ViewOutcome { report, stats })
}
