//! Hierarchical container access over HDF5 files.
//!
//! A [`Container`] owns one open file. Paths are `/`-separated and relative
//! to the file root; `""` and `"/"` both address the root group. The file is
//! closed when the handle is dropped, so every exit path releases it.
//!
//! # Module Structure
//!
//! - [`array`] - element types and in-memory arrays
//! - [`attr`] - attribute values
//! - [`copy`] - structural deep copy between containers
//! - [`value`] - dataset values of any element type, for display

mod array;
mod attr;
mod copy;
mod value;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

pub use array::{ArrayData, Dtype};
pub use attr::AttrValue;
pub use value::DatasetValue;

use crate::error::{Error, Result};

/// How a container file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Existing file, read-only.
    Read,
    /// Create the file, truncating any existing one.
    Create,
    /// Existing file, read-write.
    ReadWrite,
}

/// Kind of a child link inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    Dataset,
}

/// One immediate child of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    pub name: String,
    pub kind: NodeKind,
}

/// An open HDF5 file.
pub struct Container {
    file: hdf5::File,
    path: PathBuf,
    mode: Mode,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish()
    }
}

impl Container {
    /// Open `path` in the given mode.
    ///
    /// `Mode::Create` creates missing parent directories first.
    pub fn open(path: impl AsRef<Path>, mode: Mode) -> Result<Self> {
        let path = path.as_ref();
        let file = match mode {
            Mode::Read => {
                if !path.exists() {
                    return Err(Error::not_found(path.display().to_string()));
                }
                hdf5::File::open(path)?
            }
            Mode::ReadWrite => {
                if !path.exists() {
                    return Err(Error::not_found(path.display().to_string()));
                }
                hdf5::File::open_rw(path)?
            }
            Mode::Create => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                hdf5::File::create(path)?
            }
        };
        debug!(path = %path.display(), ?mode, "opened container");
        Ok(Self {
            file,
            path: path.to_path_buf(),
            mode,
        })
    }

    /// Close the file, surfacing errors that a plain drop would swallow.
    pub fn close(self) -> Result<()> {
        self.file.close()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Read the dataset at `path` with its stored dtype and shape.
    pub fn read_array(&self, path: &str) -> Result<ArrayData> {
        let dataset = self.dataset(path)?;
        ArrayData::read_from(&dataset, path)
    }

    /// Read the dataset at `path` whatever its element type.
    ///
    /// Unlike [`Container::read_array`] this never fails on the stored type:
    /// strings come back as text and other types as a description.
    pub fn read_value(&self, path: &str) -> Result<DatasetValue> {
        let dataset = self.dataset(path)?;
        DatasetValue::read_from(&dataset, path)
    }

    /// Read attribute `name` from the group at `group`.
    pub fn read_attribute(&self, group: &str, name: &str) -> Result<AttrValue> {
        let handle = self.group(group)?;
        let full = join(group, name);
        if !has_attr(&handle, name)? {
            return Err(Error::not_found(full));
        }
        let attr = handle.attr(name)?;
        AttrValue::read_from(&attr, &full)
    }

    /// Names of the attributes on the group at `group`.
    pub fn attribute_names(&self, group: &str) -> Result<Vec<String>> {
        Ok(self.group(group)?.attr_names()?)
    }

    /// Create a dataset at `path`, creating parent groups as needed.
    ///
    /// Fails with a schema error if anything already exists at `path`.
    pub fn write_array(&mut self, path: &str, data: &ArrayData) -> Result<()> {
        let (parent, name) = split_parent(path)
            .ok_or_else(|| Error::schema(path, "dataset path must name a child of a group"))?;
        let group = self.ensure_group(parent)?;
        if group.link_exists(name) {
            return Err(Error::schema(path, "an object already exists at this path"));
        }
        data.create_dataset(&group, name)?;
        debug!(path, dtype = %data.dtype(), shape = ?data.shape(), "wrote dataset");
        Ok(())
    }

    /// Create attribute `name` on the group at `group`, creating the group if needed.
    ///
    /// Fails with a schema error if the attribute already exists.
    pub fn write_attribute(&mut self, group: &str, name: &str, value: &AttrValue) -> Result<()> {
        let handle = self.ensure_group(group)?;
        let full = join(group, name);
        if has_attr(&handle, name)? {
            return Err(Error::schema(full, "attribute already exists"));
        }
        value.create_on(&handle, name, &full)?;
        debug!(path = %full, "wrote attribute");
        Ok(())
    }

    /// Immediate children of the group at `group`, in link order.
    pub fn list_children(&self, group: &str) -> Result<Vec<Child>> {
        list_children_of(&self.group(group)?, group)
    }

    /// Whether a group or dataset exists at `path`.
    pub fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path)?.is_some())
    }

    /// Deep-copy the group at `src_group` into `dest` at `dest_group`.
    ///
    /// See [`copy::copy_group`] for what is carried over.
    pub fn copy_subtree(&self, src_group: &str, dest: &mut Container, dest_group: &str) -> Result<()> {
        let src = self.group(src_group)?;
        let target = dest.ensure_group(dest_group)?;
        copy::copy_group(&src, &target, src_group)
    }

    pub(crate) fn group(&self, path: &str) -> Result<hdf5::Group> {
        match self.resolve(path)? {
            Some(NodeKind::Group) => Ok(self.file.group(&normalize(path))?),
            Some(NodeKind::Dataset) => Err(Error::schema(path, "expected a group, found a dataset")),
            None => Err(Error::not_found(path)),
        }
    }

    fn dataset(&self, path: &str) -> Result<hdf5::Dataset> {
        match self.resolve(path)? {
            Some(NodeKind::Dataset) => Ok(self.file.dataset(&normalize(path))?),
            // a group where a dataset was expected counts as "no dataset here"
            _ => Err(Error::not_found(path)),
        }
    }

    /// Walk `path` one segment at a time so missing intermediate groups are
    /// reported as absent rather than as library errors.
    fn resolve(&self, path: &str) -> Result<Option<NodeKind>> {
        let mut current = self.file.group("/")?;
        let segments: Vec<&str> = segments(path).collect();
        if segments.is_empty() {
            return Ok(Some(NodeKind::Group));
        }
        for (i, segment) in segments.iter().enumerate() {
            if !current.link_exists(segment) {
                return Ok(None);
            }
            let kind = match current.loc_type_by_name(segment)? {
                hdf5::LocationType::Group => NodeKind::Group,
                hdf5::LocationType::Dataset => NodeKind::Dataset,
                _ => return Ok(None),
            };
            let last = i + 1 == segments.len();
            match (kind, last) {
                (kind, true) => return Ok(Some(kind)),
                (NodeKind::Group, false) => current = current.group(segment)?,
                (NodeKind::Dataset, false) => return Ok(None),
            }
        }
        Ok(None)
    }

    /// Open the group at `path`, creating it and any missing ancestors.
    pub(crate) fn ensure_group(&self, path: &str) -> Result<hdf5::Group> {
        let mut current = self.file.group("/")?;
        let mut walked = String::new();
        for segment in segments(path) {
            walked = join(&walked, segment);
            current = if current.link_exists(segment) {
                match current.loc_type_by_name(segment)? {
                    hdf5::LocationType::Group => current.group(segment)?,
                    _ => return Err(Error::schema(walked, "expected a group")),
                }
            } else {
                current.create_group(segment)?
            };
        }
        Ok(current)
    }
}

pub(crate) fn list_children_of(group: &hdf5::Group, path: &str) -> Result<Vec<Child>> {
    let mut children = Vec::new();
    for name in group.member_names()? {
        let kind = match group.loc_type_by_name(&name)? {
            hdf5::LocationType::Group => NodeKind::Group,
            hdf5::LocationType::Dataset => NodeKind::Dataset,
            other => {
                debug!(path = %join(path, &name), kind = ?other, "skipping link");
                continue;
            }
        };
        children.push(Child { name, kind });
    }
    Ok(children)
}

pub(crate) fn has_attr(loc: &hdf5::Location, name: &str) -> Result<bool> {
    Ok(loc.attr_names()?.iter().any(|n| n == name))
}

/// Join a group path and a child name without doubling or leading slashes.
pub fn join(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn normalize(path: &str) -> String {
    let joined = segments(path).collect::<Vec<_>>().join("/");
    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

fn split_parent(path: &str) -> Option<(&str, &str)> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.rsplit_once('/') {
        Some((parent, name)) => Some((parent, name)),
        None => Some(("", trimmed)),
    }
}
