//! Deep copy of a group tree between files.

use std::ffi::CString;

use hdf5_sys::h5o::H5Ocopy;
use hdf5_sys::h5p::H5P_DEFAULT;
use tracing::{debug, warn};

use super::attr::AttrValue;
use super::{join, list_children_of};
use crate::error::{Error, Result};

/// Copy everything below `src` into `dest`.
///
/// Each child of `src` is copied with the library's object copy, so
/// datasets keep their stored type, storage layout (chunking, filters) and
/// attributes, and subgroups are copied recursively with theirs. The
/// attributes of `src` itself are carried over value by value onto `dest`;
/// one whose type cannot be materialized is skipped with a warning.
///
/// `src_path` is only used to label errors and log lines.
pub(crate) fn copy_group(src: &hdf5::Group, dest: &hdf5::Group, src_path: &str) -> Result<()> {
    copy_attrs(src, dest, src_path)?;

    for child in list_children_of(src, src_path)? {
        let child_path = join(src_path, &child.name);
        copy_object(src, dest, &child.name, &child_path)?;
        debug!(path = %child_path, kind = ?child.kind, "copied object");
    }
    Ok(())
}

/// Copy the object `name` of `from` to the same name in `to`.
fn copy_object(from: &hdf5::Group, to: &hdf5::Group, name: &str, path: &str) -> Result<()> {
    let c_name = CString::new(name)
        .map_err(|_| Error::schema(path, "object name contains a NUL byte"))?;
    let status = hdf5::sync::sync(|| unsafe {
        H5Ocopy(
            from.id(),
            c_name.as_ptr(),
            to.id(),
            c_name.as_ptr(),
            H5P_DEFAULT,
            H5P_DEFAULT,
        )
    });
    if status < 0 {
        return Err(Error::Hdf5(hdf5::Error::from(format!(
            "failed to copy object '{}'",
            path
        ))));
    }
    Ok(())
}

fn copy_attrs(from: &hdf5::Location, to: &hdf5::Location, path: &str) -> Result<()> {
    for name in from.attr_names()? {
        let attr_path = join(path, &name);
        let value = match AttrValue::read_from(&from.attr(&name)?, &attr_path) {
            Ok(value) => value,
            Err(Error::Schema { message, .. }) => {
                warn!(path = %attr_path, reason = %message, "attribute not copied");
                continue;
            }
            Err(e) => return Err(e),
        };
        value.create_on(to, &name, &attr_path)?;
    }
    Ok(())
}
