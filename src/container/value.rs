//! Dataset values of any stored element type, for display.
//!
//! Numeric and boolean datasets become [`ArrayData`]. String datasets become
//! arrays of text. Everything else (compound, enum, reference, ...) is kept
//! as a description of its type and shape so a dump never stops on it.

use std::fmt::Write as _;

use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::H5Type;
use ndarray::{ArrayD, Axis, Slice};
use tracing::warn;

use super::array::{read_typed, ArrayData, Dtype};
use crate::error::Result;

/// Widest fixed-length string read back as text; longer values are cut.
pub(super) const FIXED_STRING_CAPACITY: usize = 1024;

/// The value of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetValue {
    Array(ArrayData),
    Text(ArrayD<String>),
    /// A type that is not materialized; `descriptor` names it.
    Other { descriptor: String, shape: Vec<usize> },
}

impl DatasetValue {
    pub(crate) fn read_from(obj: &hdf5::Container, path: &str) -> Result<Self> {
        let descriptor = obj.dtype()?.to_descriptor()?;
        if Dtype::from_descriptor(&descriptor).is_some() {
            return ArrayData::read_from(obj, path).map(Self::Array);
        }

        let text = match &descriptor {
            TypeDescriptor::VarLenUnicode => {
                read_text::<VarLenUnicode>(obj, |v| v.as_str().to_owned())
            }
            TypeDescriptor::VarLenAscii => {
                read_text::<VarLenAscii>(obj, |v| v.as_str().to_owned())
            }
            TypeDescriptor::FixedAscii(_) => {
                read_text::<FixedAscii<FIXED_STRING_CAPACITY>>(obj, |v| v.as_str().to_owned())
            }
            TypeDescriptor::FixedUnicode(_) => {
                read_text::<FixedUnicode<FIXED_STRING_CAPACITY>>(obj, |v| v.as_str().to_owned())
            }
            _ => return Ok(Self::other(&descriptor, obj.shape())),
        };
        match text {
            Ok(text) => Ok(Self::Text(text)),
            Err(e) => {
                warn!(path, error = %e, "string dataset could not be read as text");
                Ok(Self::other(&descriptor, obj.shape()))
            }
        }
    }

    fn other(descriptor: &TypeDescriptor, shape: Vec<usize>) -> Self {
        Self::Other {
            descriptor: describe(descriptor),
            shape,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Array(data) => data.shape(),
            Self::Text(text) => text.shape(),
            Self::Other { shape, .. } => shape,
        }
    }

    /// Length of the outermost dimension of a materialized value.
    ///
    /// `None` for scalars and for values that are only described.
    pub fn rows(&self) -> Option<usize> {
        match self {
            Self::Other { .. } => None,
            _ => self.shape().first().copied(),
        }
    }

    /// The first `n` rows along the outermost axis.
    pub fn head(&self, n: usize) -> Self {
        match self {
            Self::Array(data) => Self::Array(data.head(n)),
            Self::Text(text) if text.ndim() > 0 => {
                Self::Text(text.slice_axis(Axis(0), Slice::from(..n)).to_owned())
            }
            _ => self.clone(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Array(data) => data.render(),
            Self::Text(text) => format!("{}", text.map(|s| format!("{:?}", s))),
            Self::Other { descriptor, shape } => format!("<{}> shape {:?}", descriptor, shape),
        }
    }
}

impl From<ArrayData> for DatasetValue {
    fn from(data: ArrayData) -> Self {
        Self::Array(data)
    }
}

fn read_text<T: H5Type>(
    obj: &hdf5::Container,
    to_string: impl Fn(&T) -> String,
) -> Result<ArrayD<String>> {
    let raw: ArrayD<T> = read_typed(obj)?;
    Ok(raw.map(to_string))
}

/// Short name for a stored type that is not materialized.
fn describe(descriptor: &TypeDescriptor) -> String {
    match descriptor {
        TypeDescriptor::Compound(compound) => {
            let mut out = String::from("compound {");
            for (i, field) in compound.fields.iter().enumerate() {
                let sep = if i == 0 { " " } else { ", " };
                let _ = write!(out, "{}{}: {}", sep, field.name, describe(&field.ty));
            }
            out.push_str(" }");
            out
        }
        TypeDescriptor::Enum(e) => {
            let names: Vec<&str> = e.members.iter().map(|m| m.name.as_str()).collect();
            format!("enum [{}]", names.join(", "))
        }
        TypeDescriptor::FixedArray(inner, len) => format!("{}[{}]", describe(inner), len),
        TypeDescriptor::VarLenArray(inner) => format!("{}[]", describe(inner)),
        other => match Dtype::from_descriptor(other) {
            Some(dtype) => dtype.name().to_string(),
            None => format!("{:?}", other).to_lowercase(),
        },
    }
}
