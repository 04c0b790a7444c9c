//! Attribute values: numeric/boolean arrays (0-d for scalars) or text.

use std::fmt;

use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};

use super::array::ArrayData;
use super::value::FIXED_STRING_CAPACITY;
use crate::error::{Error, Result};

/// Value stored under an attribute name on a group or dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Array(ArrayData),
    Text(String),
}

impl AttrValue {
    pub fn scalar_bool(value: bool) -> Self {
        Self::Array(ArrayData::Bool(ndarray::arr0(value).into_dyn()))
    }

    pub fn as_array(&self) -> Option<&ArrayData> {
        match self {
            Self::Array(data) => Some(data),
            Self::Text(_) => None,
        }
    }

    /// The boolean held by a scalar boolean attribute.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Array(ArrayData::Bool(a)) if a.ndim() == 0 => a.first().copied(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Array(_) => None,
        }
    }

    pub(crate) fn read_from(attr: &hdf5::Attribute, path: &str) -> Result<Self> {
        let descriptor = attr.dtype()?.to_descriptor()?;
        match descriptor {
            TypeDescriptor::VarLenUnicode if attr.is_scalar() => {
                let text = attr.read_scalar::<VarLenUnicode>()?;
                Ok(Self::Text(text.as_str().to_owned()))
            }
            TypeDescriptor::VarLenAscii if attr.is_scalar() => {
                let text = attr.read_scalar::<VarLenAscii>()?;
                Ok(Self::Text(text.as_str().to_owned()))
            }
            // fixed-length text comes back as variable-length on write
            TypeDescriptor::FixedAscii(_) if attr.is_scalar() => {
                let text = attr.read_scalar::<FixedAscii<FIXED_STRING_CAPACITY>>()?;
                Ok(Self::Text(text.as_str().to_owned()))
            }
            TypeDescriptor::FixedUnicode(_) if attr.is_scalar() => {
                let text = attr.read_scalar::<FixedUnicode<FIXED_STRING_CAPACITY>>()?;
                Ok(Self::Text(text.as_str().to_owned()))
            }
            _ => ArrayData::read_from(attr, path).map(Self::Array),
        }
    }

    pub(crate) fn create_on(&self, loc: &hdf5::Location, name: &str, path: &str) -> Result<()> {
        match self {
            Self::Array(data) => data.create_attr(loc, name),
            Self::Text(text) => {
                let value: VarLenUnicode = text
                    .parse()
                    .map_err(|e| Error::schema(path, format!("invalid text attribute: {}", e)))?;
                let attr = loc.new_attr::<VarLenUnicode>().shape(()).create(name)?;
                attr.write_scalar(&value)?;
                Ok(())
            }
        }
    }
}

impl From<ArrayData> for AttrValue {
    fn from(data: ArrayData) -> Self {
        Self::Array(data)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(data) => write!(f, "{}", data),
            Self::Text(text) => write!(f, "{:?}", text),
        }
    }
}
