//! Typed, shape-bearing array values and their HDF5 element mapping.

use std::fmt;

use hdf5::types::{FloatSize, IntSize, TypeDescriptor};
use hdf5::H5Type;
use ndarray::{ArrayD, Axis, Slice};

use crate::error::{Error, Result};

/// Element type of a dataset or array attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dtype {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl Dtype {
    /// numpy-style name, e.g. `uint8` or `float32`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }

    /// Map a stored HDF5 type onto a supported element type.
    ///
    /// Returns `None` for compound, string, reference and other types this
    /// crate does not materialize as arrays.
    pub fn from_descriptor(descriptor: &TypeDescriptor) -> Option<Self> {
        let dtype = match descriptor {
            TypeDescriptor::Boolean => Self::Bool,
            TypeDescriptor::Integer(IntSize::U1) => Self::I8,
            TypeDescriptor::Integer(IntSize::U2) => Self::I16,
            TypeDescriptor::Integer(IntSize::U4) => Self::I32,
            TypeDescriptor::Integer(IntSize::U8) => Self::I64,
            TypeDescriptor::Unsigned(IntSize::U1) => Self::U8,
            TypeDescriptor::Unsigned(IntSize::U2) => Self::U16,
            TypeDescriptor::Unsigned(IntSize::U4) => Self::U32,
            TypeDescriptor::Unsigned(IntSize::U8) => Self::U64,
            TypeDescriptor::Float(FloatSize::U4) => Self::F32,
            TypeDescriptor::Float(FloatSize::U8) => Self::F64,
            _ => return None,
        };
        Some(dtype)
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An owned n-dimensional array of one supported element type.
///
/// A 0-dimensional array represents a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Bool(ArrayD<bool>),
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    U32(ArrayD<u32>),
    U64(ArrayD<u64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

/// Evaluate `$body` with `$arr` bound to the inner array, whatever its type.
macro_rules! with_array {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            ArrayData::Bool($arr) => $body,
            ArrayData::I8($arr) => $body,
            ArrayData::I16($arr) => $body,
            ArrayData::I32($arr) => $body,
            ArrayData::I64($arr) => $body,
            ArrayData::U8($arr) => $body,
            ArrayData::U16($arr) => $body,
            ArrayData::U32($arr) => $body,
            ArrayData::U64($arr) => $body,
            ArrayData::F32($arr) => $body,
            ArrayData::F64($arr) => $body,
        }
    };
}

/// Like `with_array!`, but rewraps the result in the same variant.
macro_rules! map_array {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            ArrayData::Bool($arr) => ArrayData::Bool($body),
            ArrayData::I8($arr) => ArrayData::I8($body),
            ArrayData::I16($arr) => ArrayData::I16($body),
            ArrayData::I32($arr) => ArrayData::I32($body),
            ArrayData::I64($arr) => ArrayData::I64($body),
            ArrayData::U8($arr) => ArrayData::U8($body),
            ArrayData::U16($arr) => ArrayData::U16($body),
            ArrayData::U32($arr) => ArrayData::U32($body),
            ArrayData::U64($arr) => ArrayData::U64($body),
            ArrayData::F32($arr) => ArrayData::F32($body),
            ArrayData::F64($arr) => ArrayData::F64($body),
        }
    };
}

/// Element-wise `as` conversion of any variant into `ArrayD<$t>`.
macro_rules! cast_to {
    ($value:expr, $t:ty) => {
        match $value {
            ArrayData::Bool(a) => a.mapv(|v| u8::from(v) as $t),
            ArrayData::I8(a) => a.mapv(|v| v as $t),
            ArrayData::I16(a) => a.mapv(|v| v as $t),
            ArrayData::I32(a) => a.mapv(|v| v as $t),
            ArrayData::I64(a) => a.mapv(|v| v as $t),
            ArrayData::U8(a) => a.mapv(|v| v as $t),
            ArrayData::U16(a) => a.mapv(|v| v as $t),
            ArrayData::U32(a) => a.mapv(|v| v as $t),
            ArrayData::U64(a) => a.mapv(|v| v as $t),
            ArrayData::F32(a) => a.mapv(|v| v as $t),
            ArrayData::F64(a) => a.mapv(|v| v as $t),
        }
    };
}

impl ArrayData {
    pub fn dtype(&self) -> Dtype {
        match self {
            Self::Bool(_) => Dtype::Bool,
            Self::I8(_) => Dtype::I8,
            Self::I16(_) => Dtype::I16,
            Self::I32(_) => Dtype::I32,
            Self::I64(_) => Dtype::I64,
            Self::U8(_) => Dtype::U8,
            Self::U16(_) => Dtype::U16,
            Self::U32(_) => Dtype::U32,
            Self::U64(_) => Dtype::U64,
            Self::F32(_) => Dtype::F32,
            Self::F64(_) => Dtype::F64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        with_array!(self, a => a.shape())
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Length of the outermost dimension, `None` for scalars.
    pub fn rows(&self) -> Option<usize> {
        self.shape().first().copied()
    }

    /// Convert every element to `dtype` using Rust `as` semantics.
    ///
    /// Float to integer truncates toward zero and saturates at the target
    /// bounds (NaN becomes 0). Integer narrowing wraps. Nothing is clamped
    /// or validated beyond that.
    pub fn cast(&self, dtype: Dtype) -> ArrayData {
        if self.dtype() == dtype {
            return self.clone();
        }
        match dtype {
            Dtype::Bool => ArrayData::Bool(cast_to!(self, f64).mapv(|v| v != 0.0)),
            Dtype::I8 => ArrayData::I8(cast_to!(self, i8)),
            Dtype::I16 => ArrayData::I16(cast_to!(self, i16)),
            Dtype::I32 => ArrayData::I32(cast_to!(self, i32)),
            Dtype::I64 => ArrayData::I64(cast_to!(self, i64)),
            Dtype::U8 => ArrayData::U8(cast_to!(self, u8)),
            Dtype::U16 => ArrayData::U16(cast_to!(self, u16)),
            Dtype::U32 => ArrayData::U32(cast_to!(self, u32)),
            Dtype::U64 => ArrayData::U64(cast_to!(self, u64)),
            Dtype::F32 => ArrayData::F32(cast_to!(self, f32)),
            Dtype::F64 => ArrayData::F64(cast_to!(self, f64)),
        }
    }

    /// The sub-array at index 0 of the outermost axis.
    pub fn first_row(&self) -> Option<ArrayData> {
        match self.rows() {
            Some(rows) if rows > 0 => {
                Some(map_array!(self, a => a.index_axis(Axis(0), 0).to_owned()))
            }
            _ => None,
        }
    }

    /// The first `n` rows along the outermost axis (all of them if fewer).
    pub fn head(&self, n: usize) -> ArrayData {
        if self.ndim() == 0 {
            return self.clone();
        }
        map_array!(self, a => a.slice_axis(Axis(0), Slice::from(..n)).to_owned())
    }

    /// Human-readable rendering; arrays with many elements are summarized
    /// with `...` along each long axis.
    pub fn render(&self) -> String {
        with_array!(self, a => format!("{}", a))
    }

    /// Read a dataset or attribute into memory with its stored element type.
    pub(crate) fn read_from(obj: &hdf5::Container, path: &str) -> Result<ArrayData> {
        let descriptor = obj.dtype()?.to_descriptor()?;
        let dtype = Dtype::from_descriptor(&descriptor).ok_or_else(|| {
            Error::schema(path, format!("unsupported element type {:?}", descriptor))
        })?;

        Ok(match dtype {
            Dtype::Bool => ArrayData::Bool(read_typed(obj)?),
            Dtype::I8 => ArrayData::I8(read_typed(obj)?),
            Dtype::I16 => ArrayData::I16(read_typed(obj)?),
            Dtype::I32 => ArrayData::I32(read_typed(obj)?),
            Dtype::I64 => ArrayData::I64(read_typed(obj)?),
            Dtype::U8 => ArrayData::U8(read_typed(obj)?),
            Dtype::U16 => ArrayData::U16(read_typed(obj)?),
            Dtype::U32 => ArrayData::U32(read_typed(obj)?),
            Dtype::U64 => ArrayData::U64(read_typed(obj)?),
            Dtype::F32 => ArrayData::F32(read_typed(obj)?),
            Dtype::F64 => ArrayData::F64(read_typed(obj)?),
        })
    }

    /// Create dataset `name` in `group` holding this array.
    pub(crate) fn create_dataset(&self, group: &hdf5::Group, name: &str) -> Result<hdf5::Dataset> {
        with_array!(self, a => create_dataset_typed(group, name, a))
    }

    /// Create attribute `name` on `loc` holding this array.
    pub(crate) fn create_attr(&self, loc: &hdf5::Location, name: &str) -> Result<()> {
        with_array!(self, a => create_attr_typed(loc, name, a))
    }
}

impl fmt::Display for ArrayData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

pub(super) fn read_typed<T: H5Type>(obj: &hdf5::Container) -> Result<ArrayD<T>> {
    if obj.is_scalar() {
        let value = obj.read_scalar::<T>()?;
        Ok(ndarray::arr0(value).into_dyn())
    } else {
        Ok(obj.read_dyn::<T>()?)
    }
}

fn create_dataset_typed<T: H5Type>(
    group: &hdf5::Group,
    name: &str,
    data: &ArrayD<T>,
) -> Result<hdf5::Dataset> {
    if let (0, Some(value)) = (data.ndim(), data.first()) {
        let dataset = group.new_dataset::<T>().shape(()).create(name)?;
        dataset.write_scalar(value)?;
        return Ok(dataset);
    }
    Ok(group.new_dataset_builder().with_data(data).create(name)?)
}

fn create_attr_typed<T: H5Type>(loc: &hdf5::Location, name: &str, data: &ArrayD<T>) -> Result<()> {
    if let (0, Some(value)) = (data.ndim(), data.first()) {
        let attr = loc.new_attr::<T>().shape(()).create(name)?;
        attr.write_scalar(value)?;
    } else {
        loc.new_attr_builder().with_data(data).create(name)?;
    }
    Ok(())
}
