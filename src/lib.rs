//! h5ep - normalize, slice and inspect HDF5 robot-episode recordings.
//!
//! Three independent pipelines share one container abstraction:
//!
//! - [`normalize`] - reshape raw episodes into the flat training schema
//! - [`slice`] - copy a range of episodes out of an aggregate file
//! - [`view`] - write a bounded, human-readable dump of a file
//!
//! [`container`] wraps the HDF5 file access all of them use.

pub mod cli;
pub mod config;
pub mod container;
pub mod error;
pub mod normalize;
pub mod slice;
pub mod view;

pub use config::Config;
pub use container::{ArrayData, AttrValue, Container, Dtype, Mode};
pub use error::{Error, Result};
