#![doc = include_str!("../README.md")]

pub mod bktree;
mod error;
pub mod metric;
mod r#type;

pub use error::{BkIndexError, Result};
pub use r#type::DistanceNum;

#[cfg(test)]
pub(crate) mod test;
