//! `cardinality-sketch` is a Rust crate for estimating the number of distinct elements in a
//! stream of byte records using a fixed amount of memory.
//!
//! The sketch is a classic HyperLogLog: each observation is hashed through a caller-supplied
//! stateful 64-bit accumulator, registers keep leading-zero maxima, and sketches of equal
//! precision merge by element-wise register max.
mod error;
mod hash;
#[cfg(feature = "with_serde")]
mod serde;
mod sketch;

pub use crate::error::{Error, Result};
pub use crate::hash::{Hash64, WyHash64};
pub use crate::sketch::HyperLogLog;
