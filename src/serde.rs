//! # Serde module for HyperLogLog
//!
//! Serializes the sketch as a `(precision, registers)` tuple, the complete durable
//! state. The hash accumulator's internal state is not persisted: it is reset after
//! every write, so a deserialized sketch only needs a compatible accumulator bound via
//! `set_hash` before ingesting again.
//!
//! Deserialization validates the precision range and the register-array length against
//! `2^precision` before constructing the sketch.

use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

use crate::sketch::{HyperLogLog, MAX_RHO};

impl Serialize for HyperLogLog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.precision())?;
        tup.serialize_element(self.registers())?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for HyperLogLog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (precision, registers): (u8, Vec<u8>) = Deserialize::deserialize(deserializer)?;
        let sketch = HyperLogLog::new(precision).map_err(Error::custom)?;
        if registers.len() != sketch.registers().len() {
            return Err(Error::custom(format!(
                "register array length {} does not match precision {}",
                registers.len(),
                precision
            )));
        }
        if let Some(&r) = registers.iter().find(|&&r| r > MAX_RHO) {
            return Err(Error::custom(format!(
                "register value {r} exceeds the maximum tail length {MAX_RHO}"
            )));
        }
        Ok(HyperLogLog {
            registers,
            ..sketch
        })
    }
}
