//! ## HyperLogLog sketch
//! Fixed-memory cardinality estimation over a stream of byte records.
//!
//! Each observation is hashed to a 64-bit digest `x`. The top `p` bits of `x` select one
//! of `m = 2^p` registers; the remaining bits, left-shifted back to 64 bits, feed the
//! leading-zero counter. Registers keep the maximum observed tail length, and the
//! estimator combines their harmonic mean with small- and large-range corrections.

use std::fmt::{Debug, Formatter};

use crate::error::{Error, Result};
use crate::hash::Hash64;

/// Smallest supported precision: below 16 registers there is no alpha constant.
const MIN_PRECISION: u8 = 4;
/// Largest supported precision: the full width of the 64-bit digest.
const MAX_PRECISION: u8 = 64;
/// Largest tail value a 64-bit digest can produce (`rho(0)`).
#[cfg(feature = "with_serde")]
pub(crate) const MAX_RHO: u8 = MAX_PRECISION + 1;
/// 2^64, regime boundary of the large-range correction.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// HyperLogLog cardinality sketch with externally supplied hashing.
///
/// The sketch owns `2^precision` one-byte registers and, optionally, a stateful hash
/// accumulator. Observations are ingested with [`write`](Self::write), estimated with
/// [`count`](Self::count), and sketches of equal precision combine with
/// [`merge`](Self::merge) or [`union`](Self::union).
///
/// The sketch has no internal synchronization. Callers needing concurrent ingestion
/// shard into one sketch per writer, each with its own accumulator instance, and
/// periodically merge the shards.
pub struct HyperLogLog {
    /// Number of digest bits used for register indexing, fixed at construction.
    pub(crate) precision: u8,
    /// Tail-length maxima, one per register; the sketch's only mutable state.
    pub(crate) registers: Vec<u8>,
    /// Bound hash accumulator, if any. Bound at most once.
    pub(crate) hash: Option<Box<dyn Hash64>>,
}

impl HyperLogLog {
    /// Create a sketch with `2^precision` zero registers and no bound accumulator.
    ///
    /// Returns [`Error::InvalidPrecision`] unless `4 <= precision <= 64`. A sketch
    /// without an accumulator can count and merge but not ingest; bind one with
    /// [`set_hash`](Self::set_hash).
    pub fn new(precision: u8) -> Result<Self> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(Error::InvalidPrecision(precision));
        }
        let m = 1_usize.checked_shl(u32::from(precision)).unwrap_or(0);
        Ok(Self {
            precision,
            registers: vec![0; m],
            hash: None,
        })
    }

    /// Create a sketch with the hash accumulator bound at construction.
    pub fn with_hash(precision: u8, hash: Box<dyn Hash64>) -> Result<Self> {
        let mut sketch = Self::new(precision)?;
        sketch.hash = Some(hash);
        Ok(sketch)
    }

    /// Bind a hash accumulator to a sketch constructed without one.
    ///
    /// A sketch binds at most one accumulator over its lifetime: rebinding returns
    /// [`Error::AlreadyBound`] and leaves the existing binding in place.
    pub fn set_hash(&mut self, hash: Box<dyn Hash64>) -> Result<()> {
        if self.hash.is_some() {
            return Err(Error::AlreadyBound);
        }
        self.hash = Some(hash);
        Ok(())
    }

    /// Ingest one observation, returning the number of bytes consumed.
    ///
    /// The observation bytes are fed to the bound accumulator, the 64-bit digest is read
    /// back, and the accumulator is reset for the next observation; the sketch, not the
    /// caller, owns that reset. The top `precision` digest bits select a register; the
    /// remaining bits update it with the maximum observed tail length. A register never
    /// decreases, so repeated identical observations leave the register array unchanged.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        let hash = self.hash.as_mut().ok_or(Error::UnboundHash)?;
        let n = hash.write(bytes)?;
        let x = hash.sum64();
        hash.reset();

        let idx = (x >> (64 - u32::from(self.precision))) as usize;
        let w = x.checked_shl(u32::from(self.precision)).unwrap_or(0);
        let rank = rho(w);
        if rank > self.registers[idx] {
            self.registers[idx] = rank;
        }
        Ok(n)
    }

    /// Return the cardinality estimate for the current register state.
    ///
    /// Pure read; never mutates the sketch. The raw harmonic-mean estimate is biased at
    /// both extremes of the cardinality range, so three regimes apply: linear counting
    /// while empty registers remain and the raw estimate is small, the raw estimate in
    /// the middle of the range, and a hash-collision correction near the 64-bit ceiling.
    pub fn count(&self) -> f64 {
        let m = self.registers.len() as f64;
        let sum: f64 = self
            .registers
            .iter()
            .map(|&r| 2_f64.powi(-i32::from(r)))
            .sum();
        let raw = alpha(self.registers.len()) * m * m / sum;

        if raw <= 2.5 * m {
            let zeros = self.registers.iter().filter(|&&r| r == 0).count();
            if zeros > 0 {
                return linear_counting(m, zeros as f64);
            }
            return raw;
        }
        if raw <= TWO_POW_64 / 30.0 {
            return raw;
        }
        -TWO_POW_64 * (1.0 - raw / TWO_POW_64).ln()
    }

    /// Merge `rhs` into `self`, leaving `self` the union of both observed sets.
    ///
    /// Element-wise register max. Operands must share precision and hash algorithm;
    /// validation happens before any register is touched.
    pub fn merge(&mut self, rhs: &Self) -> Result<()> {
        self.check_precision(rhs)?;
        self.check_hash(rhs)?;
        for (reg, &r) in self.registers.iter_mut().zip(&rhs.registers) {
            *reg = (*reg).max(r);
        }
        Ok(())
    }

    /// Reinitialize `self` as the union of `a` and `b`.
    ///
    /// `self` takes `a`'s precision and a freshly allocated register array holding the
    /// element-wise max; its own hash binding is kept. `a` and `b` must share precision,
    /// and all three sketches must be hash-compatible. For the in-place form where the
    /// destination is one of the operands, use [`merge`](Self::merge).
    pub fn union(&mut self, a: &Self, b: &Self) -> Result<()> {
        a.check_precision(b)?;
        a.check_hash(b)?;
        self.check_hash(a)?;
        self.check_hash(b)?;

        self.precision = a.precision;
        self.registers = a
            .registers
            .iter()
            .zip(&b.registers)
            .map(|(&x, &y)| x.max(y))
            .collect();
        Ok(())
    }

    /// Zero every register in place, keeping precision and the bound accumulator.
    pub fn reset(&mut self) {
        self.registers.fill(0);
    }

    /// The sketch's precision parameter.
    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// The raw register array.
    #[inline]
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Whether no observation has been ingested since construction or reset.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registers.iter().all(|&r| r == 0)
    }

    /// Algorithm tag of the bound accumulator, if any.
    #[inline]
    fn algorithm(&self) -> Option<&'static str> {
        self.hash.as_deref().map(Hash64::algorithm)
    }

    fn check_precision(&self, rhs: &Self) -> Result<()> {
        if self.precision != rhs.precision {
            return Err(Error::PrecisionMismatch {
                lhs: self.precision,
                rhs: rhs.precision,
            });
        }
        Ok(())
    }

    /// An unbound accumulator is compatible with anything: compatibility only
    /// constrains future writes, and an unbound sketch cannot write.
    fn check_hash(&self, rhs: &Self) -> Result<()> {
        if let (Some(lhs), Some(rhs)) = (self.algorithm(), rhs.algorithm()) {
            if lhs != rhs {
                return Err(Error::HashMismatch { lhs, rhs });
            }
        }
        Ok(())
    }
}

impl Debug for HyperLogLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "precision: {}, estimate: {:.1}", self.precision, self.count())
    }
}

/// Tail length of a 64-bit word: count of leading zero bits plus one.
///
/// `rho(0) = 65`: an all-zero tail is a legitimate, frequently-occurring value,
/// not an error case.
#[inline]
fn rho(w: u64) -> u8 {
    w.leading_zeros() as u8 + 1
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

/// Linear-counting estimate from `v` empty registers out of `m`.
#[inline]
fn linear_counting(m: f64, v: f64) -> f64 {
    m * (m / v).ln()
}
