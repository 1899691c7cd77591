//!
//! Cryptographically secure random number generation
//!
//! Every entropy-consuming operation in this crate takes a caller supplied
//! `CryptoRng + RngCore` source, so a deterministic generator can stand in
//! for the operating system during testing without touching any other code
//! path. [`OsEntropy`] is the production source.
//!

use crate::errors::{Error, Result};
use alloc::{vec, vec::Vec};
use num_bigint::{BigUint, RandBigInt};
use rand::{CryptoRng, Error as RandError, RngCore};

/// Largest request forwarded to the platform entropy source in one call.
///
/// Some backends cap a single read (the Web Crypto API rejects anything over
/// 65536 bytes), so larger buffers are filled chunk by chunk.
const MAX_READ: usize = 65536;

/// CSPRNG handle backed by the operating system entropy source.
///
/// Zero-sized; every instance reads the same underlying pool, so concurrent
/// workers each hold their own copy.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl OsEntropy {
    /// Fill `dest` with cryptographically secure random bytes.
    ///
    /// Requests of any length are supported; reads larger than the platform
    /// single-call limit are chunked internally.
    pub fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        for chunk in dest.chunks_mut(MAX_READ) {
            getrandom::getrandom(chunk).map_err(|_| Error::EntropyUnavailable)?;
        }

        Ok(())
    }

    /// Return `n` fresh random bytes.
    pub fn bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0; n];
        self.fill(&mut buf)?;
        Ok(buf)
    }
}

impl RngCore for OsEntropy {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0; 4];
        self.fill_bytes(&mut buf);
        u32::from_be_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0; 8];
        self.fill_bytes(&mut buf);
        u64::from_be_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        // `RngCore::fill_bytes` is infallible by contract; an unreadable
        // entropy source must never degrade into weaker output
        self.try_fill_bytes(dest)
            .expect("platform entropy source unavailable")
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), RandError> {
        for chunk in dest.chunks_mut(MAX_READ) {
            getrandom::getrandom(chunk).map_err(|e| RandError::from(e.code()))?;
        }

        Ok(())
    }
}

impl CryptoRng for OsEntropy {}

/// Uniformly distributed 32-bit integer, read at full width from the source.
pub fn uint32<R>(rng: &mut R) -> u32
where
    R: CryptoRng + RngCore + ?Sized,
{
    rng.next_u32()
}

/// Uniformly distributed integer in `[min, max)`.
///
/// Samples are drawn through the smallest power-of-two mask covering the
/// span and out-of-range draws are rejected; a plain modulo reduction would
/// skew the distribution towards the low end.
///
/// Panics when `min >= max`.
pub fn range<R>(rng: &mut R, min: u64, max: u64) -> u64
where
    R: CryptoRng + RngCore + ?Sized,
{
    assert!(min < max, "empty range");

    let span = max - min;
    let mask = if span.is_power_of_two() {
        span - 1
    } else {
        u64::MAX >> span.leading_zeros()
    };

    loop {
        let sample = rng.next_u64() & mask;
        if sample < span {
            break min + sample;
        }
    }
}

/// Uniformly distributed non-negative integer of at most `bits` bits.
pub fn integer<R>(rng: &mut R, bits: usize) -> BigUint
where
    R: CryptoRng + RngCore + ?Sized,
{
    rng.gen_biguint(bits)
}
