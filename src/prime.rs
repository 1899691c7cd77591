//!
//! Probabilistic primality testing and probable prime search
//!
//! Miller-Rabin with uniformly drawn witnesses, as laid out in FIPS 186-4
//! Appendix C.3.1. Nothing here proves primality; callers get integers that
//! are composite with probability at most `4^-rounds`.
//!

use crate::errors::{Error, Result};
use alloc::vec;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

/// Default number of Miller-Rabin witness rounds.
///
/// The largest recommendation of FIPS 186-4 Table C.1; the residual error of
/// `4^-64` is far below the `2^-80` bound required for the DSA bit lengths.
pub const MILLER_RABIN_ROUNDS: usize = 64;

/// Divisors tried before any witness round; a handful of short divisions
/// weeds out the bulk of random composites.
const SMALL_PRIMES: [u32; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

/// Miller-Rabin primality test with `rounds` independent random witnesses.
///
/// Returns `false` as soon as any witness proves compositeness. Values below
/// 2, even values and small-prime multiples never reach a witness round.
pub fn is_probable_prime<R>(rng: &mut R, candidate: &BigUint, rounds: usize) -> bool
where
    R: CryptoRng + RngCore + ?Sized,
{
    let one = BigUint::one();
    let two = BigUint::from(2u8);

    if candidate < &two {
        return false;
    }

    for small in SMALL_PRIMES {
        let small = BigUint::from(small);
        if (candidate % &small).is_zero() {
            return *candidate == small;
        }
    }

    // candidate - 1 = d * 2^s with d odd
    let minus_one = candidate - &one;
    let mut d = minus_one.clone();
    let mut s = 0usize;
    while (&d % &two).is_zero() {
        d = d >> 1;
        s += 1;
    }

    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &minus_one);
        let mut x = a.modpow(&d, candidate);

        if x == one || x == minus_one {
            continue;
        }

        for _ in 1..s {
            x = (&x * &x) % candidate;
            if x == minus_one {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Search for a probable prime of exactly `bits` bits.
///
/// Candidates are drawn uniformly with the top bit forced (fixing the bit
/// length) and the low bit forced (oddness). The expected number of
/// candidates is on the order of `bits` by the prime density heuristic, but
/// only eventual termination is promised, not a bounded trial count.
pub fn generate_prime<R>(rng: &mut R, bits: usize) -> BigUint
where
    R: CryptoRng + RngCore + ?Sized,
{
    assert!(bits >= 2, "prime bit length too small");

    let n_bytes = (bits + 7) / 8;
    let excess = n_bytes * 8 - bits;
    let mut bytes = vec![0u8; n_bytes];

    loop {
        rng.fill_bytes(&mut bytes);
        bytes[0] &= 0xff >> excess;
        bytes[0] |= 0x80 >> excess;
        bytes[n_bytes - 1] |= 1;

        let candidate = BigUint::from_bytes_be(&bytes);
        if is_probable_prime(rng, &candidate, MILLER_RABIN_ROUNDS) {
            break candidate;
        }
    }
}

/// Search for a `bits`-bit probable prime `n` with `n ≡ remainder (mod modulus)`.
///
/// Each candidate starts from a uniform `bits`-bit draw and is snapped onto
/// the congruence class; draws whose fixup drops below the requested bit
/// length are skipped. At most `attempts` candidates are tried before the
/// search gives up with [`Error::GenerationAborted`], which the domain
/// parameter search uses to bound the work spent on any single subgroup
/// order.
pub fn generate_prime_congruent<R>(
    rng: &mut R,
    bits: usize,
    modulus: &BigUint,
    remainder: &BigUint,
    attempts: usize,
) -> Result<BigUint>
where
    R: CryptoRng + RngCore + ?Sized,
{
    let n_bytes = (bits + 7) / 8;
    let excess = n_bytes * 8 - bits;
    let mut bytes = vec![0u8; n_bytes];

    for _ in 0..attempts {
        rng.fill_bytes(&mut bytes);
        bytes[0] &= 0xff >> excess;
        bytes[0] |= 0x80 >> excess;

        let m = BigUint::from_bytes_be(&bytes);
        let candidate = &m - (&m % modulus) + remainder;

        if candidate.bits() != bits {
            continue;
        }

        if is_probable_prime(rng, &candidate, MILLER_RABIN_ROUNDS) {
            return Ok(candidate);
        }
    }

    Err(Error::GenerationAborted)
}

#[cfg(test)]
mod test {
    use super::{generate_prime, generate_prime_congruent, is_probable_prime};
    use num_bigint::BigUint;
    use num_traits::{One, Zero};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn trivial_values() {
        let mut rng = rng();

        assert!(!is_probable_prime(&mut rng, &BigUint::zero(), 16));
        assert!(!is_probable_prime(&mut rng, &BigUint::one(), 16));
        assert!(is_probable_prime(&mut rng, &BigUint::from(2u8), 16));
        assert!(is_probable_prime(&mut rng, &BigUint::from(3u8), 16));
        assert!(!is_probable_prime(&mut rng, &BigUint::from(4u8), 16));
    }

    #[test]
    fn known_primes_pass() {
        let mut rng = rng();

        // 2^31 - 1 and 2^61 - 1 are Mersenne primes
        for p in [2147483647u64, 2305843009213693951] {
            assert!(is_probable_prime(&mut rng, &BigUint::from(p), 64));
        }
    }

    #[test]
    fn known_composites_fail() {
        let mut rng = rng();

        // Carmichael numbers with small factors die in trial division
        for n in [561u64, 41041] {
            assert!(!is_probable_prime(&mut rng, &BigUint::from(n), 64));
        }

        // 7919 * 7927 has no factor below the trial division bound
        assert!(!is_probable_prime(&mut rng, &BigUint::from(62773913u64), 64));

        // even values short-circuit
        assert!(!is_probable_prime(&mut rng, &BigUint::from(1u64 << 40), 64));
    }

    #[test]
    fn generated_primes_have_requested_length() {
        let mut rng = rng();
        let two = BigUint::from(2u8);

        for _ in 0..4 {
            let p = generate_prime(&mut rng, 64);
            assert_eq!(p.bits(), 64);
            assert!(!(&p % &two).is_zero());
        }
    }

    #[test]
    fn congruent_primes_land_in_class() {
        let mut rng = rng();
        let modulus = BigUint::from(12u8);
        let remainder = BigUint::one();

        let p = generate_prime_congruent(&mut rng, 64, &modulus, &remainder, 4096).unwrap();
        assert_eq!(p.bits(), 64);
        assert_eq!(&p % &modulus, remainder);
    }

    #[test]
    fn congruent_search_honors_attempt_ceiling() {
        let mut rng = rng();
        // no 64-bit integer is ≡ 1 (mod 2^70), so every candidate is skipped
        let modulus = BigUint::one() << 70usize;

        let result = generate_prime_congruent(&mut rng, 64, &modulus, &BigUint::one(), 32);
        assert!(result.is_err());
    }
}
