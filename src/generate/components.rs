//!
//! Generate DSA key components
//!

use crate::{
    consts,
    errors::{Error, Result},
    prime, Components,
};
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::{CryptoRng, RngCore};

/// Fresh subgroup orders tried before the whole search is abandoned.
///
/// The first q almost always yields a p; the ceiling exists so a broken
/// entropy source turns into [`Error::GenerationAborted`] instead of a hang.
const MAX_Q_RESTARTS: usize = 4096;

/// Generate the common components p, q and g
///
/// Follows the probable prime construction of FIPS 186-4 Appendix A.1.1: an
/// N-bit prime q, then an L-bit prime p with `p ≡ 1 (mod 2q)`, each q given
/// at most `4 * L` p-candidates before it is discarded for a fresh one.
///
/// # Returns
///
/// Tuple of three `BigUint`s. Ordered like this `(p, q, g)`
pub(crate) fn common<R: CryptoRng + RngCore + ?Sized>(
    rng: &mut R,
    size: (u32, u32),
) -> Result<(BigUint, BigUint, BigUint)> {
    if !consts::is_supported(size) {
        return Err(Error::UnsupportedParameterSize);
    }

    let (l, n) = (size.0 as usize, size.1 as usize);
    let one = BigUint::one();
    let mut restarts = 0;

    let (p, q) = 'gen_pq: loop {
        if restarts == MAX_Q_RESTARTS {
            return Err(Error::GenerationAborted);
        }
        restarts += 1;

        let q = prime::generate_prime(rng, n);

        // Search p ≡ 1 (mod 2q) so that (p - 1) / q stays integral
        let modulus = &q << 1;
        match prime::generate_prime_congruent(rng, l, &modulus, &one, 4 * l) {
            Ok(p) => break 'gen_pq (p, q),
            Err(Error::GenerationAborted) => continue,
            Err(other) => return Err(other),
        }
    };

    // Generate g with the unverifiable method of Appendix A.2.1: a random h
    // in [2, p - 2] raised to (p - 1) / q, retried while the result is 1
    let e = (&p - &one) / &q;
    let two = BigUint::from(2u8);
    let upper = &p - &one;

    let g = loop {
        let h = rng.gen_biguint_range(&two, &upper);
        let g = h.modpow(&e, &p);

        if !g.is_one() {
            break g;
        }
    };

    Ok((p, q, g))
}

/// Calculate the public component from the common components and the private component
#[inline]
pub(crate) fn public(components: &Components, x: &BigUint) -> BigUint {
    components.g().modpow(x, components.p())
}
