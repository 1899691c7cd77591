//!
//! Generate a per-message secret number
//!

use crate::{
    errors::{Error, Result},
    Components, PrivateKey,
};
use alloc::{vec, vec::Vec};
use core::cmp::min;
use digest::{core_api::BlockSizeUser, Digest, FixedOutputReset};
use num_bigint::{BigUint, ModInverse, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use rfc6979::HmacDrbg;
use zeroize::Zeroize;

/// Candidate draws for one signature before giving up; reaching it means the
/// randomness source is broken, not that the search was unlucky.
const MAX_ATTEMPTS: usize = 4096;

/// Reduce the hash into an RFC 6979 appropriate form
fn reduce_hash(q: &BigUint, hash: &[u8]) -> Vec<u8> {
    // Leftmost bitlen(q) bits of the hash, reduced modulo q
    let q_byte_len = q.bits() / 8;

    let hash_len = min(hash.len(), q_byte_len);
    let hash = BigUint::from_bytes_be(&hash[..hash_len]);

    let mut reduced = (hash % q).to_bytes_be();
    while reduced.len() < q_byte_len {
        reduced.insert(0, 0);
    }

    reduced
}

/// Generate a per-message secret number k deterministically using the method described in RFC 6979
///
/// # Returns
///
/// Secret number k and its modular multiplicative inverse with q
pub(crate) fn secret_number_rfc6979<D>(private_key: &PrivateKey, hash: &[u8]) -> (BigUint, BigUint)
where
    D: Digest + BlockSizeUser + FixedOutputReset,
{
    let q = private_key.public_key().components().q();
    let k_size = q.bits() / 8;
    let hash = reduce_hash(q, hash);

    let mut x_bytes = private_key.x().to_bytes_be();
    while x_bytes.len() < k_size {
        x_bytes.insert(0, 0);
    }

    let mut hmac = HmacDrbg::<D>::new(&x_bytes, &hash, &[]);
    x_bytes.zeroize();

    let mut buffer = vec![0; k_size];
    loop {
        hmac.fill_bytes(&mut buffer);

        let k = BigUint::from_bytes_be(&buffer);
        if k.is_zero() || &k >= q {
            continue;
        }

        if let Some(inv_k) = (&k).mod_inverse(q) {
            let inv_k = inv_k
                .to_biguint()
                .expect("[bug] modular inverse of a reduced value cannot be negative");

            return (k, inv_k);
        }
    }
}

/// Generate a per-message secret number k according to FIPS 186-4 Appendix B.2.1
///
/// # Returns
///
/// Secret number k and its modular multiplicative inverse with q
pub(crate) fn secret_number<R>(rng: &mut R, components: &Components) -> Result<(BigUint, BigUint)>
where
    R: CryptoRng + RngCore + ?Sized,
{
    let q = components.q();
    let n = q.bits();
    let one = BigUint::one();

    // Drawing n + 64 bits and reducing modulo q - 1 keeps the bias of the
    // reduction below 2^-64
    for _ in 0..MAX_ATTEMPTS {
        let c = rng.gen_biguint(n + 64);
        let k = (c % (q - &one)) + &one;

        if let Some(inv_k) = (&k).mod_inverse(q) {
            let inv_k = match inv_k.to_biguint() {
                Some(inv_k) => inv_k,
                None => continue,
            };

            // `k` and `k^-1` both have to be in the range `[1, q-1]`
            if (!inv_k.is_zero() && &inv_k < q) && (!k.is_zero() && &k < q) {
                return Ok((k, inv_k));
            }
        }
    }

    Err(Error::GenerationAborted)
}
