//!
//! Generate a DSA keypair
//!

use crate::{generate::components, Components, PrivateKey, PublicKey};
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::{CryptoRng, RngCore};

/// Generate a new keypair
#[inline]
pub(crate) fn keypair<R>(rng: &mut R, components: Components) -> PrivateKey
where
    R: CryptoRng + RngCore + ?Sized,
{
    let x = rng.gen_biguint_range(&BigUint::one(), components.q());
    let y = components::public(&components, &x);

    PublicKey::from_components(components, y)
        .and_then(|public_key| PrivateKey::from_components(public_key, x))
        .expect("[bug] newly generated keypair considered invalid")
}
