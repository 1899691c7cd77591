//!
//! Module containing the definition of the private key container
//!

use crate::{
    errors::{Error, Result as DsaResult},
    generate,
    sig::Signature,
    Components, PublicKey, DSA_OID,
};
use core::cmp::min;
use digest::{core_api::BlockSizeUser, Digest, FixedOutputReset};
use num_bigint::BigUint;
use num_traits::Zero;
use pkcs8::{
    der::{asn1::UIntRef, AnyRef, Decode, Encode},
    AlgorithmIdentifier, DecodePrivateKey, EncodePrivateKey, PrivateKeyInfo, SecretDocument,
};
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use signature::{rand_core::CryptoRngCore, DigestSigner, RandomizedDigestSigner, Signer};
use zeroize::{Zeroize, Zeroizing};

/// Ephemeral secrets drawn for one signature before giving up.
///
/// A zero r or s discards the secret and draws a fresh one; hitting the
/// ceiling means the randomness source is broken, not that the search was
/// unlucky.
const MAX_SIGN_ATTEMPTS: usize = 4096;

/// DSA private key
///
/// The [`Signer`] and [`DigestSigner`] APIs produce deterministic signatures
/// as described in RFC 6979, while [`RandomizedDigestSigner`] and
/// [`sign_prehash`](PrivateKey::sign_prehash) draw a fresh ephemeral secret
/// from the supplied source for every signature.
#[derive(Clone, PartialEq)]
#[must_use]
pub struct PrivateKey {
    /// Public key
    public_key: PublicKey,

    /// Private component x
    x: Zeroizing<BigUint>,
}

opaque_debug::implement!(PrivateKey);

impl PrivateKey {
    /// Construct a new private key from the public key and private component
    pub fn from_components(public_key: PublicKey, x: BigUint) -> DsaResult<Self> {
        if x.is_zero() || &x >= public_key.components().q() {
            return Err(Error::InvalidParameter("x must lie in [1, q-1]"));
        }

        Ok(Self {
            public_key,
            x: Zeroizing::new(x),
        })
    }

    /// Generate a new DSA keypair for existing components
    #[inline]
    pub fn generate<R>(rng: &mut R, components: Components) -> PrivateKey
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        generate::keypair(rng, components)
    }

    /// Generate common components of the requested size and a keypair for
    /// them in one step
    pub fn generate_sized<R>(rng: &mut R, size: (u32, u32)) -> DsaResult<PrivateKey>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let components = Components::generate(rng, size)?;
        Ok(generate::keypair(rng, components))
    }

    /// DSA public key
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// DSA private component
    ///
    /// If you decide to clone this value, please consider using
    /// [`Zeroize::zeroize`](::zeroize::Zeroize::zeroize()) to zero out the
    /// memory after you're done using the clone
    #[must_use]
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// Canonical byte length of a signature component, `ceil(bitlen(q) / 8)`
    ///
    /// Message digests are truncated to this length before they enter the
    /// signature equation, and fixed-width signature encoding uses it as the
    /// component width.
    #[must_use]
    pub fn size(&self) -> usize {
        (self.public_key().components().q().bits() + 7) / 8
    }

    /// Check whether the private key is valid
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if !self.public_key().is_valid() {
            return false;
        }

        !self.x().is_zero() && self.x() < self.public_key().components().q()
    }

    /// Sign a pre-hashed message with a caller supplied randomness source
    ///
    /// The ephemeral secret is freshly drawn per call and never reused across
    /// signatures. `hash` enters the signature equation through its leftmost
    /// `bitlen(q)` bits; hashing itself is the caller's responsibility.
    pub fn sign_prehash<R>(&self, rng: &mut R, hash: &[u8]) -> DsaResult<Signature>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        // Refuse to sign with an invalid key
        if !self.is_valid() {
            return Err(Error::InvalidParameter("inconsistent private key"));
        }

        for _ in 0..MAX_SIGN_ATTEMPTS {
            let k_kinv = generate::secret_number(rng, self.public_key().components())?;

            if let Some(signature) = self.sign_prehashed(k_kinv, hash) {
                return Ok(signature);
            }
        }

        Err(Error::GenerationAborted)
    }

    /// Sign a pre-hashed message deterministically as described in RFC 6979
    pub fn sign_prehash_rfc6979<D>(&self, hash: &[u8]) -> DsaResult<Signature>
    where
        D: Digest + BlockSizeUser + FixedOutputReset,
    {
        if !self.is_valid() {
            return Err(Error::InvalidParameter("inconsistent private key"));
        }

        // The derived secret is a function of key and message; a zero r or s
        // would recur on retry, so it surfaces as an error instead
        let k_kinv = generate::secret_number_rfc6979::<D>(self, hash);
        self.sign_prehashed(k_kinv, hash)
            .ok_or(Error::GenerationAborted)
    }

    /// Sign some pre-hashed data with the given ephemeral secret
    fn sign_prehashed(&self, (k, inv_k): (BigUint, BigUint), hash: &[u8]) -> Option<Signature> {
        let components = self.public_key().components();
        let (p, q, g) = (components.p(), components.q(), components.g());
        let x = self.x();

        let r = g.modpow(&k, p) % q;
        if r.is_zero() {
            return None;
        }

        let n = q.bits() / 8;
        let z_len = min(n, hash.len());
        let z = BigUint::from_bytes_be(&hash[..z_len]);

        let s = (inv_k * (z + x * &r)) % q;
        if s.is_zero() {
            return None;
        }

        Some(Signature::new(r, s))
    }
}

impl Signer<Signature> for PrivateKey {
    fn try_sign(&self, msg: &[u8]) -> core::result::Result<Signature, signature::Error> {
        self.try_sign_digest(Sha256::new().chain_update(msg))
    }
}

impl<D> DigestSigner<D, Signature> for PrivateKey
where
    D: Digest + BlockSizeUser + FixedOutputReset,
{
    fn try_sign_digest(&self, digest: D) -> core::result::Result<Signature, signature::Error> {
        let hash = digest.finalize();

        self.sign_prehash_rfc6979::<D>(&hash)
            .map_err(|_| signature::Error::new())
    }
}

impl<D> RandomizedDigestSigner<D, Signature> for PrivateKey
where
    D: Digest,
{
    fn try_sign_digest_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        digest: D,
    ) -> core::result::Result<Signature, signature::Error> {
        let hash = digest.finalize();

        self.sign_prehash(rng, &hash)
            .map_err(|_| signature::Error::new())
    }
}

impl EncodePrivateKey for PrivateKey {
    fn to_pkcs8_der(&self) -> pkcs8::Result<SecretDocument> {
        let parameters = self.public_key().components().to_vec()?;
        let parameters = AnyRef::from_der(&parameters)?;
        let algorithm = AlgorithmIdentifier {
            oid: DSA_OID,
            parameters: Some(parameters),
        };

        let mut x_bytes = self.x().to_bytes_be();
        let x = UIntRef::new(&x_bytes)?;
        let mut private_key = x.to_vec()?;

        let private_key_info = PrivateKeyInfo::new(algorithm, &private_key);
        let secret_document = private_key_info.try_into()?;

        private_key.zeroize();
        x_bytes.zeroize();

        Ok(secret_document)
    }
}

impl<'a> TryFrom<PrivateKeyInfo<'a>> for PrivateKey {
    type Error = pkcs8::Error;

    fn try_from(value: PrivateKeyInfo<'a>) -> core::result::Result<Self, Self::Error> {
        value.algorithm.assert_algorithm_oid(DSA_OID)?;

        let parameters = value.algorithm.parameters_any()?;
        let components: Components = parameters.decode_into()?;

        let x = UIntRef::from_der(value.private_key)?;
        let x = BigUint::from_bytes_be(x.as_bytes());

        let y = if let Some(y_bytes) = value.public_key {
            let y = UIntRef::from_der(y_bytes)?;
            BigUint::from_bytes_be(y.as_bytes())
        } else {
            generate::public_component(&components, &x)
        };

        let public_key =
            PublicKey::from_components(components, y).map_err(|_| pkcs8::Error::KeyMalformed)?;

        PrivateKey::from_components(public_key, x).map_err(|_| pkcs8::Error::KeyMalformed)
    }
}

impl DecodePrivateKey for PrivateKey {}
