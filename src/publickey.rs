//!
//! Module containing the definition of the public key container
//!

use crate::{
    errors::{Error, Result as DsaResult},
    sig::Signature,
    Components, DSA_OID,
};
use core::cmp::min;
use digest::Digest;
use num_bigint::{BigUint, ModInverse};
use num_traits::{One, Zero};
use pkcs8::{
    der::{asn1::UIntRef, AnyRef, Decode, Encode},
    spki, AlgorithmIdentifier, DecodePublicKey, EncodePublicKey, SubjectPublicKeyInfo,
};
use sha2::Sha256;
use signature::{DigestVerifier, Verifier};

/// DSA public key
#[derive(Clone, PartialEq, PartialOrd)]
#[must_use]
pub struct PublicKey {
    /// common components
    components: Components,

    /// Public component y
    y: BigUint,
}

opaque_debug::implement!(PublicKey);

impl PublicKey {
    /// Construct a new public key from the common components and the public component
    ///
    /// `y` must be an element of the order-q subgroup; keys decoded from a
    /// certificate are held to the same checks as locally generated ones.
    pub fn from_components(components: Components, y: BigUint) -> DsaResult<Self> {
        if y <= BigUint::one() || &y >= components.p() {
            return Err(Error::InvalidParameter("y out of range"));
        }

        if !y.modpow(components.q(), components.p()).is_one() {
            return Err(Error::InvalidParameter("y is not in the order-q subgroup"));
        }

        Ok(Self { components, y })
    }

    /// DSA common components
    pub const fn components(&self) -> &Components {
        &self.components
    }

    /// DSA public component
    #[must_use]
    pub const fn y(&self) -> &BigUint {
        &self.y
    }

    /// Check whether the public key is valid
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.components().is_valid()
            && self
                .y()
                .modpow(self.components().q(), self.components().p())
                .is_one()
    }

    /// Verify a signature over a pre-hashed message
    ///
    /// `hash` enters the DSA equation through its leftmost `bitlen(q)` bits;
    /// the caller chooses (and has already applied) the hash function.
    /// Out-of-range `r` or `s` is an ordinary verification failure
    /// (`Some(false)`), attacker-controlled values never reach the modular
    /// arithmetic unchecked. `None` is only returned for a key that is not
    /// usable for verification.
    #[must_use]
    pub fn verify_prehash(&self, hash: &[u8], signature: &Signature) -> Option<bool> {
        // Refuse to verify with an invalid key
        if !self.is_valid() {
            return None;
        }

        let components = self.components();
        let (p, q, g) = (components.p(), components.q(), components.g());
        let (r, s) = (signature.r(), signature.s());
        let y = self.y();

        if r.is_zero() || r >= q || s.is_zero() || s >= q {
            return Some(false);
        }

        let w = s.mod_inverse(q)?.to_biguint()?;

        let n = q.bits() / 8;
        let z_len = min(n, hash.len());
        let z = BigUint::from_bytes_be(&hash[..z_len]);

        let u1 = (&z * &w) % q;
        let u2 = (r * &w) % q;
        let v = (g.modpow(&u1, p) * y.modpow(&u2, p) % p) % q;

        Some(v == *r)
    }
}

impl<D> DigestVerifier<D, Signature> for PublicKey
where
    D: Digest,
{
    fn verify_digest(
        &self,
        digest: D,
        signature: &Signature,
    ) -> core::result::Result<(), signature::Error> {
        let hash = digest.finalize();

        match self.verify_prehash(&hash, signature) {
            Some(true) => Ok(()),
            _ => Err(signature::Error::new()),
        }
    }
}

impl Verifier<Signature> for PublicKey {
    fn verify(
        &self,
        msg: &[u8],
        signature: &Signature,
    ) -> core::result::Result<(), signature::Error> {
        self.verify_digest(Sha256::new().chain_update(msg), signature)
    }
}

impl EncodePublicKey for PublicKey {
    fn to_public_key_der(&self) -> spki::Result<spki::Document> {
        let parameters = self.components.to_vec()?;
        let parameters = AnyRef::from_der(&parameters)?;
        let algorithm = AlgorithmIdentifier {
            oid: DSA_OID,
            parameters: Some(parameters),
        };

        let y_bytes = self.y.to_bytes_be();
        let y = UIntRef::new(&y_bytes)?;
        let public_key = y.to_vec()?;

        let public_key_info = SubjectPublicKeyInfo {
            algorithm,
            subject_public_key: &public_key,
        };

        public_key_info.try_into()
    }
}

impl<'a> TryFrom<SubjectPublicKeyInfo<'a>> for PublicKey {
    type Error = spki::Error;

    fn try_from(value: SubjectPublicKeyInfo<'a>) -> core::result::Result<Self, Self::Error> {
        value.algorithm.assert_algorithm_oid(DSA_OID)?;

        let parameters = value.algorithm.parameters_any()?;
        let components = parameters.decode_into()?;

        let y = UIntRef::from_der(value.subject_public_key)?;
        let y = BigUint::from_bytes_be(y.as_bytes());

        Self::from_components(components, y).map_err(|_| spki::Error::KeyMalformed)
    }
}

impl DecodePublicKey for PublicKey {}

#[cfg(test)]
mod test {
    // We abused the deprecated attribute for unsecure key sizes
    // But we want to use those small key sizes for fast tests
    #![allow(deprecated)]

    use crate::{consts::DSA_1024_160, Components, PrivateKey, PublicKey};
    use num_bigint::BigUint;
    use num_traits::One;
    use pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};

    fn generate_public_key() -> PublicKey {
        let mut rng = rand::thread_rng();
        let components = Components::generate(&mut rng, DSA_1024_160).unwrap();
        let private_key = PrivateKey::generate(&mut rng, components);

        private_key.public_key().clone()
    }

    #[test]
    fn encode_decode_public_key() {
        let public_key = generate_public_key();
        let encoded_public_key = public_key.to_public_key_pem(LineEnding::LF).unwrap();
        let decoded_public_key = PublicKey::from_public_key_pem(&encoded_public_key).unwrap();

        assert_eq!(public_key, decoded_public_key);
    }

    #[test]
    fn validate_public_key() {
        let public_key = generate_public_key();
        let p = public_key.components().p();
        let q = public_key.components().q();

        // Taken from the parameter validation from bouncy castle
        assert_eq!(public_key.y().modpow(q, p), BigUint::one());
    }
}
