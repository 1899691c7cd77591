//!
//! Module containing the definition of the common components container
//!

use crate::errors::{Error, Result as DsaResult};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use pkcs8::der::{self, asn1::UIntRef, DecodeValue, Encode, Header, Reader, Sequence};
use rand::{CryptoRng, RngCore};

/// The common components of an DSA keypair
///
/// (the prime p, quotient q and generator g)
#[derive(Clone, PartialEq, PartialOrd)]
#[must_use]
pub struct Components {
    /// Prime p
    p: BigUint,

    /// Quotient q
    q: BigUint,

    /// Generator g
    g: BigUint,
}

opaque_debug::implement!(Components);

impl Components {
    /// Construct the common components container from its inner values (p, q and g)
    ///
    /// The group structure is verified up front: p and q must be odd and
    /// greater than 2, q must divide p - 1 and g must generate the order-q
    /// subgroup. Components decoded from certificates or key documents pass
    /// through the same checks as locally generated ones.
    ///
    /// Probabilistic primality of externally supplied p and q is not
    /// re-proven here; [`crate::prime::is_probable_prime`] is available when
    /// the provenance of the material is in doubt.
    pub fn from_components(p: BigUint, q: BigUint, g: BigUint) -> DsaResult<Self> {
        let components = Self { p, q, g };
        components.check()?;

        Ok(components)
    }

    /// Generate a new set of common components
    ///
    /// `size` must be one of the (L, N) pairs approved by FIPS 186-4, see
    /// [`crate::consts`]; anything else is rejected with
    /// [`Error::UnsupportedParameterSize`].
    pub fn generate<R>(rng: &mut R, size: (u32, u32)) -> DsaResult<Self>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let (p, q, g) = crate::generate::common_components(rng, size)?;
        Self::from_components(p, q, g)
    }

    /// DSA prime p
    #[must_use]
    pub const fn p(&self) -> &BigUint {
        &self.p
    }

    /// DSA quotient q
    #[must_use]
    pub const fn q(&self) -> &BigUint {
        &self.q
    }

    /// DSA generator g
    #[must_use]
    pub const fn g(&self) -> &BigUint {
        &self.g
    }

    /// Check whether the components are valid
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    fn check(&self) -> DsaResult<()> {
        let one = BigUint::one();
        let two = BigUint::from(2u8);

        if self.p() <= &two || (self.p() % &two).is_zero() {
            return Err(Error::InvalidParameter("p must be an odd prime"));
        }

        if self.q() <= &two || (self.q() % &two).is_zero() {
            return Err(Error::InvalidParameter("q must be an odd prime"));
        }

        if !((self.p() - &one) % self.q()).is_zero() {
            return Err(Error::InvalidParameter("q does not divide p - 1"));
        }

        if self.g() <= &one || self.g() >= self.p() {
            return Err(Error::InvalidParameter("generator out of range"));
        }

        if !self.g().modpow(self.q(), self.p()).is_one() {
            return Err(Error::InvalidParameter("generator does not have order q"));
        }

        Ok(())
    }
}

impl<'a> DecodeValue<'a> for Components {
    fn decode_value<R: Reader<'a>>(reader: &mut R, _header: Header) -> der::Result<Self> {
        let p = reader.decode::<UIntRef<'_>>()?;
        let q = reader.decode::<UIntRef<'_>>()?;
        let g = reader.decode::<UIntRef<'_>>()?;

        let p = BigUint::from_bytes_be(p.as_bytes());
        let q = BigUint::from_bytes_be(q.as_bytes());
        let g = BigUint::from_bytes_be(g.as_bytes());

        Self::from_components(p, q, g).map_err(|_| der::Tag::Sequence.value_error())
    }
}

impl<'a> Sequence<'a> for Components {
    fn fields<F, T>(&self, encoder: F) -> der::Result<T>
    where
        F: FnOnce(&[&dyn Encode]) -> der::Result<T>,
    {
        let p_bytes = self.p.to_bytes_be();
        let q_bytes = self.q.to_bytes_be();
        let g_bytes = self.g.to_bytes_be();

        let p = UIntRef::new(&p_bytes)?;
        let q = UIntRef::new(&q_bytes)?;
        let g = UIntRef::new(&g_bytes)?;

        encoder(&[&p, &q, &g])
    }
}
