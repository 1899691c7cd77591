#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![doc = include_str!("../README.md")]

//!
//! # Examples
//!
//! Generate a DSA keypair
//!
//! ```no_run
//! # fn main() -> fips186::Result<()> {
//! use fips186::{consts::DSA_2048_256, Components, PrivateKey};
//!
//! let mut rng = fips186::random::OsEntropy;
//! let components = Components::generate(&mut rng, DSA_2048_256)?;
//! let private_key = PrivateKey::generate(&mut rng, components);
//! let public_key = private_key.public_key();
//! # let _ = public_key;
//! # Ok(())
//! # }
//! ```
//!
//! Create a keypair from existing components
//!
//! ```
//! # use fips186::{BigUint, Components, PrivateKey, PublicKey};
//! # let read_common_parameters = || {
//! #     (BigUint::from(7u8), BigUint::from(3u8), BigUint::from(2u8))
//! # };
//! # let read_public_component = || BigUint::from(4u8);
//! # let read_private_component = || BigUint::from(2u8);
//! # || -> fips186::Result<()> {
//! let (p, q, g) = read_common_parameters();
//! let components = Components::from_components(p, q, g)?;
//!
//! let y = read_public_component();
//! let public_key = PublicKey::from_components(components, y)?;
//!
//! let x = read_private_component();
//! let private_key = PrivateKey::from_components(public_key, x)?;
//! # let _ = private_key;
//! # Ok(())
//! # }().unwrap();
//! ```
//!

extern crate alloc;

pub use crate::{
    components::Components,
    errors::{Error, Result},
    privatekey::PrivateKey,
    publickey::PublicKey,
    sig::Signature,
};

#[cfg(feature = "std")]
pub use crate::task::Generation;

pub use num_bigint::BigUint;
pub use pkcs8;
pub use signature;

use pkcs8::ObjectIdentifier;

pub mod consts;
pub mod prime;
pub mod random;

mod components;
mod errors;
mod generate;
mod privatekey;
mod publickey;
mod sig;
#[cfg(feature = "std")]
mod task;

/// DSA object identifier as defined by [RFC3279 § 2.3.2].
///
/// [RFC3279 § 2.3.2]: https://www.rfc-editor.org/rfc/rfc3279#section-2.3.2
pub const DSA_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10040.4.1");
