//! Sign/verify round trips and signature encodings.

// We abused the deprecated attribute for unsecure key sizes
// But we want to use those small key sizes for fast tests
#![allow(deprecated)]

use fips186::consts::DSA_1024_160;
use fips186::random::{self, OsEntropy};
use fips186::{Components, PrivateKey, Signature};
use signature::{SignatureEncoding, Signer, Verifier};

fn generate_keypair() -> PrivateKey {
    let mut rng = OsEntropy;
    let components = Components::generate(&mut rng, DSA_1024_160).unwrap();
    PrivateKey::generate(&mut rng, components)
}

#[test]
fn sign_and_verify_prehashed() {
    let private_key = generate_keypair();
    let public_key = private_key.public_key();

    // a message of q-length bytes, all 0x01, already hashed by the caller
    let msg = vec![0x01u8; private_key.size()];
    let signature = private_key.sign_prehash(&mut OsEntropy, &msg).unwrap();

    assert_eq!(public_key.verify_prehash(&msg, &signature), Some(true));

    let other = b"SOME OTHER MESSAGE DIGEST";
    assert_eq!(public_key.verify_prehash(other, &signature), Some(false));
}

#[test]
fn sign_and_verify_via_traits() {
    const DATA: &[u8] = b"SIGN AND VERIFY THOSE BYTES";

    let private_key = generate_keypair();
    let public_key = private_key.public_key();

    let signature = private_key.sign(DATA);

    assert!(public_key.verify(DATA, &signature).is_ok());
    assert!(public_key.verify(b"NOT THOSE BYTES", &signature).is_err());
}

#[test]
fn single_bit_tamper_invalidates_signature() {
    let private_key = generate_keypair();
    let public_key = private_key.public_key();
    let size = private_key.size();

    let msg = vec![0x01u8; size];
    let signature = private_key.sign_prehash(&mut OsEntropy, &msg).unwrap();

    let mut raw = signature.to_fixed_bytes(size).unwrap();

    // flip one bit somewhere in the s component, like bcrypto's test does
    let index = size + random::range(&mut OsEntropy, 0, size as u64) as usize;
    raw[index] ^= 1;

    match Signature::from_fixed_bytes(&raw) {
        Ok(tampered) => {
            assert_eq!(public_key.verify_prehash(&msg, &tampered), Some(false));
        }
        // the flip zeroed the component out entirely
        Err(_) => {}
    }
}

#[test]
fn fixed_width_round_trip() {
    let private_key = generate_keypair();
    let size = private_key.size();

    let msg = vec![0x01u8; size];
    let signature = private_key.sign_prehash(&mut OsEntropy, &msg).unwrap();

    let raw = signature.to_fixed_bytes(size).unwrap();
    assert_eq!(raw.len(), size * 2);

    let decoded = Signature::from_fixed_bytes(&raw).unwrap();
    assert_eq!(signature, decoded);
}

#[test]
fn der_round_trip() {
    let private_key = generate_keypair();

    let msg = vec![0x01u8; private_key.size()];
    let signature = private_key.sign_prehash(&mut OsEntropy, &msg).unwrap();

    let der = signature.to_vec();
    let decoded = Signature::try_from(der.as_slice()).unwrap();

    assert_eq!(signature, decoded);
}

#[test]
fn malformed_signature_encodings_are_rejected() {
    assert!(Signature::from_fixed_bytes(&[]).is_err());
    assert!(Signature::from_fixed_bytes(&[0x01; 41]).is_err());

    // all-zero components
    assert!(Signature::from_fixed_bytes(&[0x00; 40]).is_err());

    // truncated DER
    assert!(Signature::try_from(&[0x30, 0x06, 0x02][..]).is_err());
}
