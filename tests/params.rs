//! Fixed-vector checks at the 2048/256 size.
//!
//! The components below were generated with the probable prime method and
//! validated externally; the suite treats them the way a key parsed from a
//! certificate would arrive, as opaque material the crate did not construct.

use fips186::random::OsEntropy;
use fips186::{Components, Error, PrivateKey, PublicKey, Signature};
use num_bigint::BigUint;
use num_traits::{Num, One, Zero};

const P_HEX: &str = "C5B8A177BE16918EC84E3873283C8EF259772B0BFF6C16F3EA9742FA09F54675\
        C6F6D1391A02E2CFDD359AF930DC56B0958F7FE3486A5B91013326A9D745CD53\
        9E2E199966D62613CACDDF9AF2DA923431328BA41A3D9EF3A2302C4C869638F1\
        6A14771EC3A1200BD86F29534BD2B26CC9AF22236E6CB9DC70414EEB8BD7A578\
        53190EF6C46D5951BA130DFB59B1C765F0B61BD898B1BDAB70044577C9661173\
        A9443FB62D956F79BA9EF9C55450A60765818CC37FE39941EF0606656B3002B0\
        D40164FEE644F6E1FEE4633A7E4DDB3D9BAE271D1A27EC32C727374397962BCD\
        4D4BE76E4E0A65682ED34FC6CEC2A445EC6775139C5ED91E6A4E1EFFD96A5F59";

const Q_HEX: &str = "D3B0393C08823679DFCD0F40757BCF72C0B72E117519E1B6F3135995CD03BDF7";

const G_HEX: &str = "195A8701C93AC6964266EDA1F7F922CCE1EF7D5F63430E5A13F5DC7870167DD7\
        3A3CF6A72C984BFB4DFEA5E7619C74DD7396FD412AFD856C02D75955AF5B6F84\
        895C1BE08A2AA5DE151198009E83144916F31585160F5E593E3663116A1E24AF\
        98C6932A93B54B5C4A24810F23AD16B654058413AD43FC061AD80186B4CC5505\
        7AEC3070FB4F959B1C402040471F2C77F2F6F4C09D0E9CA106EB503BBECE7859\
        7EC657A5F59F0A25BB511039E2E0BF02E0803673D01BCDC9C61693EFB8DF7C80\
        C98F194E1ECC64BD9658B2D5BB760540A5FA4872C74B41542AC4CFBEEDE88A05\
        E92FB8F75E4DBBE1219F4C7BC361A6E46ECA7DCCCB7DE688C636BDD64424D0E4";

const X_HEX: &str = "C926E9E94096333DED4E159115900E647A6959C8ABBD595234213B3A040FBB35";

const Y_HEX: &str = "908AEE9328CEC027C5002FA4F5D7427D59318284B624DFA8A347952D9A4BEB9E\
        75A8C93E518270EBBE6F33AE8269DDE3D08D2D777886F91F0107B3B197AE7928\
        7A64E52D95E18E398E5D3F565CE26E405255CC295061BD7F19BE7C8DAEB605E2\
        081A9E19BBFCF23B3ADA6209BCFE2FE545B19FAB2281795336BF2B1A047D1059\
        85F5E8403B67A01782556F29C9FAD8BC41AF89EA6202C9D4D0CF8088DA5ABC14\
        0A05DB6BA829038645127803CBFAD53E03613A7E1D75CA4BAB418A82521E60A9\
        BAB94FE03C2EDF155CD8A7C461C0BF285DB6F1A65406951DBFA82B8199F5842E\
        2D86096A1CB2DC07B059EEF28DE4D5E279C30093D38D6D9A17427EFFDD30C315";

fn uint(hex: &str) -> BigUint {
    BigUint::from_str_radix(hex, 16).unwrap()
}

fn components() -> Components {
    Components::from_components(uint(P_HEX), uint(Q_HEX), uint(G_HEX)).unwrap()
}

fn private_key() -> PrivateKey {
    let public_key = PublicKey::from_components(components(), uint(Y_HEX)).unwrap();
    PrivateKey::from_components(public_key, uint(X_HEX)).unwrap()
}

#[test]
fn accepts_externally_supplied_components() {
    let components = components();
    let (p, q, g) = (components.p(), components.q(), components.g());

    assert_eq!(p.bits(), 2048);
    assert_eq!(q.bits(), 256);
    assert!(((p - BigUint::one()) % q).is_zero());
    assert_eq!(g.modpow(q, p), BigUint::one());
    assert!(!g.is_one());
}

#[test]
fn external_keypair_is_consistent() {
    let private_key = private_key();
    let components = private_key.public_key().components();

    assert!(private_key.is_valid());
    assert_eq!(private_key.size(), 32);
    assert_eq!(
        *private_key.public_key().y(),
        components.g().modpow(private_key.x(), components.p()),
    );
}

#[test]
fn rejects_inconsistent_parameters() {
    // q does not divide p - 1 once q is perturbed
    let q = uint(Q_HEX) + BigUint::from(2u8);
    assert_eq!(
        Components::from_components(uint(P_HEX), q, uint(G_HEX)).unwrap_err(),
        Error::InvalidParameter("q does not divide p - 1")
    );

    // g outside (1, p)
    assert!(Components::from_components(uint(P_HEX), uint(Q_HEX), BigUint::one()).is_err());

    // y outside the order-q subgroup
    let y = uint(Y_HEX) + BigUint::one();
    assert!(PublicKey::from_components(components(), y).is_err());

    // x outside [1, q-1]
    let public_key = PublicKey::from_components(components(), uint(Y_HEX)).unwrap();
    assert!(PrivateKey::from_components(public_key, BigUint::zero()).is_err());
}

#[test]
fn sign_and_verify_fixed_message() {
    let private_key = private_key();
    let public_key = private_key.public_key();

    // a fixed 256-bit message of all 0x01 bytes, already hashed by the caller
    let msg = vec![0x01u8; private_key.size()];

    let signature = private_key.sign_prehash(&mut OsEntropy, &msg).unwrap();
    assert_eq!(public_key.verify_prehash(&msg, &signature), Some(true));

    // corrupting one byte of s must fail verification
    let mut raw = signature.to_fixed_bytes(private_key.size()).unwrap();
    raw[32] ^= 0xff;

    let corrupted = Signature::from_fixed_bytes(&raw).unwrap();
    assert_eq!(public_key.verify_prehash(&msg, &corrupted), Some(false));
}

#[test]
fn out_of_range_components_verify_false() {
    let private_key = private_key();
    let public_key = private_key.public_key();
    let msg = vec![0x01u8; private_key.size()];

    let signature = private_key.sign_prehash(&mut OsEntropy, &msg).unwrap();

    // r >= q and s >= q are rejected before any arithmetic
    let oversized = Signature::from_components(components().q().clone(), signature.s().clone())
        .unwrap();
    assert_eq!(public_key.verify_prehash(&msg, &oversized), Some(false));

    let oversized = Signature::from_components(signature.r().clone(), components().p().clone())
        .unwrap();
    assert_eq!(public_key.verify_prehash(&msg, &oversized), Some(false));
}

#[test]
fn adversarial_signature_material_never_panics() {
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let private_key = private_key();
    let public_key = private_key.public_key();
    let msg = vec![0x01u8; private_key.size()];

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut raw = vec![0u8; 64];

    for _ in 0..256 {
        rng.fill_bytes(&mut raw);

        if let Ok(garbage) = Signature::from_fixed_bytes(&raw) {
            // a forged signature verifies false, it does not crash
            assert_eq!(public_key.verify_prehash(&msg, &garbage), Some(false));
        }
    }
}
