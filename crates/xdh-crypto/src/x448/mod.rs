//! X448 Diffie-Hellman key exchange.
//!
//! X448 is the elliptic-curve Diffie-Hellman function over Curve448
//! (Goldilocks) defined in RFC 7748, providing key agreement at the
//! ~224-bit security level.

use xdh_types::CryptoError;
use zeroize::Zeroize;

use crate::curve448::field::Fe448;

/// X448 key size in bytes (448 bits).
pub const X448_KEY_SIZE: usize = 56;

/// Number of meaningful bits in a coordinate or clamped scalar.
const BITS: usize = 448;

/// a24 = (A - 2) / 4 = 39081 for Curve448 (A = 156326).
const A24: u32 = 39081;

/// The u-coordinate of the base point (= 5), little-endian.
const BASEPOINT_U: [u8; X448_KEY_SIZE] = {
    let mut b = [0u8; X448_KEY_SIZE];
    b[0] = 5;
    b
};

/// An X448 private key (scalar).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct X448PrivateKey {
    /// The 56-byte private scalar, stored clamped.
    key: [u8; X448_KEY_SIZE],
}

/// An X448 public key (u-coordinate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X448PublicKey {
    /// The 56-byte public key (u-coordinate on Curve448).
    key: [u8; X448_KEY_SIZE],
}

impl X448PrivateKey {
    /// Generate a new random X448 private key.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut key = [0u8; X448_KEY_SIZE];
        getrandom::getrandom(&mut key).map_err(|_| CryptoError::RandGenFail)?;
        clamp_scalar(&mut key);
        Ok(X448PrivateKey { key })
    }

    /// Create an X448 private key from 56 raw bytes.
    pub fn new(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != X448_KEY_SIZE {
            return Err(CryptoError::InvalidScalarLength {
                expected: X448_KEY_SIZE,
                got: bytes.len(),
            });
        }
        let mut key = [0u8; X448_KEY_SIZE];
        key.copy_from_slice(bytes);
        clamp_scalar(&mut key);
        Ok(X448PrivateKey { key })
    }

    /// Compute the corresponding public key.
    pub fn public_key(&self) -> X448PublicKey {
        X448PublicKey {
            key: scalar_mul(&self.key, &BASEPOINT_U),
        }
    }

    /// Perform the X448 Diffie-Hellman function with a peer's public key.
    ///
    /// Rejects an all-zero shared secret, which arises when the peer's
    /// public key is a small-order point.
    pub fn diffie_hellman(
        &self,
        peer_public: &X448PublicKey,
    ) -> Result<[u8; X448_KEY_SIZE], CryptoError> {
        let shared = scalar_mul(&self.key, &peer_public.key);
        if shared.iter().all(|&b| b == 0) {
            return Err(CryptoError::PointAtInfinity);
        }
        Ok(shared)
    }

    /// Return the raw 56-byte (clamped) private scalar.
    pub fn as_bytes(&self) -> &[u8; X448_KEY_SIZE] {
        &self.key
    }
}

impl X448PublicKey {
    /// Create an X448 public key from 56 raw bytes.
    pub fn new(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != X448_KEY_SIZE {
            return Err(CryptoError::InvalidCoordinateLength {
                expected: X448_KEY_SIZE,
                got: bytes.len(),
            });
        }
        let mut key = [0u8; X448_KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(X448PublicKey { key })
    }

    /// Return the raw 56-byte public key.
    pub fn as_bytes(&self) -> &[u8; X448_KEY_SIZE] {
        &self.key
    }
}

/// The X448 function on raw byte strings: result = k * u.
///
/// Both inputs must be exactly 56 bytes; scalar clamping is applied
/// internally per RFC 7748 section 5. 448 is a whole number of bytes, so
/// the coordinate needs no bit masking.
pub fn x448(scalar: &[u8], u: &[u8]) -> Result<[u8; X448_KEY_SIZE], CryptoError> {
    if scalar.len() != X448_KEY_SIZE {
        return Err(CryptoError::InvalidScalarLength {
            expected: X448_KEY_SIZE,
            got: scalar.len(),
        });
    }
    if u.len() != X448_KEY_SIZE {
        return Err(CryptoError::InvalidCoordinateLength {
            expected: X448_KEY_SIZE,
            got: u.len(),
        });
    }
    let mut k = [0u8; X448_KEY_SIZE];
    k.copy_from_slice(scalar);
    let mut u_in = [0u8; X448_KEY_SIZE];
    u_in.copy_from_slice(u);
    Ok(scalar_mul(&k, &u_in))
}

/// Clamp a 56-byte scalar (RFC 7748 section 5): clear the cofactor bits
/// 0-1, set bit 447.
fn clamp_scalar(k: &mut [u8; X448_KEY_SIZE]) {
    k[0] &= 252;
    k[55] |= 128;
}

/// X448 scalar multiplication using the Montgomery ladder.
///
/// The loop runs the same five-variable update and the same pair of
/// conditional swaps on all 448 iterations; only the data depends on the
/// scalar.
fn scalar_mul(
    scalar: &[u8; X448_KEY_SIZE],
    u_bytes: &[u8; X448_KEY_SIZE],
) -> [u8; X448_KEY_SIZE] {
    let mut k = *scalar;
    clamp_scalar(&mut k);

    let x_1 = Fe448::from_bytes(u_bytes);

    let mut x_2 = Fe448::one();
    let mut z_2 = Fe448::zero();
    let mut x_3 = x_1;
    let mut z_3 = Fe448::one();
    let mut swap: u8 = 0;

    for t in (0..BITS).rev() {
        let k_t = (k[t / 8] >> (t % 8)) & 1;
        swap ^= k_t;
        x_2.conditional_swap(&mut x_3, swap);
        z_2.conditional_swap(&mut z_3, swap);
        swap = k_t;

        let a = x_2.add(&z_2);
        let aa = a.square();
        let b = x_2.sub(&z_2);
        let bb = b.square();
        let e = aa.sub(&bb);
        let c = x_3.add(&z_3);
        let d = x_3.sub(&z_3);
        let da = d.mul(&a);
        let cb = c.mul(&b);
        x_3 = da.add(&cb).square();
        z_3 = x_1.mul(&da.sub(&cb).square());
        x_2 = aa.mul(&bb);
        z_2 = e.mul(&aa.add(&e.mul_small(A24)));
    }

    x_2.conditional_swap(&mut x_3, swap);
    z_2.conditional_swap(&mut z_3, swap);

    // Return x_2 / z_2.
    x_2.mul(&z_2.invert()).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_to_56(s: &str) -> [u8; 56] {
        let bytes: Vec<u8> = (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect();
        let mut out = [0u8; 56];
        out.copy_from_slice(&bytes);
        out
    }

    /// RFC 7748 section 5.2, first X448 test vector.
    #[test]
    fn test_x448_rfc7748_vector1() {
        let scalar = hex_to_56(
            "3d262fddf9ec8e88495266fea19a34d28882acef045104d0\
             d1aae121700a779c984c24f8cdd78fbff44943eba368f54b\
             29259a4f1c600ad3",
        );
        let u_coord = hex_to_56(
            "06fce640fa3487bfda5f6cf2d5263f8aad88334cbd07437f\
             020f08f9814dc031ddbdc38c19c6da2583fa5429db94ada1\
             8aa7a7fb4ef8a086",
        );
        let expected = hex_to_56(
            "ce3e4ff95a60dc6697da1db1d85e6afbdf79b50a2412d754\
             6d5f239fe14fbaadeb445fc66a01b0779d98223961111e21\
             766282f73dd96b6f",
        );
        assert_eq!(x448(&scalar, &u_coord).unwrap(), expected);
    }

    /// RFC 7748 section 5.2, second X448 test vector.
    #[test]
    fn test_x448_rfc7748_vector2() {
        let scalar = hex_to_56(
            "203d494428b8399352665ddca42f9de8fef600908e0d461c\
             b021f8c538345dd77c3e4806e25f46d3315c44e0a5b43712\
             82dd2c8d5be3095f",
        );
        let u_coord = hex_to_56(
            "0fbcc2f993cd56d3305b0b7d9e55d4c1a8fb5dbb52f8e9a1\
             e9b6201b165d015894e56c4d3570bee52fe205e28a78b91c\
             dfbde71ce8d157db",
        );
        let expected = hex_to_56(
            "884a02576239ff7a2f2f63b2db6a9ff37047ac13568e1e30\
             fe63c4a7ad1b3ee3a5700df34321d62077e63633c575c1c9\
             54514e99da7c179d",
        );
        assert_eq!(x448(&scalar, &u_coord).unwrap(), expected);
    }

    /// RFC 7748 section 6.2: full Alice/Bob key exchange.
    #[test]
    fn test_x448_dh_rfc7748() {
        let alice_prv = hex_to_56(
            "9a8f4925d1519f5775cf46b04b5800d4ee9ee8bae8bc5565\
             d498c28dd9c9baf574a9419744897391006382a6f127ab1d\
             9ac2d8c0a598726b",
        );
        let alice_pub_expected = hex_to_56(
            "9b08f7cc31b7e3e67d22d5aea121074a273bd2b83de09c63\
             faa73d2c22c5d9bbc836647241d953d40c5b12da88120d53\
             177f80e532c41fa0",
        );
        let bob_prv = hex_to_56(
            "1c306a7ac2a0e2e0990b294470cba339e6453772b075811d\
             8fad0d1d6927c120bb5ee8972b0d3e21374c9c921b09d1b0\
             366f10b65173992d",
        );
        let bob_pub_expected = hex_to_56(
            "3eb7a829b0cd20f5bcfc0b599b6feccf6da4627107bdb0d4\
             f345b43027d8b972fc3e34fb4232a13ca706dcb57aec3dae\
             07bdc1c67bf33609",
        );
        let shared_expected = hex_to_56(
            "07fff4181ac6cc95ec1c16a94a0f74d12da232ce40a77552\
             281d282bb60c0b56fd2464c335543936521c24403085d59a\
             449a5037514a879d",
        );

        let alice = X448PrivateKey::new(&alice_prv).unwrap();
        let alice_pub = alice.public_key();
        assert_eq!(alice_pub.as_bytes(), &alice_pub_expected);

        let bob = X448PrivateKey::new(&bob_prv).unwrap();
        let bob_pub = bob.public_key();
        assert_eq!(bob_pub.as_bytes(), &bob_pub_expected);

        let shared_alice = alice.diffie_hellman(&bob_pub).unwrap();
        let shared_bob = bob.diffie_hellman(&alice_pub).unwrap();
        assert_eq!(shared_alice, shared_bob);
        assert_eq!(shared_alice, shared_expected);
    }

    #[test]
    fn test_x448_key_exchange_symmetry() {
        let alice = X448PrivateKey::generate().unwrap();
        let bob = X448PrivateKey::generate().unwrap();

        let shared_alice = alice.diffie_hellman(&bob.public_key()).unwrap();
        let shared_bob = bob.diffie_hellman(&alice.public_key()).unwrap();
        assert_eq!(shared_alice, shared_bob);
    }

    #[test]
    fn test_x448_deterministic() {
        let key1 = X448PrivateKey::new(&[1u8; 56]).unwrap();
        let key2 = X448PrivateKey::new(&[1u8; 56]).unwrap();
        assert_eq!(key1.public_key(), key2.public_key());
    }

    /// Clamping is a projection: applying it twice changes nothing.
    #[test]
    fn test_x448_clamp_idempotent() {
        let mut once = [0xffu8; 56];
        clamp_scalar(&mut once);
        let mut twice = once;
        clamp_scalar(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_x448_low_order_all_zero() {
        let prv = X448PrivateKey::generate().unwrap();
        let zero_pub = X448PublicKey::new(&[0u8; 56]).unwrap();
        assert!(matches!(
            prv.diffie_hellman(&zero_pub),
            Err(CryptoError::PointAtInfinity)
        ));
    }

    #[test]
    fn test_x448_wrong_key_size() {
        assert!(matches!(
            X448PrivateKey::new(&[0u8; 55]),
            Err(CryptoError::InvalidScalarLength { expected: 56, got: 55 })
        ));
        assert!(matches!(
            X448PublicKey::new(&[0u8; 57]),
            Err(CryptoError::InvalidCoordinateLength { expected: 56, got: 57 })
        ));
        assert!(x448(&[0u8; 57], &[0u8; 56]).is_err());
        assert!(x448(&[0u8; 56], &[0u8; 55]).is_err());
    }

    /// RFC 7748 section 5.2 iterated test (1000 iterations).
    #[test]
    #[ignore] // Slow: ~1000 ladder runs
    fn test_x448_rfc7748_iterated_1000() {
        let mut k = BASEPOINT_U;
        let mut u = BASEPOINT_U;
        for _ in 0..1000 {
            let new_k = x448(&k, &u).unwrap();
            u = k;
            k = new_k;
        }
        let expected = hex_to_56(
            "aa3b4749d55b9daf1e5b00288826c467274ce3ebbdd5c17b\
             975e09d4af6c67cf10d087202db88286e2b79fceea3ec353\
             ef54faa26e219f38",
        );
        assert_eq!(k, expected);
    }
}
