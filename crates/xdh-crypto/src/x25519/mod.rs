//! X25519 Diffie-Hellman key exchange.
//!
//! X25519 is the elliptic-curve Diffie-Hellman function over Curve25519
//! defined in RFC 7748, providing key agreement at the ~128-bit security
//! level.

use xdh_types::CryptoError;
use zeroize::Zeroize;

use crate::curve25519::field::Fe25519;

/// X25519 key size in bytes (256 bits).
pub const X25519_KEY_SIZE: usize = 32;

/// Number of meaningful bits in a coordinate or clamped scalar.
const BITS: usize = 255;

/// a24 = (A - 2) / 4 = 121665 for Curve25519 (A = 486662).
const A24: u32 = 121665;

/// The u-coordinate of the base point (= 9), little-endian.
const BASEPOINT_U: [u8; X25519_KEY_SIZE] = {
    let mut b = [0u8; X25519_KEY_SIZE];
    b[0] = 9;
    b
};

/// An X25519 private key (scalar).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct X25519PrivateKey {
    /// The 32-byte private scalar, stored clamped.
    key: [u8; X25519_KEY_SIZE],
}

/// An X25519 public key (u-coordinate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X25519PublicKey {
    /// The 32-byte public key (u-coordinate on Curve25519).
    key: [u8; X25519_KEY_SIZE],
}

impl X25519PrivateKey {
    /// Generate a new random X25519 private key.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut key = [0u8; X25519_KEY_SIZE];
        getrandom::getrandom(&mut key).map_err(|_| CryptoError::RandGenFail)?;
        clamp_scalar(&mut key);
        Ok(X25519PrivateKey { key })
    }

    /// Create an X25519 private key from 32 raw bytes.
    pub fn new(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != X25519_KEY_SIZE {
            return Err(CryptoError::InvalidScalarLength {
                expected: X25519_KEY_SIZE,
                got: bytes.len(),
            });
        }
        let mut key = [0u8; X25519_KEY_SIZE];
        key.copy_from_slice(bytes);
        clamp_scalar(&mut key);
        Ok(X25519PrivateKey { key })
    }

    /// Compute the corresponding public key.
    pub fn public_key(&self) -> X25519PublicKey {
        X25519PublicKey {
            key: scalar_mul(&self.key, &BASEPOINT_U),
        }
    }

    /// Perform the X25519 Diffie-Hellman function with a peer's public key.
    ///
    /// Rejects an all-zero shared secret, which arises when the peer's
    /// public key is a small-order point.
    pub fn diffie_hellman(
        &self,
        peer_public: &X25519PublicKey,
    ) -> Result<[u8; X25519_KEY_SIZE], CryptoError> {
        let shared = scalar_mul(&self.key, &peer_public.key);
        if shared.iter().all(|&b| b == 0) {
            return Err(CryptoError::PointAtInfinity);
        }
        Ok(shared)
    }

    /// Return the raw 32-byte (clamped) private scalar.
    pub fn as_bytes(&self) -> &[u8; X25519_KEY_SIZE] {
        &self.key
    }
}

impl X25519PublicKey {
    /// Create an X25519 public key from 32 raw bytes.
    pub fn new(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != X25519_KEY_SIZE {
            return Err(CryptoError::InvalidCoordinateLength {
                expected: X25519_KEY_SIZE,
                got: bytes.len(),
            });
        }
        let mut key = [0u8; X25519_KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(X25519PublicKey { key })
    }

    /// Return the raw 32-byte public key.
    pub fn as_bytes(&self) -> &[u8; X25519_KEY_SIZE] {
        &self.key
    }
}

/// The X25519 function on raw byte strings: result = k * u.
///
/// Both inputs must be exactly 32 bytes; scalar clamping and coordinate
/// masking are applied internally per RFC 7748 section 5.
pub fn x25519(scalar: &[u8], u: &[u8]) -> Result<[u8; X25519_KEY_SIZE], CryptoError> {
    if scalar.len() != X25519_KEY_SIZE {
        return Err(CryptoError::InvalidScalarLength {
            expected: X25519_KEY_SIZE,
            got: scalar.len(),
        });
    }
    if u.len() != X25519_KEY_SIZE {
        return Err(CryptoError::InvalidCoordinateLength {
            expected: X25519_KEY_SIZE,
            got: u.len(),
        });
    }
    let mut k = [0u8; X25519_KEY_SIZE];
    k.copy_from_slice(scalar);
    let mut u_in = [0u8; X25519_KEY_SIZE];
    u_in.copy_from_slice(u);
    Ok(scalar_mul(&k, &u_in))
}

/// Clamp a 32-byte scalar (RFC 7748 section 5): clear the cofactor bits
/// 0-2, clear bit 255, set bit 254.
fn clamp_scalar(k: &mut [u8; X25519_KEY_SIZE]) {
    k[0] &= 248;
    k[31] &= 127;
    k[31] |= 64;
}

/// X25519 scalar multiplication using the Montgomery ladder.
///
/// The loop runs the same five-variable update and the same pair of
/// conditional swaps on all 255 iterations; only the data depends on the
/// scalar.
fn scalar_mul(
    scalar: &[u8; X25519_KEY_SIZE],
    u_bytes: &[u8; X25519_KEY_SIZE],
) -> [u8; X25519_KEY_SIZE] {
    let mut k = *scalar;
    clamp_scalar(&mut k);

    // Decode the u-coordinate: mask the unused top bit (255 mod 8 = 7).
    let mut u_in = *u_bytes;
    u_in[31] &= 0x7f;
    let x_1 = Fe25519::from_bytes(&u_in);

    let mut x_2 = Fe25519::one();
    let mut z_2 = Fe25519::zero();
    let mut x_3 = x_1;
    let mut z_3 = Fe25519::one();
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
