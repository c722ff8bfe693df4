//! Field arithmetic over GF(2^255 - 19) in radix-2^51 representation.
//!
//! Each field element is stored as 5 limbs of nominally 51 bits each.
//! Intermediate products use u128 to avoid overflow.

/// A field element in GF(p) where p = 2^255 - 19.
///
/// Stored in radix-2^51 representation: value = l[0] + l[1]*2^51 + ... + l[4]*2^204.
/// Limbs stay below 2^52 between operations; only `reduce` produces the
/// canonical value in [0, p).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fe25519(pub(crate) [u64; 5]);

const MASK51: u64 = (1u64 << 51) - 1;

/// 4*p in radix-2^51 limbs, used as a subtraction bias so that limbs
/// never underflow even when the minuend is loosely reduced.
const FOUR_P: [u64; 5] = [
    4 * ((1u64 << 51) - 19),
    4 * MASK51,
    4 * MASK51,
    4 * MASK51,
    4 * MASK51,
];

impl Fe25519 {
    /// The zero element.
    pub fn zero() -> Self {
        Fe25519([0; 5])
    }

    /// The one element.
    pub fn one() -> Self {
        Fe25519([1, 0, 0, 0, 0])
    }

    /// Addition: h = f + g.
    pub fn add(&self, rhs: &Fe25519) -> Fe25519 {
        Self::weak_carry([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
            self.0[3] + rhs.0[3],
            self.0[4] + rhs.0[4],
        ])
    }

    /// Subtraction: h = f - g.
    /// Biased by 4*p so the per-limb difference stays non-negative.
    pub fn sub(&self, rhs: &Fe25519) -> Fe25519 {
        Self::weak_carry([
            (self.0[0] + FOUR_P[0]) - rhs.0[0],
            (self.0[1] + FOUR_P[1]) - rhs.0[1],
            (self.0[2] + FOUR_P[2]) - rhs.0[2],
            (self.0[3] + FOUR_P[3]) - rhs.0[3],
            (self.0[4] + FOUR_P[4]) - rhs.0[4],
        ])
    }

    /// Multiplication: h = f * g.
    pub fn mul(&self, rhs: &Fe25519) -> Fe25519 {
        let f = &self.0;
        let g = &rhs.0;

        // Limbs past position 4 wrap around scaled by 19 (2^255 = 19 mod p).
        let g1_19 = 19u128 * g[1] as u128;
        let g2_19 = 19u128 * g[2] as u128;
        let g3_19 = 19u128 * g[3] as u128;
        let g4_19 = 19u128 * g[4] as u128;

        let h0 = f[0] as u128 * g[0] as u128
            + g4_19 * f[1] as u128
            + g3_19 * f[2] as u128
            + g2_19 * f[3] as u128
            + g1_19 * f[4] as u128;

        let h1 = f[0] as u128 * g[1] as u128
            + f[1] as u128 * g[0] as u128
            + g4_19 * f[2] as u128
            + g3_19 * f[3] as u128
            + g2_19 * f[4] as u128;

        let h2 = f[0] as u128 * g[2] as u128
            + f[1] as u128 * g[1] as u128
            + f[2] as u128 * g[0] as u128
            + g4_19 * f[3] as u128
            + g3_19 * f[4] as u128;

        let h3 = f[0] as u128 * g[3] as u128
            + f[1] as u128 * g[2] as u128
            + f[2] as u128 * g[1] as u128
            + f[3] as u128 * g[0] as u128
            + g4_19 * f[4] as u128;

        let h4 = f[0] as u128 * g[4] as u128
            + f[1] as u128 * g[3] as u128
            + f[2] as u128 * g[2] as u128
            + f[3] as u128 * g[1] as u128
            + f[4] as u128 * g[0] as u128;

        Self::carry_wide([h0, h1, h2, h3, h4])
    }

    /// Squaring: h = f^2, with the symmetric cross terms doubled.
    pub fn square(&self) -> Fe25519 {
        let f = &self.0;

        let f0_2 = 2 * f[0] as u128;
        let f1_2 = 2 * f[1] as u128;
        let f1_38 = 38u128 * f[1] as u128;
        let f2_38 = 38u128 * f[2] as u128;
        let f3_19 = 19u128 * f[3] as u128;
        let f3_38 = 38u128 * f[3] as u128;
        let f4_19 = 19u128 * f[4] as u128;

        let h0 = f[0] as u128 * f[0] as u128 + f1_38 * f[4] as u128 + f2_38 * f[3] as u128;
        let h1 = f0_2 * f[1] as u128 + f2_38 * f[4] as u128 + f3_19 * f[3] as u128;
        let h2 = f0_2 * f[2] as u128 + f[1] as u128 * f[1] as u128 + f3_38 * f[4] as u128;
        let h3 = f0_2 * f[3] as u128 + f1_2 * f[2] as u128 + f4_19 * f[4] as u128;
        let h4 = f0_2 * f[4] as u128 + f1_2 * f[3] as u128 + f[2] as u128 * f[2] as u128;

        Self::carry_wide([h0, h1, h2, h3, h4])
    }

    /// Multiply by a small constant: h = f * c.
    pub fn mul_small(&self, c: u32) -> Fe25519 {
        let c = c as u128;
        Self::carry_wide([
            self.0[0] as u128 * c,
            self.0[1] as u128 * c,
            self.0[2] as u128 * c,
            self.0[3] as u128 * c,
            self.0[4] as u128 * c,
        ])
    }

    /// Carry propagation for u128 intermediate limbs.
    ///
    /// Two fixed passes; the wrap-around fold stays in u128 because the
    /// first top carry can exceed 64 bits once scaled by 19.
    fn carry_wide(h: [u128; 5]) -> Fe25519 {
        let mut r = [0u128; 5];

        let mut c: u128 = 0;
        for i in 0..5 {
            let v = h[i] + c;
            r[i] = v & MASK51 as u128;
            c = v >> 51;
        }
        r[0] += c * 19;

        let mut c: u128 = 0;
        for limb in r.iter_mut() {
            let v = *limb + c;
            *limb = v & MASK51 as u128;
            c = v >> 51;
        }
        r[0] += c * 19;

        Fe25519([r[0] as u64, r[1] as u64, r[2] as u64, r[3] as u64, r[4] as u64])
    }

    /// Carry propagation for u64 limbs (after add/sub).
    fn weak_carry(h: [u64; 5]) -> Fe25519 {
        let mut r = h;
        let mut c: u64 = 0;
        for limb in r.iter_mut() {
            let v = *limb + c;
            *limb = v & MASK51;
            c = v >> 51;
        }
        r[0] += c * 19;
        Fe25519(r)
    }

    /// Full reduction modulo p = 2^255 - 19, into [0, p).
    pub fn reduce(&self) -> Fe25519 {
        // Three carry passes bring every limb to at most 51 bits, so the
        // represented value is below 2^255.
        let mut r = Self::weak_carry(Self::weak_carry(self.0).0).0;
        let mut c: u64 = 0;
        for limb in r.iter_mut() {
            let v = *limb + c;
            *limb = v & MASK51;
            c = v >> 51;
        }
        r[0] += c * 19;

        // q = 1 exactly when r >= p: adding 19 then carries into bit 255.
        let mut q = (r[0] + 19) >> 51;
        q = (r[1] + q) >> 51;
        q = (r[2] + q) >> 51;
        q = (r[3] + q) >> 51;
        q = (r[4] + q) >> 51;

        // r - q*p = r + 19*q, with bit 255 discarded.
        r[0] += 19 * q;
        let mut c: u64 = 0;
        for limb in r.iter_mut() {
            let v = *limb + c;
            *limb = v & MASK51;
            c = v >> 51;
        }

        Fe25519(r)
    }

    /// Modular inversion: h = f^(p-2) mod p by Fermat's little theorem.
    ///
    /// Fixed square-and-multiply chain for 2^255 - 21; the operation
    /// sequence does not depend on the operand.
    pub fn invert(&self) -> Fe25519 {
        let f = *self;

        let z2 = f.square();
        let z8 = z2.square().square();
        let z9 = f.mul(&z8);
        let z11 = z2.mul(&z9);
        let z22 = z11.square();
        let z_5_0 = z9.mul(&z22); // 2^5 - 1

        let mut t = z_5_0.square();
        for _ in 1..5 {
            t = t.square();
        }
        let z_10_0 = t.mul(&z_5_0); // 2^10 - 1

        t = z_10_0.square();
        for _ in 1..10 {
            t = t.square();
        }
        let z_20_0 = t.mul(&z_10_0); // 2^20 - 1

        t = z_20_0.square();
        for _ in 1..20 {
            t = t.square();
        }
        t = t.mul(&z_20_0); // 2^40 - 1

        t = t.square();
        for _ in 1..10 {
            t = t.square();
        }
        let z_50_0 = t.mul(&z_10_0); // 2^50 - 1

        t = z_50_0.square();
        for _ in 1..50 {
            t = t.square();
        }
        let z_100_0 = t.mul(&z_50_0); // 2^100 - 1

        t = z_100_0.square();
        for _ in 1..100 {
            t = t.square();
        }
        t = t.mul(&z_100_0); // 2^200 - 1

        t = t.square();
        for _ in 1..50 {
            t = t.square();
        }
        t = t.mul(&z_50_0); // 2^250 - 1

        for _ in 0..5 {
            t = t.square();
        }
        t.mul(&z11) // 2^255 - 32 + 11 = p - 2
    }

    /// Decode a 32-byte little-endian representation into a field element.
    ///
    /// Bit 255 of the encoding is ignored; values in [p, 2^255) are kept
    /// unreduced and treated modulo p by the arithmetic.
    pub fn from_bytes(bytes: &[u8; 32]) -> Fe25519 {
        let load8 = |b: &[u8]| -> u64 {
            let mut r = 0u64;
            for (i, &byte) in b.iter().enumerate().take(8) {
                r |= (byte as u64) << (8 * i);
            }
            r
        };

        Fe25519([
            load8(&bytes[0..8]) & MASK51,
            (load8(&bytes[6..14]) >> 3) & MASK51,
            (load8(&bytes[12..20]) >> 6) & MASK51,
            (load8(&bytes[19..27]) >> 1) & MASK51,
            (load8(&bytes[24..32]) >> 12) & MASK51,
        ])
    }

    /// Encode a field element to its canonical 32-byte little-endian form.
    pub fn to_bytes(self) -> [u8; 32] {
        let h = self.reduce().0;

        // Repack 5 x 51-bit limbs into 4 x 64-bit words.
        let words = [
            h[0] | h[1] << 51,
            h[1] >> 13 | h[2] << 38,
            h[2] >> 26 | h[3] << 25,
            h[3] >> 39 | h[4] << 12,
        ];

        let mut out = [0u8; 32];
        for (i, w) in words.iter().enumerate() {
            out[8 * i..8 * i + 8].copy_from_slice(&w.to_le_bytes());
        }
        out
    }

    /// Constant-time conditional swap: exchange self and other if swap == 1.
    pub fn conditional_swap(&mut self, other: &mut Fe25519, swap: u8) {
        let mask = (swap as u64).wrapping_neg();
        for i in 0..5 {
            let t = mask & (self.0[i] ^ other.0[i]);
            self.0[i] ^= t;
            other.0[i] ^= t;
        }
    }

    /// Check if the element is zero.
    pub fn is_zero(&self) -> bool {
        self.reduce().0.iter().all(|&x| x == 0)
    }
}

impl PartialEq for Fe25519 {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.to_bytes().ct_eq(&other.to_bytes()).into()
    }
}

impl Eq for Fe25519 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_one() {
        assert!(Fe25519::zero().is_zero());
        assert!(!Fe25519::one().is_zero());
    }

    #[test]
    fn test_p_reduces_to_zero() {
        // p = 2^255 - 19 in radix-2^51 limbs
        let p = Fe25519([(1u64 << 51) - 19, MASK51, MASK51, MASK51, MASK51]);
        assert!(p.is_zero());
    }

    #[test]
    fn test_add_sub_roundtrip() {
        let a = Fe25519([1234567, 2345678, 3456789, 4567890, 5678901]);
        let b = Fe25519([9876543, 8765432, 7654321, 6543210, 5432109]);
        let c = a.add(&b);
        let d = c.sub(&b);
        assert_eq!(a, d);
    }

    #[test]
    fn test_sub_self_is_zero() {
        let a = Fe25519([0x42; 5]);
        assert!(a.sub(&a).is_zero());
    }

    #[test]
    fn test_mul_one_identity() {
        let a = Fe25519([123456789, 987654321, 111111111, 222222222, 333333333]);
        assert_eq!(a, a.mul(&Fe25519::one()));
    }

    #[test]
    fn test_mul_commutativity() {
        let a = Fe25519([12345, 67890, 13579, 24680, 97531]);
        let b = Fe25519([86420, 11223, 44556, 77889, 10112]);
        assert_eq!(a.mul(&b), b.mul(&a));
    }

    #[test]
    fn test_mul_square_consistency() {
        let a = Fe25519([12345, 67890, 11111, 22222, 33333]);
        assert_eq!(a.square(), a.mul(&a));
    }

    #[test]
    fn test_distributive_law() {
        let a = Fe25519([0x1111, 0x2222, 0x3333, 0x4444, 0x5555]);
        let b = Fe25519([0x6666, 0x7777, 0x8888, 0x9999, 0xaaaa]);
        let c = Fe25519([0xbbbb, 0xcccc, 0xdddd, 0xeeee, 0xffff]);
        assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
    }

    #[test]
    fn test_mul_small_matches_add() {
        let a = Fe25519([0x123456789abcd, 0x23456789abcde, 0x3456789, 0x456789a, 0x56789ab]);
        assert_eq!(a.mul_small(3), a.add(&a).add(&a));
    }

    #[test]
    fn test_invert() {
        let a = Fe25519([42, 0, 0, 0, 0]);
        assert_eq!(a.mul(&a.invert()), Fe25519::one());
    }

    #[test]
    fn test_invert_one() {
        assert_eq!(Fe25519::one().invert(), Fe25519::one());
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let a = Fe25519([
            0x123456789abcd,
            0x23456789abcde,
            0x3456789abcdef,
            0x456789abcdef0,
            0x56789abcdef01,
        ]);
        let b = Fe25519::from_bytes(&a.to_bytes());
        assert_eq!(a, b);
    }

    #[test]
    fn test_conditional_swap() {
        let mut a = Fe25519([1, 0, 0, 0, 0]);
        let mut b = Fe25519([2, 0, 0, 0, 0]);

        a.conditional_swap(&mut b, 0);
        assert_eq!(a.0[0], 1);
        assert_eq!(b.0[0], 2);

        a.conditional_swap(&mut b, 1);
        assert_eq!(a.0[0], 2);
        assert_eq!(b.0[0], 1);
    }
}
