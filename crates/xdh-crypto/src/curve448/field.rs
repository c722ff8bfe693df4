//! Field arithmetic over GF(2^448 - 2^224 - 1) in radix-2^56 representation.
//!
//! The prime p = 2^448 - 2^224 - 1 is the Goldilocks prime; reduction uses
//! the identity 2^448 = 2^224 + 1 (mod p). With 56-bit limbs the wrap point
//! 2^224 falls exactly on limb 4, and each limb covers exactly 7 bytes of
//! the wire encoding.

/// A field element in GF(p) where p = 2^448 - 2^224 - 1.
///
/// Stored in radix-2^56 representation: value = sum of l[i] * 2^(56*i),
/// i = 0..7. Limbs stay below 2^57 between operations; only `reduce`
/// produces the canonical value in [0, p).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fe448(pub(crate) [u64; 8]);

const MASK56: u64 = (1u64 << 56) - 1;

/// 4*p in radix-2^56 limbs, used as a subtraction bias so that limbs
/// never underflow even when the minuend is loosely reduced.
const FOUR_P: [u64; 8] = [
    4 * MASK56,
    4 * MASK56,
    4 * MASK56,
    4 * MASK56,
    4 * (MASK56 - 1),
    4 * MASK56,
    4 * MASK56,
    4 * MASK56,
];

impl Fe448 {
    /// The zero element.
    pub fn zero() -> Self {
        Fe448([0; 8])
    }

    /// The one element.
    pub fn one() -> Self {
        let mut r = [0u64; 8];
        r[0] = 1;
        Fe448(r)
    }

    /// Addition: h = f + g.
    pub fn add(&self, rhs: &Fe448) -> Fe448 {
        let mut r = [0u64; 8];
        for (i, ri) in r.iter_mut().enumerate() {
            *ri = self.0[i] + rhs.0[i];
        }
        Self::weak_carry(r)
    }

    /// Subtraction: h = f - g.
    /// Biased by 4*p so the per-limb difference stays non-negative.
    pub fn sub(&self, rhs: &Fe448) -> Fe448 {
        let mut r = [0u64; 8];
        for (i, ri) in r.iter_mut().enumerate() {
            *ri = (self.0[i] + FOUR_P[i]) - rhs.0[i];
        }
        Self::weak_carry(r)
    }

    /// Multiplication: h = f * g.
    ///
    /// 8x8 schoolbook product into 15 columns, then the Goldilocks fold:
    /// column 8+i contributes to columns i and i+4, and when i+4 wraps
    /// past the top it lands on column i a second time.
    pub fn mul(&self, rhs: &Fe448) -> Fe448 {
        let f = &self.0;
        let g = &rhs.0;

        let mut prod = [0u128; 15];
        for i in 0..8 {
            for j in 0..8 {
                prod[i + j] += f[i] as u128 * g[j] as u128;
            }
        }

        Self::carry_wide(Self::fold(&prod))
    }

    /// Squaring: h = f^2, with the symmetric cross terms doubled.
    pub fn square(&self) -> Fe448 {
        let f = &self.0;

        let mut prod = [0u128; 15];
        for i in 0..8 {
            prod[2 * i] += f[i] as u128 * f[i] as u128;
            for j in (i + 1)..8 {
                prod[i + j] += 2 * (f[i] as u128 * f[j] as u128);
            }
        }

        Self::carry_wide(Self::fold(&prod))
    }

    /// Multiply by a small constant: h = f * c.
    pub fn mul_small(&self, c: u32) -> Fe448 {
        let c = c as u128;
        let mut h = [0u128; 8];
        for (i, hi) in h.iter_mut().enumerate() {
            *hi = self.0[i] as u128 * c;
        }
        Self::carry_wide(h)
    }

    /// Fold a 15-column product into 8 columns via 2^448 = 2^224 + 1.
    ///
    /// Column 8+i is worth 2^448 * 2^(56*i) = 2^(56*(i+4)) + 2^(56*i).
    /// For i >= 4 the first term wraps once more, becoming
    /// 2^(56*i) + 2^(56*(i-4)), so the column counts twice at position i.
    fn fold(prod: &[u128; 15]) -> [u128; 8] {
        let mut acc = [0u128; 8];
        acc[..8].copy_from_slice(&prod[..8]);
        for i in 0..4 {
            acc[i] += prod[8 + i];
            acc[i + 4] += prod[8 + i];
        }
        for i in 4..7 {
            acc[i] += 2 * prod[8 + i];
            acc[i - 4] += prod[8 + i];
        }
        acc
    }

    /// Carry propagation for u128 intermediate limbs.
    ///
    /// Two fixed passes; each top carry re-enters at limbs 0 and 4.
    fn carry_wide(h: [u128; 8]) -> Fe448 {
        let mut r = h;

        let mut c: u128 = 0;
        for limb in r.iter_mut() {
            let v = *limb + c;
            *limb = v & MASK56 as u128;
            c = v >> 56;
        }
        r[0] += c;
        r[4] += c;

        let mut c: u128 = 0;
        for limb in r.iter_mut() {
            let v = *limb + c;
            *limb = v & MASK56 as u128;
            c = v >> 56;
        }
        r[0] += c;
        r[4] += c;

        let mut out = [0u64; 8];
        for (i, o) in out.iter_mut().enumerate() {
            *o = r[i] as u64;
        }
        Fe448(out)
    }

    /// Carry propagation for u64 limbs (after add/sub).
    fn weak_carry(h: [u64; 8]) -> Fe448 {
        let mut r = h;
        let mut c: u64 = 0;
        for limb in r.iter_mut() {
            let v = *limb + c;
            *limb = v & MASK56;
            c = v >> 56;
        }
        r[0] += c;
        r[4] += c;
        Fe448(r)
    }

    /// Full reduction modulo p = 2^448 - 2^224 - 1, into [0, p).
    pub fn reduce(&self) -> Fe448 {
        let mut r = Self::weak_carry(self.0).0;
        r = Self::weak_carry(r).0;
        r = Self::weak_carry(r).0;

        // The value is now below 2*p. Adding 2^448 - p = 2^224 + 1 carries
        // out of limb 7 exactly when the value is at least p, and in that
        // case the low 448 bits of the sum are the value minus p.
        let mut t = r;
        t[0] += 1;
        t[4] += 1;
        let mut c: u64 = 0;
        for limb in t.iter_mut() {
            let v = *limb + c;
            *limb = v & MASK56;
            c = v >> 56;
        }

        let keep = c.wrapping_neg();
        let mut out = [0u64; 8];
        for (i, o) in out.iter_mut().enumerate() {
            *o = (t[i] & keep) | (r[i] & !keep);
        }

        // Normalize the limb form; nothing carries out of limb 7 here.
        let mut c: u64 = 0;
        for limb in out.iter_mut() {
            let v = *limb + c;
            *limb = v & MASK56;
            c = v >> 56;
        }
        Fe448(out)
    }

    /// Modular inversion: h = f^(p-2) mod p by Fermat's little theorem.
    ///
    /// Fixed square-and-multiply chain for p - 2 = 2^448 - 2^224 - 3,
    /// decomposed as (2^223 - 1) * 2^225 + (2^224 - 3); the operation
    /// sequence does not depend on the operand.
    pub fn invert(&self) -> Fe448 {
        let a = *self;
        let a3 = a.square().mul(&a); // 2^2 - 1
        let a7 = a3.square().mul(&a); // 2^3 - 1

        let a_6 = {
            let mut t = a7;
            for _ in 0..3 {
                t = t.square();
            }
            t.mul(&a7)
        }; // 2^6 - 1
        let a_12 = {
            let mut t = a_6;
            for _ in 0..6 {
                t = t.square();
            }
            t.mul(&a_6)
        };
        let a_24 = {
            let mut t = a_12;
            for _ in 0..12 {
                t = t.square();
            }
            t.mul(&a_12)
        };
        let a_48 = {
            let mut t = a_24;
            for _ in 0..24 {
                t = t.square();
            }
            t.mul(&a_24)
        };
        let a_96 = {
            let mut t = a_48;
            for _ in 0..48 {
                t = t.square();
            }
            t.mul(&a_48)
        };
        let a_192 = {
            let mut t = a_96;
            for _ in 0..96 {
                t = t.square();
            }
            t.mul(&a_96)
        };
        let a_222 = {
            let mut t = a_192;
            for _ in 0..24 {
                t = t.square();
            }
            t = t.mul(&a_24);
            for _ in 0..6 {
                t = t.square();
            }
            t.mul(&a_6)
        }; // 2^222 - 1
        let a_223 = a_222.square().mul(&a); // 2^223 - 1

        let mut t = a_223;
        for _ in 0..225 {
            t = t.square();
        }
        // (2^222 - 1) * 4 + 1 = 2^224 - 3
        let tail = a_222.square().square().mul(&a);
        t.mul(&tail)
    }

    /// Decode a 56-byte little-endian representation into a field element.
    ///
    /// Values in [p, 2^448) are kept unreduced and treated modulo p by
    /// the arithmetic.
    pub fn from_bytes(bytes: &[u8; 56]) -> Fe448 {
        // Each 56-bit limb covers exactly 7 bytes.
        let mut r = [0u64; 8];
        for (i, limb) in r.iter_mut().enumerate() {
            let mut v = 0u64;
            for j in 0..7 {
                v |= (bytes[7 * i + j] as u64) << (8 * j);
            }
            *limb = v;
        }
        Fe448(r)
    }

    /// Encode a field element to its canonical 56-byte little-endian form.
    pub fn to_bytes(self) -> [u8; 56] {
        let h = self.reduce().0;
        let mut out = [0u8; 56];
        for (i, limb) in h.iter().enumerate() {
            for j in 0..7 {
                out[7 * i + j] = (limb >> (8 * j)) as u8;
            }
        }
        out
    }

    /// Constant-time conditional swap: exchange self and other if swap == 1.
    pub fn conditional_swap(&mut self, other: &mut Fe448, swap: u8) {
        let mask = (swap as u64).wrapping_neg();
        for i in 0..8 {
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

impl PartialEq for Fe448 {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.to_bytes().ct_eq(&other.to_bytes()).into()
    }
}

impl Eq for Fe448 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_one() {
        assert!(Fe448::zero().is_zero());
        assert!(!Fe448::one().is_zero());
    }

    #[test]
    fn test_goldilocks_prime_reduces_to_zero() {
        // p = 2^448 - 2^224 - 1: all limbs full except limb 4 short by one
        let mut p_limbs = [MASK56; 8];
        p_limbs[4] = MASK56 - 1;
        assert!(Fe448(p_limbs).is_zero());
    }

    #[test]
    fn test_add_sub_roundtrip() {
        let a = Fe448::from_bytes(&[0x42; 56]);
        let b = Fe448::from_bytes(&[0x37; 56]);
        let c = a.add(&b);
        let d = c.sub(&b);
        assert_eq!(a, d);
    }

    #[test]
    fn test_sub_self_is_zero() {
        let a = Fe448::from_bytes(&[0xff; 56]);
        assert!(a.sub(&a).is_zero());
    }

    #[test]
    fn test_mul_one_identity() {
        let a = Fe448::from_bytes(&[0xab; 56]);
        assert_eq!(a, a.mul(&Fe448::one()));
    }

    #[test]
    fn test_mul_commutativity() {
        let a = Fe448::from_bytes(&[0xab; 56]);
        let b = Fe448::from_bytes(&[0xcd; 56]);
        assert_eq!(a.mul(&b), b.mul(&a));
    }

    #[test]
    fn test_mul_square_consistency() {
        let a = Fe448::from_bytes(&[0x12; 56]);
        assert_eq!(a.square(), a.mul(&a));
    }

    #[test]
    fn test_distributive_law() {
        let a = Fe448::from_bytes(&[0x11; 56]);
        let b = Fe448::from_bytes(&[0x22; 56]);
        let c = Fe448::from_bytes(&[0x33; 56]);
        assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
    }

    #[test]
    fn test_mul_small_matches_add() {
        let a = Fe448::from_bytes(&[0x03; 56]);
        assert_eq!(a.mul_small(2), a.add(&a));
    }

    #[test]
    fn test_mul_small_zero() {
        let a = Fe448::from_bytes(&[0xab; 56]);
        assert!(a.mul_small(0).is_zero());
    }

    #[test]
    fn test_invert() {
        let mut bytes = [0u8; 56];
        bytes[0] = 42;
        let a = Fe448::from_bytes(&bytes);
        assert_eq!(a.mul(&a.invert()), Fe448::one());
    }

    #[test]
    fn test_invert_one() {
        assert_eq!(Fe448::one().invert(), Fe448::one());
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let mut bytes = [0u8; 56];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let a = Fe448::from_bytes(&bytes);
        let b = Fe448::from_bytes(&a.to_bytes());
        assert_eq!(a, b);
    }

    #[test]
    fn test_conditional_swap() {
        let mut a = Fe448::one();
        let mut bytes2 = [0u8; 56];
        bytes2[0] = 2;
        let mut b = Fe448::from_bytes(&bytes2);

        a.conditional_swap(&mut b, 0);
        assert_eq!(a.to_bytes()[0], 1);
        assert_eq!(b.to_bytes()[0], 2);

        a.conditional_swap(&mut b, 1);
        assert_eq!(a.to_bytes()[0], 2);
        assert_eq!(b.to_bytes()[0], 1);
    }
}
