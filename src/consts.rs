//! SHA-1 initial values, round constants, and the round-0/1/2/3/4/15 folded
//! constants that fall out of those IVs being compile-time known.
//!
//! The folded values are produced by evaluating the first few rounds of the
//! compression function symbolically against the fixed IV; see `DESIGN.md`
//! for the derivation record. They are reproduced here verbatim rather than
//! recomputed at runtime.

pub const H0: u32 = 0x6745_2301;
pub const H1: u32 = 0xEFCD_AB89;
pub const H2: u32 = 0x98BA_DCFE;
pub const H3: u32 = 0x1032_5476;
pub const H4: u32 = 0xC3D2_E1F0;

pub const K0: u32 = 0x5A82_7999;
pub const K1: u32 = 0x6ED9_EBA1;
pub const K2: u32 = 0x8F1B_BCDC;
pub const K3: u32 = 0xCA62_C1D6;

/// Low 32 bits of `K0 + f(H1,H2,H3) + H4 + rotl(H0,5)`, folded because rounds
/// 0's state is entirely IV-derived.
pub const FOLDED_ROUND_0: u32 = 0x9FB4_98B3;
/// Folds `K0 + f(rotl(H1,30), H2, H3) + H3` as seen by round 1.
pub const FOLDED_ROUND_1: u32 = 0x66B0_CD0D;
pub const FOLDED_ROUND_2: u32 = 0xF33D_5697;
pub const FOLDED_ROUND_3: u32 = 0xD675_E47B;
pub const FOLDED_ROUND_4: u32 = 0xB453_C259;
/// Folds `K0 + W[15]` (the fixed length-padding word) for round 15.
pub const FOLDED_ROUND_15: u32 = 0x5A82_79C9;

/// `W[15]` for any six-byte candidate: the 64-bit bit-length field of the
/// padded single-block message, low word only (high word is always zero).
pub const PREIMAGE_LENGTH_BIT: u32 = 0x0000_0030;

/// Fixed padding byte 0x80 combined with the high two candidate bytes, or'd
/// into `W[1]` by the caller once the outer-loop letters are known.
pub const PADDING_MARKER: u32 = 0x0000_8000;

pub const ALPHABET_LO: u8 = b'a';
pub const ALPHABET_HI: u8 = b'z';

#[inline(always)]
pub(crate) fn f_00_19(b: u32, c: u32, d: u32) -> u32 {
    d ^ (b & (c ^ d))
}

#[inline(always)]
pub(crate) fn f_40_59(b: u32, c: u32, d: u32) -> u32 {
    (b & c) ^ (d & (b ^ c))
}

#[inline(always)]
pub(crate) fn f_rest(b: u32, c: u32, d: u32) -> u32 {
    b ^ c ^ d
}
