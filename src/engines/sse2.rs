//! SSE2 search engine: four candidates in flight per compression, covering
//! the third and fourth preimage letters two-at-a-time to avoid the
//! "26 isn't a multiple of 4" remainder.
//!
//! Lane order follows `_mm_set_epi32`'s highest-argument-is-highest-lane
//! convention throughout, so the lane that wins a comparison tells us
//! exactly which of the four `(p2, p3)` offsets produced it.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::consts::{
    ALPHABET_HI, ALPHABET_LO, FOLDED_ROUND_0, FOLDED_ROUND_1, FOLDED_ROUND_15, FOLDED_ROUND_2,
    FOLDED_ROUND_3, FOLDED_ROUND_4, H0, H1, H2, H3, H4, K0, K1, K2, K3, PADDING_MARKER,
    PREIMAGE_LENGTH_BIT,
};
use crate::schedule::{early_exit_target, fill_inner_vec128, OuterScheduleVec128};

pub const ENGINE_NAME: &str = "sse2";

pub fn crack(target: [u32; 5]) -> Option<[u8; 6]> {
    let early_exit = early_exit_target(target);
    for p4 in ALPHABET_LO..=ALPHABET_HI {
        for p5 in ALPHABET_LO..=ALPHABET_HI {
            if let Some(preimage) = unsafe { search_shard(early_exit, p4, p5) } {
                return Some(preimage);
            }
        }
    }
    None
}

pub fn crack_shard(target: [u32; 5], p4: u8, p5: u8) -> Option<[u8; 6]> {
    let early_exit = early_exit_target(target);
    unsafe { search_shard(early_exit, p4, p5) }
}

#[target_feature(enable = "sse2")]
unsafe fn rotl(x: __m128i, n: u32) -> __m128i {
    _mm_or_si128(_mm_slli_epi32(x, n as i32), _mm_srli_epi32(x, 32 - n as i32))
}

#[target_feature(enable = "sse2")]
unsafe fn vf_00_19(b: __m128i, c: __m128i, d: __m128i) -> __m128i {
    _mm_xor_si128(d, _mm_and_si128(b, _mm_xor_si128(c, d)))
}

#[target_feature(enable = "sse2")]
unsafe fn vf_40_59(b: __m128i, c: __m128i, d: __m128i) -> __m128i {
    _mm_xor_si128(_mm_and_si128(b, c), _mm_and_si128(d, _mm_xor_si128(b, c)))
}

#[target_feature(enable = "sse2")]
unsafe fn vf_rest(b: __m128i, c: __m128i, d: __m128i) -> __m128i {
    _mm_xor_si128(_mm_xor_si128(b, c), d)
}

#[target_feature(enable = "sse2")]
unsafe fn store4(x: __m128i) -> [u32; 4] {
    let mut out = [0u32; 4];
    _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, x);
    out
}

#[target_feature(enable = "sse2")]
unsafe fn search_shard(early_exit: [u32; 5], p4: u8, p5: u8) -> Option<[u8; 6]> {
    #[cfg(feature = "tracing")]
    tracing::trace!(p4 = p4 as char, p5 = p5 as char, "sse2 shard start");

    let w1 = ((p4 as u32) << 24) | ((p5 as u32) << 16) | PADDING_MARKER;
    let outer = OuterScheduleVec128::precompute(_mm_set1_epi32(w1 as i32));

    let mut blocks = [_mm_setzero_si128(); 80];
    blocks[1] = _mm_set1_epi32(w1 as i32);
    blocks[15] = _mm_set1_epi32(PREIMAGE_LENGTH_BIT as i32);

    let va = _mm_set1_epi32(H0 as i32);
    let vb = _mm_set1_epi32(H1 as i32);
    let vc = _mm_set1_epi32(H2 as i32);
    let vd = _mm_set1_epi32(H3 as i32);
    let ve = _mm_set1_epi32(H4 as i32);

    for p0 in ALPHABET_LO..=ALPHABET_HI {
        for p1 in ALPHABET_LO..=ALPHABET_HI {
            let mut p2 = ALPHABET_LO;
            while p2 <= ALPHABET_HI {
                let mut p3 = ALPHABET_LO;
                while p3 <= ALPHABET_HI {
                    let base = ((p0 as u32) << 24) | ((p1 as u32) << 16);
                    let lane0 = base | ((p2 as u32 + 1) << 8) | (p3 as u32 + 1);
                    let lane1 = base | ((p2 as u32 + 1) << 8) | (p3 as u32);
                    let lane2 = base | (p2 as u32) << 8 | (p3 as u32 + 1);
                    let lane3 = base | (p2 as u32) << 8 | (p3 as u32);
                    let w0 = _mm_set_epi32(lane3 as i32, lane2 as i32, lane1 as i32, lane0 as i32);
                    blocks[0] = w0;
                    fill_inner_vec128(&outer, w0, &mut blocks);

                    let Some((index, bytes)) =
                        compress_and_check(&mut blocks, early_exit, va, vb, vc, vd, ve)
                    else {
                        p3 = p3.wrapping_add(2);
                        continue;
                    };

                    let mut candidate = [p0, p1, p2, p3, p4, p5];
                    match index {
                        3 => {}
                        2 => candidate[3] += 1,
                        1 => candidate[2] += 1,
                        0 => {
                            candidate[2] += 1;
                            candidate[3] += 1;
                        }
                        _ => unreachable!(),
                    }
                    let _ = bytes;
                    return Some(candidate);
                }
                p2 = p2.wrapping_add(2);
            }
        }
    }
    None
}

/// Runs the 80-round compression across all four lanes and checks the
/// early-exit ladder. Returns the winning lane index (see module docs for
/// the lane-to-offset mapping) and the raw final `a` lane values on
/// success.
#[allow(clippy::too_many_arguments)]
#[target_feature(enable = "sse2")]
unsafe fn compress_and_check(
    blocks: &mut [__m128i; 80],
    t: [u32; 5],
    h0: __m128i,
    h1: __m128i,
    h2: __m128i,
    h3: __m128i,
    h4: __m128i,
) -> Option<(i32, [u32; 4])> {
    let (mut a, mut b, mut c, mut d, mut e) = (h0, h1, h2, h3, h4);
    let k0 = _mm_set1_epi32(K0 as i32);
    let k1 = _mm_set1_epi32(K1 as i32);
    let k2 = _mm_set1_epi32(K2 as i32);
    let k3 = _mm_set1_epi32(K3 as i32);

    // round 00
    e = _mm_add_epi32(_mm_set1_epi32(FOLDED_ROUND_0 as i32), blocks[0]);
    b = rotl(b, 30);
    // round 01
    d = _mm_add_epi32(
        _mm_add_epi32(_mm_set1_epi32(FOLDED_ROUND_1 as i32), rotl(e, 5)),
        blocks[1],
    );
    a = rotl(a, 30);
    // round 02
    c = _mm_add_epi32(
        _mm_add_epi32(_mm_set1_epi32(FOLDED_ROUND_2 as i32), rotl(d, 5)),
        vf_00_19(e, a, b),
    );
    e = rotl(e, 30);
    // round 03
    b = _mm_add_epi32(
        _mm_add_epi32(_mm_set1_epi32(FOLDED_ROUND_3 as i32), rotl(c, 5)),
        vf_00_19(d, e, a),
    );
    d = rotl(d, 30);
    // round 04
    a = _mm_add_epi32(
        _mm_add_epi32(_mm_set1_epi32(FOLDED_ROUND_4 as i32), rotl(b, 5)),
        vf_00_19(c, d, e),
    );
    c = rotl(c, 30);
    // rounds 05-14
    macro_rules! round_00_19_noblock {
        ($me:ident, $ma:ident, $mb:ident, $mc:ident, $md:ident, $k:expr) => {
            $me = _mm_add_epi32(
                _mm_add_epi32(_mm_add_epi32($k, $me), rotl($ma, 5)),
                vf_00_19($mb, $mc, $md),
            );
            $mb = rotl($mb, 30);
        };
    }
    round_00_19_noblock!(e, a, b, c, d, k0);
    round_00_19_noblock!(d, e, a, b, c, k0);
    round_00_19_noblock!(c, d, e, a, b, k0);
    round_00_19_noblock!(b, c, d, e, a, k0);
    round_00_19_noblock!(a, b, c, d, e, k0);
    round_00_19_noblock!(e, a, b, c, d, k0);
    round_00_19_noblock!(d, e, a, b, c, k0);
    round_00_19_noblock!(c, d, e, a, b, k0);
    round_00_19_noblock!(b, c, d, e, a, k0);
    round_00_19_noblock!(a, b, c, d, e, k0);
    // round 15
    e = _mm_add_epi32(
        _mm_add_epi32(
            _mm_add_epi32(_mm_set1_epi32(FOLDED_ROUND_15 as i32), e),
            rotl(a, 5),
        ),
        vf_00_19(b, c, d),
    );
    b = rotl(b, 30);

    macro_rules! round_with_block {
        ($me:ident, $ma:ident, $mb:ident, $mc:ident, $md:ident, $f:ident, $k:expr, $i:expr) => {
            $me = _mm_add_epi32(
                _mm_add_epi32(_mm_add_epi32($k, $me), rotl($ma, 5)),
                _mm_add_epi32($f($mb, $mc, $md), blocks[$i]),
            );
            $mb = rotl($mb, 30);
        };
    }

    // rounds 16-19
    round_with_block!(d, e, a, b, c, vf_00_19, k0, 16);
    round_with_block!(c, d, e, a, b, vf_00_19, k0, 17);
    round_with_block!(b, c, d, e, a, vf_00_19, k0, 18);
    round_with_block!(a, b, c, d, e, vf_00_19, k0, 19);
    // rounds 20-39
    round_with_block!(e, a, b, c, d, vf_rest, k1, 20);
    round_with_block!(d, e, a, b, c, vf_rest, k1, 21);
    round_with_block!(c, d, e, a, b, vf_rest, k1, 22);
    round_with_block!(b, c, d, e, a, vf_rest, k1, 23);
    round_with_block!(a, b, c, d, e, vf_rest, k1, 24);
    round_with_block!(e, a, b, c, d, vf_rest, k1, 25);
    round_with_block!(d, e, a, b, c, vf_rest, k1, 26);
    round_with_block!(c, d, e, a, b, vf_rest, k1, 27);
    round_with_block!(b, c, d, e, a, vf_rest, k1, 28);
    round_with_block!(a, b, c, d, e, vf_rest, k1, 29);
    round_with_block!(e, a, b, c, d, vf_rest, k1, 30);
    round_with_block!(d, e, a, b, c, vf_rest, k1, 31);
    round_with_block!(c, d, e, a, b, vf_rest, k1, 32);
    round_with_block!(b, c, d, e, a, vf_rest, k1, 33);
    round_with_block!(a, b, c, d, e, vf_rest, k1, 34);
    round_with_block!(e, a, b, c, d, vf_rest, k1, 35);
    round_with_block!(d, e, a, b, c, vf_rest, k1, 36);
    round_with_block!(c, d, e, a, b, vf_rest, k1, 37);
    round_with_block!(b, c, d, e, a, vf_rest, k1, 38);
    round_with_block!(a, b, c, d, e, vf_rest, k1, 39);
    // rounds 40-59
    round_with_block!(e, a, b, c, d, vf_40_59, k2, 40);
    round_with_block!(d, e, a, b, c, vf_40_59, k2, 41);
    round_with_block!(c, d, e, a, b, vf_40_59, k2, 42);
    round_with_block!(b, c, d, e, a, vf_40_59, k2, 43);
    round_with_block!(a, b, c, d, e, vf_40_59, k2, 44);
    round_with_block!(e, a, b, c, d, vf_40_59, k2, 45);
    round_with_block!(d, e, a, b, c, vf_40_59, k2, 46);
    round_with_block!(c, d, e, a, b, vf_40_59, k2, 47);
    round_with_block!(b, c, d, e, a, vf_40_59, k2, 48);
    round_with_block!(a, b, c, d, e, vf_40_59, k2, 49);
    round_with_block!(e, a, b, c, d, vf_40_59, k2, 50);
    round_with_block!(d, e, a, b, c, vf_40_59, k2, 51);
    round_with_block!(c, d, e, a, b, vf_40_59, k2, 52);
    round_with_block!(b, c, d, e, a, vf_40_59, k2, 53);
    round_with_block!(a, b, c, d, e, vf_40_59, k2, 54);
    round_with_block!(e, a, b, c, d, vf_40_59, k2, 55);
    round_with_block!(d, e, a, b, c, vf_40_59, k2, 56);
    round_with_block!(c, d, e, a, b, vf_40_59, k2, 57);
    round_with_block!(b, c, d, e, a, vf_40_59, k2, 58);
    round_with_block!(a, b, c, d, e, vf_40_59, k2, 59);
    // rounds 60-74
    round_with_block!(e, a, b, c, d, vf_rest, k3, 60);
    round_with_block!(d, e, a, b, c, vf_rest, k3, 61);
    round_with_block!(c, d, e, a, b, vf_rest, k3, 62);
    round_with_block!(b, c, d, e, a, vf_rest, k3, 63);
    round_with_block!(a, b, c, d, e, vf_rest, k3, 64);
    round_with_block!(e, a, b, c, d, vf_rest, k3, 65);
    round_with_block!(d, e, a, b, c, vf_rest, k3, 66);
    round_with_block!(c, d, e, a, b, vf_rest, k3, 67);
    round_with_block!(b, c, d, e, a, vf_rest, k3, 68);
    round_with_block!(a, b, c, d, e, vf_rest, k3, 69);
    round_with_block!(e, a, b, c, d, vf_rest, k3, 70);
    round_with_block!(d, e, a, b, c, vf_rest, k3, 71);
    round_with_block!(c, d, e, a, b, vf_rest, k3, 72);
    round_with_block!(b, c, d, e, a, vf_rest, k3, 73);
    round_with_block!(a, b, c, d, e, vf_rest, k3, 74);

    // round 75 + early-exit ladder
    round_with_block!(e, a, b, c, d, vf_rest, k3, 75);
    let saved = store4(e);
    // there is never more than one matching lane for a given target
    let mut index: i32 = -1;
    if saved[3] == t[4] {
        index = 3;
    }
    if saved[2] == t[4] {
        index = 2;
    }
    if saved[1] == t[4] {
        index = 1;
    }
    if saved[0] == t[4] {
        index = 0;
    }
    if index == -1 {
        return None;
    }

    blocks[76] = rotl(
        _mm_xor_si128(
            _mm_xor_si128(blocks[73], blocks[68]),
            _mm_xor_si128(blocks[62], blocks[60]),
        ),
        1,
    );
    round_with_block!(d, e, a, b, c, vf_rest, k3, 76);
    if store4(d)[index as usize] != t[3] {
        return None;
    }

    blocks[77] = rotl(
        _mm_xor_si128(
            _mm_xor_si128(blocks[74], blocks[69]),
            _mm_xor_si128(blocks[63], blocks[61]),
        ),
        1,
    );
    round_with_block!(c, d, e, a, b, vf_rest, k3, 77);
    if store4(c)[index as usize] != t[2] {
        return None;
    }

    blocks[78] = rotl(
        _mm_xor_si128(
            _mm_xor_si128(blocks[75], blocks[70]),
            _mm_xor_si128(blocks[64], blocks[62]),
        ),
        1,
    );
    round_with_block!(b, c, d, e, a, vf_rest, k3, 78);
    if store4(b)[index as usize] != t[1] {
        return None;
    }

    blocks[79] = rotl(
        _mm_xor_si128(
            _mm_xor_si128(blocks[76], blocks[71]),
            _mm_xor_si128(blocks[65], blocks[63]),
        ),
        1,
    );
    round_with_block!(a, b, c, d, e, vf_rest, k3, 79);
    let final_a = store4(a);
    if final_a[index as usize] != t[0] {
        return None;
    }

    Some((index, final_a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest_of(preimage: &[u8; 6]) -> [u32; 5] {
        crate::digest::sha1_six_bytes(preimage)
    }

    #[test]
    fn finds_a_known_preimage() {
        let target = digest_of(b"ananas");
        assert_eq!(crack(target), Some(*b"ananas"));
    }

    #[test]
    fn reports_not_found_for_unreachable_digest() {
        assert_eq!(crack([0, 0, 0, 0, 0]), None);
    }

    #[test]
    fn handles_every_stride_offset() {
        for word in [*b"passwd", *b"swords", *b"zzzzzz"] {
            let target = digest_of(&word);
            assert_eq!(crack(target), Some(word));
        }
    }
}
