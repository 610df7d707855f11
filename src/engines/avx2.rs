//! AVX2 search engine: eight candidates in flight per compression, striding
//! over the second, third, and fourth preimage letters two at a time.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::consts::{
    ALPHABET_HI, ALPHABET_LO, FOLDED_ROUND_0, FOLDED_ROUND_1, FOLDED_ROUND_15, FOLDED_ROUND_2,
    FOLDED_ROUND_3, FOLDED_ROUND_4, H0, H1, H2, H3, H4, K0, K1, K2, K3, PADDING_MARKER,
    PREIMAGE_LENGTH_BIT,
};
use crate::schedule::{early_exit_target, fill_inner_vec256, OuterScheduleVec256};

pub const ENGINE_NAME: &str = "avx2";

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

#[target_feature(enable = "avx2")]
unsafe fn rotl(x: __m256i, n: u32) -> __m256i {
    _mm256_or_si256(
        _mm256_slli_epi32(x, n as i32),
        _mm256_srli_epi32(x, 32 - n as i32),
    )
}

#[target_feature(enable = "avx2")]
unsafe fn vf_00_19(b: __m256i, c: __m256i, d: __m256i) -> __m256i {
    _mm256_xor_si256(d, _mm256_and_si256(b, _mm256_xor_si256(c, d)))
}

#[target_feature(enable = "avx2")]
unsafe fn vf_40_59(b: __m256i, c: __m256i, d: __m256i) -> __m256i {
    _mm256_xor_si256(
        _mm256_and_si256(b, c),
        _mm256_and_si256(d, _mm256_xor_si256(b, c)),
    )
}

#[target_feature(enable = "avx2")]
unsafe fn vf_rest(b: __m256i, c: __m256i, d: __m256i) -> __m256i {
    _mm256_xor_si256(_mm256_xor_si256(b, c), d)
}

#[target_feature(enable = "avx2")]
unsafe fn store8(x: __m256i) -> [u32; 8] {
    let mut out = [0u32; 8];
    _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, x);
    out
}

#[target_feature(enable = "avx2")]
unsafe fn search_shard(early_exit: [u32; 5], p4: u8, p5: u8) -> Option<[u8; 6]> {
    #[cfg(feature = "tracing")]
    tracing::trace!(p4 = p4 as char, p5 = p5 as char, "avx2 shard start");

    let w1 = ((p4 as u32) << 24) | ((p5 as u32) << 16) | PADDING_MARKER;
    let outer = OuterScheduleVec256::precompute(_mm256_set1_epi32(w1 as i32));

    let mut blocks = [_mm256_setzero_si256(); 80];
    blocks[1] = _mm256_set1_epi32(w1 as i32);
    blocks[15] = _mm256_set1_epi32(PREIMAGE_LENGTH_BIT as i32);

    let va = _mm256_set1_epi32(H0 as i32);
    let vb = _mm256_set1_epi32(H1 as i32);
    let vc = _mm256_set1_epi32(H2 as i32);
    let vd = _mm256_set1_epi32(H3 as i32);
    let ve = _mm256_set1_epi32(H4 as i32);

    for p0 in ALPHABET_LO..=ALPHABET_HI {
        let mut p1 = ALPHABET_LO;
        while p1 <= ALPHABET_HI {
            let mut p2 = ALPHABET_LO;
            while p2 <= ALPHABET_HI {
                let mut p3 = ALPHABET_LO;
                while p3 <= ALPHABET_HI {
                    let base = (p0 as u32) << 24;
                    let lane0 = base | ((p1 as u32) << 16) | ((p2 as u32) << 8) | (p3 as u32);
                    let lane1 = base | ((p1 as u32) << 16) | ((p2 as u32) << 8) | (p3 as u32 + 1);
                    let lane2 = base | ((p1 as u32) << 16) | ((p2 as u32 + 1) << 8) | (p3 as u32);
                    let lane3 =
                        base | ((p1 as u32) << 16) | ((p2 as u32 + 1) << 8) | (p3 as u32 + 1);
                    let lane4 = base | ((p1 as u32 + 1) << 16) | ((p2 as u32) << 8) | (p3 as u32);
                    let lane5 =
                        base | ((p1 as u32 + 1) << 16) | ((p2 as u32) << 8) | (p3 as u32 + 1);
                    let lane6 =
                        base | ((p1 as u32 + 1) << 16) | ((p2 as u32 + 1) << 8) | (p3 as u32);
                    let lane7 = base
                        | ((p1 as u32 + 1) << 16)
                        | ((p2 as u32 + 1) << 8)
                        | (p3 as u32 + 1);
                    let w0 = _mm256_setr_epi32(
                        lane0 as i32,
                        lane1 as i32,
                        lane2 as i32,
                        lane3 as i32,
                        lane4 as i32,
                        lane5 as i32,
                        lane6 as i32,
                        lane7 as i32,
                    );
                    blocks[0] = w0;
                    fill_inner_vec256(&outer, w0, &mut blocks);

                    let Some((index, bytes)) =
                        compress_and_check(&mut blocks, early_exit, va, vb, vc, vd, ve)
                    else {
                        p3 = p3.wrapping_add(2);
                        continue;
                    };

                    let mut candidate = [p0, p1, p2, p3, p4, p5];
                    match index {
                        0 => {}
                        1 => candidate[3] += 1,
                        2 => candidate[2] += 1,
                        3 => {
                            candidate[2] += 1;
                            candidate[3] += 1;
                        }
                        4 => candidate[1] += 1,
                        5 => {
                            candidate[1] += 1;
                            candidate[3] += 1;
                        }
                        6 => {
                            candidate[1] += 1;
                            candidate[2] += 1;
                        }
                        7 => {
                            candidate[1] += 1;
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
            p1 = p1.wrapping_add(2);
        }
    }
    None
}

/// Runs the 80-round compression across all eight lanes and checks the
/// early-exit ladder. Returns the winning lane index and the raw final `a`
/// lane values on success.
#[allow(clippy::too_many_arguments)]
#[target_feature(enable = "avx2")]
unsafe fn compress_and_check(
    blocks: &mut [__m256i; 80],
    t: [u32; 5],
    h0: __m256i,
    h1: __m256i,
    h2: __m256i,
    h3: __m256i,
    h4: __m256i,
) -> Option<(i32, [u32; 8])> {
    let (mut a, mut b, mut c, mut d, mut e) = (h0, h1, h2, h3, h4);
    let k0 = _mm256_set1_epi32(K0 as i32);
    let k1 = _mm256_set1_epi32(K1 as i32);
    let k2 = _mm256_set1_epi32(K2 as i32);
    let k3 = _mm256_set1_epi32(K3 as i32);

    // round 00
    e = _mm256_add_epi32(_mm256_set1_epi32(FOLDED_ROUND_0 as i32), blocks[0]);
    b = rotl(b, 30);
    // round 01
    d = _mm256_add_epi32(
        _mm256_add_epi32(_mm256_set1_epi32(FOLDED_ROUND_1 as i32), rotl(e, 5)),
        blocks[1],
    );
    a = rotl(a, 30);
    // round 02
    c = _mm256_add_epi32(
        _mm256_add_epi32(_mm256_set1_epi32(FOLDED_ROUND_2 as i32), rotl(d, 5)),
        vf_00_19(e, a, b),
    );
    e = rotl(e, 30);
    // round 03
    b = _mm256_add_epi32(
        _mm256_add_epi32(_mm256_set1_epi32(FOLDED_ROUND_3 as i32), rotl(c, 5)),
        vf_00_19(d, e, a),
    );
    d = rotl(d, 30);
    // round 04
    a = _mm256_add_epi32(
        _mm256_add_epi32(_mm256_set1_epi32(FOLDED_ROUND_4 as i32), rotl(b, 5)),
        vf_00_19(c, d, e),
    );
    c = rotl(c, 30);

    macro_rules! round_00_19_noblock {
        ($me:ident, $ma:ident, $mb:ident, $mc:ident, $md:ident, $k:expr) => {
            $me = _mm256_add_epi32(
                _mm256_add_epi32(_mm256_add_epi32($k, $me), rotl($ma, 5)),
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
    e = _mm256_add_epi32(
        _mm256_add_epi32(
            _mm256_add_epi32(_mm256_set1_epi32(FOLDED_ROUND_15 as i32), e),
            rotl(a, 5),
        ),
        vf_00_19(b, c, d),
    );
    b = rotl(b, 30);

    macro_rules! round_with_block {
        ($me:ident, $ma:ident, $mb:ident, $mc:ident, $md:ident, $f:ident, $k:expr, $i:expr) => {
            $me = _mm256_add_epi32(
                _mm256_add_epi32(_mm256_add_epi32($k, $me), rotl($ma, 5)),
                _mm256_add_epi32($f($mb, $mc, $md), blocks[$i]),
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
    let saved = store8(e);
    let mut index: i32 = -1;
    for (i, &lane) in saved.iter().enumerate() {
        if lane == t[4] {
            index = i as i32;
        }
    }
    if index == -1 {
        return None;
    }

    blocks[76] = rotl(
        _mm256_xor_si256(
            _mm256_xor_si256(blocks[73], blocks[68]),
            _mm256_xor_si256(blocks[62], blocks[60]),
        ),
        1,
    );
    round_with_block!(d, e, a, b, c, vf_rest, k3, 76);
    if store8(d)[index as usize] != t[3] {
        return None;
    }

    blocks[77] = rotl(
        _mm256_xor_si256(
            _mm256_xor_si256(blocks[74], blocks[69]),
            _mm256_xor_si256(blocks[63], blocks[61]),
        ),
        1,
    );
    round_with_block!(c, d, e, a, b, vf_rest, k3, 77);
    if store8(c)[index as usize] != t[2] {
        return None;
    }

    blocks[78] = rotl(
        _mm256_xor_si256(
            _mm256_xor_si256(blocks[75], blocks[70]),
            _mm256_xor_si256(blocks[64], blocks[62]),
        ),
        1,
    );
    round_with_block!(b, c, d, e, a, vf_rest, k3, 78);
    if store8(b)[index as usize] != t[1] {
        return None;
    }

    blocks[79] = rotl(
        _mm256_xor_si256(
            _mm256_xor_si256(blocks[76], blocks[71]),
            _mm256_xor_si256(blocks[65], blocks[63]),
        ),
        1,
    );
    round_with_block!(a, b, c, d, e, vf_rest, k3, 79);
    let final_a = store8(a);
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
        for word in [*b"passwd", *b"swords", *b"zzzzzz", *b"qfucra"] {
            let target = digest_of(&word);
            assert_eq!(crack(target), Some(word));
        }
    }
}
