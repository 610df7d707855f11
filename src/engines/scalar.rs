//! Portable, allocation-free scalar search engine.
//!
//! One candidate at a time, fully unrolled across all 80 compression
//! rounds, with the early-exit ladder folded into the last five rounds so a
//! mismatch is caught as soon as the first of the five final words is
//! known to be wrong.

use crate::consts::{
    f_00_19, f_40_59, f_rest, ALPHABET_HI, ALPHABET_LO, FOLDED_ROUND_0, FOLDED_ROUND_1,
    FOLDED_ROUND_15, FOLDED_ROUND_2, FOLDED_ROUND_3, FOLDED_ROUND_4, H0, H1, H2, H3, H4, K0, K1,
    K2, K3, PADDING_MARKER, PREIMAGE_LENGTH_BIT,
};
use crate::schedule::{early_exit_target, fill_inner, OuterSchedule};

pub const ENGINE_NAME: &str = "scalar";

/// Searches the full 676-shard space for a preimage of `target`.
pub fn crack(target: [u32; 5]) -> Option<[u8; 6]> {
    let early_exit = early_exit_target(target);
    for p4 in ALPHABET_LO..=ALPHABET_HI {
        for p5 in ALPHABET_LO..=ALPHABET_HI {
            if let Some(preimage) = search_shard(early_exit, p4, p5) {
                return Some(preimage);
            }
        }
    }
    None
}

/// Searches only the shard fixed by the two trailing letters `p4`, `p5`.
pub fn crack_shard(target: [u32; 5], p4: u8, p5: u8) -> Option<[u8; 6]> {
    let early_exit = early_exit_target(target);
    search_shard(early_exit, p4, p5)
}

fn search_shard(early_exit: [u32; 5], p4: u8, p5: u8) -> Option<[u8; 6]> {
    #[cfg(feature = "tracing")]
    tracing::trace!(p4 = p4 as char, p5 = p5 as char, "scalar shard start");

    let w1 = ((p4 as u32) << 24) | ((p5 as u32) << 16) | PADDING_MARKER;
    let outer = OuterSchedule::precompute(w1);

    let mut blocks = [0u32; 80];
    blocks[1] = w1;
    blocks[15] = PREIMAGE_LENGTH_BIT;

    for p0 in ALPHABET_LO..=ALPHABET_HI {
        for p1 in ALPHABET_LO..=ALPHABET_HI {
            for p2 in ALPHABET_LO..=ALPHABET_HI {
                for p3 in ALPHABET_LO..=ALPHABET_HI {
                    let w0 = ((p0 as u32) << 24)
                        | ((p1 as u32) << 16)
                        | ((p2 as u32) << 8)
                        | (p3 as u32);
                    blocks[0] = w0;
                    fill_inner(&outer, w0, &mut blocks);
                    if compress_and_check(&mut blocks, early_exit) {
                        return Some([p0, p1, p2, p3, p4, p5]);
                    }
                }
            }
        }
    }
    None
}

/// Runs the fully unrolled 80-round compression for one candidate block,
/// bailing out as soon as one of the last five rounds disagrees with the
/// target. Returns `true` only when all 80 rounds match.
#[inline]
fn compress_and_check(blocks: &mut [u32; 80], t: [u32; 5]) -> bool {
    let (mut a, mut b, mut c, mut d, mut e) = (H0, H1, H2, H3, H4);

    // round 00 (fully IV-derived, folded)
    e = FOLDED_ROUND_0.wrapping_add(blocks[0]);
    b = b.rotate_left(30);
    // round 01
    d = FOLDED_ROUND_1
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(blocks[1]);
    a = a.rotate_left(30);
    // round 02
    c = FOLDED_ROUND_2
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_00_19(e, a, b));
    e = e.rotate_left(30);
    // round 03
    b = FOLDED_ROUND_3
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_00_19(d, e, a));
    d = d.rotate_left(30);
    // round 04
    a = FOLDED_ROUND_4
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_00_19(c, d, e));
    c = c.rotate_left(30);
    // rounds 05-14: W is always zero here, no block term
    e = K0
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_00_19(b, c, d));
    b = b.rotate_left(30);
    d = K0
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_00_19(a, b, c));
    a = a.rotate_left(30);
    c = K0
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_00_19(e, a, b));
    e = e.rotate_left(30);
    b = K0
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_00_19(d, e, a));
    d = d.rotate_left(30);
    a = K0
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_00_19(c, d, e));
    c = c.rotate_left(30);
    e = K0
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_00_19(b, c, d));
    b = b.rotate_left(30);
    d = K0
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_00_19(a, b, c));
    a = a.rotate_left(30);
    c = K0
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_00_19(e, a, b));
    e = e.rotate_left(30);
    b = K0
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_00_19(d, e, a));
    d = d.rotate_left(30);
    a = K0
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_00_19(c, d, e));
    c = c.rotate_left(30);
    // round 15 (W[15] folded in)
    e = FOLDED_ROUND_15
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_00_19(b, c, d));
    b = b.rotate_left(30);
    // rounds 16-19
    d = K0
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_00_19(a, b, c))
        .wrapping_add(blocks[16]);
    a = a.rotate_left(30);
    c = K0
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_00_19(e, a, b))
        .wrapping_add(blocks[17]);
    e = e.rotate_left(30);
    b = K0
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_00_19(d, e, a))
        .wrapping_add(blocks[18]);
    d = d.rotate_left(30);
    a = K0
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_00_19(c, d, e))
        .wrapping_add(blocks[19]);
    c = c.rotate_left(30);
    // rounds 20-39
    e = K1
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_rest(b, c, d))
        .wrapping_add(blocks[20]);
    b = b.rotate_left(30);
    d = K1
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_rest(a, b, c))
        .wrapping_add(blocks[21]);
    a = a.rotate_left(30);
    c = K1
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_rest(e, a, b))
        .wrapping_add(blocks[22]);
    e = e.rotate_left(30);
    b = K1
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_rest(d, e, a))
        .wrapping_add(blocks[23]);
    d = d.rotate_left(30);
    a = K1
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_rest(c, d, e))
        .wrapping_add(blocks[24]);
    c = c.rotate_left(30);
    e = K1
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_rest(b, c, d))
        .wrapping_add(blocks[25]);
    b = b.rotate_left(30);
    d = K1
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_rest(a, b, c))
        .wrapping_add(blocks[26]);
    a = a.rotate_left(30);
    c = K1
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_rest(e, a, b))
        .wrapping_add(blocks[27]);
    e = e.rotate_left(30);
    b = K1
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_rest(d, e, a))
        .wrapping_add(blocks[28]);
    d = d.rotate_left(30);
    a = K1
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_rest(c, d, e))
        .wrapping_add(blocks[29]);
    c = c.rotate_left(30);
    e = K1
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_rest(b, c, d))
        .wrapping_add(blocks[30]);
    b = b.rotate_left(30);
    d = K1
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_rest(a, b, c))
        .wrapping_add(blocks[31]);
    a = a.rotate_left(30);
    c = K1
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_rest(e, a, b))
        .wrapping_add(blocks[32]);
    e = e.rotate_left(30);
    b = K1
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_rest(d, e, a))
        .wrapping_add(blocks[33]);
    d = d.rotate_left(30);
    a = K1
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_rest(c, d, e))
        .wrapping_add(blocks[34]);
    c = c.rotate_left(30);
    e = K1
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_rest(b, c, d))
        .wrapping_add(blocks[35]);
    b = b.rotate_left(30);
    d = K1
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_rest(a, b, c))
        .wrapping_add(blocks[36]);
    a = a.rotate_left(30);
    c = K1
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_rest(e, a, b))
        .wrapping_add(blocks[37]);
    e = e.rotate_left(30);
    b = K1
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_rest(d, e, a))
        .wrapping_add(blocks[38]);
    d = d.rotate_left(30);
    a = K1
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_rest(c, d, e))
        .wrapping_add(blocks[39]);
    c = c.rotate_left(30);
    // rounds 40-59
    e = K2
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_40_59(b, c, d))
        .wrapping_add(blocks[40]);
    b = b.rotate_left(30);
    d = K2
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_40_59(a, b, c))
        .wrapping_add(blocks[41]);
    a = a.rotate_left(30);
    c = K2
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_40_59(e, a, b))
        .wrapping_add(blocks[42]);
    e = e.rotate_left(30);
    b = K2
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_40_59(d, e, a))
        .wrapping_add(blocks[43]);
    d = d.rotate_left(30);
    a = K2
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_40_59(c, d, e))
        .wrapping_add(blocks[44]);
    c = c.rotate_left(30);
    e = K2
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_40_59(b, c, d))
        .wrapping_add(blocks[45]);
    b = b.rotate_left(30);
    d = K2
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_40_59(a, b, c))
        .wrapping_add(blocks[46]);
    a = a.rotate_left(30);
    c = K2
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_40_59(e, a, b))
        .wrapping_add(blocks[47]);
    e = e.rotate_left(30);
    b = K2
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_40_59(d, e, a))
        .wrapping_add(blocks[48]);
    d = d.rotate_left(30);
    a = K2
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_40_59(c, d, e))
        .wrapping_add(blocks[49]);
    c = c.rotate_left(30);
    e = K2
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_40_59(b, c, d))
        .wrapping_add(blocks[50]);
    b = b.rotate_left(30);
    d = K2
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_40_59(a, b, c))
        .wrapping_add(blocks[51]);
    a = a.rotate_left(30);
    c = K2
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_40_59(e, a, b))
        .wrapping_add(blocks[52]);
    e = e.rotate_left(30);
    b = K2
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_40_59(d, e, a))
        .wrapping_add(blocks[53]);
    d = d.rotate_left(30);
    a = K2
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_40_59(c, d, e))
        .wrapping_add(blocks[54]);
    c = c.rotate_left(30);
    e = K2
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_40_59(b, c, d))
        .wrapping_add(blocks[55]);
    b = b.rotate_left(30);
    d = K2
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_40_59(a, b, c))
        .wrapping_add(blocks[56]);
    a = a.rotate_left(30);
    c = K2
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_40_59(e, a, b))
        .wrapping_add(blocks[57]);
    e = e.rotate_left(30);
    b = K2
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_40_59(d, e, a))
        .wrapping_add(blocks[58]);
    d = d.rotate_left(30);
    a = K2
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_40_59(c, d, e))
        .wrapping_add(blocks[59]);
    c = c.rotate_left(30);
    // rounds 60-74
    e = K3
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_rest(b, c, d))
        .wrapping_add(blocks[60]);
    b = b.rotate_left(30);
    d = K3
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_rest(a, b, c))
        .wrapping_add(blocks[61]);
    a = a.rotate_left(30);
    c = K3
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_rest(e, a, b))
        .wrapping_add(blocks[62]);
    e = e.rotate_left(30);
    b = K3
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_rest(d, e, a))
        .wrapping_add(blocks[63]);
    d = d.rotate_left(30);
    a = K3
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_rest(c, d, e))
        .wrapping_add(blocks[64]);
    c = c.rotate_left(30);
    e = K3
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_rest(b, c, d))
        .wrapping_add(blocks[65]);
    b = b.rotate_left(30);
    d = K3
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_rest(a, b, c))
        .wrapping_add(blocks[66]);
    a = a.rotate_left(30);
    c = K3
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_rest(e, a, b))
        .wrapping_add(blocks[67]);
    e = e.rotate_left(30);
    b = K3
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_rest(d, e, a))
        .wrapping_add(blocks[68]);
    d = d.rotate_left(30);
    a = K3
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_rest(c, d, e))
        .wrapping_add(blocks[69]);
    c = c.rotate_left(30);
    e = K3
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_rest(b, c, d))
        .wrapping_add(blocks[70]);
    b = b.rotate_left(30);
    d = K3
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_rest(a, b, c))
        .wrapping_add(blocks[71]);
    a = a.rotate_left(30);
    c = K3
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_rest(e, a, b))
        .wrapping_add(blocks[72]);
    e = e.rotate_left(30);
    b = K3
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_rest(d, e, a))
        .wrapping_add(blocks[73]);
    d = d.rotate_left(30);
    a = K3
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_rest(c, d, e))
        .wrapping_add(blocks[74]);
    c = c.rotate_left(30);

    // round 75 + early-exit ladder
    e = K3
        .wrapping_add(e)
        .wrapping_add(a.rotate_left(5))
        .wrapping_add(f_rest(b, c, d))
        .wrapping_add(blocks[75]);
    b = b.rotate_left(30);
    if e != t[4] {
        return false;
    }

    blocks[76] = (blocks[73] ^ blocks[68] ^ blocks[62] ^ blocks[60]).rotate_left(1);
    d = K3
        .wrapping_add(d)
        .wrapping_add(e.rotate_left(5))
        .wrapping_add(f_rest(a, b, c))
        .wrapping_add(blocks[76]);
    a = a.rotate_left(30);
    if d != t[3] {
        return false;
    }

    blocks[77] = (blocks[74] ^ blocks[69] ^ blocks[63] ^ blocks[61]).rotate_left(1);
    c = K3
        .wrapping_add(c)
        .wrapping_add(d.rotate_left(5))
        .wrapping_add(f_rest(e, a, b))
        .wrapping_add(blocks[77]);
    e = e.rotate_left(30);
    if c != t[2] {
        return false;
    }

    blocks[78] = (blocks[75] ^ blocks[70] ^ blocks[64] ^ blocks[62]).rotate_left(1);
    b = K3
        .wrapping_add(b)
        .wrapping_add(c.rotate_left(5))
        .wrapping_add(f_rest(d, e, a))
        .wrapping_add(blocks[78]);
    d = d.rotate_left(30);
    if b != t[1] {
        return false;
    }

    blocks[79] = (blocks[76] ^ blocks[71] ^ blocks[65] ^ blocks[63]).rotate_left(1);
    a = K3
        .wrapping_add(a)
        .wrapping_add(b.rotate_left(5))
        .wrapping_add(f_rest(c, d, e))
        .wrapping_add(blocks[79]);
    c = c.rotate_left(30);

    a == t[0]
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
        // all-zero digest has no six-letter lowercase preimage
        assert_eq!(crack([0, 0, 0, 0, 0]), None);
    }

    #[test]
    fn shard_restricts_to_its_own_two_letters() {
        let target = digest_of(b"zzzzzz");
        assert_eq!(crack_shard(target, b'z', b'z'), Some(*b"zzzzzz"));
        assert_eq!(crack_shard(target, b'a', b'a'), None);
    }
}
