//! A plain, unoptimized SHA-1 used only as a test oracle to produce target
//! digests for known preimages. Not part of the crate's public surface —
//! the engines in [`crate::engines`] are the actual product.

use crate::consts::{f_00_19, f_40_59, f_rest, H0, H1, H2, H3, H4, K0, K1, K2, K3};

pub(crate) fn sha1(message: &[u8]) -> [u32; 5] {
    let mut padded = message.to_vec();
    let bit_len = (message.len() as u64) * 8;
    padded.push(0x80);
    while padded.len() % 64 != 56 {
        padded.push(0);
    }
    padded.extend_from_slice(&bit_len.to_be_bytes());

    let mut state = [H0, H1, H2, H3, H4];
    for block in padded.chunks_exact(64) {
        compress(&mut state, block);
    }
    state
}

pub(crate) fn sha1_six_bytes(preimage: &[u8; 6]) -> [u32; 5] {
    sha1(preimage)
}

fn compress(state: &mut [u32; 5], block: &[u8]) {
    let mut w = [0u32; 80];
    for (i, chunk) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    for i in 16..80 {
        w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
    }

    let [mut a, mut b, mut c, mut d, mut e] = *state;
    for (i, &wi) in w.iter().enumerate() {
        let (f, k) = match i {
            0..=19 => (f_00_19(b, c, d), K0),
            20..=39 => (f_rest(b, c, d), K1),
            40..=59 => (f_40_59(b, c, d), K2),
            _ => (f_rest(b, c, d), K3),
        };
        let t = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(wi);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = t;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_digest() {
        let got = sha1(b"ananas");
        let want = [
            0x755BD810u32,
            0xD2BE0EBC,
            0xBB6CE6F5,
            0x32B3D9CF,
            0xCF9D9695,
        ];
        assert_eq!(got, want);
    }
}
