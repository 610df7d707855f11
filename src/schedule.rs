//! Message-schedule precomputation shared by every engine.
//!
//! A candidate block is split into an "outer" half, depending only on
//! `W[1]` (the two letters fixed for the whole shard), and an "inner" half,
//! depending on `W[0]` (the four letters that vary on every iteration of the
//! innermost loops). `W[2..=14]` are always zero and `W[15]` is the fixed
//! bit-length word, so both halves fold those away entirely.
//!
//! Schedule words 16..=75 are expressed as `outer[i] ^ rotl(W[0], k)` for a
//! small set of rotation amounts `k` per index — the XOR-of-rotations
//! expansion of the usual `W[i] = rotl(W[i-3]^W[i-8]^W[i-14]^W[i-16], 1)`
//! recurrence once everything that doesn't depend on `W[0]` is pulled out.
//! Indices 76..=79 are cheapest to recompute live against the real filled
//! schedule once a shard survives that far, so they live in the early-exit
//! ladder instead of this table.

use crate::consts::{H0, H1, H2, H3, H4, PREIMAGE_LENGTH_BIT};

/// Schedule words 16..=75 that depend only on `W[1]`. Indices 0..16 are
/// unused and left zero.
pub(crate) struct OuterSchedule {
    words: [u32; 76],
}

impl OuterSchedule {
    pub(crate) fn precompute(w1: u32) -> Self {
        let mut w = [0u32; 76];
        let w15 = PREIMAGE_LENGTH_BIT;

        w[17] = w1.rotate_left(1);
        w[18] = w15.rotate_left(1);
        w[20] = w[17].rotate_left(1);
        w[21] = w[18].rotate_left(1);
        w[23] = (w[20] ^ w15).rotate_left(1);
        w[24] = w[21].rotate_left(1);
        w[25] = w[17].rotate_left(1);
        w[26] = (w[23] ^ w[18]).rotate_left(1);
        w[27] = w[24].rotate_left(1);
        w[28] = (w[25] ^ w[20]).rotate_left(1);
        w[29] = (w[26] ^ w[21] ^ w15).rotate_left(1);
        w[30] = w[27].rotate_left(1);
        w[31] = (w[28] ^ w[23] ^ w[17] ^ w15).rotate_left(1);
        w[32] = (w[29] ^ w[24] ^ w[18]).rotate_left(1);
        w[33] = (w[30] ^ w[25] ^ w[17]).rotate_left(1);
        w[34] = (w[31] ^ w[26] ^ w[20] ^ w[18]).rotate_left(1);
        w[35] = (w[32] ^ w[27] ^ w[21]).rotate_left(1);
        w[36] = (w[33] ^ w[28] ^ w[20]).rotate_left(1);
        w[37] = (w[34] ^ w[29] ^ w[23] ^ w[21]).rotate_left(1);
        w[38] = (w[35] ^ w[30] ^ w[24]).rotate_left(1);
        w[39] = (w[36] ^ w[31] ^ w[25] ^ w[23]).rotate_left(1);
        w[40] = (w[37] ^ w[32] ^ w[26] ^ w[24]).rotate_left(1);
        w[41] = (w[38] ^ w[33] ^ w[27] ^ w[25]).rotate_left(1);
        w[42] = (w[39] ^ w[34] ^ w[28] ^ w[26]).rotate_left(1);
        w[43] = (w[40] ^ w[35] ^ w[29] ^ w[27]).rotate_left(1);
        w[44] = (w[41] ^ w[36] ^ w[30] ^ w[28]).rotate_left(1);
        w[45] = (w[42] ^ w[37] ^ w[31] ^ w[29]).rotate_left(1);
        w[46] = (w[43] ^ w[38] ^ w[32] ^ w[30]).rotate_left(1);
        w[47] = (w[44] ^ w[39] ^ w[33] ^ w[31]).rotate_left(1);
        w[48] = (w[45] ^ w[40] ^ w[34] ^ w[32]).rotate_left(1);
        w[49] = (w[46] ^ w[41] ^ w[35] ^ w[33]).rotate_left(1);
        w[50] = (w[47] ^ w[42] ^ w[36] ^ w[34]).rotate_left(1);
        w[51] = (w[48] ^ w[43] ^ w[37] ^ w[35]).rotate_left(1);
        w[52] = (w[49] ^ w[44] ^ w[38] ^ w[36]).rotate_left(1);
        w[53] = (w[50] ^ w[45] ^ w[39] ^ w[37]).rotate_left(1);
        w[54] = (w[51] ^ w[46] ^ w[40] ^ w[38]).rotate_left(1);
        w[55] = (w[52] ^ w[47] ^ w[41] ^ w[39]).rotate_left(1);
        w[56] = (w[53] ^ w[48] ^ w[42] ^ w[40]).rotate_left(1);
        w[57] = (w[54] ^ w[49] ^ w[43] ^ w[41]).rotate_left(1);
        w[58] = (w[55] ^ w[50] ^ w[44] ^ w[42]).rotate_left(1);
        w[59] = (w[56] ^ w[51] ^ w[45] ^ w[43]).rotate_left(1);
        w[60] = (w[57] ^ w[52] ^ w[46] ^ w[44]).rotate_left(1);
        w[61] = (w[58] ^ w[53] ^ w[47] ^ w[45]).rotate_left(1);
        w[62] = (w[59] ^ w[54] ^ w[48] ^ w[46]).rotate_left(1);
        w[63] = (w[60] ^ w[55] ^ w[49] ^ w[47]).rotate_left(1);
        w[64] = (w[61] ^ w[56] ^ w[50] ^ w[48]).rotate_left(1);
        w[65] = (w[62] ^ w[57] ^ w[51] ^ w[49]).rotate_left(1);
        w[66] = (w[63] ^ w[58] ^ w[52] ^ w[50]).rotate_left(1);
        w[67] = (w[64] ^ w[59] ^ w[53] ^ w[51]).rotate_left(1);
        w[68] = (w[65] ^ w[60] ^ w[54] ^ w[52]).rotate_left(1);
        w[69] = (w[66] ^ w[61] ^ w[55] ^ w[53]).rotate_left(1);
        w[70] = (w[67] ^ w[62] ^ w[56] ^ w[54]).rotate_left(1);
        w[71] = (w[68] ^ w[63] ^ w[57] ^ w[55]).rotate_left(1);
        w[72] = (w[69] ^ w[64] ^ w[58] ^ w[56]).rotate_left(1);
        w[73] = (w[70] ^ w[65] ^ w[59] ^ w[57]).rotate_left(1);
        w[74] = (w[71] ^ w[66] ^ w[60] ^ w[58]).rotate_left(1);
        w[75] = (w[72] ^ w[67] ^ w[61] ^ w[59]).rotate_left(1);

        OuterSchedule { words: w }
    }

    #[inline(always)]
    pub(crate) fn word(&self, i: usize) -> u32 {
        self.words[i]
    }
}

/// For each schedule index 16..=75 (stored at `[i - 16]`), the set of
/// rotation amounts `k` such that `schedule[i] = outer[i] ^ rotl(W[0], k1) ^
/// rotl(W[0], k2) ^ ...`.
pub(crate) const W0_CONTRIBUTIONS: [&[u8]; 60] = [
    &[1],              // 16
    &[],               // 17
    &[],               // 18
    &[2],              // 19
    &[],               // 20
    &[],               // 21
    &[3],              // 22
    &[],               // 23
    &[2],              // 24
    &[4],              // 25
    &[],               // 26
    &[],               // 27
    &[5],              // 28
    &[],               // 29
    &[4, 2],           // 30
    &[6],              // 31
    &[3, 2],           // 32
    &[],               // 33
    &[7],              // 34
    &[4],              // 35
    &[6, 4],           // 36
    &[8],              // 37
    &[4],              // 38
    &[],               // 39
    &[4, 9],           // 40
    &[],               // 41
    &[6, 8],           // 42
    &[10],             // 43
    &[6, 3, 7],        // 44
    &[],               // 45
    &[4, 11],          // 46
    &[8, 4],           // 47
    &[8, 4, 3, 10, 5], // 48
    &[12],             // 49
    &[8],              // 50
    &[6, 4],           // 51
    &[8, 4, 13],       // 52
    &[],               // 53
    &[7, 10, 12],      // 54
    &[14],             // 55
    &[6, 4, 11, 7, 10],// 56
    &[8],              // 57
    &[8, 4, 15],       // 58
    &[8, 12],          // 59
    &[8, 4, 7, 12, 14],// 60
    &[16],             // 61
    &[6, 12, 8, 4],    // 62
    &[8],              // 63
    &[6, 7, 17, 12, 8, 4], // 64
    &[],               // 65
    &[14, 16],         // 66
    &[8, 18],          // 67
    &[11, 14, 15],     // 68
    &[],               // 69
    &[12, 19],         // 70
    &[12, 16],         // 71
    &[11, 12, 18, 13, 16, 5], // 72
    &[20],             // 73
    &[8, 16],          // 74
    &[6, 12, 14],      // 75
];

/// Fills `blocks[16..=75]` from the outer table and `W[0]`'s rotations.
/// `blocks[0]` and `blocks[1]` must already hold the candidate's two
/// schedule words.
#[inline]
pub(crate) fn fill_inner(outer: &OuterSchedule, w0: u32, blocks: &mut [u32; 80]) {
    let mut rot = [0u32; 21];
    for (k, slot) in rot.iter_mut().enumerate().skip(1) {
        *slot = w0.rotate_left(k as u32);
    }
    for i in 16..=75usize {
        let mut v = outer.word(i);
        for &k in W0_CONTRIBUTIONS[i - 16] {
            v ^= rot[k as usize];
        }
        blocks[i] = v;
    }
}

/// Transforms a target digest into the values the round-79..75 partial
/// states must equal, so the early-exit ladder can compare against them
/// directly instead of finishing the compression and re-adding the IV.
///
/// Derivation: the final digest is `H + state`, so `state = digest - H`.
/// Because round 79 only ever touches `a`, but the ladder inspects the
/// round's output variable two rounds before it settles back into `a`
/// (the variable naming cycles every 5 rounds), the three middle words
/// need an extra `rotl(_, 2)` to line up with the physical register that
/// holds them at that point in the cycle.
#[inline]
pub(crate) fn early_exit_target(target: [u32; 5]) -> [u32; 5] {
    [
        target[0].wrapping_sub(H0),
        target[1].wrapping_sub(H1),
        target[2].wrapping_sub(H2).rotate_left(2),
        target[3].wrapping_sub(H3).rotate_left(2),
        target[4].wrapping_sub(H4).rotate_left(2),
    ]
}

/// Vectorized twin of [`OuterSchedule`]/[`fill_inner`] for the SSE2 engine,
/// where `W[1]` (and hence the whole outer table) is broadcast identically
/// across all four lanes — only `W[0]` varies lane-to-lane.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod vector128 {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::*;
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::*;

    use super::W0_CONTRIBUTIONS;
    use crate::consts::PREIMAGE_LENGTH_BIT;

    pub(crate) struct OuterScheduleVec128 {
        words: [__m128i; 76],
    }

    impl OuterScheduleVec128 {
        #[target_feature(enable = "sse2")]
        pub(crate) unsafe fn precompute(w1: __m128i) -> Self {
            let mut w = [_mm_setzero_si128(); 76];
            let w15 = _mm_set1_epi32(PREIMAGE_LENGTH_BIT as i32);

            w[17] = rotl(w1, 1);
            w[18] = rotl(w15, 1);
            w[20] = rotl(w[17], 1);
            w[21] = rotl(w[18], 1);
            w[23] = rotl(xor2(w[20], w15), 1);
            w[24] = rotl(w[21], 1);
            w[25] = rotl(w[17], 1);
            w[26] = rotl(xor2(w[23], w[18]), 1);
            w[27] = rotl(w[24], 1);
            w[28] = rotl(xor2(w[25], w[20]), 1);
            w[29] = rotl(xor3(w[26], w[21], w15), 1);
            w[30] = rotl(w[27], 1);
            w[31] = rotl(xor4(w[28], w[23], w[17], w15), 1);
            w[32] = rotl(xor3(w[29], w[24], w[18]), 1);
            w[33] = rotl(xor3(w[30], w[25], w[17]), 1);
            w[34] = rotl(xor4(w[31], w[26], w[20], w[18]), 1);
            w[35] = rotl(xor3(w[32], w[27], w[21]), 1);
            w[36] = rotl(xor3(w[33], w[28], w[20]), 1);
            w[37] = rotl(xor4(w[34], w[29], w[23], w[21]), 1);
            w[38] = rotl(xor3(w[35], w[30], w[24]), 1);
            w[39] = rotl(xor4(w[36], w[31], w[25], w[23]), 1);
            for i in 40..=75usize {
                w[i] = rotl(xor4(w[i - 3], w[i - 8], w[i - 14], w[i - 16]), 1);
            }

            OuterScheduleVec128 { words: w }
        }

        #[inline(always)]
        pub(crate) fn word(&self, i: usize) -> __m128i {
            self.words[i]
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn rotl(x: __m128i, n: u32) -> __m128i {
        _mm_or_si128(_mm_slli_epi32(x, n as i32), _mm_srli_epi32(x, 32 - n as i32))
    }

    #[target_feature(enable = "sse2")]
    unsafe fn xor2(a: __m128i, b: __m128i) -> __m128i {
        _mm_xor_si128(a, b)
    }

    #[target_feature(enable = "sse2")]
    unsafe fn xor3(a: __m128i, b: __m128i, c: __m128i) -> __m128i {
        _mm_xor_si128(_mm_xor_si128(a, b), c)
    }

    #[target_feature(enable = "sse2")]
    unsafe fn xor4(a: __m128i, b: __m128i, c: __m128i, d: __m128i) -> __m128i {
        _mm_xor_si128(_mm_xor_si128(a, b), _mm_xor_si128(c, d))
    }

    #[target_feature(enable = "sse2")]
    pub(crate) unsafe fn fill_inner_vec128(
        outer: &OuterScheduleVec128,
        w0: __m128i,
        blocks: &mut [__m128i; 80],
    ) {
        let mut rot = [_mm_setzero_si128(); 21];
        for (k, slot) in rot.iter_mut().enumerate().skip(1) {
            *slot = rotl(w0, k as u32);
        }
        for i in 16..=75usize {
            let mut v = outer.word(i);
            for &k in W0_CONTRIBUTIONS[i - 16] {
                v = _mm_xor_si128(v, rot[k as usize]);
            }
            blocks[i] = v;
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) use vector128::{fill_inner_vec128, OuterScheduleVec128};

/// Vectorized twin of [`OuterSchedule`]/[`fill_inner`] for the AVX2 engine,
/// eight lanes wide.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod vector256 {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::*;
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::*;

    use super::W0_CONTRIBUTIONS;
    use crate::consts::PREIMAGE_LENGTH_BIT;

    pub(crate) struct OuterScheduleVec256 {
        words: [__m256i; 76],
    }

    impl OuterScheduleVec256 {
        #[target_feature(enable = "avx2")]
        pub(crate) unsafe fn precompute(w1: __m256i) -> Self {
            let mut w = [_mm256_setzero_si256(); 76];
            let w15 = _mm256_set1_epi32(PREIMAGE_LENGTH_BIT as i32);

            w[17] = rotl(w1, 1);
            w[18] = rotl(w15, 1);
            w[20] = rotl(w[17], 1);
            w[21] = rotl(w[18], 1);
            w[23] = rotl(xor2(w[20], w15), 1);
            w[24] = rotl(w[21], 1);
            w[25] = rotl(w[17], 1);
            w[26] = rotl(xor2(w[23], w[18]), 1);
            w[27] = rotl(w[24], 1);
            w[28] = rotl(xor2(w[25], w[20]), 1);
            w[29] = rotl(xor3(w[26], w[21], w15), 1);
            w[30] = rotl(w[27], 1);
            w[31] = rotl(xor4(w[28], w[23], w[17], w15), 1);
            w[32] = rotl(xor3(w[29], w[24], w[18]), 1);
            w[33] = rotl(xor3(w[30], w[25], w[17]), 1);
            w[34] = rotl(xor4(w[31], w[26], w[20], w[18]), 1);
            w[35] = rotl(xor3(w[32], w[27], w[21]), 1);
            w[36] = rotl(xor3(w[33], w[28], w[20]), 1);
            w[37] = rotl(xor4(w[34], w[29], w[23], w[21]), 1);
            w[38] = rotl(xor3(w[35], w[30], w[24]), 1);
            w[39] = rotl(xor4(w[36], w[31], w[25], w[23]), 1);
            for i in 40..=75usize {
                w[i] = rotl(xor4(w[i - 3], w[i - 8], w[i - 14], w[i - 16]), 1);
            }

            OuterScheduleVec256 { words: w }
        }

        #[inline(always)]
        pub(crate) fn word(&self, i: usize) -> __m256i {
            self.words[i]
        }
    }

    #[target_feature(enable = "avx2")]
    unsafe fn rotl(x: __m256i, n: u32) -> __m256i {
        _mm256_or_si256(
            _mm256_slli_epi32(x, n as i32),
            _mm256_srli_epi32(x, 32 - n as i32),
        )
    }

    #[target_feature(enable = "avx2")]
    unsafe fn xor2(a: __m256i, b: __m256i) -> __m256i {
        _mm256_xor_si256(a, b)
    }

    #[target_feature(enable = "avx2")]
    unsafe fn xor3(a: __m256i, b: __m256i, c: __m256i) -> __m256i {
        _mm256_xor_si256(_mm256_xor_si256(a, b), c)
    }

    #[target_feature(enable = "avx2")]
    unsafe fn xor4(a: __m256i, b: __m256i, c: __m256i, d: __m256i) -> __m256i {
        _mm256_xor_si256(_mm256_xor_si256(a, b), _mm256_xor_si256(c, d))
    }

    #[target_feature(enable = "avx2")]
    pub(crate) unsafe fn fill_inner_vec256(
        outer: &OuterScheduleVec256,
        w0: __m256i,
        blocks: &mut [__m256i; 80],
    ) {
        let mut rot = [_mm256_setzero_si256(); 21];
        for (k, slot) in rot.iter_mut().enumerate().skip(1) {
            *slot = rotl(w0, k as u32);
        }
        for i in 16..=75usize {
            let mut v = outer.word(i);
            for &k in W0_CONTRIBUTIONS[i - 16] {
                v = _mm256_xor_si256(v, rot[k as usize]);
            }
            blocks[i] = v;
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) use vector256::{fill_inner_vec256, OuterScheduleVec256};
