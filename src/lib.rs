// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Brute-force SHA-1 preimage search over the 308,915,776 six-letter
//! lowercase strings `[a-z]{6}`.
//!
//! The search exploits two properties of this fixed-size input: the padded
//! message is always a single 512-bit block, and most of its schedule words
//! are either always zero or always the same bit-length constant. That lets
//! every engine precompute most of the message schedule before the two
//! innermost loops ever run, and bail out of the 80-round compression as
//! soon as one of the last five words disagrees with the target digest.
//!
//! Three engines implement the same search at different SIMD widths; the
//! active one is chosen at compile time by Cargo feature, never by runtime
//! CPU probing:
//!
//! * `engine-scalar` (default): one candidate per compression, portable.
//! * `engine-sse2`: four candidates per compression, x86/x86_64 only.
//! * `engine-avx2`: eight candidates per compression, x86/x86_64 only.
//!
//! ```
//! let target = [
//!     0x755BD810, 0xD2BE0EBC, 0xBB6CE6F5, 0x32B3D9CF, 0xCF9D9695,
//! ];
//! assert_eq!(sha1_cracker::crack(target), Ok(*b"ananas"));
//! ```

#![warn(clippy::all)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::identity_op)]
#![allow(clippy::many_single_char_names)]

mod consts;
mod digest;
mod engines;
mod error;
mod schedule;
mod simd_check;

pub use error::{NotFound, NOT_FOUND_CODE};

/// Searches the full `[a-z]{6}` space for a preimage of `target`, a SHA-1
/// digest expressed as five big-endian 32-bit words (`H0..H4` in RFC 3174
/// terms).
///
/// Returns `Err(NotFound)` if no such preimage exists, which takes roughly
/// as long as a full, exhaustive search.
pub fn crack(target: [u32; 5]) -> Result<[u8; 6], NotFound> {
    simd_check::assert_cpu_support();
    #[cfg(feature = "tracing")]
    tracing::debug!(engine = engines::ENGINE_NAME, "starting search");

    let result = engines::crack(target);

    #[cfg(feature = "tracing")]
    match result {
        Some(preimage) => tracing::info!(
            shard = format!("{}{}", preimage[4] as char, preimage[5] as char),
            "preimage found"
        ),
        None => tracing::debug!("search space exhausted, no preimage found"),
    }

    result.ok_or(NotFound)
}

/// Searches only the shard of the space fixed by the trailing two letters
/// `p4`, `p5` (`26 * 26 = 676` shards cover the full space). Intended for
/// callers that split the search across processes or machines themselves;
/// [`crack`] is the right entry point for a single-process search.
pub fn crack_shard(target: [u32; 5], p4: u8, p5: u8) -> Result<[u8; 6], NotFound> {
    assert!(
        p4.is_ascii_lowercase() && p5.is_ascii_lowercase(),
        "shard letters must be in [a-z]"
    );
    simd_check::assert_cpu_support();
    #[cfg(feature = "tracing")]
    tracing::debug!(
        engine = engines::ENGINE_NAME,
        p4 = p4 as char,
        p5 = p5 as char,
        "starting shard search"
    );
    engines::crack_shard(target, p4, p5).ok_or(NotFound)
}

/// C-ABI-friendly variant of [`crack`]: writes the preimage into `out` and
/// returns `0` on success or [`NOT_FOUND_CODE`] otherwise, instead of
/// going through `Result`.
pub fn crack_into(target: [u32; 5], out: &mut [u8; 6]) -> i32 {
    match crack(target) {
        Ok(preimage) => {
            *out = preimage;
            0
        }
        Err(_) => error::NOT_FOUND_CODE,
    }
}

/// The name of the engine compiled into this build (`"scalar"`, `"sse2"`,
/// or `"avx2"`).
pub const ENGINE_NAME: &str = engines::ENGINE_NAME;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crack_reports_success() {
        let target = [0x755BD810, 0xD2BE0EBC, 0xBB6CE6F5, 0x32B3D9CF, 0xCF9D9695];
        assert_eq!(crack(target), Ok(*b"ananas"));
    }

    #[test]
    fn crack_reports_not_found() {
        assert_eq!(crack([0, 0, 0, 0, 0]), Err(NotFound));
    }

    #[test]
    fn crack_into_writes_the_preimage() {
        let target = [0x755BD810, 0xD2BE0EBC, 0xBB6CE6F5, 0x32B3D9CF, 0xCF9D9695];
        let mut out = [0u8; 6];
        assert_eq!(crack_into(target, &mut out), 0);
        assert_eq!(&out, b"ananas");
    }

    #[test]
    fn crack_into_reports_not_found_code() {
        let mut out = [0u8; 6];
        assert_eq!(crack_into([0, 0, 0, 0, 0], &mut out), error::NOT_FOUND_CODE);
    }

    #[test]
    #[should_panic(expected = "[a-z]")]
    fn crack_shard_rejects_non_lowercase_letters() {
        let _ = crack_shard([0, 0, 0, 0, 0], b'A', b'a');
    }
}
