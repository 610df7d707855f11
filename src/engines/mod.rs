//! Engine selection.
//!
//! Exactly one of `engine-scalar` (default), `engine-sse2`, or
//! `engine-avx2` is active in a given build. The choice is made at compile
//! time via Cargo features, never by runtime CPU-feature probing: a binary
//! built with `engine-avx2` is asserting that it will only ever run on
//! hardware that supports AVX2.

mod scalar;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod sse2;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod avx2;

#[cfg(all(feature = "engine-sse2", feature = "engine-avx2"))]
compile_error!("features `engine-sse2` and `engine-avx2` are mutually exclusive");
#[cfg(all(feature = "engine-scalar", feature = "engine-sse2"))]
compile_error!("features `engine-scalar` and `engine-sse2` are mutually exclusive");
#[cfg(all(feature = "engine-scalar", feature = "engine-avx2"))]
compile_error!("features `engine-scalar` and `engine-avx2` are mutually exclusive");

#[cfg(all(feature = "engine-sse2", not(any(target_arch = "x86", target_arch = "x86_64"))))]
compile_error!("`engine-sse2` requires an x86 or x86_64 target");
#[cfg(all(feature = "engine-avx2", not(any(target_arch = "x86", target_arch = "x86_64"))))]
compile_error!("`engine-avx2` requires an x86 or x86_64 target");

#[cfg(feature = "engine-avx2")]
pub use avx2::{crack, crack_shard, ENGINE_NAME};

#[cfg(all(feature = "engine-sse2", not(feature = "engine-avx2")))]
pub use sse2::{crack, crack_shard, ENGINE_NAME};

#[cfg(not(any(feature = "engine-avx2", feature = "engine-sse2")))]
pub use scalar::{crack, crack_shard, ENGINE_NAME};
