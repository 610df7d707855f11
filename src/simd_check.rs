//! A one-time runtime capability check, separate from the engines'
//! compile-time feature selection. A binary built with `engine-sse2` or
//! `engine-avx2` asserts it will only run on hardware with that extension;
//! this just turns a silent illegal-instruction crash into a clear panic
//! message when that assertion was wrong.

#[cfg(all(feature = "engine-sse2", any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) fn assert_cpu_support() {
    assert!(
        std::is_x86_feature_detected!("sse2"),
        "sha1-cracker was built with `engine-sse2` but this CPU has no SSE2 support"
    );
}

#[cfg(all(feature = "engine-avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) fn assert_cpu_support() {
    assert!(
        std::is_x86_feature_detected!("avx2"),
        "sha1-cracker was built with `engine-avx2` but this CPU has no AVX2 support"
    );
}

#[cfg(not(any(feature = "engine-sse2", feature = "engine-avx2")))]
pub(crate) fn assert_cpu_support() {}
