//! End-to-end vectors against whichever engine this test binary was built
//! with (`cargo test`, `cargo test --no-default-features --features
//! engine-sse2`, `... engine-avx2`).

const ANANAS: [u32; 5] = [0x755BD810, 0xD2BE0EBC, 0xBB6CE6F5, 0x32B3D9CF, 0xCF9D9695];
const PASSWD: [u32; 5] = [0x30274C47, 0x903BD1BA, 0xC7633BBF, 0x09743149, 0xEBAB805F];
const QFUCRA: [u32; 5] = [0x3854E277, 0xA37AEE29, 0xBF9ECC86, 0xFB983737, 0xCF9D9695];
const SWORDS: [u32; 5] = [0xD6056E47, 0xD33A009D, 0x754613AF, 0xBB20A3A3, 0x86496177];
const ZZZZZZ: [u32; 5] = [0x984FF6EE, 0x7C78078D, 0x4CB1CA08, 0x255303FB, 0x8741D986];

#[test]
fn finds_ananas() {
    assert_eq!(sha1_cracker::crack(ANANAS), Ok(*b"ananas"));
}

#[test]
fn finds_passwd() {
    assert_eq!(sha1_cracker::crack(PASSWD), Ok(*b"passwd"));
}

#[test]
fn finds_qfucra() {
    assert_eq!(sha1_cracker::crack(QFUCRA), Ok(*b"qfucra"));
}

#[test]
fn finds_swords() {
    assert_eq!(sha1_cracker::crack(SWORDS), Ok(*b"swords"));
}

#[test]
fn finds_zzzzzz_the_last_candidate_in_traversal_order() {
    assert_eq!(sha1_cracker::crack(ZZZZZZ), Ok(*b"zzzzzz"));
}

#[test]
fn all_zero_digest_is_not_found() {
    assert_eq!(sha1_cracker::crack([0, 0, 0, 0, 0]), Err(sha1_cracker::NotFound));
}

#[test]
fn finds_aaaaaa_the_first_candidate_in_traversal_order() {
    // SHA-1("aaaaaa")
    let target = [0xF7A9_E247, 0x77EC_2321, 0x2C54_D7A3, 0x50BC_5BEA, 0x5477_FDBB];
    assert_eq!(sha1_cracker::crack(target), Ok(*b"aaaaaa"));
}

#[test]
fn crack_into_round_trips_with_crack() {
    let mut out = [0u8; 6];
    assert_eq!(sha1_cracker::crack_into(ANANAS, &mut out), 0);
    assert_eq!(&out, b"ananas");
}

#[test]
fn crack_shard_finds_the_preimage_in_its_own_shard() {
    // "ananas" = a n a n a s -> the fifth and sixth letters are 'a', 's'
    assert_eq!(
        sha1_cracker::crack_shard(ANANAS, b'a', b's'),
        Ok(*b"ananas")
    );
}

#[test]
fn crack_shard_reports_not_found_outside_its_shard() {
    assert_eq!(sha1_cracker::crack_shard(ANANAS, b'z', b'z'), Err(sha1_cracker::NotFound));
}
