use crate::{end_shastream, pad64, sha256, Midstate};

fn test(preimage: &[u8], expected: &[u8]) {
    let digest = sha256(preimage);
    assert_eq!(
        digest.as_slice(),
        expected,
        "invalid hash for:\n{preimage:#?}\n\nexpected:\n{expected:#?}\n\ngot:\n{digest:#?}"
    );
}

/// SHA-256 test vectors, from FIPS 180-4.
#[test]
fn sha256_vectors() {
    test(
        b"abc",
        &[
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ],
    );

    test(
        b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
        &[
            0x24, 0x8d, 0x6a, 0x61, 0xd2, 0x06, 0x38, 0xb8, 0xe5, 0xc0, 0x26, 0x93, 0x0c, 0x3e,
            0x60, 0x39, 0xa3, 0x3c, 0xe4, 0x59, 0x64, 0xff, 0x21, 0x67, 0xf6, 0xec, 0xed, 0xd4,
            0x19, 0xdb, 0x06, 0xc1,
        ],
    );

    test(b"", &[
        0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f,
        0xb9, 0x24, 0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b,
        0x78, 0x52, 0xb8, 0x55,
    ]);
}

#[test]
fn pad64_reaches_next_block_boundary() {
    for len in 0u64..200 {
        assert_eq!((len + pad64(len)) % 64, 0);
    }
}

#[test]
fn end_shastream_length_is_pad64_plus_nine() {
    for len in 0u64..200 {
        assert_eq!(end_shastream(len).len() as u64, pad64(len + 9) + 9);
    }
}

/// For all byte streams, hashing with an explicit terminator through the
/// midstate path matches the one-shot digest.
#[test]
fn midstate_matches_one_shot_hash_across_lengths() {
    for len in [0usize, 1, 55, 56, 63, 64, 65, 127, 128, 200, 1024] {
        let data: Vec<u8> = (0..len).map(|i| (i % 256) as u8).collect();
        let expected = sha256(&data);

        let mut midstate = Midstate::new();
        midstate.update(&data);
        let got = midstate.finalize();

        assert_eq!(got, expected, "mismatch at length {len}");
    }
}

/// A midstate read back out and restored into a fresh instance must resume
/// hashing exactly where the original left off.
#[test]
fn midstate_get_set_round_trips() {
    let prefix = b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcd";
    assert_eq!(prefix.len(), 64);
    let suffix = b"more data after the first block";

    let expected = sha256(&[prefix.as_slice(), suffix.as_slice()].concat());

    let mut first = Midstate::new();
    first.update(prefix);
    let (digest, length) = first.state();

    let mut resumed = Midstate::new();
    resumed.set_state(digest, length);
    resumed.update(suffix);
    let got = resumed.finalize();

    assert_eq!(got, expected);
}
