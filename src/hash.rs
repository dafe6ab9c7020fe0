mod sha256;

pub use sha256::{end_shastream, pad64, sha256, Midstate, BLOCK_BYTES, DIGEST_BYTES};
