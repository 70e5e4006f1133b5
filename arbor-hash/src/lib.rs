// File: arbor-hash/src/lib.rs
use sha2::{Digest as _, Sha256};
use thiserror::Error;

pub const DIGEST_LEN: usize = 32; // 256-bit output

/// Fixed-size output of the tree hash function.
pub type Digest = [u8; DIGEST_LEN];

#[derive(Debug, Error)]
pub enum HexError {
    #[error("invalid hex: {0}")]
    Decode(#[from] hex::FromHexError),
    #[error("digest must be {DIGEST_LEN} bytes, got {0}")]
    Length(usize),
}

/// Hash the canonical byte encoding of one element.
#[inline]
pub fn hash_leaf(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Hash `left || right` with no label, prefix or separator.
#[inline]
pub fn hash_internal(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

pub fn to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

pub fn from_hex(input: &str) -> Result<Digest, HexError> {
    let bytes = hex::decode(input.trim_start_matches("0x"))?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| HexError::Length(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_hash_is_plain_sha256() {
        // sha256("abc")
        let expected = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        assert_eq!(to_hex(&hash_leaf(b"abc")), expected);
    }

    #[test]
    fn internal_hash_is_raw_concatenation() {
        let l = hash_leaf(b"a");
        let r = hash_leaf(b"b");
        let mut cat = Vec::with_capacity(2 * DIGEST_LEN);
        cat.extend_from_slice(&l);
        cat.extend_from_slice(&r);
        assert_eq!(hash_internal(&l, &r), hash_leaf(&cat));
        assert_ne!(hash_internal(&l, &r), hash_internal(&r, &l));
    }

    #[test]
    fn hashing_is_deterministic() {
        assert_eq!(hash_leaf(b"John"), hash_leaf(b"John"));
        assert_ne!(hash_leaf(b"John"), hash_leaf(b"john"));
    }

    #[test]
    fn hex_roundtrip_and_length_check() {
        let d = hash_leaf(b"x");
        assert_eq!(from_hex(&to_hex(&d)).unwrap(), d);
        assert_eq!(from_hex(&format!("0x{}", to_hex(&d))).unwrap(), d);
        assert!(matches!(from_hex("abcd"), Err(HexError::Length(2))));
        assert!(matches!(from_hex("zz"), Err(HexError::Decode(_))));
    }
}
