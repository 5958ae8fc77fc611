//! SHA-256 primitives over chunks.
use super::{Node, BYTES_PER_CHUNK};
use ::sha2::{Digest, Sha256};

/// SHA-256 digest of `data`.
#[inline]
pub fn hash(data: impl AsRef<[u8]>) -> Node {
    Node::from(<[u8; BYTES_PER_CHUNK]>::from(Sha256::digest(data.as_ref())))
}

/// Combine two chunks into their parent: `H(left || right)`.
#[inline]
pub fn hash_chunks(left: impl AsRef<[u8]>, right: impl AsRef<[u8]>) -> Node {
    debug_assert!(left.as_ref().len() == BYTES_PER_CHUNK);
    debug_assert!(right.as_ref().len() == BYTES_PER_CHUNK);
    let mut hasher = Sha256::new();
    hash_chunks_with(&mut hasher, left, right)
}

/// As [`hash_chunks`] but reusing the state of `hasher`, which is left reset.
#[inline]
pub fn hash_chunks_with(
    hasher: &mut Sha256,
    left: impl AsRef<[u8]>,
    right: impl AsRef<[u8]>,
) -> Node {
    hasher.update(left.as_ref());
    hasher.update(right.as_ref());
    Node::from(<[u8; BYTES_PER_CHUNK]>::from(hasher.finalize_reset()))
}

/// The chunk encoding a length: `uint64` little-endian, zero-padded to 32 bytes.
#[inline]
pub fn length_chunk(length: usize) -> Node {
    let mut chunk = Node::ZERO;
    chunk[..8].copy_from_slice(&(length as u64).to_le_bytes());
    chunk
}

/// `H(root || uint64_le(length) || 0^24)`.
#[inline]
pub fn mix_in_length(root: Node, length: usize) -> Node {
    hash_chunks(root, length_chunk(length))
}
