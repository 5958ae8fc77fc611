//! Roots of all-zero subtrees, one per depth.
use super::{hasher::hash_chunks, MerkleizationError as Error, Node};
use crate::lib::*;
use log::trace;
use std::sync::LazyLock;

/// Greatest depth with a precomputed zero root.
pub const MAX_ZERO_HASH_DEPTH: usize = 64;

/// Immutable table where entry `i` is the root of a perfect tree of `2^i` zero chunks.
#[derive(Debug)]
pub struct ZeroHashes {
    hashes: [Node; MAX_ZERO_HASH_DEPTH + 1],
}

impl ZeroHashes {
    fn compute() -> Self {
        trace!("computing zero hashes up to depth {MAX_ZERO_HASH_DEPTH}");
        let mut hashes = [Node::ZERO; MAX_ZERO_HASH_DEPTH + 1];
        for depth in 1..=MAX_ZERO_HASH_DEPTH {
            hashes[depth] = hash_chunks(hashes[depth - 1], hashes[depth - 1]);
        }
        Self { hashes }
    }

    /// The zero root at `depth`, if one is defined.
    pub fn get(&self, depth: usize) -> Option<Node> {
        self.hashes.get(depth).copied()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.hashes
    }
}

impl Index<usize> for ZeroHashes {
    type Output = Node;

    fn index(&self, depth: usize) -> &Self::Output {
        &self.hashes[depth]
    }
}

static ZERO_HASHES: LazyLock<ZeroHashes> = LazyLock::new(ZeroHashes::compute);

/// Force initialization of the table. Repeated calls return the same table.
pub fn init_zero_hashes() -> &'static ZeroHashes {
    LazyLock::force(&ZERO_HASHES)
}

/// Read access to the table, initializing it on first use.
pub fn zero_hashes() -> &'static ZeroHashes {
    &ZERO_HASHES
}

/// The zero root at `depth`, failing for depths past [`MAX_ZERO_HASH_DEPTH`].
pub fn try_zero_hash(depth: usize) -> Result<Node, Error> {
    zero_hashes().get(depth).ok_or(Error::ZeroHashDepthOutOfRange(depth))
}

// Invariant: `depth <= MAX_ZERO_HASH_DEPTH`
#[inline]
pub(crate) fn zero_hash(depth: usize) -> Node {
    debug_assert!(depth <= MAX_ZERO_HASH_DEPTH);
    ZERO_HASHES[depth]
}
