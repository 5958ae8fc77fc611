//! Merkleization, generalized indices and Merkle proofs.
pub mod buffer;
pub mod generalized_index;
pub mod hasher;
pub mod merkle_tree;
pub mod merkleize;
pub mod multiproofs;
pub mod proofs;
pub mod reducer;
pub mod zero_hashes;

use crate::ser::SerializeError;
use thiserror::Error;

pub use buffer::{Buffer, ReusableBuffer, SingleUseBuffer};
pub use generalized_index::GeneralizedIndex;
pub use merkleize::{HashTreeRoot, Merkleizer, RootHasher, Tree};

/// Number of bytes per chunk.
pub const BYTES_PER_CHUNK: usize = 32;

/// A node in a Merkle tree; also the type of a leaf chunk and of every hash tree root.
pub type Node = alloy_primitives::B256;

/// An error encountered during merkleization, tree maintenance, proving or path resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleizationError {
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] SerializeError),
    #[error("cannot merkleize data that exceeds the declared limit {0}")]
    InputExceedsLimit(usize),
    #[error("cannot reduce a layer of odd length {0}")]
    OddLengthInput(usize),
    #[error("output buffer holds {provided} roots but {expected} are required")]
    InsufficientOutputBuffer { expected: usize, provided: usize },
    #[error("proof has {provided} nodes but {expected} are required")]
    ProofLengthMismatch { expected: usize, provided: usize },
    #[error("multiproof has a different number of leaves and indices")]
    LeavesIndicesLengthMismatch,
    #[error("multiproof has a different number of branch nodes and helper indices")]
    ProofHelperIndicesLengthMismatch,
    #[error("multiproof does not determine the root")]
    IncompleteMultiproof,
    #[error("invalid generalized index")]
    InvalidGeneralizedIndex,
    #[error("generalized index exceeds the addressable range")]
    GeneralizedIndexOverflow,
    #[error("index {index} is out of range (bound {bound})")]
    IndexOutOfRange { index: usize, bound: usize },
    #[error("tree depth {0} exceeds the maximum supported depth")]
    ExceededMaxDepth(u8),
    #[error("tree depth is insufficient for the number of leaves")]
    InsufficientDepthForLeaves,
    #[error("tree depth must be greater than zero")]
    ZeroDepth,
    #[error("cannot build a tree from no leaves")]
    EmptyLeaves,
    #[error("no zero hash is defined for depth {0}")]
    ZeroHashDepthOutOfRange(usize),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("path element is not valid for the type it addresses")]
    InvalidPathElement,
    #[error("type has no inner element to descend into")]
    NoInnerElement,
    #[error("length can only be addressed on a list")]
    LengthOfNonList,
    #[error("length must be the final element of a path")]
    PathAfterLength,
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("path index exceeds the bound of its collection")]
    IndexBeyondBound,
}
