//! Support for constructing and verifying Merkle proofs.
pub use crate::merkleization::generalized_index::log_2;
use crate::{
    lib::*,
    merkleization::{
        generalized_index::{get_bit, get_branch_indices, get_path_length},
        hasher::hash_chunks_with,
        GeneralizedIndex, MerkleizationError as Error, Node, Tree,
    },
};
use sha2::{Digest, Sha256};

/// Return the index in the layer of the Merkle tree a node with generalized index `index` occupies.
pub fn get_subtree_index(index: GeneralizedIndex) -> Result<usize, Error> {
    let depth = log_2(index).ok_or(Error::InvalidGeneralizedIndex)?;
    Ok(index ^ (1 << depth))
}

/// Contains data necessary to verify `leaf` was included under some witness "root" node
/// at the generalized position `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proof {
    pub leaf: Node,
    /// Sibling nodes ordered from the leaf towards the root.
    pub branch: Vec<Node>,
    pub index: GeneralizedIndex,
}

impl Proof {
    /// Verify `self` against the provided `root` witness node.
    ///
    /// A malformed proof is an error; a well-formed proof for a different root is `Ok(false)`.
    pub fn verify(&self, root: Node) -> Result<bool, Error> {
        verify_merkle_proof(self.leaf, &self.branch, self.index, root)
    }
}

impl Tree {
    /// Compute a Merkle proof for the node at `index`.
    pub fn prove(&self, index: GeneralizedIndex) -> Result<Proof, Error> {
        self.check_index(index)?;
        let branch = get_branch_indices(index).into_iter().map(|i| self[i]).collect();
        Ok(Proof { leaf: self[index], branch, index })
    }
}

/// Fold `proof` into `leaf` along the path of `index`, returning the implied root.
pub fn calculate_merkle_root(
    leaf: Node,
    proof: &[Node],
    index: GeneralizedIndex,
) -> Result<Node, Error> {
    let path_length = get_path_length(index)?;
    if path_length != proof.len() {
        return Err(Error::ProofLengthMismatch { expected: path_length, provided: proof.len() });
    }

    let mut hasher = Sha256::new();
    let mut result = leaf;
    for (i, next) in proof.iter().enumerate() {
        result = if get_bit(index, i) {
            hash_chunks_with(&mut hasher, next, result)
        } else {
            hash_chunks_with(&mut hasher, result, next)
        };
    }
    Ok(result)
}

pub fn verify_merkle_proof(
    leaf: Node,
    proof: &[Node],
    index: GeneralizedIndex,
    root: Node,
) -> Result<bool, Error> {
    Ok(calculate_merkle_root(leaf, proof, index)? == root)
}

/// Verifies the Merkle proof against the `root` given the other metadata, assuming `leaf` occupies
/// the `generalized_index` in the tree.
pub fn is_valid_merkle_branch_for_generalized_index(
    leaf: Node,
    branch: &[Node],
    generalized_index: GeneralizedIndex,
    root: Node,
) -> Result<bool, Error> {
    let depth = get_path_length(generalized_index)?;
    let index = get_subtree_index(generalized_index)?;
    is_valid_merkle_branch(leaf, branch, depth, index, root)
}

/// `is_valid_merkle_branch` verifies the Merkle proof against the `root` given the other metadata.
///
/// `index` is the position of `leaf` within the layer at `depth`.
pub fn is_valid_merkle_branch(
    leaf: Node,
    branch: &[Node],
    depth: usize,
    index: usize,
    root: Node,
) -> Result<bool, Error> {
    if branch.len() != depth {
        return Err(Error::ProofLengthMismatch { expected: depth, provided: branch.len() });
    }

    let mut hasher = Sha256::new();
    let mut derived_root = leaf;
    for (i, node) in branch.iter().enumerate() {
        derived_root = if get_bit(index, i) {
            hash_chunks_with(&mut hasher, node, derived_root)
        } else {
            hash_chunks_with(&mut hasher, derived_root, node)
        };
    }

    Ok(derived_root == root)
}
