//! Support for multiproofs: one proof covering several nodes of the same tree.
use crate::{
    lib::*,
    merkleization::{
        generalized_index::{get_helper_indices, parent, sibling},
        hasher::hash_chunks_with,
        GeneralizedIndex, MerkleizationError as Error, Node, Tree,
    },
};
use sha2::{Digest, Sha256};

/// Contains data necessary to verify each of `leaves` was included under some witness "root"
/// node at the matching generalized position in `indices`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiProof {
    pub leaves: Vec<Node>,
    /// Nodes at the helper indices of `indices`, in decreasing index order.
    pub branch: Vec<Node>,
    pub indices: Vec<GeneralizedIndex>,
}

impl MultiProof {
    /// Verify `self` against the provided `root` witness node.
    pub fn verify(&self, root: Node) -> Result<bool, Error> {
        verify_merkle_multiproof(&self.leaves, &self.branch, &self.indices, root)
    }
}

impl Tree {
    /// Compute a single proof for the nodes at all of `indices`.
    pub fn multi_prove(&self, indices: &[GeneralizedIndex]) -> Result<MultiProof, Error> {
        for &index in indices {
            self.check_index(index)?;
        }
        let leaves = indices.iter().map(|&index| self[index]).collect();
        let branch = get_helper_indices(indices).into_iter().map(|index| self[index]).collect();
        Ok(MultiProof { leaves, branch, indices: indices.to_vec() })
    }
}

/// Recompute the root implied by `leaves` at `indices` together with the `proof` nodes at the
/// helper indices.
///
/// Known nodes are visited in decreasing index order; whenever a node and its sibling are known
/// and their parent is not, the parent is computed from the even (left) and odd (right) child.
pub fn calculate_multi_merkle_root(
    leaves: &[Node],
    proof: &[Node],
    indices: &[GeneralizedIndex],
) -> Result<Node, Error> {
    if leaves.len() != indices.len() {
        return Err(Error::LeavesIndicesLengthMismatch);
    }
    if indices.contains(&0) {
        return Err(Error::InvalidGeneralizedIndex);
    }
    let helper_indices = get_helper_indices(indices);
    if proof.len() != helper_indices.len() {
        return Err(Error::ProofHelperIndicesLengthMismatch);
    }

    let mut objects = indices
        .iter()
        .copied()
        .zip(leaves.iter().copied())
        .chain(helper_indices.iter().copied().zip(proof.iter().copied()))
        .collect::<HashMap<_, _>>();

    let mut keys = objects.keys().copied().collect::<Vec<_>>();
    keys.sort_unstable_by(|a, b| b.cmp(a));

    let mut hasher = Sha256::new();
    let mut pos = 0;
    while pos < keys.len() {
        let key = keys[pos];
        let parent_index = parent(key);
        let should_compute = objects.contains_key(&sibling(key)) &&
            !objects.contains_key(&parent_index) &&
            key > 1;
        if should_compute {
            let right_index = key | 1;
            let left_index = sibling(right_index);
            let left = objects.get(&left_index).copied();
            let right = objects.get(&right_index).copied();
            if let (Some(left), Some(right)) = (left, right) {
                objects.insert(parent_index, hash_chunks_with(&mut hasher, left, right));
                keys.push(parent_index);
            }
        }
        pos += 1;
    }

    objects.get(&1).copied().ok_or(Error::IncompleteMultiproof)
}

pub fn verify_merkle_multiproof(
    leaves: &[Node],
    proof: &[Node],
    indices: &[GeneralizedIndex],
    root: Node,
) -> Result<bool, Error> {
    Ok(calculate_multi_merkle_root(leaves, proof, indices)? == root)
}
