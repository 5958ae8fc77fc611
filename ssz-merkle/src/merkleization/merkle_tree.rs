//! A mutable Merkle tree over an append-friendly list of leaves.
use crate::{
    config::HasherConfig,
    lib::*,
    merkleization::{
        hasher::{hash_chunks, length_chunk, mix_in_length},
        merkleize::tree_depth,
        proofs::is_valid_merkle_branch,
        reducer::build_parent_tree_roots_with,
        zero_hashes::zero_hash,
        HashTreeRoot, MerkleizationError as Error, Node,
    },
};
use log::debug;

/// Greatest supported depth of a [`MerkleTree`].
pub const MAX_TREE_DEPTH: u8 = 62;

/// A binary Merkle tree of fixed `depth` holding every layer explicitly.
///
/// `branches[0]` holds the leaves and `branches[depth]` holds the root. Each layer is half the
/// length of the one below it, rounded up, with missing right children standing for zero
/// subtrees.
///
/// Mutation takes `&mut self`; sharing a tree across threads requires external locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    depth: u8,
    branches: Vec<Vec<Node>>,
}

impl MerkleTree {
    /// Build a tree of the smallest depth, at least one, that holds `leaves`.
    pub fn new_from_leaves(leaves: Vec<Node>) -> Result<Self, Error> {
        // SAFETY: cast is lossless, as tree_depth(n) <= usize::BITS; qed
        let depth = tree_depth(leaves.len()).max(1) as u8;
        Self::from_leaves_with_depth(leaves, depth)
    }

    /// Build a tree deep enough to hold `max_leaves` leaves.
    pub fn with_max_leaves(leaves: Vec<Node>, max_leaves: usize) -> Result<Self, Error> {
        // SAFETY: cast is lossless, as tree_depth(n) <= usize::BITS; qed
        Self::from_leaves_with_depth(leaves, tree_depth(max_leaves) as u8)
    }

    /// A tree of `depth` holding a single zero leaf, which counts as holding no leaves.
    pub fn empty(depth: u8) -> Result<Self, Error> {
        Self::from_leaves_with_depth(vec![Node::ZERO], depth)
    }

    pub fn from_leaves_with_depth(leaves: Vec<Node>, depth: u8) -> Result<Self, Error> {
        Self::from_leaves_with_config(leaves, depth, &HasherConfig::default())
    }

    /// Build every layer of a tree of `depth` over `leaves`, hashing each layer with the
    /// reducer configured by `config`.
    pub fn from_leaves_with_config(
        leaves: Vec<Node>,
        depth: u8,
        config: &HasherConfig,
    ) -> Result<Self, Error> {
        verify_sufficient_depth(leaves.len(), depth)?;
        debug!("building merkle tree of depth {depth} over {} leaves", leaves.len());

        let mut branches = Vec::with_capacity(depth as usize + 1);
        branches.push(leaves);
        for d in 0..depth as usize {
            let mut layer = branches[d].clone();
            if layer.len() % 2 == 1 {
                layer.push(zero_hash(d));
            }
            let mut parents = vec![Node::ZERO; layer.len() / 2];
            build_parent_tree_roots_with(&mut parents, &layer, config)?;
            branches.push(parents);
        }

        Ok(Self { depth, branches })
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn leaves(&self) -> &[Node] {
        &self.branches[0]
    }

    /// Number of leaves, where a lone zero leaf counts as none.
    pub fn len(&self) -> usize {
        match self.leaves() {
            [leaf] if *leaf == Node::ZERO => 0,
            leaves => leaves.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The root of the tree without the leaf count mixed in.
    pub fn root(&self) -> Node {
        // SAFETY: index is safe because construction requires at least one leaf, so every
        // layer, including the last, holds at least one node; qed
        self.branches[self.depth as usize][0]
    }

    /// Set the leaf at `index` to `item` and recompute the nodes on its path to the root.
    ///
    /// Inserting past the current leaves fills the gap with zero leaves.
    pub fn insert(&mut self, item: Node, index: usize) -> Result<(), Error> {
        let capacity = 1usize << self.depth;
        if index >= capacity {
            return Err(Error::IndexOutOfRange { index, bound: capacity });
        }
        if index >= self.branches[0].len() {
            debug!(
                "extending leaf layer from {} to {} leaves",
                self.branches[0].len(),
                index + 1
            );
            self.branches[0].resize(index + 1, zero_hash(0));
        }
        self.branches[0][index] = item;

        let mut current_index = index;
        let mut root = item;
        for i in 0..self.depth as usize {
            let neighbor =
                self.branches[i].get(current_index ^ 1).copied().unwrap_or_else(|| zero_hash(i));
            root = if current_index % 2 == 0 {
                hash_chunks(root, neighbor)
            } else {
                hash_chunks(neighbor, root)
            };

            let parent_index = current_index / 2;
            let parents = &mut self.branches[i + 1];
            if parent_index >= parents.len() {
                // nodes between the old end of the layer and this one cover only zero leaves
                parents.resize(parent_index + 1, zero_hash(i + 1));
            }
            parents[parent_index] = root;
            current_index = parent_index;
        }
        Ok(())
    }

    /// Siblings along the path of the leaf at `leaf_index`, ordered from the leaves up.
    pub fn merkle_proof(&self, leaf_index: usize) -> Result<Vec<Node>, Error> {
        let leaf_count = self.branches[0].len();
        if leaf_index >= leaf_count {
            return Err(Error::IndexOutOfRange { index: leaf_index, bound: leaf_count });
        }
        let proof = (0..self.depth as usize)
            .map(|i| {
                let sibling_index = (leaf_index >> i) ^ 1;
                self.branches[i].get(sibling_index).copied().unwrap_or_else(|| zero_hash(i))
            })
            .collect();
        Ok(proof)
    }

    /// As [`Self::merkle_proof`], with the leaf count appended so that the proof verifies
    /// against the hash tree root.
    pub fn merkle_proof_with_mixin(&self, leaf_index: usize) -> Result<Vec<Node>, Error> {
        let mut proof = self.merkle_proof(leaf_index)?;
        proof.push(length_chunk(self.len()));
        Ok(proof)
    }

    /// Check `proof` for `item` at leaf `index` against `root`; the depth is taken from the
    /// length of `proof`.
    pub fn verify_proof(root: Node, item: Node, index: usize, proof: &[Node]) -> bool {
        matches!(is_valid_merkle_branch(item, proof, proof.len(), index, root), Ok(true))
    }
}

impl HashTreeRoot for MerkleTree {
    fn hash_tree_root(&self) -> Result<Node, Error> {
        Ok(mix_in_length(self.root(), self.len()))
    }
}

fn verify_sufficient_depth(leaf_count: usize, depth: u8) -> Result<(), Error> {
    if leaf_count == 0 {
        return Err(Error::EmptyLeaves);
    }
    if depth == 0 {
        return Err(Error::ZeroDepth);
    }
    if depth > MAX_TREE_DEPTH {
        return Err(Error::ExceededMaxDepth(depth));
    }
    if leaf_count > 1 << depth {
        return Err(Error::InsufficientDepthForLeaves);
    }
    Ok(())
}
