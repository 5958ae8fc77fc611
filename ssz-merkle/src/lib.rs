//! SSZ merkleization and proof engine.
//!
//! Computes hash tree roots following the SSZ merkleization rules, maintains incremental
//! Merkle trees, and builds and verifies single and multi-leaf Merkle proofs addressed by
//! generalized indices or human-readable object paths.
mod basic;
mod config;
pub mod merkleization;
pub mod object_path;
pub mod schema;
mod ser;

pub use config::{HasherConfig, MIN_PARALLELIZATION_SIZE};
pub use merkleization::{
    generalized_index::GeneralizedIndex,
    merkle_tree::{MerkleTree, MAX_TREE_DEPTH},
    multiproofs::{self, MultiProof},
    proofs::{self, Proof},
    HashTreeRoot, MerkleizationError, Merkleizer, Node, BYTES_PER_CHUNK,
};
pub use object_path::{GeneralizedIndexable, ObjectPath, PathElement, ResolvedPath};
pub use ser::{Serialize, SerializeError, SimpleSerialize};

mod lib {
    pub use std::{
        collections::{HashMap, HashSet},
        fmt,
        ops::{Index, IndexMut},
        vec,
        vec::Vec,
    };
}

/// `prelude` is a convenience module to bring the most common items into scope.
pub mod prelude {
    pub use crate::{
        merkleization::{
            generalized_index::*,
            merkleize::{chunkify, merkleize, mix_in_length, pack},
            multiproofs::{calculate_multi_merkle_root, verify_merkle_multiproof},
            proofs::{calculate_merkle_root, is_valid_merkle_branch, verify_merkle_proof},
            zero_hashes::{init_zero_hashes, zero_hashes},
        },
        schema::SszType,
        GeneralizedIndexable, HashTreeRoot, HasherConfig, MerkleTree, MerkleizationError,
        Merkleizer, MultiProof, Node, ObjectPath, PathElement, Proof, Serialize, SimpleSerialize,
    };
    pub use alloy_primitives::U256;
}
