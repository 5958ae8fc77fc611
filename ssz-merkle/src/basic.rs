//! Capability implementations for the basic SSZ types and fixed byte vectors.
use crate::{
    lib::*,
    merkleization::{merkleize::merkleize_byte_slice, HashTreeRoot, MerkleizationError, Node},
    object_path::GeneralizedIndexable,
    schema::SszType,
    ser::{Serialize, SerializeError},
};
use alloy_primitives::U256;
use std::mem::size_of;

// Basic values occupy the low bytes of a single chunk.
fn basic_root(encoding: &[u8]) -> Node {
    debug_assert!(encoding.len() <= 32);
    let mut root = Node::ZERO;
    root[..encoding.len()].copy_from_slice(encoding);
    root
}

macro_rules! define_uint {
    ($uint:ty) => {
        impl Serialize for $uint {
            fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize, SerializeError> {
                buffer.extend_from_slice(&self.to_le_bytes());
                Ok(size_of::<$uint>())
            }

            fn size_ssz(&self) -> usize {
                size_of::<$uint>()
            }
        }

        impl HashTreeRoot for $uint {
            fn hash_tree_root(&self) -> Result<Node, MerkleizationError> {
                Ok(basic_root(&self.to_le_bytes()))
            }

            fn is_composite_type() -> bool {
                false
            }
        }

        impl GeneralizedIndexable for $uint {
            fn ssz_type() -> SszType {
                SszType::basic(size_of::<$uint>())
            }
        }
    };
}

define_uint!(u8);
define_uint!(u16);
define_uint!(u32);
define_uint!(u64);
define_uint!(u128);

// `usize` is encoded as a `uint64`.
impl Serialize for usize {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize, SerializeError> {
        let value = u64::try_from(*self)
            .map_err(|_| SerializeError::TypeBoundsViolated("usize exceeds uint64"))?;
        value.serialize(buffer)
    }

    fn size_ssz(&self) -> usize {
        size_of::<u64>()
    }
}

impl HashTreeRoot for usize {
    fn hash_tree_root(&self) -> Result<Node, MerkleizationError> {
        Ok(basic_root(&(*self as u64).to_le_bytes()))
    }

    fn is_composite_type() -> bool {
        false
    }
}

impl GeneralizedIndexable for usize {
    fn ssz_type() -> SszType {
        SszType::uint64()
    }
}

impl Serialize for bool {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize, SerializeError> {
        buffer.push(u8::from(*self));
        Ok(1)
    }

    fn size_ssz(&self) -> usize {
        1
    }
}

impl HashTreeRoot for bool {
    fn hash_tree_root(&self) -> Result<Node, MerkleizationError> {
        Ok(basic_root(&[u8::from(*self)]))
    }

    fn is_composite_type() -> bool {
        false
    }
}

impl GeneralizedIndexable for bool {
    fn ssz_type() -> SszType {
        SszType::boolean()
    }
}

impl Serialize for U256 {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize, SerializeError> {
        buffer.extend_from_slice(&self.to_le_bytes::<32>());
        Ok(32)
    }

    fn size_ssz(&self) -> usize {
        32
    }
}

impl HashTreeRoot for U256 {
    fn hash_tree_root(&self) -> Result<Node, MerkleizationError> {
        Ok(Node::from(self.to_le_bytes::<32>()))
    }

    fn is_composite_type() -> bool {
        false
    }
}

impl GeneralizedIndexable for U256 {
    fn ssz_type() -> SszType {
        SszType::uint256()
    }
}

impl Serialize for Node {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize, SerializeError> {
        buffer.extend_from_slice(self.as_slice());
        Ok(32)
    }

    fn size_ssz(&self) -> usize {
        32
    }
}

// A `Node` is a `Vector[byte, 32]` whose single chunk is itself.
impl HashTreeRoot for Node {
    fn hash_tree_root(&self) -> Result<Node, MerkleizationError> {
        Ok(*self)
    }
}

impl GeneralizedIndexable for Node {
    fn ssz_type() -> SszType {
        SszType::byte_vector(32)
    }
}

impl<const N: usize> Serialize for [u8; N] {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize, SerializeError> {
        buffer.extend_from_slice(self);
        Ok(N)
    }

    fn size_ssz(&self) -> usize {
        N
    }
}

impl<const N: usize> HashTreeRoot for [u8; N] {
    fn hash_tree_root(&self) -> Result<Node, MerkleizationError> {
        merkleize_byte_slice(self)
    }
}

impl<const N: usize> GeneralizedIndexable for [u8; N] {
    fn ssz_type() -> SszType {
        SszType::byte_vector(N)
    }
}
