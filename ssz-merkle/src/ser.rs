//! Capability traits for values that can enter the merkleization engine.
use crate::{lib::*, merkleization::HashTreeRoot};
use thiserror::Error;

/// Serialization errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializeError {
    #[error("the encoded length is {provided} which exceeds the maximum {max}")]
    MaximumEncodedLengthExceeded { provided: usize, max: usize },
    #[error("type is not serializable: {0}")]
    TypeBoundsViolated(&'static str),
}

/// A data structure that can be encoded with SSZ.
pub trait Serialize {
    /// Append an encoding of `self` to the `buffer`.
    /// Return the number of bytes written.
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize, SerializeError>;

    /// The length in bytes of the encoding of `self`.
    fn size_ssz(&self) -> usize;

    /// Return the encoding of `self` as a fresh buffer.
    fn marshal_ssz(&self) -> Result<Vec<u8>, SerializeError> {
        let mut buffer = Vec::with_capacity(self.size_ssz());
        self.serialize(&mut buffer)?;
        Ok(buffer)
    }
}

/// `SimpleSerialize` is the capability set the engine relies on: a type can be encoded and can
/// produce its hash tree root.
pub trait SimpleSerialize: Serialize + HashTreeRoot {}

impl<T> SimpleSerialize for T where T: Serialize + HashTreeRoot {}
