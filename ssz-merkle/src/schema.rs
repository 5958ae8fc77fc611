//! Type descriptions sufficient to locate values inside their Merkle trees.
//!
//! An [`SszType`] says nothing about values, only about shape: how many chunks a type
//! occupies and where a given field or element lands among them.
use crate::{
    lib::*,
    merkleization::{MerkleizationError as Error, BYTES_PER_CHUNK},
    object_path::PathElement,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SszType {
    /// A fixed-size value of `size` bytes that packs into chunks.
    Basic { size: usize },
    Vector { element: Box<SszType>, length: usize },
    List { element: Box<SszType>, limit: usize },
    Container(Container),
}

/// An ordered set of named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    fields: Vec<(String, SszType)>,
    field_index: HashMap<String, usize>,
}

impl Container {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, SszType)>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(|(name, ty)| (name.into(), ty)).collect::<Vec<_>>();
        let field_index =
            fields.iter().enumerate().map(|(i, (name, _))| (name.clone(), i)).collect();
        Self { fields, field_index }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The position and type of the field called `name`.
    pub fn field(&self, name: &str) -> Option<(usize, &SszType)> {
        let position = *self.field_index.get(name)?;
        self.fields.get(position).map(|(_, ty)| (position, ty))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &SszType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), ty))
    }
}

/// Where a child sits inside the chunks of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildPosition {
    /// Index of the chunk holding the child.
    pub chunk: usize,
    /// Byte offset of the child within that chunk; non-zero only for packed basic elements.
    pub offset: u8,
}

impl SszType {
    pub fn basic(size: usize) -> Self {
        Self::Basic { size }
    }

    pub fn boolean() -> Self {
        Self::basic(1)
    }

    pub fn uint8() -> Self {
        Self::basic(1)
    }

    pub fn uint16() -> Self {
        Self::basic(2)
    }

    pub fn uint32() -> Self {
        Self::basic(4)
    }

    pub fn uint64() -> Self {
        Self::basic(8)
    }

    pub fn uint128() -> Self {
        Self::basic(16)
    }

    pub fn uint256() -> Self {
        Self::basic(32)
    }

    pub fn vector(element: SszType, length: usize) -> Self {
        Self::Vector { element: Box::new(element), length }
    }

    pub fn list(element: SszType, limit: usize) -> Self {
        Self::List { element: Box::new(element), limit }
    }

    pub fn byte_vector(length: usize) -> Self {
        Self::vector(Self::uint8(), length)
    }

    pub fn byte_list(limit: usize) -> Self {
        Self::list(Self::uint8(), limit)
    }

    pub fn container<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, SszType)>,
        S: Into<String>,
    {
        Self::Container(Container::new(fields))
    }

    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Basic { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    /// The number of bytes one value of this type takes up when packed as an element;
    /// composite values are represented by their 32-byte root.
    pub fn item_length(&self) -> usize {
        match self {
            Self::Basic { size } => *size,
            _ => BYTES_PER_CHUNK,
        }
    }

    /// The number of leaf chunks in the Merkle tree of this type; lists count up to their limit.
    pub fn chunk_count(&self) -> usize {
        match self {
            Self::Basic { .. } => 1,
            Self::Vector { element, length: bound } | Self::List { element, limit: bound } => {
                bound.saturating_mul(element.item_length()).div_ceil(BYTES_PER_CHUNK)
            }
            Self::Container(container) => container.len(),
        }
    }

    /// Locate the child addressed by `element`, returning its type and position.
    ///
    /// `PathElement::Length` is not a child and is handled by the path resolver.
    pub fn child(&self, element: &PathElement) -> Result<(&SszType, ChildPosition), Error> {
        match (self, element) {
            (Self::Basic { .. }, _) => Err(Error::NoInnerElement),
            (Self::Container(container), PathElement::Field(name)) => {
                let (chunk, ty) =
                    container.field(name).ok_or_else(|| Error::UnknownField(name.clone()))?;
                Ok((ty, ChildPosition { chunk, offset: 0 }))
            }
            (
                Self::Vector { element: item, length: bound } |
                Self::List { element: item, limit: bound },
                PathElement::Index(index),
            ) => {
                if index >= bound {
                    return Err(Error::IndexBeyondBound);
                }
                let start = index.saturating_mul(item.item_length());
                let offset = (start % BYTES_PER_CHUNK) as u8;
                Ok((item.as_ref(), ChildPosition { chunk: start / BYTES_PER_CHUNK, offset }))
            }
            _ => Err(Error::InvalidPathElement),
        }
    }
}
