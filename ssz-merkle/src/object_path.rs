//! Resolve human-readable paths into SSZ objects to generalized indices.
use crate::{
    lib::*,
    merkleization::{
        generalized_index::default_generalized_index, GeneralizedIndex, MerkleizationError as Error,
    },
    schema::SszType,
};
use log::trace;
use std::str::FromStr;

/// The name of the path segment addressing the length of a list.
pub const LENGTH_SEGMENT: &str = "__len__";

/// A single step of an [`ObjectPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Position of an element in a vector or list.
    Index(usize),
    /// Name of a field of a container.
    Field(String),
    /// The length mixed into the root of a list.
    Length,
}

impl From<usize> for PathElement {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PathElement {
    fn from(name: &str) -> Self {
        if name == LENGTH_SEGMENT {
            Self::Length
        } else {
            Self::Field(name.to_string())
        }
    }
}

impl From<String> for PathElement {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Field(name) => write!(f, "{name}"),
            Self::Length => write!(f, "{LENGTH_SEGMENT}"),
        }
    }
}

/// A sequence of [`PathElement`]s leading from the root of an object to one of its nodes.
///
/// Textual paths separate segments with `/` or `.`; a segment may carry trailing `[i]`
/// suffixes, so `validators[3].pubkey` and `validators/3/pubkey` are the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ObjectPath(Vec<PathElement>);

impl ObjectPath {
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self(elements)
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.0
    }

    pub fn push(&mut self, element: impl Into<PathElement>) {
        self.0.push(element.into());
    }

    #[must_use]
    pub fn join(mut self, element: impl Into<PathElement>) -> Self {
        self.push(element);
        self
    }

    pub fn resolve(&self, ty: &SszType) -> Result<ResolvedPath, Error> {
        resolve(ty, &self.0)
    }
}

impl From<Vec<PathElement>> for ObjectPath {
    fn from(elements: Vec<PathElement>) -> Self {
        Self(elements)
    }
}

impl AsRef<[PathElement]> for ObjectPath {
    fn as_ref(&self) -> &[PathElement] {
        &self.0
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

fn parse_segment(segment: &str, elements: &mut Vec<PathElement>) -> Result<(), Error> {
    let invalid = || Error::InvalidPath(segment.to_string());

    let (name, mut suffixes) = match segment.find('[') {
        Some(start) => segment.split_at(start),
        None => (segment, ""),
    };
    if name.is_empty() && suffixes.is_empty() {
        return Err(invalid());
    }
    if !name.is_empty() {
        let element = if name.bytes().all(|b| b.is_ascii_digit()) {
            PathElement::Index(name.parse().map_err(|_| invalid())?)
        } else {
            PathElement::from(name)
        };
        elements.push(element);
    }
    while !suffixes.is_empty() {
        let rest = suffixes.strip_prefix('[').ok_or_else(invalid)?;
        let end = rest.find(']').ok_or_else(invalid)?;
        let index = rest[..end].parse().map_err(|_| invalid())?;
        elements.push(PathElement::Index(index));
        suffixes = &rest[end + 1..];
    }
    Ok(())
}

impl FromStr for ObjectPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = path.trim_matches('/');
        let mut elements = vec![];
        if path.is_empty() {
            return Ok(Self(elements));
        }
        for segment in path.split(['/', '.']) {
            parse_segment(segment, &mut elements)?;
        }
        Ok(Self(elements))
    }
}

/// The node an [`ObjectPath`] leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Type of the value at the end of the path.
    pub ty: SszType,
    pub generalized_index: GeneralizedIndex,
    /// Byte offset of the value inside the chunk at `generalized_index`.
    pub offset: u8,
}

/// Walk `path` from the root of an object of type `ty`, accumulating the generalized index of
/// the node it addresses.
pub fn resolve(ty: &SszType, path: &[PathElement]) -> Result<ResolvedPath, Error> {
    let mut current = ty;
    let mut generalized_index = default_generalized_index();
    let mut offset = 0;

    for (i, element) in path.iter().enumerate() {
        if let PathElement::Length = element {
            if !current.is_list() {
                return Err(Error::LengthOfNonList);
            }
            if i + 1 != path.len() {
                return Err(Error::PathAfterLength);
            }
            // the length is the right child of the list root
            generalized_index = generalized_index
                .checked_mul(2)
                .and_then(|index| index.checked_add(1))
                .ok_or(Error::GeneralizedIndexOverflow)?;
            return Ok(ResolvedPath { ty: SszType::uint64(), generalized_index, offset: 0 });
        }

        let (child, position) = current.child(element)?;
        // lists hang their data off the left child of a root that mixes in the length
        let base = if current.is_list() { 2 } else { 1 };
        let width = current.chunk_count().checked_next_power_of_two();
        generalized_index = width
            .and_then(|width| generalized_index.checked_mul(base)?.checked_mul(width))
            .and_then(|index| index.checked_add(position.chunk))
            .ok_or(Error::GeneralizedIndexOverflow)?;
        trace!("resolved path element {element} to generalized index {generalized_index}");
        current = child;
        offset = position.offset;
    }

    Ok(ResolvedPath { ty: current.clone(), generalized_index, offset })
}

/// Types that can describe their own shape, and so locate nodes inside their Merkle tree.
pub trait GeneralizedIndexable {
    fn ssz_type() -> SszType;

    /// The generalized index of the node addressed by `path` in the tree of `Self`.
    fn generalized_index(path: &[PathElement]) -> Result<GeneralizedIndex, Error> {
        resolve(&Self::ssz_type(), path).map(|resolved| resolved.generalized_index)
    }
}
