//! Arithmetic over generalized indices.
//!
//! A generalized index addresses a node of an implicit complete binary tree: the root is `1`
//! and the children of `i` are `2i` and `2i + 1`.
use crate::{lib::*, merkleization::MerkleizationError as Error};

pub type GeneralizedIndex = usize;

/// The generalized index of the root of any tree.
pub const fn default_generalized_index() -> GeneralizedIndex {
    1
}

/// The generalized index of the node at position `index` in the layer at `depth`.
pub fn new_generalized_index(depth: u32, index: usize) -> Result<GeneralizedIndex, Error> {
    let layer_start = 1usize.checked_shl(depth).ok_or(Error::GeneralizedIndexOverflow)?;
    if depth == usize::BITS - 1 {
        // the layer at this depth is only partially addressable
        return layer_start.checked_add(index).ok_or(Error::GeneralizedIndexOverflow);
    }
    if index >= layer_start {
        return Err(Error::IndexOutOfRange { index, bound: layer_start });
    }
    Ok(layer_start + index)
}

pub fn log_2(x: usize) -> Option<u32> {
    if x == 0 {
        None
    } else {
        Some(x.ilog2())
    }
}

pub fn get_power_of_two_floor(x: usize) -> usize {
    match x {
        0 => 0,
        x => 1 << x.ilog2(),
    }
}

/// The length of the path from the root to `index`, i.e. its depth.
pub fn get_path_length(index: GeneralizedIndex) -> Result<usize, Error> {
    let length = log_2(index).ok_or(Error::InvalidGeneralizedIndex)?;
    Ok(length as usize)
}

/// Bit `position` of `index`, which selects the side of the step taken at that height.
pub fn get_bit(index: GeneralizedIndex, position: usize) -> bool {
    position < usize::BITS as usize && index & (1 << position) > 0
}

pub fn sibling(index: GeneralizedIndex) -> GeneralizedIndex {
    index ^ 1
}

pub fn child_left(index: GeneralizedIndex) -> GeneralizedIndex {
    index * 2
}

pub fn child_right(index: GeneralizedIndex) -> GeneralizedIndex {
    index * 2 + 1
}

pub fn parent(index: GeneralizedIndex) -> GeneralizedIndex {
    index / 2
}

/// Compose the generalized indices of nested objects into the index of the innermost object
/// relative to the outermost root.
pub fn concat_generalized_indices(indices: &[GeneralizedIndex]) -> Result<GeneralizedIndex, Error> {
    let mut result = default_generalized_index();
    for &index in indices {
        if index == 0 {
            return Err(Error::InvalidGeneralizedIndex);
        }
        let floor = get_power_of_two_floor(index);
        // SAFETY: checked subtraction is unnecessary, as floor <= index; qed
        result = result
            .checked_mul(floor)
            .and_then(|n| n.checked_add(index - floor))
            .ok_or(Error::GeneralizedIndexOverflow)?;
    }
    Ok(result)
}

/// Siblings of every node on the path from `index` up to, but excluding, the root.
pub fn get_branch_indices(index: GeneralizedIndex) -> Vec<GeneralizedIndex> {
    get_path_indices(index).into_iter().map(sibling).collect()
}

/// Every node on the path from `index` up to, but excluding, the root.
pub fn get_path_indices(index: GeneralizedIndex) -> Vec<GeneralizedIndex> {
    let mut result = vec![];
    let mut focus = index;
    while focus > 1 {
        result.push(focus);
        focus = parent(focus);
    }
    result
}

/// The nodes needed alongside the nodes at `indices` to recompute the root, in decreasing order.
pub fn get_helper_indices(indices: &[GeneralizedIndex]) -> Vec<GeneralizedIndex> {
    let path_indices =
        indices.iter().flat_map(|index| get_path_indices(*index)).collect::<HashSet<_>>();
    let mut helper_indices = indices
        .iter()
        .flat_map(|index| get_branch_indices(*index))
        .filter(|index| !path_indices.contains(index))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    helper_indices.sort_unstable_by(|a, b| b.cmp(a));
    helper_indices
}
