//! Support for computing hash tree roots.
use crate::{
    config::HasherConfig,
    lib::*,
    merkleization::{
        buffer::{Buffer, ReusableBuffer, SingleUseBuffer},
        hasher::{hash_chunks, length_chunk},
        reducer::build_parent_tree_roots_with,
        zero_hashes::zero_hash,
        GeneralizedIndex, MerkleizationError as Error, Node, BYTES_PER_CHUNK,
    },
    ser::Serialize,
};

pub use crate::merkleization::hasher::mix_in_length;

// The generalized index for the root of the "decorated" type in any Merkleized type that supports
// decoration.
const INNER_ROOT_GENERALIZED_INDEX: GeneralizedIndex = 2;
// The generalized index for the "decoration" in any Merkleized type that supports decoration.
const DECORATION_GENERALIZED_INDEX: GeneralizedIndex = 3;

/// Types that can provide the root of their corresponding Merkle tree.
pub trait HashTreeRoot {
    /// Compute the "hash tree root" of `Self`.
    fn hash_tree_root(&self) -> Result<Node, Error>;

    /// Indicate the "composite" nature of `Self`.
    fn is_composite_type() -> bool {
        true
    }
}

// Ensures `buffer` can be exactly broken up into `BYTES_PER_CHUNK` chunks of bytes
// via padding any partial chunks at the end of `buffer`
pub fn pack_bytes(buffer: &mut Vec<u8>) {
    let incomplete_chunk_len = buffer.len() % BYTES_PER_CHUNK;
    if incomplete_chunk_len != 0 {
        // SAFETY: checked subtraction is unnecessary,
        // as BYTES_PER_CHUNK > incomplete_chunk_len; qed
        let bytes_to_pad = BYTES_PER_CHUNK - incomplete_chunk_len;
        buffer.resize(buffer.len() + bytes_to_pad, 0);
    }
}

// Packs serializations of `values` into the return buffer with the
// guarantee that `buffer.len() % BYTES_PER_CHUNK == 0`
pub fn pack<T>(values: &[T]) -> Result<Vec<u8>, Error>
where
    T: Serialize,
{
    let mut buffer = vec![];
    for value in values {
        value.serialize(&mut buffer)?;
    }
    pack_bytes(&mut buffer);
    Ok(buffer)
}

/// Number of chunks `len` bytes occupy; an empty input still occupies one chunk.
pub fn chunk_count_for_bytes(len: usize) -> usize {
    len.div_ceil(BYTES_PER_CHUNK).max(1)
}

/// Split `bytes` into zero-padded chunks, yielding at least one chunk.
pub fn chunkify(bytes: &[u8]) -> Vec<Node> {
    let mut chunks = vec![Node::ZERO; chunk_count_for_bytes(bytes.len())];
    for (chunk, data) in chunks.iter_mut().zip(bytes.chunks(BYTES_PER_CHUNK)) {
        chunk[..data.len()].copy_from_slice(data);
    }
    chunks
}

// Depth of the smallest perfect tree with at least `count` leaves, i.e.
// `log2(count.next_power_of_two())` without overflowing for counts past 2^63.
pub(crate) fn tree_depth(count: usize) -> usize {
    if count <= 1 {
        0
    } else {
        // SAFETY: checked subtraction is unnecessary, as count > 1; qed
        (usize::BITS - (count - 1).leading_zeros()) as usize
    }
}

/// Return the root of the Merkleization of a binary tree formed from `chunks`.
///
/// Without a `limit` the chunks are virtually padded to the next power of two; with a `limit`
/// they are padded to the next power of two of the limit.
pub fn merkleize(chunks: &[Node], limit: Option<usize>) -> Result<Node, Error> {
    RootHasher::<SingleUseBuffer>::default().merkleize(chunks, limit)
}

/// Root of `bytes` treated as a fixed-size vector of bytes.
pub fn merkleize_byte_slice(bytes: &[u8]) -> Result<Node, Error> {
    Merkleizer::<SingleUseBuffer>::default().merkleize_byte_slice(bytes)
}

/// Folds layers of roots into a single root, substituting zero hashes for missing siblings.
///
/// Scratch space comes from the owned [`Buffer`], so a single `RootHasher` must not be shared
/// between concurrent callers.
#[derive(Debug, Default)]
pub struct RootHasher<B: Buffer = ReusableBuffer> {
    buffer: B,
    config: HasherConfig,
}

impl<B: Buffer> RootHasher<B> {
    pub fn with_config(config: HasherConfig) -> Self {
        Self { buffer: B::default(), config }
    }

    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// See [`merkleize`].
    pub fn merkleize(&mut self, chunks: &[Node], limit: Option<usize>) -> Result<Node, Error> {
        self.new_root_with_max_leaves(chunks, limit.unwrap_or(chunks.len()))
    }

    /// Root of `leaves` in a tree sized for `limit` leaves.
    pub fn new_root_with_max_leaves(
        &mut self,
        leaves: &[Node],
        limit: usize,
    ) -> Result<Node, Error> {
        let count = leaves.len();
        if count > limit {
            return Err(Error::InputExceedsLimit(limit));
        }
        if limit == 0 {
            return Ok(zero_hash(0));
        }
        if limit == 1 && count == 1 {
            return Ok(leaves[0]);
        }
        self.new_root_with_depth(leaves, tree_depth(count), tree_depth(limit))
    }

    /// Reduce `leaves` through `depth` layers, then extend the resulting root with zero subtrees
    /// up to `limit_depth`.
    pub fn new_root_with_depth(
        &mut self,
        leaves: &[Node],
        depth: usize,
        limit_depth: usize,
    ) -> Result<Node, Error> {
        debug_assert!(depth <= limit_depth);
        if leaves.is_empty() {
            return Ok(zero_hash(limit_depth));
        }

        let mut layer = leaves.to_vec();
        for i in 0..depth {
            if layer.len() % 2 == 1 {
                layer.push(zero_hash(i));
            }
            let parent_count = layer.len() / 2;
            let parents = self.buffer.get(parent_count);
            build_parent_tree_roots_with(parents, &layer, &self.config)?;
            layer.truncate(parent_count);
            layer.copy_from_slice(parents);
        }
        debug_assert!(layer.len() == 1);

        let mut root = layer[0];
        for j in depth..limit_depth {
            root = hash_chunks(root, zero_hash(j));
        }
        Ok(root)
    }
}

/// Implements the SSZ merkleization of basic values, vectors and lists on top of a
/// [`RootHasher`].
#[derive(Debug, Default)]
pub struct Merkleizer<B: Buffer = ReusableBuffer> {
    hasher: RootHasher<B>,
}

impl<B: Buffer> Merkleizer<B> {
    pub fn with_config(config: HasherConfig) -> Self {
        Self { hasher: RootHasher::with_config(config) }
    }

    /// See [`merkleize`].
    pub fn merkleize(&mut self, chunks: &[Node], limit: Option<usize>) -> Result<Node, Error> {
        self.hasher.merkleize(chunks, limit)
    }

    pub fn merkleize_basic<T: Serialize>(&mut self, value: &T) -> Result<Node, Error> {
        self.merkleize_vector_basic(core::slice::from_ref(value))
    }

    pub fn merkleize_vector_basic<T: Serialize>(&mut self, values: &[T]) -> Result<Node, Error> {
        let chunks = chunkify(&pack(values)?);
        self.hasher.merkleize(&chunks, None)
    }

    /// Root of a vector of composite values, or of a container given its fields in order.
    pub fn merkleize_vector_composite_or_container<T: HashTreeRoot>(
        &mut self,
        values: &[T],
    ) -> Result<Node, Error> {
        let roots = element_roots(values)?;
        self.hasher.merkleize(&roots, None)
    }

    /// Root of a list of basic values whose limit occupies `chunk_count` chunks.
    pub fn merkleize_list_basic<T: Serialize>(
        &mut self,
        values: &[T],
        chunk_count: usize,
    ) -> Result<Node, Error> {
        let packed = pack(values)?;
        // NOTE: an empty list has no chunks, unlike `chunkify` of no bytes
        let chunks = chunkify(&packed);
        let chunks = &chunks[..packed.len() / BYTES_PER_CHUNK];
        let root = self.hasher.merkleize(chunks, Some(chunk_count))?;
        Ok(mix_in_length(root, values.len()))
    }

    /// Root of a list of composite values with room for `chunk_count` elements.
    pub fn merkleize_list_composite<T: HashTreeRoot>(
        &mut self,
        values: &[T],
        chunk_count: usize,
    ) -> Result<Node, Error> {
        let roots = element_roots(values)?;
        let root = self.hasher.merkleize(&roots, Some(chunk_count))?;
        Ok(mix_in_length(root, values.len()))
    }

    /// Root of an opaque byte string treated as a fixed vector of bytes.
    pub fn merkleize_byte_slice(&mut self, bytes: &[u8]) -> Result<Node, Error> {
        let chunks = chunkify(bytes);
        let limit = chunk_count_for_bytes(bytes.len());
        self.hasher.merkleize(&chunks, Some(limit))
    }
}

fn element_roots<T: HashTreeRoot>(values: &[T]) -> Result<Vec<Node>, Error> {
    values.iter().map(HashTreeRoot::hash_tree_root).collect()
}

/// Every node of a perfect binary tree, addressed by generalized index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    decorated: bool,
}

impl Tree {
    pub fn root(&self) -> Node {
        self[1]
    }

    /// Number of nodes in the bottom layer.
    pub fn leaf_count(&self) -> usize {
        self.nodes.len().div_ceil(2)
    }

    pub fn get(&self, index: GeneralizedIndex) -> Option<Node> {
        index.checked_sub(1).and_then(|i| self.nodes.get(i)).copied()
    }

    /// Whether `index` addresses a node that carries data in this tree.
    ///
    /// Nodes below the decoration of a decorated tree are padding and are not addressable.
    pub(crate) fn check_index(&self, index: GeneralizedIndex) -> Result<(), Error> {
        if index == 0 || index > self.nodes.len() {
            return Err(Error::IndexOutOfRange { index, bound: self.nodes.len() + 1 });
        }
        if self.decorated && index > DECORATION_GENERALIZED_INDEX {
            let depth = index.ilog2();
            if index >> (depth - 1) == DECORATION_GENERALIZED_INDEX {
                return Err(Error::InvalidGeneralizedIndex);
            }
        }
        Ok(())
    }

    fn mix_in_decoration(&mut self, decoration: usize) {
        self[DECORATION_GENERALIZED_INDEX] = length_chunk(decoration);
        self[1] =
            hash_chunks(self[INNER_ROOT_GENERALIZED_INDEX], self[DECORATION_GENERALIZED_INDEX]);
        self.decorated = true;
    }
}

impl Index<GeneralizedIndex> for Tree {
    type Output = Node;

    fn index(&self, index: GeneralizedIndex) -> &Self::Output {
        &self.nodes[index - 1]
    }
}

impl IndexMut<GeneralizedIndex> for Tree {
    fn index_mut(&mut self, index: GeneralizedIndex) -> &mut Self::Output {
        &mut self.nodes[index - 1]
    }
}

/// Return the full Merkle tree of the `chunks` with `leaf_count` leaves.
///
/// Every node is materialized, so this is intended for proving against modestly sized values.
/// Invariant: `leaf_count.next_power_of_two() == leaf_count`
pub fn compute_merkle_tree(
    chunks: &[Node],
    leaf_count: usize,
    config: &HasherConfig,
) -> Result<Tree, Error> {
    debug_assert!(leaf_count.next_power_of_two() == leaf_count);
    if chunks.len() > leaf_count {
        return Err(Error::InputExceedsLimit(leaf_count));
    }
    let node_count = leaf_count
        .checked_mul(2)
        .and_then(|n| n.checked_sub(1))
        .ok_or(Error::GeneralizedIndexOverflow)?;

    let mut nodes = vec![Node::ZERO; node_count];
    // SAFETY: checked subtraction is unnecessary, as node_count >= leaf_count >= chunks.len(); qed
    let leaf_start = leaf_count - 1;
    nodes[leaf_start..leaf_start + chunks.len()].copy_from_slice(chunks);

    // walk up from the leaves; the layer at depth `d` occupies positions `2^d - 1..2^(d+1) - 1`
    let mut width = leaf_count;
    while width > 1 {
        let (upper, lower) = nodes.split_at_mut(width - 1);
        let parents = &mut upper[width / 2 - 1..];
        build_parent_tree_roots_with(parents, &lower[..width], config)?;
        width /= 2;
    }

    Ok(Tree { nodes, decorated: false })
}

/// Return the full Merkle tree of a list: the `chunks` sized for `limit` chunks under the left
/// child of the root and the length of the list under the right child.
pub fn compute_list_merkle_tree(
    chunks: &[Node],
    limit: usize,
    length: usize,
    config: &HasherConfig,
) -> Result<Tree, Error> {
    if chunks.len() > limit {
        return Err(Error::InputExceedsLimit(limit));
    }
    // double to account for decoration layer
    let leaf_count = limit
        .max(1)
        .checked_next_power_of_two()
        .and_then(|n| n.checked_mul(2))
        .ok_or(Error::GeneralizedIndexOverflow)?;
    let mut tree = compute_merkle_tree(chunks, leaf_count, config)?;
    tree.mix_in_decoration(length);
    Ok(tree)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloy_primitives::hex::FromHex;

    pub(crate) fn decode_node_from_hex(hex: &str) -> Node {
        Node::from_hex(hex).unwrap()
    }

    fn repeated_chunks(count: usize, byte: u8) -> Vec<Node> {
        vec![Node::repeat_byte(byte); count]
    }

    #[derive(Debug, Clone)]
    struct Checkpoint {
        epoch: u64,
        root: Node,
    }

    impl HashTreeRoot for Checkpoint {
        fn hash_tree_root(&self) -> Result<Node, Error> {
            let fields = [self.epoch.hash_tree_root()?, self.root.hash_tree_root()?];
            merkleize(&fields, None)
        }
    }

    fn checkpoint() -> Checkpoint {
        Checkpoint { epoch: 3, root: Node::repeat_byte(1) }
    }

    #[test]
    fn test_packing_basic_types_simple() {
        let b = true;
        let mut expected = vec![0u8; BYTES_PER_CHUNK];
        expected[0] = 1u8;
        let result = pack(&[b]).expect("can pack values");
        assert!(result.len() == BYTES_PER_CHUNK);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_packing_basic_types_multiple() {
        let data = [1u8, 2, 3, 4];
        let result = pack(&data).expect("can pack values");

        let mut expected = vec![0u8; BYTES_PER_CHUNK];
        expected[..4].copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(result, expected);

        let data = [u16::MAX; 17];
        let result = pack(&data).expect("can pack values");
        assert_eq!(result.len(), 2 * BYTES_PER_CHUNK);
        assert!(result[34..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_chunkify() {
        assert_eq!(chunkify(&[]), vec![Node::ZERO]);
        assert_eq!(chunk_count_for_bytes(0), 1);
        assert_eq!(chunk_count_for_bytes(32), 1);
        assert_eq!(chunk_count_for_bytes(33), 2);

        let chunks = chunkify(&[7u8; 40]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], Node::repeat_byte(7));
        assert_eq!(&chunks[1][..8], &[7u8; 8]);
        assert!(chunks[1][8..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_merkleize_boundaries() {
        assert_eq!(merkleize(&[], None).unwrap(), zero_hash(0));
        assert_eq!(merkleize(&[], Some(0)).unwrap(), zero_hash(0));
        assert_eq!(merkleize(&[], Some(8)).unwrap(), zero_hash(3));

        let chunk = Node::repeat_byte(9);
        assert_eq!(merkleize(&[chunk], Some(1)).unwrap(), chunk);
        assert_eq!(merkleize(&[chunk], None).unwrap(), chunk);

        let chunks = repeated_chunks(3, 1);
        assert_eq!(merkleize(&chunks, Some(2)), Err(Error::InputExceedsLimit(2)));
    }

    #[test]
    fn test_merkleize_chunks() {
        let chunks = repeated_chunks(2, 0);
        let root = merkleize(&chunks, None).expect("can merkleize");
        assert_eq!(
            root,
            decode_node_from_hex(
                "f5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a92759fb4b"
            )
        );

        let chunks = repeated_chunks(2, 1);
        let root = merkleize(&chunks, None).expect("can merkleize");
        assert_eq!(
            root,
            decode_node_from_hex(
                "7c8975e1e60a5c8337f28edf8c33c3b180360b7279644a9bc1af3c51e6220bf5"
            )
        );

        let chunks = repeated_chunks(3, 1);
        let expected = decode_node_from_hex(
            "65aa94f2b59e517abd400cab655f42821374e433e41b8fe599f6bb15484adcec",
        );
        assert_eq!(merkleize(&chunks, None).unwrap(), expected);
        assert_eq!(merkleize(&chunks, Some(4)).unwrap(), expected);

        let chunks = repeated_chunks(5, 1);
        let root = merkleize(&chunks, Some(8)).expect("can merkleize");
        assert_eq!(
            root,
            decode_node_from_hex(
                "0ae67e34cba4ad2bbfea5dc39e6679b444021522d861fab00f05063c54341289"
            )
        );

        let chunks = repeated_chunks(6, 1);
        let root = merkleize(&chunks, Some(8)).expect("can merkleize");
        assert_eq!(
            root,
            decode_node_from_hex(
                "0ef7df63c204ef203d76145627b8083c49aa7c55ebdee2967556f55a4f65a238"
            )
        );

        let chunks = repeated_chunks(1, 1);
        let root = merkleize(&chunks, Some(4)).expect("can merkleize");
        assert_eq!(
            root,
            decode_node_from_hex(
                "29797eded0e83376b70f2bf034cc0811ae7f1414653b1d720dfd18f74cf13309"
            )
        );

        let chunks = repeated_chunks(1, 2);
        let root = merkleize(&chunks, Some(8)).expect("can merkleize");
        assert_eq!(
            root,
            decode_node_from_hex(
                "fa4cf775712aa8a2fe5dcb5a517d19b2e9effcf58ff311b9fd8e4a7d308e6d00"
            )
        );
    }

    #[test]
    fn test_merkleize_with_large_limits() {
        let chunks = repeated_chunks(5, 1);
        let root = merkleize(&chunks, Some(2usize.pow(10))).expect("can merkleize");
        assert_eq!(
            root,
            decode_node_from_hex(
                "2647cb9e26bd83eeb0982814b2ac4d6cc4a65d0d98637f1a73a4c06d3db0e6ce"
            )
        );

        let chunks = repeated_chunks(70, 1);
        let root = merkleize(&chunks, Some(2usize.pow(63))).expect("can merkleize");
        assert_eq!(
            root,
            decode_node_from_hex(
                "9317695d95b5a3b46e976b5a9cbfcfccb600accaddeda9ac867cc9669b862979"
            )
        );

        // limits past 2^63 pad to a depth of 64
        assert_eq!(merkleize(&[], Some(usize::MAX)).unwrap(), zero_hash(64));
    }

    #[test]
    fn test_reusable_hasher_is_stable_across_calls() {
        let mut hasher = RootHasher::<ReusableBuffer>::default();
        let big = repeated_chunks(100, 1);
        let small = repeated_chunks(3, 1);
        let first = hasher.merkleize(&small, None).unwrap();
        let _ = hasher.merkleize(&big, Some(256)).unwrap();
        let second = hasher.merkleize(&small, None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, merkleize(&small, None).unwrap());
    }

    #[test]
    fn test_parallel_hasher_matches_sequential() {
        let chunks =
            (0..20_000u64).map(|i| Node::left_padding_from(&i.to_le_bytes())).collect::<Vec<_>>();
        let config =
            HasherConfig::default().with_min_parallelization_size(16).with_num_workers(5);
        let parallel = RootHasher::<ReusableBuffer>::with_config(config)
            .merkleize(&chunks, Some(1 << 20))
            .unwrap();
        let sequential = RootHasher::<SingleUseBuffer>::with_config(HasherConfig::sequential())
            .merkleize(&chunks, Some(1 << 20))
            .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_merkleize_basic_and_vectors() {
        let mut merkleizer = Merkleizer::<ReusableBuffer>::default();
        assert_eq!(merkleizer.merkleize_basic(&7u64).unwrap(), 7u64.hash_tree_root().unwrap());

        let root = merkleizer.merkleize_vector_basic(&[1u64, 2, 3, 4, 5]).unwrap();
        assert_eq!(
            root,
            decode_node_from_hex(
                "bf033e82435fc6915833d0f0325b9a752b2bef67493b9d27939e9b2fef56a5a8"
            )
        );

        let checkpoint = checkpoint();
        assert_eq!(
            checkpoint.hash_tree_root().unwrap(),
            decode_node_from_hex(
                "1ba4ffe1a747c4cdc18e0678f09751eb9e09e080ea233340b175f92913a4dc64"
            )
        );

        let values = vec![checkpoint.clone(), checkpoint.clone(), checkpoint];
        let root = merkleizer.merkleize_vector_composite_or_container(&values).unwrap();
        assert_eq!(
            root,
            decode_node_from_hex(
                "59e66ab48f4942559927dd18a886ff98918651d93575c451491787953ce7a204"
            )
        );
    }

    #[test]
    fn test_merkleize_lists() {
        let mut merkleizer = Merkleizer::<ReusableBuffer>::default();

        // List[uint64, 8] occupies two chunks
        let root = merkleizer.merkleize_list_basic(&[1u64, 2, 3], 2).unwrap();
        assert_eq!(
            root,
            decode_node_from_hex(
                "7e0adeccea8b17f07c3d1531a414d0b1f25543d5ddd519604ce30d5af83b1859"
            )
        );

        // List[uint16, 1024] occupies 64 chunks
        let empty: [u16; 0] = [];
        let root = merkleizer.merkleize_list_basic(&empty, 64).unwrap();
        assert_eq!(
            root,
            decode_node_from_hex(
                "c9eece3e14d3c3db45c38bbf69a4cb7464981e2506d8424a0ba450dad9b9af30"
            )
        );
        let full = vec![u16::MAX; 316];
        let root = merkleizer.merkleize_list_basic(&full, 64).unwrap();
        assert_eq!(
            root,
            decode_node_from_hex(
                "d20d2246e1438d88de46f6f41c7b041f92b673845e51f2de93b944bf599e63b1"
            )
        );

        let values = vec![checkpoint(), checkpoint()];
        let root = merkleizer.merkleize_list_composite(&values, 4).unwrap();
        assert_eq!(
            root,
            decode_node_from_hex(
                "56042e1b1dbb0afdc20594897ab1c788f8be8a895ae509ca46bba384496dc5c5"
            )
        );

        let too_many = vec![checkpoint(); 5];
        assert_eq!(
            merkleizer.merkleize_list_composite(&too_many, 4),
            Err(Error::InputExceedsLimit(4))
        );
    }

    #[test]
    fn test_list_and_vector_differ_by_length_mixin() {
        let mut merkleizer = Merkleizer::<SingleUseBuffer>::default();
        let vector = merkleizer.merkleize_vector_basic(&[1u64, 2, 3, 4]).unwrap();
        let list = merkleizer.merkleize_list_basic(&[1u64, 2, 3, 4], 1).unwrap();
        assert_eq!(list, mix_in_length(vector, 4));
    }

    #[test]
    fn test_merkleize_byte_slice() {
        let bytes = (0..96u8).collect::<Vec<_>>();
        assert_eq!(
            merkleize_byte_slice(&bytes).unwrap(),
            decode_node_from_hex(
                "17c8d5caa3d7162e8dada90de6e741783f3d73736498c11eba34974fbf5464f3"
            )
        );
        assert_eq!(merkleize_byte_slice(&[]).unwrap(), Node::ZERO);
    }

    #[test]
    fn test_compute_merkle_tree() {
        let chunks = repeated_chunks(5, 1);
        let tree = compute_merkle_tree(&chunks, 8, &HasherConfig::default()).unwrap();
        assert_eq!(tree.leaf_count(), 8);
        assert_eq!(tree.root(), merkleize(&chunks, Some(8)).unwrap());
        assert_eq!(tree[8], chunks[0]);
        assert_eq!(tree[15], Node::ZERO);
        assert_eq!(tree[7], zero_hash(1));
        assert_eq!(tree.get(0), None);
        assert_eq!(tree.get(16), None);

        let single = compute_merkle_tree(&chunks[..1], 1, &HasherConfig::default()).unwrap();
        assert_eq!(single.root(), chunks[0]);

        assert_eq!(
            compute_merkle_tree(&chunks, 4, &HasherConfig::default()),
            Err(Error::InputExceedsLimit(4))
        );
    }

    #[test]
    fn test_compute_list_merkle_tree() {
        let values = [1u64, 2, 3];
        let packed = pack(&values).unwrap();
        let chunks = chunkify(&packed);
        let tree = compute_list_merkle_tree(&chunks, 2, values.len(), &HasherConfig::default())
            .unwrap();
        let expected = Merkleizer::<SingleUseBuffer>::default()
            .merkleize_list_basic(&values, 2)
            .unwrap();
        assert_eq!(tree.root(), expected);
        assert_eq!(tree[DECORATION_GENERALIZED_INDEX], length_chunk(3));
        assert!(tree.check_index(3).is_ok());
        assert!(tree.check_index(4).is_ok());
        assert_eq!(tree.check_index(6), Err(Error::InvalidGeneralizedIndex));
        assert_eq!(tree.check_index(13), Err(Error::IndexOutOfRange { index: 13, bound: 8 }));
    }
}
