//! Reduction of a layer of roots into the layer of their parents.
use super::{hasher::hash_chunks_with, MerkleizationError as Error, Node};
use crate::config::HasherConfig;
use log::trace;
use sha2::{Digest, Sha256};

// Hash each adjacent pair of `input` into the matching slot of `output`.
// Invariant: `2 * output.len() == input.len()`
fn hash_pairs(output: &mut [Node], input: &[Node]) {
    debug_assert!(2 * output.len() == input.len());
    let mut hasher = Sha256::new();
    for (parent, children) in output.iter_mut().zip(input.chunks_exact(2)) {
        *parent = hash_chunks_with(&mut hasher, children[0], children[1]);
    }
}

/// Write `output[i] = H(input[2i] || input[2i + 1])` for every pair in `input`, using the
/// default [`HasherConfig`].
pub fn build_parent_tree_roots(output: &mut [Node], input: &[Node]) -> Result<(), Error> {
    build_parent_tree_roots_with(output, input, &HasherConfig::default())
}

/// Write `output[i] = H(input[2i] || input[2i + 1])` for every pair in `input`.
///
/// Layers of at least `config.min_parallelization_size` roots are split into contiguous
/// segments, one per worker, each writing only its own slice of `output`. The result is
/// identical to the sequential reduction for any worker count.
///
/// Only the first `input.len() / 2` entries of `output` are written.
pub fn build_parent_tree_roots_with(
    output: &mut [Node],
    input: &[Node],
    config: &HasherConfig,
) -> Result<(), Error> {
    if input.len() % 2 != 0 {
        return Err(Error::OddLengthInput(input.len()));
    }
    let pair_count = input.len() / 2;
    if output.len() < pair_count {
        return Err(Error::InsufficientOutputBuffer {
            expected: pair_count,
            provided: output.len(),
        });
    }
    let output = &mut output[..pair_count];

    let workers = config.workers();
    if input.len() < config.min_parallelization_size || workers < 2 || pair_count < 2 {
        hash_pairs(output, input);
        return Ok(());
    }

    // NOTE: rounding up yields at most `workers` segments; the last one may be shorter
    let segment_len = pair_count.div_ceil(workers);
    trace!(
        "reducing {} roots across {} segments of {} pairs",
        input.len(),
        pair_count.div_ceil(segment_len),
        segment_len
    );
    rayon::scope(|s| {
        for (parents, children) in output.chunks_mut(segment_len).zip(input.chunks(2 * segment_len))
        {
            s.spawn(move |_| hash_pairs(parents, children));
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkleization::hasher::hash_chunks;

    fn layer(len: usize) -> Vec<Node> {
        (0..len).map(|i| Node::left_padding_from(&(i as u64).to_be_bytes())).collect()
    }

    #[test]
    fn test_odd_length_is_rejected() {
        let input = layer(3);
        let mut output = vec![Node::ZERO; 2];
        assert_eq!(build_parent_tree_roots(&mut output, &input), Err(Error::OddLengthInput(3)));
    }

    #[test]
    fn test_short_output_is_rejected() {
        let input = layer(8);
        let mut output = vec![Node::ZERO; 3];
        assert_eq!(
            build_parent_tree_roots(&mut output, &input),
            Err(Error::InsufficientOutputBuffer { expected: 4, provided: 3 })
        );
    }

    #[test]
    fn test_empty_layer() {
        let mut output = Vec::<Node>::new();
        assert!(build_parent_tree_roots(&mut output, &[]).is_ok());
    }

    #[test]
    fn test_sequential_reduction() {
        let input = layer(6);
        let mut output = vec![Node::ZERO; 4];
        build_parent_tree_roots(&mut output, &input).unwrap();
        for i in 0..3 {
            assert_eq!(output[i], hash_chunks(input[2 * i], input[2 * i + 1]));
        }
        // entries past the parent layer are untouched
        assert_eq!(output[3], Node::ZERO);
    }

    #[test]
    fn test_parallel_reduction_above_threshold() {
        let _ = env_logger::builder().is_test(true).try_init();
        let input = layer(10_002);
        let mut sequential = vec![Node::ZERO; input.len() / 2];
        let mut parallel = sequential.clone();
        build_parent_tree_roots_with(&mut sequential, &input, &HasherConfig::sequential())
            .unwrap();
        build_parent_tree_roots_with(
            &mut parallel,
            &input,
            &HasherConfig::default().with_num_workers(7),
        )
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parallel_matches_sequential(
                pairs in 0usize..300,
                workers in 1usize..12,
                threshold in 0usize..64,
            ) {
                let input = layer(2 * pairs);
                let mut sequential = vec![Node::ZERO; pairs];
                let mut parallel = vec![Node::ZERO; pairs];
                let sequential_config = HasherConfig::sequential();
                build_parent_tree_roots_with(&mut sequential, &input, &sequential_config).unwrap();
                let config = HasherConfig::default()
                    .with_min_parallelization_size(threshold)
                    .with_num_workers(workers);
                build_parent_tree_roots_with(&mut parallel, &input, &config).unwrap();
                prop_assert_eq!(sequential, parallel);
            }
        }
    }
}
