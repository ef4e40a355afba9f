use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::tree::{Node, NodeKind, Tree};
use crate::{distribution::FrequencyDistribution, error::Error, Result};

pub trait TreeBuilder {
    fn radix(&self) -> usize;

    fn build(&self, distribution: &FrequencyDistribution) -> Result<Tree>;
}

/// Classical two-way Huffman construction.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryTreeBuilder;

impl TreeBuilder for BinaryTreeBuilder {
    fn radix(&self) -> usize {
        2
    }

    fn build(&self, distribution: &FrequencyDistribution) -> Result<Tree> {
        build_tree(distribution, 2)
    }
}

/// Huffman construction for an arbitrary radix. Zero weight placeholder
/// leaves are queued before merging so that every merge takes exactly
/// `radix` nodes.
#[derive(Clone, Copy, Debug)]
pub struct NAryTreeBuilder {
    radix: usize,
}

impl NAryTreeBuilder {
    pub fn new(radix: usize) -> Result<Self> {
        if radix < 2 {
            return Err(Error::InvalidRadix(radix));
        }
        Ok(Self { radix })
    }
}

impl TreeBuilder for NAryTreeBuilder {
    fn radix(&self) -> usize {
        self.radix
    }

    fn build(&self, distribution: &FrequencyDistribution) -> Result<Tree> {
        build_tree(distribution, self.radix)
    }
}

/// Number of placeholders needed so that `(leaf_count - 1) mod (radix - 1) == 0`.
pub fn padding_count(leaf_count: usize, radix: usize) -> usize {
    let group = radix - 1;
    (group - (leaf_count.saturating_sub(1) % group)) % group
}

// Queue order: ascending weight, then ascending arena index. Leaves are
// indexed in distribution order and every new node gets the next index, so
// the index doubles as insertion sequence number.
#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    weight: f64,
    index: usize,
}

impl From<&Node> for QueueEntry {
    fn from(value: &Node) -> Self {
        Self {
            weight: value.weight,
            index: value.index,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

fn build_tree(distribution: &FrequencyDistribution, radix: usize) -> Result<Tree> {
    if radix < 2 {
        return Err(Error::InvalidRadix(radix));
    }
    if distribution.is_empty() {
        return Err(Error::EmptyAlphabet);
    }

    let mut nodes: Vec<Node> = distribution
        .iter()
        .enumerate()
        .map(|(index, sf)| Node::leaf(index, sf.symbol.clone(), sf.frequency))
        .collect();
    let padding = padding_count(nodes.len(), radix);
    for _ in 0..padding {
        nodes.push(Node::placeholder(nodes.len()));
    }
    log::debug!(
        "building radix {} tree for {} symbols with {} placeholders",
        radix,
        distribution.len(),
        padding
    );
    merge(nodes, radix)
}

fn merge(mut nodes: Vec<Node>, radix: usize) -> Result<Tree> {
    let mut heap: BinaryHeap<Reverse<QueueEntry>> =
        nodes.iter().map(|n| Reverse(QueueEntry::from(n))).collect();
    let leaves = nodes.len();

    while heap.len() > 1 {
        let mut children = Vec::with_capacity(radix);
        let mut weight = 0.0;
        for _ in 0..radix {
            let Reverse(entry) = heap
                .pop()
                .ok_or_else(|| queue_exhausted(radix, children.len()))?;
            weight += entry.weight;
            children.push(entry.index);
        }
        let node = Node {
            weight,
            index: nodes.len(),
            kind: NodeKind::Inner { children },
        };
        heap.push(Reverse(QueueEntry::from(&node)));
        nodes.push(node);
    }

    let Reverse(root) = heap.pop().ok_or_else(|| queue_exhausted(radix, 0))?;
    log::debug!(
        "radix {} tree complete: {} merges, {} nodes, root weight {}",
        radix,
        nodes.len() - leaves,
        nodes.len(),
        root.weight
    );
    Ok(Tree {
        nodes,
        root_index: root.index,
        radix,
    })
}

fn queue_exhausted(radix: usize, taken: usize) -> Error {
    let message = format!(
        "merge step required {} nodes but the queue ran empty after {}",
        radix, taken
    );
    log::error!("{}", message);
    Error::InvariantViolation(message)
}
