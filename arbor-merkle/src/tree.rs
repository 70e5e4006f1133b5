// File: arbor-merkle/src/tree.rs
use crate::error::MerkleError;
use crate::node::{Links, Node, Span};
use arbor_hash::{hash_internal, hash_leaf, to_hex, Digest};
use rayon::prelude::*;
use std::io::{self, Write};
use std::ops::Range;
use tracing::debug;

/// Merkle tree owning its elements, the node arena and a copy of the root.
///
/// The arena is laid out level by level, leaves first, with each odd level
/// followed by its padding node. The root is always the last arena node.
#[derive(Clone, Debug)]
pub struct MerkleTree<E = String> {
    pub(crate) elements: Vec<E>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: Node,
}

impl<E: AsRef<[u8]> + Sync> MerkleTree<E> {
    pub fn build(elements: Vec<E>) -> Result<Self, MerkleError> {
        let nodes = build_arena(&elements);
        let root = nodes.last().cloned().ok_or(MerkleError::EmptyInput)?;
        debug!(
            elements = elements.len(),
            nodes = nodes.len(),
            root = %to_hex(&root.digest),
            "built merkle tree"
        );
        Ok(Self { elements, nodes, root })
    }

    pub(crate) fn rebuild(&mut self) {
        self.nodes = build_arena(&self.elements);
        if let Some(last) = self.nodes.last() {
            self.root = last.clone();
        }
    }
}

impl<E: AsRef<[u8]>> MerkleTree<E> {
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_digest(&self) -> &Digest {
        &self.root.digest
    }

    /// Number of elements (not arena nodes).
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Levels above the leaves; also the length of every proof.
    pub fn depth(&self) -> usize {
        level_ranges(self.len()).len() - 1
    }

    /// Node count of each level, leaves first, padding included.
    pub fn level_sizes(&self) -> Vec<usize> {
        level_ranges(self.len()).iter().map(|r| r.len()).collect()
    }

    pub fn print_elements<W: Write>(&self, mut w: W) -> io::Result<()> {
        for e in &self.elements {
            writeln!(w, "{}", String::from_utf8_lossy(e.as_ref()))?;
        }
        Ok(())
    }

    pub fn print_nodes<W: Write>(&self, mut w: W) -> io::Result<()> {
        for (i, node) in self.nodes.iter().enumerate() {
            writeln!(w, "{i} {node}")?;
        }
        Ok(())
    }
}

fn build_arena<E: AsRef<[u8]> + Sync>(elements: &[E]) -> Vec<Node> {
    // Leaves hashed in parallel; collect keeps input order.
    let mut nodes: Vec<Node> = elements
        .par_iter()
        .enumerate()
        .map(|(i, e)| Node { digest: hash_leaf(e.as_ref()), span: Span::single(i), links: Links::Leaf })
        .collect();

    let mut level = 0..nodes.len();
    let mut height = 0usize;
    while level.len() > 1 {
        let padded = level.len() % 2 == 1;
        if padded {
            let pad = Node::padding_for(&nodes[level.end - 1]);
            nodes.push(pad);
            level.end += 1;
        }
        debug!(height, width = level.len(), padded, "reducing level");

        let next = nodes.len();
        for left in level.clone().step_by(2) {
            let right = left + 1;
            let parent = Node {
                digest: hash_internal(&nodes[left].digest, &nodes[right].digest),
                span: Span::join(nodes[left].span, nodes[right].span),
                links: Links::Branch { left, right },
            };
            nodes.push(parent);
        }
        level = next..nodes.len();
        height += 1;
    }
    nodes
}

/// Arena index ranges of every level for a tree over `leaves` elements,
/// replaying the shape `build_arena` produces.
pub(crate) fn level_ranges(leaves: usize) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut size = leaves;
    while size > 1 {
        let padded = size + size % 2;
        out.push(start..start + padded);
        start += padded;
        size = padded / 2;
    }
    out.push(start..start + size);
    out
}
