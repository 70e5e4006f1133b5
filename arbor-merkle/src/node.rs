use arbor_hash::{to_hex, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive interval of element indices covered by a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn single(index: usize) -> Self {
        Self { start: index, end: index }
    }

    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    pub fn shifted(&self, by: usize) -> Self {
        Self { start: self.start + by, end: self.end + by }
    }

    /// Span of two adjacent siblings, left first.
    pub fn join(left: Span, right: Span) -> Self {
        debug_assert_eq!(left.end + 1, right.start);
        Self { start: left.start, end: right.end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// How a node relates to the rest of the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Links {
    /// Hash of one real element.
    Leaf,
    /// Copy of the last node of an odd level; has no children.
    Padding,
    /// Hash of two children, given as arena indices.
    Branch { left: usize, right: usize },
}

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub digest: Digest,
    pub span: Span,
    pub links: Links,
}

impl Node {
    pub fn children(&self) -> Option<(usize, usize)> {
        match self.links {
            Links::Branch { left, right } => Some((left, right)),
            Links::Leaf | Links::Padding => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.links == Links::Leaf
    }

    pub fn is_padding(&self) -> bool {
        self.links == Links::Padding
    }

    /// Duplicate used to even out a level: same digest, span moved past the
    /// original by its own width.
    pub(crate) fn padding_for(last: &Node) -> Self {
        Self {
            digest: last.digest,
            span: last.span.shifted(last.span.width()),
            links: Links::Padding,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("digest", &to_hex(&self.digest))
            .field("span", &self.span)
            .field("links", &self.links)
            .finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.links {
            Links::Leaf => write!(f, "{} leaf {}", self.span, to_hex(&self.digest)),
            Links::Padding => write!(f, "{} pad {}", self.span, to_hex(&self.digest)),
            Links::Branch { left, right } => {
                write!(f, "{} ({left}, {right}) {}", self.span, to_hex(&self.digest))
            }
        }
    }
}
