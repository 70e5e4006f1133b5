// File: arbor-merkle/src/lib.rs
//! Binary Merkle tree over an ordered list of elements.
//!
//! Nodes live in a flat arena built bottom-up, one level after another. A
//! level with an odd node count is padded with a verbatim copy of its last
//! node before pairing, so every level but the root level is even:
//!
//! ```text
//! elements: a b c
//!
//!                 root = H(ab || cc)
//!               /                    \
//!     ab = H(a || b)             cc = H(c || c')
//!      /        \                  /        \
//!   h(a)       h(b)             h(c)       c' = copy of h(c)
//!
//! arena: [h(a) h(b) h(c) c' ab cc root]
//! ```
//!
//! Proofs are extracted by walking spans from the root and verified by
//! index parity, which agree because a node's position within its level is
//! always `index >> level`.

mod error;
mod node;
mod proof;
mod tree;
mod update;

pub use error::{checked_index, signed_index, unsigned_index, MerkleError};
pub use node::{Links, Node, Span};
pub use proof::{verify, InclusionProof};
pub use tree::MerkleTree;
pub use update::ElementUpdate;

pub use arbor_hash::{Digest, DIGEST_LEN};
