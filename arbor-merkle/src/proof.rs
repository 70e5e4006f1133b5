use crate::error::MerkleError;
use crate::tree::MerkleTree;
use arbor_hash::{hash_internal, hash_leaf, Digest};
use bincode::Options;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Sibling digests from the leaf level up to just below the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    pub siblings: Vec<Digest>,
}

fn wire() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
}

impl InclusionProof {
    pub fn new(siblings: Vec<Digest>) -> Self {
        Self { siblings }
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// `u64` LE sibling count, then the raw digests.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MerkleError> {
        Ok(wire().serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MerkleError> {
        Ok(wire().reject_trailing_bytes().deserialize(bytes)?)
    }
}

/// Recompute the root from a leaf digest and compare it with `root`.
///
/// Concatenation order at each level comes from the parity of `index`
/// halved once per level. An index with bits above the proof height can't
/// address a leaf of this tree and is rejected. The element count is not
/// known here, so bounds against it are the caller's job.
pub fn verify(root: &Digest, index: usize, leaf: &Digest, proof: &InclusionProof) -> bool {
    let mut idx = index;
    let mut h = *leaf;
    for sib in &proof.siblings {
        h = if idx % 2 == 0 { hash_internal(&h, sib) } else { hash_internal(sib, &h) };
        idx >>= 1;
    }
    let ok = idx == 0 && h == *root;
    debug!(index, siblings = proof.len(), ok, "verified inclusion proof");
    ok
}

impl<E: AsRef<[u8]>> MerkleTree<E> {
    /// Walk from the root to leaf `index`, keeping the sibling not taken at
    /// each step, then flip to leaf-to-root order.
    pub fn get_proof(&self, index: usize) -> Result<InclusionProof, MerkleError> {
        if index >= self.len() {
            return Err(MerkleError::out_of_range(index, self.len()));
        }
        let mut siblings = Vec::with_capacity(self.depth());
        let mut current = &self.root;
        while let Some((left, right)) = current.children() {
            let (l, r) = (&self.nodes[left], &self.nodes[right]);
            if l.span.contains(index) {
                trace!(taken = left, sibling = right, "descend left");
                siblings.push(r.digest);
                current = l;
            } else {
                trace!(taken = right, sibling = left, "descend right");
                siblings.push(l.digest);
                current = r;
            }
        }
        debug_assert!(current.is_leaf() && current.span.start == index);
        siblings.reverse();
        Ok(InclusionProof { siblings })
    }

    /// Check a proof for the stored element at `index`.
    pub fn validate_proof(&self, index: usize, proof: &InclusionProof) -> Result<bool, MerkleError> {
        let element = self
            .elements
            .get(index)
            .ok_or_else(|| MerkleError::out_of_range(index, self.len()))?;
        Ok(verify(&self.root.digest, index, &hash_leaf(element.as_ref()), proof))
    }

    /// Check a proof for a caller-supplied element claimed to sit at `index`.
    pub fn validate_element(
        &self,
        element: &[u8],
        index: usize,
        proof: &InclusionProof,
    ) -> Result<bool, MerkleError> {
        if index >= self.len() {
            return Err(MerkleError::out_of_range(index, self.len()));
        }
        Ok(verify(&self.root.digest, index, &hash_leaf(element), proof))
    }
}
