use crate::error::MerkleError;
use crate::node::Links;
use crate::tree::{level_ranges, MerkleTree};
use arbor_hash::{hash_internal, hash_leaf};
use tracing::debug;

/// Mutation of a built tree. After every successful call the root equals
/// the root of a fresh build over the new element sequence.
pub trait ElementUpdate<E> {
    /// Append `element` at the tail.
    fn append_element(&mut self, element: E);

    /// Replace the element at `index`. Leaves the tree untouched on error.
    fn update_element(&mut self, index: usize, element: E) -> Result<(), MerkleError>;
}

impl<E: AsRef<[u8]> + Sync> ElementUpdate<E> for MerkleTree<E> {
    fn append_element(&mut self, element: E) {
        // Shape changes with the count, so the arena is rebuilt.
        self.elements.push(element);
        self.rebuild();
        debug!(elements = self.len(), "appended element");
    }

    fn update_element(&mut self, index: usize, element: E) -> Result<(), MerkleError> {
        if index >= self.len() {
            return Err(MerkleError::out_of_range(index, self.len()));
        }
        self.nodes[index].digest = hash_leaf(element.as_ref());
        self.elements[index] = element;

        let levels = level_ranges(self.len());
        let mut pos = index;
        for pair in levels.windows(2) {
            let (level, above) = (&pair[0], &pair[1]);
            let node = level.start + pos;
            let pad = level.end - 1;
            if node + 1 == pad && self.nodes[pad].is_padding() {
                self.nodes[pad].digest = self.nodes[node].digest;
            }
            let left = level.start + (pos & !1);
            let parent = above.start + pos / 2;
            debug_assert_eq!(self.nodes[parent].links, Links::Branch { left, right: left + 1 });
            self.nodes[parent].digest =
                hash_internal(&self.nodes[left].digest, &self.nodes[left + 1].digest);
            pos /= 2;
        }
        if let Some(last) = self.nodes.last() {
            self.root = last.clone();
        }
        debug!(index, levels = levels.len(), "updated element");
        Ok(())
    }
}
