//! Structural invariant checks for [`OrderedEdgeMap`].

use super::OrderedEdgeMap;
use crate::error::EdgeMapError;

struct SubtreeSummary {
    height: u32,
    nodes: usize,
}

impl<E> OrderedEdgeMap<E> {
    /// Verifies that the arena encodes a valid AVL tree.
    ///
    /// Checks strict key ordering, recorded heights, balance factors in
    /// `{-1, 0, 1}`, the live node count, and that every free-list slot is
    /// vacant.
    ///
    /// # Errors
    /// Returns [`EdgeMapError::InvariantViolation`] describing the first
    /// violation encountered.
    pub fn validate(&self) -> Result<(), EdgeMapError> {
        let summary = self.validate_subtree(self.root, None, None)?;
        if summary.nodes != self.len {
            return Err(violation(format!(
                "reachable node count {} differs from len {}",
                summary.nodes, self.len
            )));
        }

        for &slot in &self.free {
            if self.slots.get(slot).is_none_or(Option::is_some) {
                return Err(violation(format!("free-list slot {slot} is not vacant")));
            }
        }

        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        if occupied != self.len {
            return Err(violation(format!(
                "{occupied} occupied slots but len is {}",
                self.len
            )));
        }
        Ok(())
    }

    fn validate_subtree(
        &self,
        link: Option<usize>,
        lower: Option<usize>,
        upper: Option<usize>,
    ) -> Result<SubtreeSummary, EdgeMapError> {
        let Some(index) = link else {
            return Ok(SubtreeSummary {
                height: 0,
                nodes: 0,
            });
        };
        let Some(Some(node)) = self.slots.get(index) else {
            return Err(violation(format!("link to vacant slot {index}")));
        };

        if lower.is_some_and(|bound| node.key <= bound)
            || upper.is_some_and(|bound| node.key >= bound)
        {
            return Err(violation(format!("key {} breaks ordering", node.key)));
        }

        let left = self.validate_subtree(node.left, lower, Some(node.key))?;
        let right = self.validate_subtree(node.right, Some(node.key), upper)?;

        let height = left.height.max(right.height) + 1;
        if node.height != height {
            return Err(violation(format!(
                "key {} records height {} but subtree height is {height}",
                node.key, node.height
            )));
        }
        if left.height.abs_diff(right.height) > 1 {
            return Err(violation(format!(
                "key {} is unbalanced ({} vs {})",
                node.key, left.height, right.height
            )));
        }

        Ok(SubtreeSummary {
            height,
            nodes: left.nodes + right.nodes + 1,
        })
    }
}

fn violation(message: String) -> EdgeMapError {
    EdgeMapError::InvariantViolation { message }
}
