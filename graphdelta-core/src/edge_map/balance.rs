//! AVL height bookkeeping and rotations.

use super::OrderedEdgeMap;

impl<E> OrderedEdgeMap<E> {
    pub(super) fn height_of(&self, link: Option<usize>) -> u32 {
        link.map_or(0, |index| self.node(index).height)
    }

    /// Right subtree height minus left subtree height.
    pub(super) fn balance_factor(&self, index: usize) -> i64 {
        let node = self.node(index);
        i64::from(self.height_of(node.right)) - i64::from(self.height_of(node.left))
    }

    fn fix_height(&mut self, index: usize) {
        let node = self.node(index);
        let height = self.height_of(node.left).max(self.height_of(node.right)) + 1;
        self.node_mut(index).height = height;
    }

    fn rotate_right(&mut self, pivot: usize) -> usize {
        let Some(lifted) = self.node(pivot).left else {
            panic!("rotate_right requires a left child at slot {pivot}");
        };
        let inner = self.node(lifted).right;
        self.node_mut(pivot).left = inner;
        self.node_mut(lifted).right = Some(pivot);
        self.fix_height(pivot);
        self.fix_height(lifted);
        lifted
    }

    fn rotate_left(&mut self, pivot: usize) -> usize {
        let Some(lifted) = self.node(pivot).right else {
            panic!("rotate_left requires a right child at slot {pivot}");
        };
        let inner = self.node(lifted).left;
        self.node_mut(pivot).right = inner;
        self.node_mut(lifted).left = Some(pivot);
        self.fix_height(pivot);
        self.fix_height(lifted);
        lifted
    }

    /// Restores the AVL property at `index` and returns the new subtree root.
    pub(super) fn rebalance(&mut self, index: usize) -> usize {
        self.fix_height(index);

        match self.balance_factor(index) {
            2 => {
                if let Some(right) = self.node(index).right
                    && self.balance_factor(right) < 0
                {
                    let lifted = self.rotate_right(right);
                    self.node_mut(index).right = Some(lifted);
                }
                self.rotate_left(index)
            }
            -2 => {
                if let Some(left) = self.node(index).left
                    && self.balance_factor(left) > 0
                {
                    let lifted = self.rotate_left(left);
                    self.node_mut(index).left = Some(lifted);
                }
                self.rotate_right(index)
            }
            _ => index,
        }
    }
}
