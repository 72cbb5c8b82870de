//! Depth-first traversal of a group tree

use crate::model::GroupNode;

/// Iterator over every group below a root, each yielded exactly once.
///
/// Groups come out in depth-first pre-order with siblings in declaration
/// order. The root itself is never yielded.
pub struct GroupWalker<'a, G: GroupNode> {
    stack: Vec<&'a G>,
}

impl<'a, G: GroupNode> GroupWalker<'a, G> {
    pub fn new(root: &'a G) -> Self {
        let mut walker = Self { stack: Vec::new() };
        walker.push_children(root);
        walker
    }

    fn push_children(&mut self, group: &'a G) {
        let children: Vec<&'a G> = group.children().collect();
        self.stack.extend(children.into_iter().rev());
    }
}

impl<'a, G: GroupNode> Iterator for GroupWalker<'a, G> {
    type Item = &'a G;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.stack.pop()?;
        self.push_children(group);
        Some(group)
    }
}
