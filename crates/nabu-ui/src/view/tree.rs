use crate::arena::{FrameArena, NodeId};
use crate::id::Id;

use super::node::{ViewKind, ViewNode};

/// A container that has been opened and not yet closed with `end()`.
#[derive(Debug, Copy, Clone)]
pub(crate) struct OpenNode {
    pub node: NodeId,
    pub id: Id,
    pub kind: ViewKind,
    /// Children appended so far; used to derive ids of unlabeled children.
    pub children: u32,
    /// Whether the pointer was over this container when it opened.
    pub hovered: bool,
    pub overlay: bool,
}

/// Per-frame wiring state: the parent stack and the top-level chains.
///
/// Top-level nodes hang off a virtual root that is never allocated, so an
/// empty frame uses no arena space. Overlay roots (popups, open menus) are
/// kept in a separate list, laid out and drawn after the main tree.
#[derive(Debug, Default)]
pub struct TreeState {
    pub(crate) root_first: NodeId,
    pub(crate) root_last: NodeId,
    root_children: u32,
    pub(crate) parents: Vec<OpenNode>,
    pub(crate) overlays: Vec<NodeId>,
    /// Zoom of each enclosing canvas, innermost last.
    pub(crate) canvas_zoom: Vec<f32>,
}

impl TreeState {
    pub fn new() -> Self {
        Self {
            root_first: NodeId::NONE,
            root_last: NodeId::NONE,
            root_children: 0,
            parents: Vec::with_capacity(32),
            overlays: Vec::new(),
            canvas_zoom: Vec::new(),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.root_first = NodeId::NONE;
        self.root_last = NodeId::NONE;
        self.root_children = 0;
        self.parents.clear();
        self.overlays.clear();
        self.canvas_zoom.clear();
    }

    /// Open containers.
    #[inline]
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// True while building inside a container whose allocation failed.
    #[inline]
    pub(crate) fn detached(&self) -> bool {
        self.parents.last().is_some_and(|p| p.node.is_none())
    }

    /// True while building inside a popup or open menu.
    pub(crate) fn in_overlay(&self) -> bool {
        self.parents.iter().any(|p| p.overlay)
    }

    /// Position of the next child among its siblings.
    pub(crate) fn next_ordinal(&mut self) -> u32 {
        let counter = match self.parents.last_mut() {
            Some(p) => &mut p.children,
            None => &mut self.root_children,
        };
        let n = *counter;
        *counter += 1;
        n
    }

    /// Appends `node` as the last child of the open container (or of the root).
    pub(crate) fn link(&mut self, arena: &mut FrameArena<ViewNode>, node: NodeId) {
        let parent = self.parents.last().map(|p| p.node);
        let prev_last = match parent {
            Some(p) => {
                let Some(pn) = arena.node_mut(p) else { return };
                let prev = pn.last_child;
                if pn.first_child.is_none() {
                    pn.first_child = node;
                }
                pn.last_child = node;
                prev
            }
            None => {
                let prev = self.root_last;
                if self.root_first.is_none() {
                    self.root_first = node;
                }
                self.root_last = node;
                prev
            }
        };
        if let Some(prev) = arena.node_mut(prev_last) {
            prev.next_sibling = node;
        }
    }

    pub(crate) fn push(&mut self, open: OpenNode) {
        self.parents.push(open);
    }

    pub(crate) fn pop(&mut self) -> Option<OpenNode> {
        self.parents.pop()
    }
}

/// Collects the sibling chain starting at `first`.
pub fn chain(arena: &FrameArena<ViewNode>, first: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut cur = first;
    while let Some(n) = arena.node(cur) {
        out.push(cur);
        cur = n.next_sibling;
    }
    out
}

/// Children of `parent` in declaration order.
pub fn children(arena: &FrameArena<ViewNode>, parent: NodeId) -> Vec<NodeId> {
    arena.node(parent).map_or_else(Vec::new, |n| chain(arena, n.first_child))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(node: NodeId) -> OpenNode {
        OpenNode { node, id: Id(1), kind: ViewKind::Container, children: 0, hovered: false, overlay: false }
    }

    #[test]
    fn top_level_nodes_chain_off_the_virtual_root() {
        let mut arena = FrameArena::<ViewNode>::new(4096);
        let mut tree = TreeState::new();
        let a = arena.alloc_node(ViewNode::default()).unwrap();
        let b = arena.alloc_node(ViewNode::default()).unwrap();
        tree.link(&mut arena, a);
        tree.link(&mut arena, b);
        assert_eq!(chain(&arena, tree.root_first), vec![a, b]);
    }

    #[test]
    fn children_link_in_order() {
        let mut arena = FrameArena::<ViewNode>::new(4096);
        let mut tree = TreeState::new();
        let parent = arena.alloc_node(ViewNode::default()).unwrap();
        tree.link(&mut arena, parent);
        tree.push(open(parent));
        let kids: Vec<_> = (0..3)
            .map(|_| {
                let k = arena.alloc_node(ViewNode::default()).unwrap();
                tree.link(&mut arena, k);
                k
            })
            .collect();
        tree.pop();
        assert_eq!(children(&arena, parent), kids);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn ordinals_are_per_parent() {
        let mut tree = TreeState::new();
        assert_eq!(tree.next_ordinal(), 0);
        tree.push(open(NodeId::NONE));
        assert_eq!(tree.next_ordinal(), 0);
        assert_eq!(tree.next_ordinal(), 1);
        assert!(tree.detached());
        tree.pop();
        assert_eq!(tree.next_ordinal(), 1);
    }
}
