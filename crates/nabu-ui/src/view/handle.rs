use nabu_engine::coords::Vec2;
use nabu_engine::paint::Color;
use nabu_engine::scene::{Border, Glow};

use crate::arena::{FrameArena, NodeId};
use crate::id::Id;

use super::node::{Align, Callback, Justify, NodeData, ViewKind, ViewNode};

/// What the interaction resolver decided about an element this frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Response {
    /// The pointer is over the element's last-frame rectangle.
    pub hovered: bool,
    /// Press edge landed on the element this frame.
    pub pressed: bool,
    /// Press and release both landed on the element; reported on the release frame.
    pub clicked: bool,
    /// The element holds `active`.
    pub active: bool,
    pub focused: bool,
    /// The bound value was modified by this call.
    pub changed: bool,
    /// Open state of a collapsible, tree node or menu.
    pub expanded: bool,
    /// Payload delivered to a drop target on this release.
    pub dropped: Option<u64>,
}

/// Fluent handle over a node allocated this frame.
///
/// Universal setters (size, flex, spacing, style) apply to every kind;
/// type-specific setters are ignored by kinds they do not apply to. A handle
/// over a failed allocation accepts every call and does nothing.
///
/// ```rust,ignore
/// if ui.button("Save").size(80.0, 30.0).radius(6.0).clicked() {
///     save();
/// }
/// ```
pub struct Handle<'a> {
    arena: &'a mut FrameArena<ViewNode>,
    node: NodeId,
    response: Response,
}

impl<'a> Handle<'a> {
    pub(crate) fn new(arena: &'a mut FrameArena<ViewNode>, node: NodeId, response: Response) -> Self {
        Self { arena, node, response }
    }

    #[inline]
    fn with(self, f: impl FnOnce(&mut ViewNode)) -> Self {
        if let Some(n) = self.arena.node_mut(self.node) {
            f(n);
        }
        self
    }

    // ── results ───────────────────────────────────────────────────────────

    #[inline]
    pub fn response(&self) -> Response {
        self.response
    }

    #[inline]
    pub fn clicked(&self) -> bool {
        self.response.clicked
    }

    #[inline]
    pub fn changed(&self) -> bool {
        self.response.changed
    }

    #[inline]
    pub fn hovered(&self) -> bool {
        self.response.hovered
    }

    #[inline]
    pub fn pressed(&self) -> bool {
        self.response.pressed
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.response.active
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.response.focused
    }

    /// Whether the collapsible / tree node is open. When true the node is
    /// an open container and needs a matching `end()`.
    #[inline]
    pub fn expanded(&self) -> bool {
        self.response.expanded
    }

    #[inline]
    pub fn dropped(&self) -> Option<u64> {
        self.response.dropped
    }

    /// Element id, or [`Id::NONE`] for a failed allocation.
    pub fn id(&self) -> Id {
        self.arena.node(self.node).map_or(Id::NONE, |n| n.id)
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    // ── size & flex ───────────────────────────────────────────────────────

    pub fn width(self, w: f32) -> Self {
        self.with(|n| n.width = w.max(0.0))
    }

    pub fn height(self, h: f32) -> Self {
        self.with(|n| n.height = h.max(0.0))
    }

    pub fn size(self, w: f32, h: f32) -> Self {
        self.width(w).height(h)
    }

    pub fn grow(self, grow: f32) -> Self {
        self.with(|n| n.grow = grow.max(0.0))
    }

    pub fn shrink(self, shrink: f32) -> Self {
        self.with(|n| n.shrink = shrink.max(0.0))
    }

    pub fn wrap(self, wrap: bool) -> Self {
        self.with(|n| n.wrap = wrap)
    }

    /// Cross-axis placement of this container's children.
    pub fn align(self, align: Align) -> Self {
        self.with(|n| n.align = align)
    }

    /// Cross-axis placement of this node inside its parent.
    pub fn align_self(self, align: Align) -> Self {
        self.with(|n| n.align_self = Some(align))
    }

    pub fn justify(self, justify: Justify) -> Self {
        self.with(|n| n.justify = justify)
    }

    pub fn gap(self, gap: f32) -> Self {
        self.with(|n| n.gap = gap.max(0.0))
    }

    pub fn padding(self, padding: f32) -> Self {
        self.with(|n| n.padding = padding.max(0.0))
    }

    pub fn margin(self, margin: f32) -> Self {
        self.with(|n| n.margin = margin.max(0.0))
    }

    /// Takes the node out of flow, placed at `offset` from the parent's origin.
    pub fn absolute(self, offset: Vec2) -> Self {
        self.with(|n| {
            n.absolute = true;
            n.offset = offset;
        })
    }

    // ── style ─────────────────────────────────────────────────────────────

    pub fn bg(self, color: Color) -> Self {
        self.with(|n| n.bg = color)
    }

    /// Foreground: text, strokes, indicator fill.
    pub fn color(self, color: Color) -> Self {
        self.with(|n| n.fg = color)
    }

    pub fn radius(self, radius: f32) -> Self {
        self.with(|n| n.radius = radius.max(0.0))
    }

    pub fn squircle(self, squircle: bool) -> Self {
        self.with(|n| n.squircle = squircle)
    }

    pub fn elevation(self, elevation: f32) -> Self {
        self.with(|n| n.elevation = elevation.max(0.0))
    }

    /// Alias of [`Handle::elevation`].
    pub fn shadow(self, elevation: f32) -> Self {
        self.elevation(elevation)
    }

    /// Backdrop blur sigma.
    pub fn blur(self, sigma: f32) -> Self {
        self.with(|n| n.backdrop_blur = sigma.max(0.0))
    }

    pub fn border(self, width: f32, color: Color) -> Self {
        self.with(|n| n.border = (width > 0.0).then_some(Border::new(width, color)))
    }

    pub fn glow(self, strength: f32, color: Color) -> Self {
        self.with(|n| n.glow = (strength > 0.0).then_some(Glow::new(strength, color)))
    }

    pub fn wobble(self, wobble: Vec2) -> Self {
        self.with(|n| n.wobble = wobble)
    }

    pub fn font_size(self, size: f32) -> Self {
        self.with(|n| n.font_size = size.max(0.0))
    }

    // ── type-specific ─────────────────────────────────────────────────────

    /// Control points of a bezier wire.
    pub fn points(self, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        self.with(|n| {
            if let NodeData::Bezier { points, .. } = &mut n.data {
                *points = [p0, p1, p2, p3];
            }
        })
    }

    /// Stroke width of a bezier wire.
    pub fn thickness(self, t: f32) -> Self {
        self.with(|n| {
            if let NodeData::Bezier { thickness, .. } = &mut n.data {
                *thickness = t.max(0.0);
            }
        })
    }

    /// Draw a plot as bars instead of a line.
    pub fn bars(self, bars: bool) -> Self {
        self.with(|n| {
            if let NodeData::Plot { bars: b, .. } = &mut n.data {
                *b = bars;
            }
        })
    }

    /// Invoked after the build phase of a frame in which the button was clicked.
    pub fn on_click(self, callback: Callback) -> Self {
        self.with(|n| {
            if let NodeData::Button { on_click, .. } = &mut n.data {
                *on_click = Some(callback);
            }
        })
    }

    /// Greyed text shown by an empty text input.
    pub fn placeholder(mut self, text: &str) -> Self {
        let is_input = self.arena.node(self.node).is_some_and(|n| n.kind == ViewKind::TextInput);
        if !is_input {
            return self;
        }
        let Ok(s) = self.arena.alloc_str(text) else {
            log::warn!("arena full; dropping placeholder");
            return self;
        };
        self = self.with(|n| {
            if let NodeData::TextInput { placeholder, .. } = &mut n.data {
                *placeholder = s;
            }
        });
        self
    }
}

/// A handle converts to its click result.
impl From<Handle<'_>> for bool {
    fn from(h: Handle<'_>) -> bool {
        h.response.clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_with(kind: ViewKind, data: NodeData) -> (FrameArena<ViewNode>, NodeId) {
        let mut arena = FrameArena::new(4096);
        let node = arena.alloc_node(ViewNode::new(kind, Id(9)).with_data(data)).unwrap();
        (arena, node)
    }

    #[test]
    fn universal_setters_write_the_header() {
        let (mut arena, node) = arena_with(ViewKind::Container, NodeData::None);
        Handle::new(&mut arena, node, Response::default())
            .size(10.0, 20.0)
            .grow(1.0)
            .padding(4.0)
            .bg(Color::WHITE)
            .border(1.0, Color::BLACK);
        let n = arena.node(node).unwrap();
        assert_eq!((n.width, n.height, n.grow, n.padding), (10.0, 20.0, 1.0, 4.0));
        assert_eq!(n.bg, Color::WHITE);
        assert!(n.border.is_some());
    }

    #[test]
    fn type_specific_setters_ignore_other_kinds() {
        let (mut arena, node) = arena_with(ViewKind::Text, NodeData::None);
        Handle::new(&mut arena, node, Response::default()).thickness(3.0).placeholder("x");
        assert!(matches!(arena.node(node).unwrap().data, NodeData::None));
    }

    #[test]
    fn sentinel_handle_is_inert() {
        let mut arena = FrameArena::<ViewNode>::new(4096);
        let h = Handle::new(&mut arena, NodeId::NONE, Response::default()).size(5.0, 5.0).bg(Color::WHITE);
        assert_eq!(h.id(), Id::NONE);
        assert!(!bool::from(h));
        assert_eq!(arena.node_count(), 0);
    }

    #[test]
    fn converts_to_click() {
        let (mut arena, node) = arena_with(ViewKind::Button, NodeData::None);
        let h = Handle::new(&mut arena, node, Response { clicked: true, ..Response::default() });
        assert!(bool::from(h));
    }
}
