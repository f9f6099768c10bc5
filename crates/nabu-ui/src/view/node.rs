use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::paint::Color;
use nabu_engine::scene::{Border, Glow};

use crate::arena::{ArenaSlice, ArenaStr, NodeId};
use crate::id::Id;

/// Widget type of a view node.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ViewKind {
    #[default]
    Container,
    Text,
    Button,
    Scroll,
    TextInput,
    Toggle,
    Slider,
    Fader,
    Knob,
    Dragger,
    Collapsible,
    TreeNode,
    ColorPicker,
    Plot,
    Bezier,
    Table,
    Splitter,
    MenuBar,
    Menu,
    MenuItem,
    Popup,
    Markdown,
    DragSource,
    DropTarget,
    Canvas,
    GraphNode,
}

impl ViewKind {
    /// Seed mixed into auto-generated ids of unlabeled nodes.
    pub const fn seed(self) -> &'static str {
        match self {
            ViewKind::Container => "container",
            ViewKind::Text => "text",
            ViewKind::Button => "button",
            ViewKind::Scroll => "scroll",
            ViewKind::TextInput => "text_input",
            ViewKind::Toggle => "toggle",
            ViewKind::Slider => "slider",
            ViewKind::Fader => "fader",
            ViewKind::Knob => "knob",
            ViewKind::Dragger => "dragger",
            ViewKind::Collapsible => "collapsible",
            ViewKind::TreeNode => "tree_node",
            ViewKind::ColorPicker => "color_picker",
            ViewKind::Plot => "plot",
            ViewKind::Bezier => "bezier",
            ViewKind::Table => "table",
            ViewKind::Splitter => "splitter",
            ViewKind::MenuBar => "menu_bar",
            ViewKind::Menu => "menu",
            ViewKind::MenuItem => "menu_item",
            ViewKind::Popup => "popup",
            ViewKind::Markdown => "markdown",
            ViewKind::DragSource => "drag_source",
            ViewKind::DropTarget => "drop_target",
            ViewKind::Canvas => "canvas",
            ViewKind::GraphNode => "graph_node",
        }
    }

    /// Kinds whose header strip sits above their children.
    #[inline]
    pub const fn has_header(self) -> bool {
        matches!(self, ViewKind::Collapsible | ViewKind::TreeNode | ViewKind::GraphNode)
    }

    /// Kinds that clip and offset their children.
    #[inline]
    pub const fn scrolls(self) -> bool {
        matches!(self, ViewKind::Scroll | ViewKind::Table)
    }
}

/// Cross-axis placement.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Align {
    Start,
    Center,
    End,
    #[default]
    Stretch,
}

/// Main-axis distribution of leftover space when nothing grows.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
}

/// A plain function pointer plus an opaque word, invoked after the build.
///
/// Nodes live in the frame arena and are never dropped, so they cannot hold
/// closures.
#[derive(Debug, Copy, Clone)]
pub struct Callback {
    pub func: fn(usize),
    pub user_data: usize,
}

impl Callback {
    pub const fn new(func: fn(usize), user_data: usize) -> Self {
        Self { func, user_data }
    }

    #[inline]
    pub fn invoke(self) {
        (self.func)(self.user_data)
    }
}

/// Widget-specific payload. Every variant is `Copy`; strings and arrays are
/// arena handles.
#[derive(Debug, Copy, Clone, Default)]
pub enum NodeData {
    #[default]
    None,
    Text { text: ArenaStr },
    Button { label: ArenaStr, on_click: Option<Callback> },
    Scroll { vertical: bool },
    TextInput { text: ArenaStr, cursor: u32, composition: ArenaStr, focused: bool, placeholder: ArenaStr },
    Toggle { label: ArenaStr, on: bool },
    /// Slider, fader and knob share a normalized value.
    Range { label: ArenaStr, value: f32, min: f32, max: f32 },
    Dragger { label: ArenaStr, value: f32 },
    Header { label: ArenaStr, open: bool, depth: u16 },
    ColorPicker { color: Color, hue: f32, sv_size: f32, hue_width: f32 },
    Plot { samples: ArenaSlice<f32>, bars: bool },
    Bezier { points: [Vec2; 4], thickness: f32 },
    Table { rows: u32, row_height: f32, header: ArenaStr },
    Splitter { ratio: f32, vertical: bool },
    Menu { label: ArenaStr, open: bool },
    MenuItem { label: ArenaStr, shortcut: ArenaStr },
    Markdown { text: ArenaStr },
    DragSource { type_hash: u64, payload: u64 },
    DropTarget { type_hash: u64, hovering: bool },
    Canvas { pan: Vec2, zoom: f32 },
}

/// One element of the view tree.
///
/// A fixed header (links, layout inputs, style inputs, layout outputs)
/// followed by [`NodeData`]. Plain old data: lives in the frame arena and is
/// discarded wholesale at the next frame.
#[derive(Debug, Copy, Clone)]
pub struct ViewNode {
    pub kind: ViewKind,
    pub id: Id,

    pub first_child: NodeId,
    pub last_child: NodeId,
    pub next_sibling: NodeId,

    // layout inputs
    /// Explicit size; 0 = auto.
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub margin: f32,
    pub gap: f32,
    pub grow: f32,
    pub shrink: f32,
    pub row: bool,
    pub wrap: bool,
    /// How this container places children on the cross axis.
    pub align: Align,
    /// Override of the parent's `align` for this node.
    pub align_self: Option<Align>,
    pub justify: Justify,
    pub absolute: bool,
    /// Offset from the parent's origin when `absolute`.
    pub offset: Vec2,

    // style inputs
    pub bg: Color,
    pub fg: Color,
    pub radius: f32,
    pub squircle: bool,
    pub elevation: f32,
    pub border: Option<Border>,
    pub glow: Option<Glow>,
    pub backdrop_blur: f32,
    pub wobble: Vec2,
    /// 0 = inherit from the parent.
    pub font_size: f32,

    // layout outputs
    pub measured: Vec2,
    pub content: Vec2,
    pub rect: Rect,

    pub data: NodeData,
}

impl ViewNode {
    pub const fn new(kind: ViewKind, id: Id) -> Self {
        Self {
            kind,
            id,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            next_sibling: NodeId::NONE,
            width: 0.0,
            height: 0.0,
            padding: 0.0,
            margin: 0.0,
            gap: 0.0,
            grow: 0.0,
            shrink: 1.0,
            row: false,
            wrap: false,
            align: Align::Stretch,
            align_self: None,
            justify: Justify::Start,
            absolute: false,
            offset: Vec2::ZERO,
            bg: Color::TRANSPARENT,
            fg: Color::TRANSPARENT,
            radius: 0.0,
            squircle: false,
            elevation: 0.0,
            border: None,
            glow: None,
            backdrop_blur: 0.0,
            wobble: Vec2::ZERO,
            font_size: 0.0,
            measured: Vec2::ZERO,
            content: Vec2::ZERO,
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            data: NodeData::None,
        }
    }

    #[inline]
    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = data;
        self
    }

    /// Explicit size on the given axis (`true` = x).
    #[inline]
    pub fn explicit(&self, x_axis: bool) -> f32 {
        if x_axis { self.width } else { self.height }
    }

    /// Whether any universal visual (shadow, background, border, glow) is set.
    #[inline]
    pub fn has_surface(&self) -> bool {
        self.bg.is_visible() || self.elevation > 0.0 || self.border.is_some() || self.glow.is_some()
    }
}

impl Default for ViewNode {
    fn default() -> Self {
        Self::new(ViewKind::Container, Id::NONE)
    }
}
