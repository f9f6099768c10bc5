//! Two-pass flexbox over the view tree.
//!
//! 1. **Measure** (post-order): every node gets an intrinsic `content` size
//!    and a `measured` size (explicit size wins per axis).
//! 2. **Arrange** (pre-order): each container splits its inner rectangle among
//!    its children (grow, shrink, justify, align, wrap, splitter ratio,
//!    absolute offsets) and recurses.
//! 3. **Commit**: screen-space rectangles (after scroll offsets, canvas zoom
//!    and clipping) are written to persistent state for next frame's hit tests,
//!    and scroll extents are refreshed and re-clamped.

use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::scene::Transform;
use nabu_engine::text::{GlyphSource, LINE_HEIGHT};

use crate::arena::{FrameArena, NodeId};
use crate::id::Id;
use crate::painter::measure_text;
use crate::store::Persistent;
use crate::view::{chain, Align, Justify, NodeData, TreeState, ViewKind, ViewNode};

/// Header strip of collapsibles, tree nodes and graph nodes.
pub const HEADER_HEIGHT: f32 = 24.0;
/// Horizontal indent of a tree node's children.
pub const TREE_INDENT: f32 = 16.0;
/// Thickness of a splitter's drag handle.
pub const SPLITTER_HANDLE: f32 = 8.0;
pub const MENU_BAR_HEIGHT: f32 = 26.0;
/// Rows a table shows before it scrolls.
pub const TABLE_VISIBLE_ROWS: u32 = 10;

/// Id under which a composite widget's header hit rectangle is committed.
#[inline]
pub fn header_id(id: Id) -> Id {
    id.mix(0x4845_4144)
}

/// Ids under which a color picker's saturation/value square and hue strip are committed.
#[inline]
pub fn sv_id(id: Id) -> Id {
    id.mix(0x5356_5351)
}

#[inline]
pub fn hue_id(id: Id) -> Id {
    id.mix(0x4855_4553)
}

/// Id under which a splitter's handle hit rectangle is committed.
#[inline]
pub fn handle_id(id: Id) -> Id {
    id.mix(0x484e_444c)
}

// ── axes ──────────────────────────────────────────────────────────────────

#[inline]
fn main_of(v: Vec2, row: bool) -> f32 {
    if row { v.x } else { v.y }
}

#[inline]
fn cross_of(v: Vec2, row: bool) -> f32 {
    if row { v.y } else { v.x }
}

#[inline]
fn from_axes(main: f32, cross: f32, row: bool) -> Vec2 {
    if row { Vec2::new(main, cross) } else { Vec2::new(cross, main) }
}

#[inline]
fn node(arena: &FrameArena<ViewNode>, id: NodeId) -> Option<ViewNode> {
    arena.node(id).copied()
}

/// Container parameters that drive child placement.
#[derive(Debug, Copy, Clone)]
struct Flow {
    row: bool,
    gap: f32,
    align: Align,
    justify: Justify,
}

impl Flow {
    fn of(n: &ViewNode) -> Self {
        Self { row: n.row, gap: n.gap, align: n.align, justify: n.justify }
    }

    /// The virtual root: a gapless stretching column.
    const ROOT: Flow = Flow { row: false, gap: 0.0, align: Align::Stretch, justify: Justify::Start };
}

/// Runs measure, arrange and commit over the main tree and the overlays.
pub(crate) fn run(
    arena: &mut FrameArena<ViewNode>,
    glyphs: &mut dyn GlyphSource,
    tree: &TreeState,
    persistent: &mut Persistent,
    screen: Rect,
    default_font: f32,
) {
    persistent.clear_rects();
    let roots = chain(arena, tree.root_first);
    for &r in &roots {
        measure(arena, glyphs, r, default_font);
    }
    arrange_children(arena, &roots, screen, screen, Flow::ROOT, false);
    for &r in &roots {
        commit(arena, persistent, r, Transform::IDENTITY, None);
    }

    for &o in &tree.overlays {
        measure(arena, glyphs, o, default_font);
        let Some(n) = node(arena, o) else { continue };
        let rect = Rect::from_origin_size(n.offset, n.measured);
        arrange(arena, o, rect);
        commit(arena, persistent, o, Transform::IDENTITY, None);
        persistent.next_overlay_rects.push(rect);
    }
}

// ── measure ───────────────────────────────────────────────────────────────

/// Measures `id` and its subtree; returns `measured`.
pub(crate) fn measure(arena: &mut FrameArena<ViewNode>, glyphs: &mut dyn GlyphSource, id: NodeId, inherited_font: f32) -> Vec2 {
    let Some(n) = arena.node_mut(id) else { return Vec2::ZERO };
    if n.font_size <= 0.0 {
        n.font_size = inherited_font;
    }
    let n = *n;
    let kids = chain(arena, n.first_child);
    for &k in &kids {
        measure(arena, glyphs, k, n.font_size);
    }

    let pad = n.padding * 2.0;
    let mut content = if kids.is_empty() {
        intrinsic(arena, glyphs, &n)
    } else {
        flow_content(arena, &n, &kids)
    };
    if n.kind.has_header() {
        let label_w = header_label(arena, &n).map_or(0.0, |s| measure_text(glyphs, s, n.font_size).x);
        if n.kind == ViewKind::TreeNode && !kids.is_empty() {
            content.x += TREE_INDENT;
        }
        content.x = content.x.max(label_w + HEADER_HEIGHT + 8.0);
        if n.kind == ViewKind::TreeNode {
            content.x = content.x.max(100.0);
        }
        if n.kind == ViewKind::GraphNode {
            content.x = content.x.max(120.0);
        }
        content.y += HEADER_HEIGHT;
    }
    let mut content = content + Vec2::splat(pad);
    if n.kind == ViewKind::MenuBar {
        content.y = content.y.max(MENU_BAR_HEIGHT);
    }

    let mut measured = Vec2::new(
        if n.width > 0.0 { n.width } else { content.x },
        if n.height > 0.0 { n.height } else { content.y },
    );
    if let NodeData::Table { rows, row_height, header } = n.data {
        let header_h = if header.is_empty() { 0.0 } else { row_height };
        content.y = content.y.max(rows as f32 * row_height + header_h + pad);
        if n.height <= 0.0 {
            measured.y = rows.min(TABLE_VISIBLE_ROWS) as f32 * row_height + header_h + pad;
        }
        if n.width <= 0.0 {
            measured.x = measured.x.max(200.0);
        }
    }

    if let Some(out) = arena.node_mut(id) {
        out.content = content;
        out.measured = measured;
    }
    measured
}

fn header_label<'a>(arena: &'a FrameArena<ViewNode>, n: &ViewNode) -> Option<&'a str> {
    match n.data {
        NodeData::Header { label, .. } => Some(arena.str(label)),
        _ => None,
    }
}

/// Intrinsic content size of a node without children, padding excluded.
fn intrinsic(arena: &FrameArena<ViewNode>, glyphs: &mut dyn GlyphSource, n: &ViewNode) -> Vec2 {
    let font = n.font_size;
    let line = font * LINE_HEIGHT;
    match (n.kind, n.data) {
        (_, NodeData::Text { text }) | (_, NodeData::Markdown { text }) => measure_text(glyphs, arena.str(text), font),
        (_, NodeData::Button { label, .. }) => measure_text(glyphs, arena.str(label), font) + Vec2::new(24.0, 16.0),
        (_, NodeData::TextInput { text, .. }) => {
            let w = measure_text(glyphs, arena.str(text), font).x + 12.0;
            Vec2::new(w.max(200.0), line + 12.0)
        }
        (_, NodeData::Toggle { label, .. }) => {
            let w = measure_text(glyphs, arena.str(label), font).x + 44.0;
            Vec2::new(w.max(100.0), 24.0)
        }
        (ViewKind::Fader, _) => Vec2::new(30.0, 150.0),
        (ViewKind::Knob, _) => Vec2::new(60.0, 80.0),
        (ViewKind::Slider, _) => Vec2::new(150.0, 30.0),
        (ViewKind::Dragger, _) => Vec2::new(80.0, 24.0),
        (_, NodeData::ColorPicker { sv_size, hue_width, .. }) => {
            Vec2::new(sv_size + 8.0 + hue_width, sv_size + 8.0 + 30.0)
        }
        (ViewKind::Plot, _) => Vec2::new(200.0, 120.0),
        (_, NodeData::Menu { label, .. }) => {
            Vec2::new(measure_text(glyphs, arena.str(label), font).x + 16.0, line.max(MENU_BAR_HEIGHT - 4.0))
        }
        (_, NodeData::MenuItem { label, shortcut }) => {
            let w = measure_text(glyphs, arena.str(label), font).x + measure_text(glyphs, arena.str(shortcut), font).x + 40.0;
            Vec2::new(w.max(150.0), 24.0)
        }
        _ => Vec2::ZERO,
    }
}

/// Main-axis sum and cross-axis maximum of in-flow children, padding excluded.
fn flow_content(arena: &FrameArena<ViewNode>, n: &ViewNode, kids: &[NodeId]) -> Vec2 {
    if n.kind == ViewKind::Canvas {
        return Vec2::ZERO;
    }
    let flow = Flow::of(n);
    let items: Vec<ViewNode> = kids.iter().filter_map(|&k| node(arena, k)).filter(|c| !c.absolute).collect();
    if items.is_empty() {
        return Vec2::ZERO;
    }
    let row = flow.row;
    let outer_main = |c: &ViewNode| main_of(c.measured, row) + c.margin * 2.0;
    let outer_cross = |c: &ViewNode| cross_of(c.measured, row) + c.margin * 2.0;

    let explicit_main = n.explicit(row);
    if n.wrap && explicit_main > 0.0 {
        let avail = (explicit_main - n.padding * 2.0).max(0.0);
        let mut widest: f32 = 0.0;
        let mut cross_total = 0.0;
        let mut lines = 0;
        for line in wrap_lines(&items, avail, flow.gap, row) {
            let main: f32 = line.iter().map(|c| outer_main(c)).sum::<f32>() + flow.gap * (line.len() - 1) as f32;
            widest = widest.max(main);
            cross_total += line.iter().map(|c| outer_cross(c)).fold(0.0, f32::max);
            lines += 1;
        }
        cross_total += flow.gap * (lines.max(1) - 1) as f32;
        return from_axes(widest, cross_total, row);
    }

    let mut main: f32 = items.iter().map(outer_main).sum::<f32>() + flow.gap * (items.len() - 1) as f32;
    if n.kind == ViewKind::Splitter {
        main += SPLITTER_HANDLE;
    }
    let cross = items.iter().map(outer_cross).fold(0.0, f32::max);
    from_axes(main, cross, row)
}

/// Greedy line breaking: a child that would overflow `avail` starts a new line.
fn wrap_lines(items: &[ViewNode], avail: f32, gap: f32, row: bool) -> Vec<Vec<ViewNode>> {
    let mut lines: Vec<Vec<ViewNode>> = Vec::new();
    let mut current: Vec<ViewNode> = Vec::new();
    let mut used = 0.0;
    for &c in items {
        let size = main_of(c.measured, row) + c.margin * 2.0;
        if !current.is_empty() && used + gap + size > avail {
            lines.push(std::mem::take(&mut current));
            used = 0.0;
        }
        used += if current.is_empty() { size } else { gap + size };
        current.push(c);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ── arrange ───────────────────────────────────────────────────────────────

/// Places `id` at `rect` and lays out its subtree.
pub(crate) fn arrange(arena: &mut FrameArena<ViewNode>, id: NodeId, rect: Rect) {
    let Some(n) = arena.node_mut(id) else { return };
    n.rect = rect;
    let n = *n;
    let kids = chain(arena, n.first_child);
    if kids.is_empty() {
        return;
    }

    let mut inner = rect.inset(n.padding);
    if n.kind.has_header() {
        let h = HEADER_HEIGHT.min(inner.size.y);
        inner.origin.y += h;
        inner.size.y -= h;
    }
    if n.kind == ViewKind::TreeNode {
        let w = TREE_INDENT.min(inner.size.x);
        inner.origin.x += w;
        inner.size.x -= w;
    }
    if let NodeData::Table { row_height, header, .. } = n.data {
        if !header.is_empty() {
            let h = row_height.min(inner.size.y);
            inner.origin.y += h;
            inner.size.y -= h;
        }
    }
    // Scrolled content keeps its natural extent along the scroll axis.
    if n.kind.scrolls() {
        let natural = n.content - Vec2::splat(n.padding * 2.0);
        let vertical = !matches!(n.data, NodeData::Scroll { vertical: false });
        if vertical {
            let header_h = match n.data {
                NodeData::Table { row_height, header, .. } if !header.is_empty() => row_height,
                _ => 0.0,
            };
            inner.size.y = inner.size.y.max(natural.y - header_h);
        } else {
            inner.size.x = inner.size.x.max(natural.x);
        }
    }

    if let NodeData::Splitter { ratio, .. } = n.data {
        arrange_split(arena, &kids, rect, inner, n.row, ratio);
    } else {
        arrange_children(arena, &kids, rect, inner, Flow::of(&n), n.wrap);
    }
}

fn arrange_children(arena: &mut FrameArena<ViewNode>, kids: &[NodeId], outer: Rect, inner: Rect, flow: Flow, wrap: bool) {
    let mut in_flow = Vec::with_capacity(kids.len());
    for &k in kids {
        let Some(c) = node(arena, k) else { continue };
        if c.absolute {
            arrange(arena, k, Rect::from_origin_size(outer.origin + c.offset, c.measured));
        } else {
            in_flow.push(k);
        }
    }
    if in_flow.is_empty() {
        return;
    }

    let row = flow.row;
    let main_start = main_of(inner.origin, row);
    let main_avail = main_of(inner.size, row);
    let cross_start = cross_of(inner.origin, row);
    let cross_avail = cross_of(inner.size, row);

    if !wrap {
        place_line(arena, &in_flow, flow, main_start, main_avail, cross_start, cross_avail);
        return;
    }

    let items: Vec<ViewNode> = in_flow.iter().filter_map(|&k| node(arena, k)).collect();
    let lines = wrap_lines(&items, main_avail, flow.gap, row);
    let mut cursor = cross_start;
    let mut index = 0;
    for line in lines {
        let ids = &in_flow[index..index + line.len()];
        index += line.len();
        let thickness = line
            .iter()
            .map(|c| {
                let explicit = c.explicit(!row);
                (if explicit > 0.0 { explicit } else { cross_of(c.measured, row) }) + c.margin * 2.0
            })
            .fold(0.0, f32::max);
        place_line(arena, ids, flow, main_start, main_avail, cursor, thickness);
        cursor += thickness + flow.gap;
    }
}

/// Distributes one line of in-flow children along the main axis.
fn place_line(
    arena: &mut FrameArena<ViewNode>,
    ids: &[NodeId],
    flow: Flow,
    main_start: f32,
    main_avail: f32,
    cross_start: f32,
    cross_avail: f32,
) {
    let row = flow.row;
    let items: Vec<ViewNode> = ids.iter().filter_map(|&k| node(arena, k)).collect();
    let count = items.len();
    if count == 0 {
        return;
    }

    let gaps = flow.gap * (count - 1) as f32;
    let total_fixed: f32 = items.iter().map(|c| main_of(c.measured, row) + c.margin * 2.0).sum::<f32>() + gaps;
    let remaining = main_avail - total_fixed;
    let grow_sum: f32 = items.iter().map(|c| c.grow).sum();

    let mut sizes: Vec<f32> = items.iter().map(|c| main_of(c.measured, row)).collect();
    let mut leftover = 0.0;
    if remaining > 0.0 && grow_sum > 0.0 {
        for (s, c) in sizes.iter_mut().zip(&items) {
            *s += c.grow / grow_sum * remaining;
        }
    } else if remaining < 0.0 {
        let weight: f32 = items.iter().map(|c| c.shrink * main_of(c.measured, row)).sum();
        if weight > 0.0 {
            for (s, c) in sizes.iter_mut().zip(&items) {
                let share = c.shrink * main_of(c.measured, row) / weight;
                *s = (*s + remaining * share).max(0.0);
            }
        }
    } else {
        leftover = remaining.max(0.0);
    }

    let (lead, between) = match flow.justify {
        _ if leftover <= 0.0 => (0.0, 0.0),
        Justify::Start => (0.0, 0.0),
        Justify::Center => (leftover * 0.5, 0.0),
        Justify::End => (leftover, 0.0),
        Justify::SpaceBetween if count > 1 => (0.0, leftover / (count - 1) as f32),
        Justify::SpaceBetween => (0.0, 0.0),
        Justify::SpaceAround => {
            let per = leftover / count as f32;
            (per * 0.5, per)
        }
    };

    let mut cursor = main_start + lead;
    for ((&id, c), size) in ids.iter().zip(&items).zip(sizes) {
        cursor += c.margin;
        let explicit_cross = c.explicit(!row);
        let align = c.align_self.unwrap_or(flow.align);
        let cross_size = if explicit_cross > 0.0 {
            explicit_cross
        } else if align == Align::Stretch {
            (cross_avail - c.margin * 2.0).max(0.0)
        } else {
            cross_of(c.measured, row)
        };
        let cross_pos = match align {
            Align::Start | Align::Stretch => cross_start + c.margin,
            Align::Center => cross_start + (cross_avail - cross_size) * 0.5,
            Align::End => cross_start + cross_avail - cross_size - c.margin,
        };
        let rect = Rect::from_origin_size(from_axes(cursor, cross_pos, row), from_axes(size, cross_size, row));
        arrange(arena, id, rect);
        cursor += size + c.margin + flow.gap + between;
    }
}

/// Two panes split at `ratio` of the space left after the handle.
fn arrange_split(arena: &mut FrameArena<ViewNode>, kids: &[NodeId], outer: Rect, inner: Rect, row: bool, ratio: f32) {
    let mut panes = Vec::with_capacity(2);
    for &k in kids {
        let Some(c) = node(arena, k) else { continue };
        if c.absolute {
            arrange(arena, k, Rect::from_origin_size(outer.origin + c.offset, c.measured));
        } else if panes.len() < 2 {
            panes.push(k);
        } else {
            log::trace!("splitter: ignoring extra pane {k:?}");
            arrange(arena, k, Rect::from_origin_size(inner.origin, Vec2::ZERO));
        }
    }

    let main_start = main_of(inner.origin, row);
    let avail = (main_of(inner.size, row) - SPLITTER_HANDLE).max(0.0);
    let first = ratio.clamp(0.0, 1.0) * avail;
    let cross_start = cross_of(inner.origin, row);
    let cross = cross_of(inner.size, row);

    if let Some(&a) = panes.first() {
        arrange(arena, a, Rect::from_origin_size(from_axes(main_start, cross_start, row), from_axes(first, cross, row)));
    }
    if let Some(&b) = panes.get(1) {
        let start = main_start + first + SPLITTER_HANDLE;
        arrange(arena, b, Rect::from_origin_size(from_axes(start, cross_start, row), from_axes(avail - first, cross, row)));
    }
}

/// The splitter handle between the two panes, in layout space.
pub fn splitter_handle(n: &ViewNode) -> Rect {
    let NodeData::Splitter { ratio, .. } = n.data else { return Rect::new(0.0, 0.0, 0.0, 0.0) };
    let inner = n.rect.inset(n.padding);
    let row = n.row;
    let avail = (main_of(inner.size, row) - SPLITTER_HANDLE).max(0.0);
    let start = main_of(inner.origin, row) + ratio.clamp(0.0, 1.0) * avail;
    Rect::from_origin_size(
        from_axes(start, cross_of(inner.origin, row), row),
        from_axes(SPLITTER_HANDLE, cross_of(inner.size, row), row),
    )
}

/// The header strip of a collapsible, tree node or graph node, in layout space.
pub fn header_rect(n: &ViewNode) -> Rect {
    Rect::new(n.rect.origin.x, n.rect.origin.y, n.rect.size.x, HEADER_HEIGHT.min(n.rect.size.y))
}

/// Saturation/value square and hue strip of a color picker, in layout space.
pub fn picker_regions(n: &ViewNode) -> (Rect, Rect) {
    let NodeData::ColorPicker { sv_size, hue_width, .. } = n.data else {
        return (Rect::default(), Rect::default());
    };
    let inner = n.rect.inset(n.padding);
    let sv = Rect::new(inner.origin.x, inner.origin.y, sv_size, sv_size);
    let hue = Rect::new(inner.origin.x + sv_size + 8.0, inner.origin.y, hue_width, sv_size);
    (sv, hue)
}

/// Region children of a scrolling node are clipped to, in layout space.
pub fn scroll_viewport(n: &ViewNode) -> Rect {
    match n.data {
        NodeData::Table { row_height, header, .. } if !header.is_empty() => {
            let h = row_height.min(n.rect.size.y);
            Rect::new(n.rect.origin.x, n.rect.origin.y + h, n.rect.size.x, n.rect.size.y - h)
        }
        _ => n.rect,
    }
}

/// Transform a canvas applies to its children: zoom about the canvas origin, then pan.
pub fn canvas_transform(origin: Vec2, pan: Vec2, zoom: f32) -> Transform {
    Transform::new(origin * (1.0 - zoom) + pan, zoom)
}

// ── commit ────────────────────────────────────────────────────────────────

/// Writes screen-space hit rectangles for `id` and its subtree.
pub(crate) fn commit(arena: &FrameArena<ViewNode>, persistent: &mut Persistent, id: NodeId, xf: Transform, clip: Option<Rect>) {
    let Some(n) = node(arena, id) else { return };
    let visible = |r: Rect| {
        let screen = xf.apply_rect(r);
        clip.map_or(screen, |c| screen.clip_to(c))
    };

    let screen = visible(n.rect);
    persistent.commit_rect(n.id, screen);
    if n.kind.has_header() {
        persistent.commit_rect(header_id(n.id), visible(header_rect(&n)));
    }
    if n.kind == ViewKind::Splitter {
        persistent.commit_rect(handle_id(n.id), visible(splitter_handle(&n)));
    }
    if n.kind == ViewKind::ColorPicker {
        let (sv, hue) = picker_regions(&n);
        persistent.commit_rect(sv_id(n.id), visible(sv));
        persistent.commit_rect(hue_id(n.id), visible(hue));
    }

    let (child_xf, child_clip) = if n.kind.scrolls() {
        let viewport = scroll_viewport(&n);
        let state = persistent.scroll_mut(n.id);
        state.content = n.content;
        state.viewport = n.rect.size;
        state.clamp();
        let offset = state.offset;
        (xf.then(Transform::translation(-offset)), Some(visible(viewport)))
    } else if n.kind == ViewKind::Canvas {
        let view = persistent.canvas(n.id);
        (xf.then(canvas_transform(n.rect.origin, view.pan, view.zoom)), Some(screen))
    } else {
        (xf, clip)
    };

    let mut cur = n.first_child;
    while let Some(c) = arena.node(cur) {
        let next = c.next_sibling;
        commit(arena, persistent, cur, child_xf, child_clip);
        cur = next;
    }
}
