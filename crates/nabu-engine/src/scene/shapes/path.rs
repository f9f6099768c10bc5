use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// One path segment. Control points that a verb does not use are ignored.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathVerb {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo(Vec2, Vec2),
    CubicTo(Vec2, Vec2, Vec2),
    Close,
}

/// Vector path stored in the draw list's path side table.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub verbs: Vec<PathVerb>,
    pub stroke_width: f32,
    pub fill: bool,
    pub color: Color,
}

impl Path {
    pub fn stroke(verbs: Vec<PathVerb>, stroke_width: f32, color: Color) -> Self {
        Self { verbs, stroke_width, fill: false, color }
    }

    pub fn filled(verbs: Vec<PathVerb>, color: Color) -> Self {
        Self { verbs, stroke_width: 0.0, fill: true, color }
    }

    /// Polyline through `points`.
    pub fn polyline(points: &[Vec2], stroke_width: f32, color: Color) -> Self {
        let verbs = points
            .iter()
            .enumerate()
            .map(|(i, &p)| if i == 0 { PathVerb::MoveTo(p) } else { PathVerb::LineTo(p) })
            .collect();
        Self::stroke(verbs, stroke_width, color)
    }
}

/// Path draw payload; `index` points into [`DrawList::paths`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PathCmd {
    pub index: u32,
}

impl DrawList {
    /// Stores `path` in the side table and records a command referencing it.
    ///
    /// Empty paths are dropped.
    pub fn push_path(&mut self, path: Path) {
        if path.verbs.is_empty() {
            return;
        }
        let index = self.paths.len() as u32;
        self.paths.push(path);
        self.push(DrawCmd::Path(PathCmd { index }));
    }
}
