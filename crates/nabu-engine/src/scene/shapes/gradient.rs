use crate::coords::Rect;
use crate::paint::MeshGradient;
use crate::scene::{DrawCmd, DrawList};

/// Mesh gradient fill; `gradient` indexes [`DrawList::gradients`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshGradientCmd {
    pub rect: Rect,
    pub gradient: u32,
}

impl DrawList {
    /// Stores `gradient` in the side table and records a fill referencing it.
    pub fn push_mesh_gradient(&mut self, rect: Rect, gradient: MeshGradient) {
        let index = self.gradients.len() as u32;
        self.gradients.push(gradient);
        self.push(DrawCmd::MeshGradient(MeshGradientCmd { rect, gradient: index }));
    }
}
