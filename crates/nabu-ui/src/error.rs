use nabu_engine::core::BackendError;
use thiserror::Error;

use crate::arena::ArenaError;

/// Something that went wrong during one frame.
///
/// None of these cross the builder API: they are collected in
/// [`crate::FrameReport::errors`] while the frame degrades. In strict mode
/// the programmer-bug variants panic instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error(transparent)]
    ArenaExhausted(#[from] ArenaError),

    #[error("unbalanced stacks at end of frame: id depth {id_depth} (expected 1), parent depth {parent_depth} (expected 0)")]
    UnbalancedStacks { id_depth: usize, parent_depth: usize },

    #[error("end() called with no open container")]
    UnmatchedEnd,

    #[error("pop_id() called with only the root id on the stack")]
    UnmatchedPopId,

    #[error("end_frame() called without begin_frame()")]
    FrameNotStarted,

    #[error("begin_frame() called while a frame is in progress")]
    FrameInProgress,

    #[error("backend: {0}")]
    Backend(#[from] BackendError),
}

impl FrameError {
    /// Bugs in the calling code, as opposed to resource or backend failures.
    pub fn is_programmer_bug(&self) -> bool {
        matches!(
            self,
            FrameError::UnbalancedStacks { .. }
                | FrameError::UnmatchedEnd
                | FrameError::UnmatchedPopId
                | FrameError::FrameNotStarted
                | FrameError::FrameInProgress
        )
    }
}
