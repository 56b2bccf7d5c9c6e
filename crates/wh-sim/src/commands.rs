//! Per-robot command queues.
//!
//! A queue holds the direction tokens still to be executed on the robot's
//! current plan.  The engine fills it from a [`PlannedPath`], consumes one
//! token per successful move, and clears and refills it on replanning.

use std::collections::VecDeque;

use wh_core::Direction;
use wh_grid::PlannedPath;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandQueue {
    pending: VecDeque<Direction>,
}

impl CommandQueue {
    pub fn from_path(path: &PlannedPath) -> Self {
        Self { pending: path.directions().into() }
    }

    /// Replace any pending commands with the moves of `path`.
    pub fn load(&mut self, path: &PlannedPath) {
        self.pending.clear();
        self.pending.extend(path.directions());
    }

    /// Next command, left in place until the move succeeds.
    #[inline]
    pub fn peek(&self) -> Option<Direction> {
        self.pending.front().copied()
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.pending.iter().copied()
    }
}
