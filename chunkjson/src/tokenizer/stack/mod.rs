// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

use crate::parse_error::ErrKind;

/// Storage reserved up front; deeper limits grow on demand.
const PREALLOCATED_FRAMES: usize = 1024;

/// The kind of an open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Array,
    Object,
}

impl Container {
    /// The byte that closes this container.
    pub const fn closing_byte(self) -> u8 {
        match self {
            Container::Array => b']',
            Container::Object => b'}',
        }
    }
}

/// Depth-bounded stack of open containers, innermost last.
///
/// An empty stack means the parser is outside any container and expects a
/// single top-level value.
///
/// NOTE: the stack only tracks container kinds. Deciding what may follow a
/// container is the responsibility of the caller.
#[derive(Debug, Clone)]
pub struct NestingStack {
    frames: Vec<Container>,
    max_depth: usize,
}

impl NestingStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::with_capacity(max_depth.min(PREALLOCATED_FRAMES)),
            max_depth,
        }
    }

    /// Opens a container, failing with [`ErrKind::DepthExceeded`] when `max_depth` are already open.
    pub fn push(&mut self, container: Container) -> Result<(), ErrKind> {
        if self.is_full() {
            return Err(ErrKind::DepthExceeded);
        }
        self.frames.push(container);
        Ok(())
    }

    /// Closes the innermost container.
    pub fn pop(&mut self) -> Result<Container, ErrKind> {
        self.frames.pop().ok_or(ErrKind::StackUnderflow)
    }

    /// The innermost open container, if any.
    pub fn top(&self) -> Option<Container> {
        self.frames.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Another push would exceed `max_depth`.
    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.max_depth
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Empties the stack and applies a new depth bound, keeping the storage.
    pub fn reset(&mut self, max_depth: usize) {
        self.frames.clear();
        self.frames.reserve(max_depth.min(PREALLOCATED_FRAMES));
        self.max_depth = max_depth;
    }
}
