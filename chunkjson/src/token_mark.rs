// SPDX-License-Identifier: Apache-2.0

//! Pending-token bookkeeping across chunk boundaries.
//!
//! A token is marked by its start offset within the current chunk. When it
//! closes in the same chunk its bytes are handed out straight from the input.
//! A token still open at the end of a chunk is either copied into the carry
//! buffer or handed out as a fragment, and is re-marked at offset 0 of the
//! next chunk.

use alloc::vec::Vec;

use crate::handler::Flow;

#[derive(Debug, Default, Clone)]
pub(crate) struct TokenMark {
    /// Start of the pending token within the current chunk.
    start: Option<usize>,
    /// The pending token began in an earlier chunk.
    continued: bool,
    /// Some fragment of the pending token was already handed out.
    delivered: bool,
    /// Bytes of the pending token from earlier chunks.
    carry: Vec<u8>,
}

impl TokenMark {
    /// Records the start of a token. A token that is already marked keeps its start.
    pub fn mark(&mut self, offset: usize) {
        if self.start.is_none() {
            self.start = Some(offset);
        }
    }

    pub fn is_marked(&self) -> bool {
        self.start.is_some()
    }

    /// The pending token began in an earlier chunk.
    pub fn is_continued(&self) -> bool {
        self.continued
    }

    /// Length of the pending token if it ended at `end`.
    pub fn pending_len(&self, end: usize) -> usize {
        let here = self.start.map_or(0, |start| end.saturating_sub(start));
        self.carry.len().saturating_add(here)
    }

    /// Hands `[start, end)` of the pending token to `f` and clears the mark.
    ///
    /// Carried bytes are prepended. Returns `None` without calling `f` when
    /// nothing is marked, or when only an empty tail remains of a token whose
    /// earlier fragments were already handed out. When `f` aborts, the mark
    /// and the carry are kept as they were.
    pub fn take(&mut self, data: &[u8], end: usize, f: impl FnOnce(&[u8]) -> Flow) -> Option<Flow> {
        let start = self.start?;
        let tail = data.get(start..end).unwrap_or_default();

        let flow = if self.carry.is_empty() {
            if self.delivered && tail.is_empty() {
                self.clear();
                return None;
            }
            f(tail)
        } else {
            let carried = self.carry.len();
            self.carry.extend_from_slice(tail);
            let flow = f(&self.carry);
            self.carry.truncate(carried);
            flow
        };
        if !flow.is_abort() {
            self.clear();
        }
        Some(flow)
    }

    /// Copies the unfinished token at the end of `data` into the carry buffer.
    pub fn carry_over(&mut self, data: &[u8]) {
        if let Some(start) = self.start.take() {
            self.carry
                .extend_from_slice(data.get(start..).unwrap_or_default());
            self.continued = true;
        }
    }

    /// Hands the unfinished token at the end of `data` to `f` as a fragment.
    ///
    /// Empty fragments are skipped. When `f` aborts, the mark is kept.
    pub fn take_fragment(&mut self, data: &[u8], f: impl FnOnce(&[u8]) -> Flow) -> Option<Flow> {
        let start = self.start?;
        let fragment = data.get(start..).unwrap_or_default();
        let flow = if fragment.is_empty() {
            None
        } else {
            let flow = f(fragment);
            if flow.is_abort() {
                return Some(flow);
            }
            self.delivered = true;
            Some(flow)
        };
        self.start = None;
        self.continued = true;
        flow
    }

    /// Re-marks a token continued from the previous chunk at offset 0.
    pub fn resume(&mut self) {
        if self.continued {
            self.start = Some(0);
        }
    }

    pub fn clear(&mut self) {
        self.start = None;
        self.continued = false;
        self.delivered = false;
        self.carry.clear();
    }
}
