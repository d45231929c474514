// SPDX-License-Identifier: Apache-2.0

use core::fmt;

/// What went wrong while lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrKind {
    /// The byte does not fit any transition from the current state.
    SyntaxError,
    /// Opening this container would exceed the configured maximum depth.
    DepthExceeded,
    /// A handler returned [`Flow::Abort`](crate::Flow::Abort).
    HandlerAborted,
    /// Input ended inside a container or an unfinished token.
    UnexpectedEnd,
    /// A token spanning several chunks grew past `max_token_len`.
    TokenTooLarge,
    /// A container was closed with none open. Never produced by valid lexer transitions.
    StackUnderflow,
}

impl ErrKind {
    const fn description(self) -> &'static str {
        match self {
            ErrKind::SyntaxError => "syntax error",
            ErrKind::DepthExceeded => "maximum nesting depth exceeded",
            ErrKind::HandlerAborted => "aborted by handler",
            ErrKind::UnexpectedEnd => "unexpected end of input",
            ErrKind::TokenTooLarge => "token too large",
            ErrKind::StackUnderflow => "nesting stack underflow",
        }
    }
}

impl fmt::Display for ErrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A lexing failure, located both within the failing chunk and in the whole input.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Error {
    kind: ErrKind,
    character: Option<u8>,
    position: usize,
    offset: usize,
}

impl Error {
    pub fn new<T>(kind: ErrKind, character: u8, position: usize) -> Result<T, Self> {
        Err(Self::raise(kind, Some(character), position))
    }

    /// An error with no offending byte, such as one raised by `finish`.
    pub fn at_end<T>(kind: ErrKind, position: usize) -> Result<T, Self> {
        Err(Self::raise(kind, None, position))
    }

    pub(crate) const fn raise(kind: ErrKind, character: Option<u8>, position: usize) -> Self {
        Self {
            kind,
            character,
            position,
            offset: position,
        }
    }

    /// Rebases the chunk-relative position onto the bytes read before this chunk.
    pub(crate) const fn after(self, bytes_read: usize) -> Self {
        Self {
            offset: bytes_read.wrapping_add(self.position),
            ..self
        }
    }

    /// The same failure reported again by a later call, which consumed nothing.
    pub(crate) const fn replayed(self) -> Self {
        Self {
            position: 0,
            ..self
        }
    }

    pub fn kind(&self) -> ErrKind {
        self.kind
    }

    /// The byte being processed when the error was raised, if any.
    pub fn character(&self) -> Option<u8> {
        self.character
    }

    /// Offset of the failure within the chunk passed to the failing call.
    ///
    /// This is also the number of bytes of that chunk which were consumed.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Offset of the failure from the start of the input.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.character {
            Some(c) => write!(f, "{:?}({}) at {}", self.kind, c as char, self.position),
            None => write!(f, "{:?} at {}", self.kind, self.position),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.character {
            Some(c) if c.is_ascii_graphic() => {
                write!(f, "{} at byte {} ('{}')", self.kind, self.offset, c as char)
            }
            Some(c) => write!(f, "{} at byte {} (0x{:02x})", self.kind, self.offset, c),
            None => write!(f, "{} at byte {}", self.kind, self.offset),
        }
    }
}

impl core::error::Error for Error {}
