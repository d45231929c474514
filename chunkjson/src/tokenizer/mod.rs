// SPDX-License-Identifier: Apache-2.0

//! The byte-at-a-time JSON automaton and the push parser that drives it.

mod stack;
pub use stack::{Container, NestingStack};

use log::{debug, trace};

use crate::handler::{Flow, Handler, Literal, SpanKind};
use crate::options::{ParserOptions, TokenDelivery};
use crate::parse_error::{ErrKind, Error};
use crate::token_mark::TokenMark;

/// Automaton states. The initial state is [`State::ExpectValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// A value must follow: at the top level, in an array, or after a colon.
    ExpectValue,
    /// A value just ended inside a container.
    ExpectSeparatorOrClose,
    InString {
        escaped: bool,
    },
    /// After `-`.
    ExpectDigitAfterMinus,
    InInteger,
    /// After an integer part of exactly `0`.
    AfterLeadingZero,
    /// After `.`, `digits` once at least one fraction digit was read.
    InFraction {
        digits: bool,
    },
    /// After `e` or `E`.
    ExpectExponentSign,
    /// After the exponent sign or its first digit.
    InExponent {
        digits: bool,
    },
    /// After `{` or after a comma in an object.
    ExpectKeyString,
    InKeyString {
        escaped: bool,
    },
    ExpectColon,
    /// Matching `true`, `false` or `null`; `matched` bytes read so far.
    InLiteral {
        literal: Literal,
        matched: u8,
    },
    /// The top-level value is complete. Only whitespace may follow.
    Done,
}

impl State {
    const fn skips_whitespace(&self) -> bool {
        matches!(
            self,
            State::ExpectValue
                | State::ExpectSeparatorOrClose
                | State::ExpectKeyString
                | State::ExpectColon
                | State::Done
        )
    }

    /// The token being accumulated in this state.
    const fn open_span(&self) -> Option<SpanKind> {
        match self {
            State::InString { .. } | State::InKeyString { .. } => Some(SpanKind::String),
            State::InInteger | State::AfterLeadingZero => Some(SpanKind::Integer),
            State::InFraction { .. } => Some(SpanKind::Fraction),
            State::InExponent { .. } => Some(SpanKind::Exponent),
            _ => None,
        }
    }
}

const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

fn fire(flow: Flow, byte: u8, pos: usize) -> Result<(), Error> {
    if flow.is_abort() {
        return Error::new(ErrKind::HandlerAborted, byte, pos);
    }
    Ok(())
}

/// An incremental, SAX-style JSON lexer.
///
/// Input is pushed in chunks of any size with [`feed`](Self::feed); events
/// are reported synchronously to the owned [`Handler`]. The parser never
/// builds a tree and never interprets the bytes of strings or numbers.
///
/// The first error halts the parser: later calls report it again until
/// [`reset`](Self::reset).
pub struct PushParser<H> {
    state: State,
    stack: NestingStack,
    mark: TokenMark,
    /// The last structural byte was a comma, so the container may not close yet.
    after_comma: bool,
    bytes_read: usize,
    halted: Option<Error>,
    options: ParserOptions,
    handler: H,
}

impl<H: Handler> PushParser<H> {
    /// Creates a parser with the default [`ParserOptions`].
    pub fn new(handler: H) -> Self {
        Self::with_options(handler, ParserOptions::default())
    }

    pub fn with_options(handler: H, options: ParserOptions) -> Self {
        Self {
            state: State::ExpectValue,
            stack: NestingStack::new(options.max_depth),
            mark: TokenMark::default(),
            after_comma: false,
            bytes_read: 0,
            halted: None,
            options,
            handler,
        }
    }

    /// Returns the parser to its initial state with a new maximum depth.
    ///
    /// Other options and the handler are kept. Calling this repeatedly has
    /// the same effect as calling it once.
    pub fn reset(&mut self, max_depth: usize) {
        self.options.max_depth = max_depth;
        self.state = State::ExpectValue;
        self.stack.reset(max_depth);
        self.mark.clear();
        self.after_comma = false;
        self.bytes_read = 0;
        self.halted = None;
        debug!("parser reset, max depth {max_depth}");
    }

    /// Processes a chunk of input and returns the number of bytes consumed.
    ///
    /// On success the whole chunk is consumed. On failure nothing past
    /// [`Error::position`] was consumed and the parser is halted.
    pub fn feed(&mut self, data: &[u8]) -> Result<usize, Error> {
        if let Some(err) = self.halted {
            return Err(err.replayed());
        }
        self.mark.resume();
        match self.feed_chunk(data) {
            Ok(()) => {
                self.bytes_read = self.bytes_read.wrapping_add(data.len());
                Ok(data.len())
            }
            Err(err) => Err(self.halt(err)),
        }
    }

    /// Signals the end of input.
    ///
    /// Completes a top-level number still waiting for a terminator. Fails
    /// with [`ErrKind::UnexpectedEnd`] when the document is incomplete.
    pub fn finish(&mut self) -> Result<(), Error> {
        if let Some(err) = self.halted {
            return Err(err.replayed());
        }
        self.mark.resume();
        match self.finish_document() {
            Ok(()) => {
                debug!("document finished after {} bytes", self.bytes_read);
                Ok(())
            }
            Err(err) => Err(self.halt(err)),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of currently open containers.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Innermost open container, if any.
    pub fn container(&self) -> Option<Container> {
        self.stack.top()
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Bytes consumed since construction or the last reset.
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// The single top-level value has been read completely.
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// The error that halted the parser, if any.
    pub fn error(&self) -> Option<Error> {
        self.halted
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Destroys the parser and returns the handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    fn halt(&mut self, err: Error) -> Error {
        let err = err.after(self.bytes_read);
        self.bytes_read = self.bytes_read.wrapping_add(err.position());
        debug!("parser halted: {err}");
        self.halted = Some(err);
        err
    }

    fn feed_chunk(&mut self, data: &[u8]) -> Result<(), Error> {
        for (pos, &byte) in data.iter().enumerate() {
            self.step(data, pos, byte)?;
        }
        self.park(data)
    }

    fn finish_document(&mut self) -> Result<(), Error> {
        if !self.stack.is_empty() {
            return Error::at_end(ErrKind::UnexpectedEnd, 0);
        }
        let strict = self.options.is_strict();
        let kind = match self.state {
            State::Done => return Ok(()),
            State::InInteger | State::AfterLeadingZero => SpanKind::Integer,
            State::InFraction { digits } if digits || !strict => SpanKind::Fraction,
            State::InExponent { digits } if digits || !strict => SpanKind::Exponent,
            _ => return Error::at_end(ErrKind::UnexpectedEnd, 0),
        };
        self.close_token(kind, &[], 0, None)?;
        self.state = State::Done;
        Ok(())
    }

    /// Leaves an open token ready to continue in the next chunk.
    fn park(&mut self, data: &[u8]) -> Result<(), Error> {
        let Some(kind) = self.state.open_span() else {
            return Ok(());
        };
        if !self.mark.is_marked() {
            return Ok(());
        }
        let end = data.len();
        match self.options.delivery {
            TokenDelivery::Whole => {
                if self.token_too_large(end) {
                    return Error::at_end(ErrKind::TokenTooLarge, end);
                }
                self.mark.carry_over(data);
                trace!(
                    "carrying {:?} token over chunk boundary, {} bytes so far",
                    kind,
                    self.mark.pending_len(0)
                );
            }
            TokenDelivery::Fragments => {
                let handler = &mut self.handler;
                let flow = self
                    .mark
                    .take_fragment(data, |bytes| kind.deliver(handler, bytes));
                match flow {
                    Some(flow) if flow.is_abort() => {
                        return Error::at_end(ErrKind::HandlerAborted, end)
                    }
                    Some(_) => trace!("delivered {kind:?} fragment at chunk boundary"),
                    None => {}
                }
            }
        }
        Ok(())
    }

    /// Applies `max_token_len` to a token that is, or is about to be, carried.
    fn token_too_large(&self, end: usize) -> bool {
        matches!(self.options.delivery, TokenDelivery::Whole)
            && self
                .options
                .max_token_len
                .is_some_and(|max| self.mark.pending_len(end) > max)
    }

    /// Delivers the pending token ending at `end`, which is also where failures are reported.
    fn close_token(
        &mut self,
        kind: SpanKind,
        data: &[u8],
        end: usize,
        byte: Option<u8>,
    ) -> Result<(), Error> {
        if self.mark.is_continued() && self.token_too_large(end) {
            return Err(Error::raise(ErrKind::TokenTooLarge, byte, end));
        }
        let handler = &mut self.handler;
        match self.mark.take(data, end, |bytes| kind.deliver(handler, bytes)) {
            Some(flow) if flow.is_abort() => Err(Error::raise(ErrKind::HandlerAborted, byte, end)),
            _ => Ok(()),
        }
    }

    /// State after a complete value: inside a container, or done at the top level.
    fn after_value(&self) -> State {
        if self.stack.is_empty() {
            State::Done
        } else {
            State::ExpectSeparatorOrClose
        }
    }

    /// A number ended at `byte`, which is examined again as its terminator.
    fn end_of_value(&mut self, data: &[u8], pos: usize, byte: u8) -> Result<(), Error> {
        if self.stack.is_empty() {
            self.state = State::Done;
            if is_whitespace(byte) {
                return Ok(());
            }
            return Error::new(ErrKind::SyntaxError, byte, pos);
        }
        self.state = State::ExpectSeparatorOrClose;
        self.step(data, pos, byte)
    }

    /// Reports the begin event, then pushes. A rejected bracket or an abort leaves the stack as it was.
    fn open(&mut self, container: Container, byte: u8, pos: usize) -> Result<(), Error> {
        if self.stack.is_full() {
            return Error::new(ErrKind::DepthExceeded, byte, pos);
        }
        let flow = match container {
            Container::Array => self.handler.on_array_begin(),
            Container::Object => self.handler.on_object_begin(),
        };
        fire(flow, byte, pos)?;
        self.after_comma = false;
        self.stack
            .push(container)
            .map_err(|kind| Error::raise(kind, Some(byte), pos))
    }

    fn close(&mut self, byte: u8, pos: usize) -> Result<State, Error> {
        fire(self.handler.on_container_end(), byte, pos)?;
        self.stack
            .pop()
            .map_err(|kind| Error::raise(kind, Some(byte), pos))?;
        self.after_comma = false;
        Ok(self.after_value())
    }

    /// Starts a string or number token whose first byte is at `start`.
    fn begin_token(&mut self, start: usize) {
        self.after_comma = false;
        self.mark.mark(start);
    }

    fn step(&mut self, data: &[u8], pos: usize, byte: u8) -> Result<(), Error> {
        if self.state.skips_whitespace() && is_whitespace(byte) {
            return Ok(());
        }
        let strict = self.options.is_strict();

        self.state = match (self.state, byte) {
            // Value starts
            (State::ExpectValue, b'"') => {
                self.begin_token(pos + 1);
                State::InString { escaped: false }
            }
            (State::ExpectValue, b'-') => {
                fire(self.handler.on_negative_sign(), byte, pos)?;
                self.after_comma = false;
                State::ExpectDigitAfterMinus
            }
            (State::ExpectValue | State::ExpectDigitAfterMinus, b'0') => {
                self.begin_token(pos);
                State::AfterLeadingZero
            }
            (State::ExpectValue | State::ExpectDigitAfterMinus, b'1'..=b'9') => {
                self.begin_token(pos);
                State::InInteger
            }
            (State::ExpectDigitAfterMinus, _) => {
                return Error::new(ErrKind::SyntaxError, byte, pos);
            }
            (State::ExpectValue, b'[') => {
                self.open(Container::Array, byte, pos)?;
                State::ExpectValue
            }
            (State::ExpectValue, b'{') => {
                self.open(Container::Object, byte, pos)?;
                State::ExpectKeyString
            }
            (State::ExpectValue, b't' | b'f' | b'n') => match Literal::from_first_byte(byte) {
                Some(literal) => {
                    self.after_comma = false;
                    State::InLiteral {
                        literal,
                        matched: 1,
                    }
                }
                None => return Error::new(ErrKind::SyntaxError, byte, pos),
            },
            // Empty array
            (State::ExpectValue, b']')
                if self.stack.top() == Some(Container::Array) && !self.after_comma =>
            {
                self.close(byte, pos)?
            }
            (State::ExpectValue, _) => {
                return Error::new(ErrKind::SyntaxError, byte, pos);
            }

            // Numbers
            (State::InInteger, b'0'..=b'9') => State::InInteger,
            (State::AfterLeadingZero, b'0'..=b'9') => {
                if strict {
                    return Error::new(ErrKind::SyntaxError, byte, pos);
                }
                State::InInteger
            }
            (State::InInteger | State::AfterLeadingZero, _) => {
                self.close_token(SpanKind::Integer, data, pos, Some(byte))?;
                match byte {
                    b'.' => State::InFraction { digits: false },
                    b'e' | b'E' => State::ExpectExponentSign,
                    _ => return self.end_of_value(data, pos, byte),
                }
            }
            (State::InFraction { .. }, b'0'..=b'9') => {
                self.mark.mark(pos);
                State::InFraction { digits: true }
            }
            (State::InFraction { digits }, _) => {
                if !digits && strict {
                    return Error::new(ErrKind::SyntaxError, byte, pos);
                }
                self.close_token(SpanKind::Fraction, data, pos, Some(byte))?;
                match byte {
                    b'e' | b'E' => State::ExpectExponentSign,
                    _ => return self.end_of_value(data, pos, byte),
                }
            }
            (State::ExpectExponentSign, b'+' | b'-') => {
                self.mark.mark(pos);
                State::InExponent { digits: false }
            }
            (State::ExpectExponentSign, b'0'..=b'9') => {
                self.mark.mark(pos);
                State::InExponent { digits: true }
            }
            (State::ExpectExponentSign, _) => {
                return Error::new(ErrKind::SyntaxError, byte, pos);
            }
            (State::InExponent { .. }, b'0'..=b'9') => State::InExponent { digits: true },
            (State::InExponent { digits }, _) => {
                if !digits && strict {
                    return Error::new(ErrKind::SyntaxError, byte, pos);
                }
                self.close_token(SpanKind::Exponent, data, pos, Some(byte))?;
                return self.end_of_value(data, pos, byte);
            }

            // Strings
            (State::InString { escaped: false }, b'"') => {
                self.close_token(SpanKind::String, data, pos, Some(byte))?;
                self.after_value()
            }
            (State::InKeyString { escaped: false }, b'"') => {
                self.close_token(SpanKind::String, data, pos, Some(byte))?;
                State::ExpectColon
            }
            (State::InString { escaped }, _) => State::InString {
                escaped: !escaped && byte == b'\\',
            },
            (State::InKeyString { escaped }, _) => State::InKeyString {
                escaped: !escaped && byte == b'\\',
            },

            // Literals
            (State::InLiteral { literal, matched }, _) => {
                let expected = literal.as_bytes();
                if expected.get(usize::from(matched)) != Some(&byte) {
                    return Error::new(ErrKind::SyntaxError, byte, pos);
                }
                let matched = matched + 1;
                if usize::from(matched) == expected.len() {
                    fire(self.handler.on_literal(literal), byte, pos)?;
                    self.after_value()
                } else {
                    State::InLiteral { literal, matched }
                }
            }

            // Structure
            (State::ExpectSeparatorOrClose, b',') => {
                let next = match self.stack.top() {
                    Some(Container::Array) => State::ExpectValue,
                    Some(Container::Object) => State::ExpectKeyString,
                    None => return Error::new(ErrKind::SyntaxError, byte, pos),
                };
                fire(self.handler.on_separator(), byte, pos)?;
                self.after_comma = true;
                next
            }
            (State::ExpectSeparatorOrClose, b']' | b'}')
                if self.stack.top().map(Container::closing_byte) == Some(byte) =>
            {
                self.close(byte, pos)?
            }
            (State::ExpectSeparatorOrClose, _) => {
                return Error::new(ErrKind::SyntaxError, byte, pos);
            }
            (State::ExpectKeyString, b'"') => {
                self.begin_token(pos + 1);
                State::InKeyString { escaped: false }
            }
            // Empty object
            (State::ExpectKeyString, b'}') if !self.after_comma => self.close(byte, pos)?,
            (State::ExpectKeyString, _) => {
                return Error::new(ErrKind::SyntaxError, byte, pos);
            }
            (State::ExpectColon, b':') => {
                fire(self.handler.on_separator(), byte, pos)?;
                State::ExpectValue
            }
            (State::ExpectColon, _) => {
                return Error::new(ErrKind::SyntaxError, byte, pos);
            }

            // Trailing content
            (State::Done, _) => {
                return Error::new(ErrKind::SyntaxError, byte, pos);
            }
        };
        Ok(())
    }
}

impl<H: Handler + Default> Default for PushParser<H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<H> core::fmt::Debug for PushParser<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PushParser")
            .field("state", &self.state)
            .field("depth", &self.stack.depth())
            .field("bytes_read", &self.bytes_read)
            .field("halted", &self.halted)
            .finish_non_exhaustive()
    }
}
