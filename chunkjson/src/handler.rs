// SPDX-License-Identifier: Apache-2.0

//! Event dispatch: the consumer side of the push parser.

/// Returned by every handler method to let parsing go on or stop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Halt the current `feed` call with [`ErrKind::HandlerAborted`](crate::ErrKind::HandlerAborted).
    Abort,
}

impl Flow {
    pub const fn is_abort(self) -> bool {
        matches!(self, Flow::Abort)
    }
}

/// The literal names `true`, `false` and `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    True,
    False,
    Null,
}

impl Literal {
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Literal::True => b"true",
            Literal::False => b"false",
            Literal::Null => b"null",
        }
    }

    pub(crate) const fn from_first_byte(byte: u8) -> Option<Self> {
        match byte {
            b't' => Some(Literal::True),
            b'f' => Some(Literal::False),
            b'n' => Some(Literal::Null),
            _ => None,
        }
    }
}

/// A single notification, borrowed from the input chunk or the carry-over buffer.
///
/// Data events carry the raw bytes of the token: string contents without the
/// quotes and with escapes left as written, and number parts as digit text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// `[`
    ArrayBegin,
    /// `{`
    ObjectBegin,
    /// `]` or `}`
    ContainerEnd,
    /// A key or a string value.
    String(&'a [u8]),
    /// The `-` in front of a number.
    NegativeSign,
    /// Digits before the decimal point.
    IntegerDigits(&'a [u8]),
    /// Digits after the decimal point.
    FractionDigits(&'a [u8]),
    /// Exponent digits, including their sign when one was written.
    ExponentDigits(&'a [u8]),
    /// `,` between elements or `:` between a key and its value.
    Separator,
    Literal(Literal),
}

/// Receives parsing events from a [`PushParser`](crate::PushParser).
///
/// Every method defaults to doing nothing and returning [`Flow::Continue`],
/// so implementors only override the events they care about.
pub trait Handler {
    fn on_array_begin(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_object_begin(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_container_end(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_string(&mut self, _bytes: &[u8]) -> Flow {
        Flow::Continue
    }

    fn on_negative_sign(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_integer_digits(&mut self, _digits: &[u8]) -> Flow {
        Flow::Continue
    }

    fn on_fraction_digits(&mut self, _digits: &[u8]) -> Flow {
        Flow::Continue
    }

    fn on_exponent_digits(&mut self, _digits: &[u8]) -> Flow {
        Flow::Continue
    }

    fn on_separator(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_literal(&mut self, _literal: Literal) -> Flow {
        Flow::Continue
    }
}

/// Validation only: every event is ignored.
impl Handler for () {}

impl<H: Handler + ?Sized> Handler for &mut H {
    fn on_array_begin(&mut self) -> Flow {
        (**self).on_array_begin()
    }

    fn on_object_begin(&mut self) -> Flow {
        (**self).on_object_begin()
    }

    fn on_container_end(&mut self) -> Flow {
        (**self).on_container_end()
    }

    fn on_string(&mut self, bytes: &[u8]) -> Flow {
        (**self).on_string(bytes)
    }

    fn on_negative_sign(&mut self) -> Flow {
        (**self).on_negative_sign()
    }

    fn on_integer_digits(&mut self, digits: &[u8]) -> Flow {
        (**self).on_integer_digits(digits)
    }

    fn on_fraction_digits(&mut self, digits: &[u8]) -> Flow {
        (**self).on_fraction_digits(digits)
    }

    fn on_exponent_digits(&mut self, digits: &[u8]) -> Flow {
        (**self).on_exponent_digits(digits)
    }

    fn on_separator(&mut self) -> Flow {
        (**self).on_separator()
    }

    fn on_literal(&mut self, literal: Literal) -> Flow {
        (**self).on_literal(literal)
    }
}

/// Adapts a closure taking [`Event`]s into a [`Handler`].
///
/// ```
/// use chunkjson::{Event, EventFn, Flow, PushParser};
///
/// let mut strings = 0;
/// let mut parser = PushParser::new(EventFn(|event: Event<'_>| {
///     if let Event::String(_) = event {
///         strings += 1;
///     }
///     Flow::Continue
/// }));
/// parser.feed(br#"{"a": "b"}"#).unwrap();
/// drop(parser);
/// assert_eq!(strings, 2);
/// ```
pub struct EventFn<F>(pub F);

impl<F> Handler for EventFn<F>
where
    F: FnMut(Event<'_>) -> Flow,
{
    fn on_array_begin(&mut self) -> Flow {
        (self.0)(Event::ArrayBegin)
    }

    fn on_object_begin(&mut self) -> Flow {
        (self.0)(Event::ObjectBegin)
    }

    fn on_container_end(&mut self) -> Flow {
        (self.0)(Event::ContainerEnd)
    }

    fn on_string(&mut self, bytes: &[u8]) -> Flow {
        (self.0)(Event::String(bytes))
    }

    fn on_negative_sign(&mut self) -> Flow {
        (self.0)(Event::NegativeSign)
    }

    fn on_integer_digits(&mut self, digits: &[u8]) -> Flow {
        (self.0)(Event::IntegerDigits(digits))
    }

    fn on_fraction_digits(&mut self, digits: &[u8]) -> Flow {
        (self.0)(Event::FractionDigits(digits))
    }

    fn on_exponent_digits(&mut self, digits: &[u8]) -> Flow {
        (self.0)(Event::ExponentDigits(digits))
    }

    fn on_separator(&mut self) -> Flow {
        (self.0)(Event::Separator)
    }

    fn on_literal(&mut self, literal: Literal) -> Flow {
        (self.0)(Event::Literal(literal))
    }
}

/// The kind of a marked token, selecting which data handler receives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpanKind {
    String,
    Integer,
    Fraction,
    Exponent,
}

impl SpanKind {
    pub(crate) fn deliver<H: Handler + ?Sized>(self, handler: &mut H, bytes: &[u8]) -> Flow {
        match self {
            SpanKind::String => handler.on_string(bytes),
            SpanKind::Integer => handler.on_integer_digits(bytes),
            SpanKind::Fraction => handler.on_fraction_digits(bytes),
            SpanKind::Exponent => handler.on_exponent_digits(bytes),
        }
    }
}
