// SPDX-License-Identifier: Apache-2.0

/// Nesting depth used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// How strictly the numeric grammar is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberMode {
    /// RFC 8259 numbers only.
    #[default]
    Strict,
    /// Also accepts leading zeros (`007`) and fraction or exponent parts
    /// without digits (`1.`, `1e+`).
    ///
    /// An exponent marker must still be followed by a sign or a digit.
    Lenient,
}

/// How string and number tokens that straddle a chunk boundary are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenDelivery {
    /// Unfinished bytes are carried over into an internal buffer and the
    /// complete token is delivered once, when it closes.
    ///
    /// Tokens contained in a single chunk are still handed out zero-copy.
    #[default]
    Whole,
    /// Each chunk hands out the part of the token it contains, as soon as the
    /// chunk ends. A token may then arrive as several consecutive events.
    /// Nothing is buffered.
    Fragments,
}

/// Configuration options for [`PushParser`](crate::PushParser).
///
/// # Default
///
/// Depth 100, strict numbers, whole-token delivery, no token length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of simultaneously open containers.
    pub max_depth: usize,
    /// Numeric grammar mode.
    pub numbers: NumberMode,
    /// Delivery of tokens that span chunks.
    pub delivery: TokenDelivery,
    /// Upper bound, in bytes, on a token assembled in the carry-over buffer.
    ///
    /// Only applies to [`TokenDelivery::Whole`].
    pub max_token_len: Option<usize>,
}

impl ParserOptions {
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            numbers: NumberMode::Strict,
            delivery: TokenDelivery::Whole,
            max_token_len: None,
        }
    }

    pub const fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    pub const fn with_numbers(self, numbers: NumberMode) -> Self {
        Self { numbers, ..self }
    }

    pub const fn with_delivery(self, delivery: TokenDelivery) -> Self {
        Self { delivery, ..self }
    }

    pub const fn with_max_token_len(self, max_token_len: usize) -> Self {
        Self {
            max_token_len: Some(max_token_len),
            ..self
        }
    }

    pub(crate) const fn is_strict(&self) -> bool {
        matches!(self.numbers, NumberMode::Strict)
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}
