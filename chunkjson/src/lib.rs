// SPDX-License-Identifier: Apache-2.0

//! Incremental, callback-driven JSON lexer.
//!
//! Input is pushed in chunks of any size; recognized tokens are reported to a
//! [`Handler`] as soon as they complete. Nothing is interpreted: strings are
//! delivered raw, numbers as their digit groups.
//!
//! ```
//! use chunkjson::{Event, EventFn, Flow, PushParser};
//!
//! let mut digits = Vec::new();
//! let mut parser = PushParser::new(EventFn(|event: Event<'_>| {
//!     if let Event::IntegerDigits(d) = event {
//!         digits.push(d.to_vec());
//!     }
//!     Flow::Continue
//! }));
//! parser.feed(b"[12, 3").unwrap();
//! parser.feed(b"4]").unwrap();
//! assert!(parser.is_done());
//! drop(parser);
//! assert_eq!(digits, [b"12".to_vec(), b"34".to_vec()]);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod handler;
pub use handler::{Event, EventFn, Flow, Handler, Literal};

mod options;
pub use options::{NumberMode, ParserOptions, TokenDelivery, DEFAULT_MAX_DEPTH};

mod parse_error;
pub use parse_error::{ErrKind, Error};

mod token_mark;

mod tokenizer;
pub use tokenizer::{Container, NestingStack, PushParser, State};
