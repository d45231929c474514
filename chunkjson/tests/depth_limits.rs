// SPDX-License-Identifier: Apache-2.0

//! Nesting depth enforcement and the reported offset of the offending bracket.

mod common;

use chunkjson::{Container, ErrKind, ParserOptions, PushParser, State, DEFAULT_MAX_DEPTH};
use common::{OwnedEvent, Recorder};
use test_log::test;

fn nested_arrays(depth: usize) -> Vec<u8> {
    let mut json = vec![b'['; depth];
    json.extend_from_slice(b"1");
    json.extend(std::iter::repeat(b']').take(depth));
    json
}

#[test]
fn test_default_depth_accepted() {
    let json = nested_arrays(100);
    let mut parser = PushParser::new(());
    assert_eq!(parser.options().max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(parser.feed(&json), Ok(json.len()));
    assert_eq!(parser.state(), State::Done);
}

#[test]
fn test_one_past_default_depth() {
    let json = vec![b'['; 101];
    let mut parser = PushParser::new(Recorder::default());
    let err = parser.feed(&json).unwrap_err();
    assert_eq!(err.kind(), ErrKind::DepthExceeded);
    // zero-based offset of the 101st bracket, which was not consumed
    assert_eq!(err.position(), 100);
    assert_eq!(err.character(), Some(b'['));
    assert_eq!(parser.bytes_read(), 100);
    assert_eq!(parser.depth(), 100);
    let events = parser.into_handler().events;
    assert_eq!(events.len(), 100);
    assert!(events.iter().all(|e| *e == OwnedEvent::ArrayBegin));
}

#[test]
fn test_depth_is_per_open_container() {
    let options = ParserOptions::new().with_max_depth(2);
    let mut parser = PushParser::with_options((), options);
    // siblings never add up
    assert!(parser.feed(b"[[1], [2], {\"a\": 3}, []]").is_ok());

    let mut parser = PushParser::with_options((), options);
    let err = parser.feed(b"{\"a\": [{}]}").unwrap_err();
    assert_eq!(err.kind(), ErrKind::DepthExceeded);
    assert_eq!(err.position(), 7);
    assert_eq!(err.character(), Some(b'{'));
}

#[test]
fn test_limit_hit_in_later_chunk() {
    let options = ParserOptions::new().with_max_depth(3);
    let mut parser = PushParser::with_options((), options);
    parser.feed(b"[[").unwrap();
    assert_eq!(parser.container(), Some(Container::Array));
    parser.feed(b" {\"k\": ").unwrap();
    assert_eq!(parser.depth(), 3);
    let err = parser.feed(b"1, \"j\": [").unwrap_err();
    assert_eq!(err.position(), 8);
    assert_eq!(err.offset(), 2 + 7 + 8);
}

#[test]
fn test_reset_changes_depth() {
    let json = nested_arrays(10);
    let mut parser = PushParser::with_options((), ParserOptions::new().with_max_depth(5));
    let err = parser.feed(&json).unwrap_err();
    assert_eq!(err.position(), 5);

    parser.reset(10);
    assert_eq!(parser.options().max_depth, 10);
    assert_eq!(parser.feed(&json), Ok(json.len()));

    parser.reset(9);
    assert_eq!(parser.feed(&json).unwrap_err().position(), 9);
}

#[test]
fn test_large_depth() {
    let depth = 20_000;
    let json = nested_arrays(depth);
    let mut parser = PushParser::with_options((), ParserOptions::new().with_max_depth(depth));
    for chunk in json.chunks(997) {
        parser.feed(chunk).unwrap();
    }
    parser.finish().unwrap();
    assert_eq!(parser.depth(), 0);
}
