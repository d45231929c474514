// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for the integration tests: an owned event log and a chunked writer.

#![allow(dead_code)]

use chunkjson::{Error, Flow, Handler, Literal, ParserOptions, PushParser};

/// Owned event representation for comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedEvent {
    ArrayBegin,
    ObjectBegin,
    End,
    String(String),
    Minus,
    Integer(String),
    Fraction(String),
    Exponent(String),
    Separator,
    Literal(Literal),
}

impl OwnedEvent {
    pub fn string(s: &str) -> Self {
        OwnedEvent::String(s.to_owned())
    }

    pub fn integer(s: &str) -> Self {
        OwnedEvent::Integer(s.to_owned())
    }

    pub fn fraction(s: &str) -> Self {
        OwnedEvent::Fraction(s.to_owned())
    }

    pub fn exponent(s: &str) -> Self {
        OwnedEvent::Exponent(s.to_owned())
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Records every event. Optionally aborts on the n-th one.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<OwnedEvent>,
    pub abort_at: Option<usize>,
}

impl Recorder {
    pub fn aborting_at(index: usize) -> Self {
        Self {
            events: Vec::new(),
            abort_at: Some(index),
        }
    }

    fn push(&mut self, event: OwnedEvent) -> Flow {
        let index = self.events.len();
        self.events.push(event);
        if self.abort_at == Some(index) {
            Flow::Abort
        } else {
            Flow::Continue
        }
    }

    /// Joins adjacent fragments of the same data event, as delivered in fragment mode.
    pub fn merged(&self) -> Vec<OwnedEvent> {
        let mut merged: Vec<OwnedEvent> = Vec::with_capacity(self.events.len());
        for event in &self.events {
            match (merged.last_mut(), event) {
                (Some(OwnedEvent::String(a)), OwnedEvent::String(b))
                | (Some(OwnedEvent::Integer(a)), OwnedEvent::Integer(b))
                | (Some(OwnedEvent::Fraction(a)), OwnedEvent::Fraction(b))
                | (Some(OwnedEvent::Exponent(a)), OwnedEvent::Exponent(b)) => a.push_str(b),
                _ => merged.push(event.clone()),
            }
        }
        merged
    }
}

impl Handler for Recorder {
    fn on_array_begin(&mut self) -> Flow {
        self.push(OwnedEvent::ArrayBegin)
    }

    fn on_object_begin(&mut self) -> Flow {
        self.push(OwnedEvent::ObjectBegin)
    }

    fn on_container_end(&mut self) -> Flow {
        self.push(OwnedEvent::End)
    }

    fn on_string(&mut self, bytes: &[u8]) -> Flow {
        self.push(OwnedEvent::String(text(bytes)))
    }

    fn on_negative_sign(&mut self) -> Flow {
        self.push(OwnedEvent::Minus)
    }

    fn on_integer_digits(&mut self, digits: &[u8]) -> Flow {
        self.push(OwnedEvent::Integer(text(digits)))
    }

    fn on_fraction_digits(&mut self, digits: &[u8]) -> Flow {
        self.push(OwnedEvent::Fraction(text(digits)))
    }

    fn on_exponent_digits(&mut self, digits: &[u8]) -> Flow {
        self.push(OwnedEvent::Exponent(text(digits)))
    }

    fn on_separator(&mut self) -> Flow {
        self.push(OwnedEvent::Separator)
    }

    fn on_literal(&mut self, literal: Literal) -> Flow {
        self.push(OwnedEvent::Literal(literal))
    }
}

/// Delivers data to a PushParser in controlled chunks
pub struct ChunkedWriter<'a> {
    data: &'a [u8],
    chunk_pattern: &'a [usize],
}

impl<'a> ChunkedWriter<'a> {
    /// An empty pattern writes everything at once; sizes of 0 count as 1.
    pub fn new(data: &'a [u8], chunk_pattern: &'a [usize]) -> Self {
        Self {
            data,
            chunk_pattern,
        }
    }

    /// Feeds every chunk, then finishes the document.
    pub fn run<H: Handler>(&self, parser: &mut PushParser<H>) -> Result<(), Error> {
        let mut pos = 0;
        let mut pattern_idx = 0;
        while pos < self.data.len() {
            let chunk_size = if self.chunk_pattern.is_empty() {
                self.data.len() - pos
            } else {
                let size = self.chunk_pattern[pattern_idx].max(1);
                pattern_idx = (pattern_idx + 1) % self.chunk_pattern.len();
                size
            };
            let end = (pos + chunk_size).min(self.data.len());
            let consumed = parser.feed(&self.data[pos..end])?;
            assert_eq!(consumed, end - pos);
            pos = end;
        }
        parser.finish()
    }
}

/// Parses `data` in one chunk with default options.
pub fn events_of(data: &[u8]) -> Result<Vec<OwnedEvent>, Error> {
    events_with(ParserOptions::default(), data, &[])
}

/// Parses `data` with a chunk pattern and returns the recorded events.
pub fn events_with(
    options: ParserOptions,
    data: &[u8],
    chunk_pattern: &[usize],
) -> Result<Vec<OwnedEvent>, Error> {
    let mut parser = PushParser::with_options(Recorder::default(), options);
    ChunkedWriter::new(data, chunk_pattern).run(&mut parser)?;
    Ok(parser.into_handler().events)
}

/// Feeds `data` split at `split` and returns the recorder.
pub fn record_split_at(
    options: ParserOptions,
    data: &[u8],
    split: usize,
) -> Result<Recorder, Error> {
    let mut parser = PushParser::with_options(Recorder::default(), options);
    let (head, tail) = data.split_at(split);
    parser.feed(head)?;
    parser.feed(tail)?;
    parser.finish()?;
    Ok(parser.into_handler())
}
