// Example printing the events PushParser reports for a document fed in chunks

use chunkjson::{Error, Flow, Handler, Literal, PushParser};

/// Prints each event indented by nesting level
struct EventPrinter {
    indent: usize,
    event_count: usize,
}

impl EventPrinter {
    fn new() -> Self {
        Self {
            indent: 0,
            event_count: 0,
        }
    }

    fn print(&mut self, what: &str) -> Flow {
        self.event_count += 1;
        println!("{}{}", "  ".repeat(self.indent), what);
        Flow::Continue
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl Handler for EventPrinter {
    fn on_array_begin(&mut self) -> Flow {
        let flow = self.print("[");
        self.indent += 1;
        flow
    }

    fn on_object_begin(&mut self) -> Flow {
        let flow = self.print("{");
        self.indent += 1;
        flow
    }

    fn on_container_end(&mut self) -> Flow {
        self.indent = self.indent.saturating_sub(1);
        self.print("end")
    }

    fn on_string(&mut self, bytes: &[u8]) -> Flow {
        self.print(&format!("string {:?}", lossy(bytes)))
    }

    fn on_negative_sign(&mut self) -> Flow {
        self.print("minus")
    }

    fn on_integer_digits(&mut self, digits: &[u8]) -> Flow {
        self.print(&format!("integer {}", lossy(digits)))
    }

    fn on_fraction_digits(&mut self, digits: &[u8]) -> Flow {
        self.print(&format!("fraction {}", lossy(digits)))
    }

    fn on_exponent_digits(&mut self, digits: &[u8]) -> Flow {
        self.print(&format!("exponent {}", lossy(digits)))
    }

    fn on_separator(&mut self) -> Flow {
        self.print("separator")
    }

    fn on_literal(&mut self, literal: Literal) -> Flow {
        self.print(&format!("literal {}", lossy(literal.as_bytes())))
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let json_chunks = [
        br#"{"name": "chu"#.as_slice(),
        br#"nkjson", "version": 0.1, "#.as_slice(),
        br#""features": ["incremental", "no_std""#.as_slice(),
        br#", "esc\"aped"], "limits": {"depth": 1"#.as_slice(),
        br#"00, "carry": -1e3, "strict": true, "x": null}}"#.as_slice(),
    ];

    let mut parser = PushParser::new(EventPrinter::new());
    for (i, chunk) in json_chunks.iter().enumerate() {
        println!("-- chunk {} ({} bytes): {}", i + 1, chunk.len(), lossy(chunk));
        parser.feed(chunk)?;
    }
    parser.finish()?;

    let consumed = parser.bytes_read();
    let handler = parser.into_handler();
    println!("-- {} events from {} bytes", handler.event_count, consumed);
    Ok(())
}
