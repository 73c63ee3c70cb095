use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Console method an event is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Channel {
    Log,
    Warn,
    Error,
}

impl Channel {
    pub(crate) fn for_level(level: Level) -> Self {
        if level == Level::ERROR {
            Channel::Error
        } else if level == Level::WARN {
            Channel::Warn
        } else {
            Channel::Log
        }
    }
}

/// Buffers one formatted event and hands it to the console on drop.
pub struct ConsoleWriter {
    channel: Channel,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        let line = wasm_bindgen::JsValue::from_str(text.trim_end());
        match self.channel {
            Channel::Log => web_sys::console::log_1(&line),
            Channel::Warn => web_sys::console::warn_1(&line),
            Channel::Error => web_sys::console::error_1(&line),
        }
    }
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            channel: Channel::Log,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            channel: Channel::for_level(*meta.level()),
            buf: Vec::new(),
        }
    }
}

/// Route `tracing` events to the browser console. Calling it twice is harmless.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .try_init();
}
