use std::io::{self, Write};

use super::StreamWriter;
use crate::timestamp::TimestampSource;
use crate::writer::{ColourPair, LogWriter, WriteTransaction, WriterState};

fn open_line(clock: &dyn TimestampSource, timestamp: bool, pre: &str) -> String {
    let mut line = String::new();
    if timestamp {
        line.push_str(&clock.now());
        line.push(' ');
    }
    line.push_str(pre);
    line
}

fn close_line(mut line: String, post: &str) -> String {
    line.push_str(post);
    line.push('\n');
    line
}

impl<W> StreamWriter<W>
where
    W: Write,
{
    /// Flushes the underlying stream.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W> LogWriter for StreamWriter<W>
where
    W: Write,
{
    fn state(&self) -> &WriterState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WriterState {
        &mut self.state
    }

    fn write_with_colours(&mut self, text: &str, colours: ColourPair<'_>) -> io::Result<()> {
        let mut tx = WriteTransaction::begin(&mut self.state);
        let clock = self.clock.as_ref();

        if tx.has_metadata_line() {
            let mut line = open_line(clock, tx.timestamp, colours.pre);
            if tx.take_prepend_meta() {
                line.push_str(&tx.prepend_value());
            }
            line.push_str(&tx.metadata.to_string());
            self.writer
                .write_all(close_line(line, colours.post).as_bytes())?;
        }

        let mut line = open_line(clock, tx.timestamp, colours.pre);
        line.push_str(&tx.prepend_value());
        line.push_str(text);
        self.writer
            .write_all(close_line(line, colours.post).as_bytes())?;
        self.writer.flush()
    }
}
