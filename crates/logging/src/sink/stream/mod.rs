use std::fmt;

use crate::timestamp::TimestampSource;
use crate::writer::WriterState;

/// Writer that renders events as text lines into an [`std::io::Write`]
/// target.
///
/// When metadata is pending, each write emits an auxiliary metadata line
/// before the message line. Both lines start with the timestamp (if enabled)
/// and are bracketed by the caller's colour sequences.
///
/// # Examples
///
/// ```
/// use logging::{LogWriter, StreamWriter};
///
/// let mut writer = StreamWriter::new(Vec::new());
/// writer.enable_timestamp(false);
/// writer.add_meta("user", "alice", false);
/// writer.write("login accepted")?;
///
/// let output = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(output, "user=alice\nlogin accepted\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct StreamWriter<W> {
    writer: W,
    state: WriterState,
    clock: Box<dyn TimestampSource>,
}

mod constructors;
mod writing;

impl<W> fmt::Debug for StreamWriter<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamWriter")
            .field("writer", &self.writer)
            .field("state", &self.state)
            .field("clock", &self.clock)
            .finish()
    }
}
