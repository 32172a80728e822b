use super::StreamWriter;
use crate::timestamp::{LocalClock, TimestampSource};
use crate::writer::WriterState;

impl<W> StreamWriter<W> {
    /// Creates a writer stamping lines with the local wall clock.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_clock(writer, LocalClock)
    }

    /// Creates a writer using an explicit timestamp source.
    #[must_use]
    pub fn with_clock<C>(writer: W, clock: C) -> Self
    where
        C: TimestampSource + 'static,
    {
        Self {
            writer,
            state: WriterState::default(),
            clock: Box::new(clock),
        }
    }

    /// Borrows the underlying stream.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying stream.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the writer and returns the wrapped stream.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Default for StreamWriter<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}
