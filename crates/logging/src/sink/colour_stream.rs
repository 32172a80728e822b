use std::fmt;
use std::io::{self, Write};

use super::StreamWriter;
use crate::colour::{ColourMode, ColourPolicy};
use crate::levels::{LogCategory, LogGroup};
use crate::writer::{ColourPair, LogWriter, WriterState};

/// [`StreamWriter`] decorated with colours chosen by a [`ColourPolicy`].
///
/// Colours are resolved for categorized writes only; plain writes pass
/// through undecorated unless the caller supplies a [`ColourPair`].
pub struct ColourStreamWriter<W> {
    inner: StreamWriter<W>,
    colours: Box<dyn ColourPolicy>,
}

impl<W> ColourStreamWriter<W> {
    /// Wraps `inner`, colouring lines with `colours`.
    #[must_use]
    pub fn new<P>(inner: StreamWriter<W>, colours: P) -> Self
    where
        P: ColourPolicy + 'static,
    {
        Self {
            inner,
            colours: Box::new(colours),
        }
    }

    /// The active colour policy.
    pub fn colours(&self) -> &dyn ColourPolicy {
        self.colours.as_ref()
    }

    /// Consumes the writer and returns the wrapped stream writer.
    #[must_use]
    pub fn into_inner(self) -> StreamWriter<W> {
        self.inner
    }
}

impl<W> fmt::Debug for ColourStreamWriter<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColourStreamWriter")
            .field("inner", &self.inner)
            .field("colours", &self.colours)
            .finish()
    }
}

impl<W> LogWriter for ColourStreamWriter<W>
where
    W: Write,
{
    fn state(&self) -> &WriterState {
        self.inner.state()
    }

    fn state_mut(&mut self) -> &mut WriterState {
        self.inner.state_mut()
    }

    fn write_with_colours(&mut self, text: &str, colours: ColourPair<'_>) -> io::Result<()> {
        self.inner.write_with_colours(text, colours)
    }

    fn write_categorized(
        &mut self,
        group: LogGroup,
        category: LogCategory,
        text: &str,
    ) -> io::Result<()> {
        match self.colours.mode() {
            ColourMode::ByCategory => {
                let pre = self.colours.colour_by_category(category);
                let post = self.colours.reset();
                self.inner.write_categorized_with_colours(
                    group,
                    category,
                    text,
                    ColourPair::new(&pre, &post),
                )
            }
            ColourMode::ByGroup => {
                let group_colour = self.colours.colour_by_group(group);
                let pre = if category.is_above_info() {
                    self.colours.colour_by_category(category)
                } else {
                    group_colour.clone()
                };
                let post = self.colours.reset();
                let body = format!("{group_colour}{text}");
                self.inner.write_categorized_with_colours(
                    group,
                    category,
                    &body,
                    ColourPair::new(&pre, &post),
                )
            }
            ColourMode::None => self.inner.write_categorized(group, category, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::AnsiColours;

    /// Policy with readable markers instead of escape sequences.
    #[derive(Debug)]
    struct Markers(ColourMode);

    impl ColourPolicy for Markers {
        fn mode(&self) -> ColourMode {
            self.0
        }

        fn colour_by_group(&self, group: LogGroup) -> String {
            format!("<g:{}>", group.short_name())
        }

        fn colour_by_category(&self, category: LogCategory) -> String {
            format!("<c:{}>", category.short_name())
        }

        fn reset(&self) -> String {
            "</>".to_owned()
        }
    }

    fn writer(mode: ColourMode) -> ColourStreamWriter<Vec<u8>> {
        let mut stream = StreamWriter::new(Vec::new());
        stream.enable_timestamp(false);
        ColourStreamWriter::new(stream, Markers(mode))
    }

    fn output(writer: ColourStreamWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner().into_inner()).expect("utf-8")
    }

    #[test]
    fn by_category_wraps_line_in_category_colour() {
        let mut writer = writer(ColourMode::ByCategory);
        writer
            .write_categorized(LogGroup::Client, LogCategory::Error, "bad")
            .expect("write succeeds");
        assert_eq!(output(writer), "<c:error>Client -- ERROR --: bad</>\n");
    }

    #[test]
    fn by_group_uses_group_colour_for_info() {
        let mut writer = writer(ColourMode::ByGroup);
        writer
            .write_categorized(LogGroup::NetCfg, LogCategory::Info, "up")
            .expect("write succeeds");
        assert_eq!(
            output(writer),
            "<g:netcfg>Network Configuration INFO: <g:netcfg>up</>\n"
        );
    }

    #[test]
    fn by_group_highlights_severe_categories() {
        let mut writer = writer(ColourMode::ByGroup);
        writer
            .write_categorized(LogGroup::NetCfg, LogCategory::Warn, "flaky")
            .expect("write succeeds");
        assert_eq!(
            output(writer),
            "<c:warn>Network Configuration WARNING: <g:netcfg>flaky</>\n"
        );
    }

    #[test]
    fn no_colour_mode_is_plain() {
        let mut writer = writer(ColourMode::None);
        writer
            .write_categorized(LogGroup::Logger, LogCategory::Debug, "trace")
            .expect("write succeeds");
        assert_eq!(output(writer), "Logger DEBUG: trace\n");
    }

    #[test]
    fn event_writes_are_coloured() {
        let mut writer = writer(ColourMode::ByCategory);
        let event = crate::LogEvent::new(LogGroup::System, LogCategory::Fatal, "gone");
        writer.write_event(&event).expect("write succeeds");
        assert!(output(writer).starts_with("<c:fatal>"));
    }

    #[test]
    fn metadata_line_shares_colours() {
        let mut writer = writer(ColourMode::ByCategory);
        writer.add_meta("k", "v", false);
        writer
            .write_categorized(LogGroup::Client, LogCategory::Info, "hi")
            .expect("write succeeds");
        assert_eq!(
            output(writer),
            "<c:info>k=v</>\n<c:info>Client INFO: hi</>\n"
        );
    }

    #[test]
    fn state_is_shared_with_inner_writer() {
        let mut writer = writer(ColourMode::ByGroup);
        writer.add_meta("k", "v", false);
        assert_eq!(writer.state().metadata.len(), 1);
        writer.write("plain").expect("write succeeds");
        assert!(writer.state().metadata.is_empty());
    }

    #[test]
    fn ansi_policy_emits_reset() {
        let mut stream = StreamWriter::new(Vec::new());
        stream.enable_timestamp(false);
        let mut writer = ColourStreamWriter::new(stream, AnsiColours::new(ColourMode::ByCategory));
        writer
            .write_categorized(LogGroup::Client, LogCategory::Error, "x")
            .expect("write succeeds");
        let text = String::from_utf8(writer.into_inner().into_inner()).expect("utf-8");
        assert!(text.ends_with("\x1b[0m\n"));
        assert!(text.starts_with("\x1b[1;31m"));
    }
}
