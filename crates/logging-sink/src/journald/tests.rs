use super::*;
use logging::{LogTag, MetadataSet, RenderTag};

#[derive(Debug, Default)]
struct Records {
    submitted: Vec<Vec<JournalField>>,
    fail: bool,
}

impl JournalTransport for Records {
    fn submit(&mut self, fields: &[JournalField]) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "no journal"));
        }
        self.submitted.push(fields.to_vec());
        Ok(())
    }
}

fn writer() -> JournaldWriter<Records> {
    JournaldWriter::with_transport(Records::default())
}

fn rendered(fields: &[JournalField]) -> Vec<String> {
    fields.iter().map(ToString::to_string).collect()
}

#[test]
fn skipped_metadata_and_empty_token_are_omitted() {
    let mut writer = writer();
    writer.add_meta("foo", "bar", false);
    writer.add_meta("baz", "qux", true);
    writer
        .write_categorized(LogGroup::Client, LogCategory::Warn, "hi")
        .expect("write");

    let submitted = writer.into_transport().submitted;
    assert_eq!(submitted.len(), 1);
    assert_eq!(
        rendered(&submitted[0]),
        [
            "O3_FOO=bar",
            "O3_LOG_GROUP=Client",
            "O3_LOG_CATEGORY=WARNING",
            "MESSAGE=hi",
        ]
    );
}

#[test]
fn session_token_precedes_group_and_category() {
    let mut writer = writer();
    writer.add_meta("user", "alice", false);
    let event =
        LogEvent::new(LogGroup::SessionMgr, LogCategory::Info, "opened").with_session_token("tok");
    writer.write_event(&event).expect("write");

    let submitted = writer.into_transport().submitted;
    assert_eq!(
        rendered(&submitted[0]),
        [
            "O3_USER=alice",
            "O3_SESSION_TOKEN=tok",
            "O3_LOG_GROUP=Session Manager",
            "O3_LOG_CATEGORY=INFO",
            "MESSAGE=opened",
        ]
    );
}

#[test]
fn plain_write_is_undefined_group_at_info() {
    let mut writer = writer();
    writer.write("plain").expect("write");

    let submitted = writer.into_transport().submitted;
    assert_eq!(
        rendered(&submitted[0]),
        [
            "O3_LOG_GROUP=[UNDEFINED]",
            "O3_LOG_CATEGORY=INFO",
            "MESSAGE=plain",
        ]
    );
}

#[test]
fn tags_are_rendered_without_encapsulation() {
    let tag = LogTag::new("s", "i");
    let mut writer = writer();
    writer.add_meta_tag("peer", &tag, false);

    let fields = writer.fields_for(&LogEvent::new(LogGroup::Client, LogCategory::Info, "m"));
    assert_eq!(fields[0].name(), "O3_PEER");
    assert_eq!(fields[0].value(), tag.render(false));
}

#[test]
fn message_prefix_requires_armed_flag_and_message_prepend() {
    let event = LogEvent::new(LogGroup::Client, LogCategory::Info, "hello");

    let mut writer = writer();
    writer.add_meta("id", "V", false);
    writer.prepend_meta("id", false);
    assert_eq!(writer.fields_for(&event).last().map(JournalField::value), Some("hello"));

    writer.prepend_meta("id", true);
    assert_eq!(writer.fields_for(&event).last().map(JournalField::value), Some("V hello"));

    writer.enable_message_prepend(false);
    assert_eq!(writer.fields_for(&event).last().map(JournalField::value), Some("hello"));
}

#[test]
fn fields_for_does_not_consume_state() {
    let mut writer = writer();
    writer.add_meta("k", "v", false);
    let event = LogEvent::new(LogGroup::Client, LogCategory::Info, "m");
    let _ = writer.fields_for(&event);
    assert_eq!(writer.state().metadata.len(), 1);
}

#[test]
fn state_is_cleared_after_write() {
    let mut writer = writer();
    writer.add_meta("k", "v", false);
    writer.prepend_meta("k", true);
    writer.write("first").expect("write");
    writer.write("second").expect("write");

    let submitted = writer.into_transport().submitted;
    assert_eq!(submitted[0].len(), 4);
    assert_eq!(submitted[0][3].value(), "v first");
    assert_eq!(
        rendered(&submitted[1]),
        [
            "O3_LOG_GROUP=[UNDEFINED]",
            "O3_LOG_CATEGORY=INFO",
            "MESSAGE=second",
        ]
    );
}

#[test]
fn transport_failure_is_swallowed_and_state_cleared() {
    let mut writer = JournaldWriter::with_transport(Records {
        fail: true,
        ..Records::default()
    });
    writer.add_meta("k", "v", false);
    writer.prepend_meta("k", true);

    writer
        .write_categorized(LogGroup::System, LogCategory::Error, "lost")
        .expect("failure is reported, not returned");

    assert!(writer.state().metadata.is_empty());
    assert!(writer.state().prepend_label.is_empty());
    assert!(!writer.state().prepend_meta);
}

#[test]
fn copied_metadata_is_exported_while_metadata_logging_is_off() {
    let mut set = MetadataSet::new();
    set.add_meta("k", "v", false);

    let mut writer = writer();
    writer.enable_log_meta(false);
    writer.add_meta("dropped", "x", false);
    writer.add_meta_copy(&set);
    let fields = writer.fields_for(&LogEvent::new(LogGroup::Client, LogCategory::Info, "m"));
    assert_eq!(
        rendered(&fields),
        [
            "O3_K=v",
            "O3_LOG_GROUP=Client",
            "O3_LOG_CATEGORY=INFO",
            "MESSAGE=m",
        ]
    );
}

#[test]
fn timestamp_is_always_reported_enabled() {
    let mut writer = writer();
    writer.enable_timestamp(false);
    assert!(writer.timestamp_enabled());
}

#[test]
fn simple_values_encode_inline() {
    let mut buf = Vec::new();
    JournalField::new("MESSAGE", "hi").encode_into(&mut buf);
    assert_eq!(buf, b"MESSAGE=hi\n");
}

#[test]
fn multiline_values_are_length_prefixed() {
    let mut buf = Vec::new();
    JournalField::new("MESSAGE", "a\nb").encode_into(&mut buf);

    let mut expected = b"MESSAGE\n".to_vec();
    expected.extend_from_slice(&3u64.to_le_bytes());
    expected.extend_from_slice(b"a\nb\n");
    assert_eq!(buf, expected);
}

#[test]
fn record_concatenates_fields_in_order() {
    let record = encode_record(&[
        JournalField::new("O3_A", "1"),
        JournalField::new("MESSAGE", "x"),
    ]);
    assert_eq!(record, b"O3_A=1\nMESSAGE=x\n");
}

#[test]
fn native_journal_delivers_one_datagram_per_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("journal.sock");
    let receiver = UnixDatagram::bind(&path).expect("bind receiver");

    let mut writer =
        JournaldWriter::with_transport(NativeJournal::with_path(&path).expect("socket"));
    assert_eq!(writer.transport().path(), path.as_path());
    writer.add_meta("foo", "bar", false);
    writer
        .write_categorized(LogGroup::NetCfg, LogCategory::Debug, "up")
        .expect("write");

    let mut buf = [0u8; 512];
    let len = receiver.recv(&mut buf).expect("datagram");
    assert_eq!(
        &buf[..len],
        b"O3_FOO=bar\nO3_LOG_GROUP=Network Configuration\nO3_LOG_CATEGORY=DEBUG\nMESSAGE=up\n"
    );
}

#[test]
fn native_journal_without_listener_fails_per_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut journal = NativeJournal::with_path(dir.path().join("missing.sock")).expect("socket");
    assert!(journal.submit(&[JournalField::new("MESSAGE", "x")]).is_err());
}
