use super::*;
use logging::{LogTag, MetadataSet};

#[derive(Debug, Default)]
struct Recorded {
    lines: Vec<(SyslogPriority, String)>,
}

impl SyslogTransport for Recorded {
    fn send(&mut self, priority: SyslogPriority, message: &str) {
        self.lines.push((priority, message.to_owned()));
    }
}

fn writer() -> SyslogWriter<Recorded> {
    SyslogWriter::with_transport(Recorded::default())
}

fn lines(writer: SyslogWriter<Recorded>) -> Vec<(SyslogPriority, String)> {
    writer.into_transport().lines
}

// --- SyslogFacility ---

#[test]
fn default_facility_is_daemon() {
    assert_eq!(SyslogFacility::default(), SyslogFacility::Daemon);
}

#[test]
fn from_name_recognises_all_standard_facilities() {
    for facility in SyslogFacility::ALL {
        assert_eq!(
            SyslogFacility::from_name(facility.as_str()),
            Some(facility),
            "failed for facility name '{facility}'"
        );
    }
}

#[test]
fn from_name_is_case_insensitive() {
    assert_eq!(
        SyslogFacility::from_name("DAEMON"),
        Some(SyslogFacility::Daemon)
    );
    assert_eq!(
        SyslogFacility::from_name("Local0"),
        Some(SyslogFacility::Local0)
    );
    assert_eq!(
        SyslogFacility::from_name("AuthPriv"),
        Some(SyslogFacility::AuthPriv)
    );
}

#[test]
fn from_name_rejects_unknown() {
    assert_eq!(SyslogFacility::from_name("unknown"), None);
    assert_eq!(SyslogFacility::from_name(""), None);
    assert_eq!(SyslogFacility::from_name("local8"), None);
    assert_eq!(SyslogFacility::from_name("LOG_DAEMON"), None);
}

#[test]
fn facility_values_match_libc() {
    assert_eq!(SyslogFacility::Daemon as i32, libc::LOG_DAEMON);
    assert_eq!(SyslogFacility::Local7 as i32, libc::LOG_LOCAL7);
}

// --- SyslogPriority ---

#[test]
fn category_priority_table() {
    let cases = [
        (LogCategory::Debug, SyslogPriority::Debug),
        (LogCategory::Verb2, SyslogPriority::Info),
        (LogCategory::Verb1, SyslogPriority::Info),
        (LogCategory::Info, SyslogPriority::Info),
        (LogCategory::Warn, SyslogPriority::Warning),
        (LogCategory::Error, SyslogPriority::Error),
        (LogCategory::Crit, SyslogPriority::Critical),
        (LogCategory::Fatal, SyslogPriority::Critical),
        (LogCategory::Undefined, SyslogPriority::Notice),
    ];
    for (category, priority) in cases {
        assert_eq!(SyslogPriority::for_category(category), priority, "{category:?}");
    }
}

#[test]
fn priority_values_match_libc() {
    assert_eq!(SyslogPriority::Info as i32, libc::LOG_INFO);
    assert_eq!(SyslogPriority::Critical as i32, libc::LOG_CRIT);
}

// --- SyslogConfig ---

#[test]
fn config_default_uses_daemon_and_default_ident() {
    let config = SyslogConfig::default();
    assert_eq!(config.facility(), SyslogFacility::Daemon);
    assert_eq!(config.ident(), DEFAULT_SYSLOG_IDENT);
}

#[test]
fn config_from_settings_parses_facility() {
    let settings = logging::SyslogSettings {
        facility: "local3".to_owned(),
        ident: "svc".to_owned(),
    };
    let config = SyslogConfig::from_settings(&settings).expect("valid facility");
    assert_eq!(config.facility(), SyslogFacility::Local3);
    assert_eq!(config.ident(), "svc");
}

#[test]
fn config_from_settings_rejects_unknown_facility() {
    let settings = logging::SyslogSettings {
        facility: "local9".to_owned(),
        ..logging::SyslogSettings::default()
    };
    let err = SyslogConfig::from_settings(&settings).expect_err("unknown facility");
    assert!(matches!(err, SinkError::UnknownFacility(ref name) if name == "local9"));
}

#[test]
fn open_rejects_interior_nul_in_ident() {
    let config = SyslogConfig::new(SyslogFacility::User, "bad\0ident");
    let err = config.open().expect_err("interior NUL");
    assert!(matches!(err, SinkError::InvalidIdent(_)));
}

#[test]
fn open_and_close_real_channel() {
    let config = SyslogConfig::new(SyslogFacility::User, "logwriter-test");
    let mut transport = config.open().expect("openlog never fails");
    assert_eq!(transport.ident(), "logwriter-test");
    assert_eq!(transport.facility(), SyslogFacility::User);
    transport.send(SyslogPriority::Debug, "100% formatted %s %n safely");
}

// --- SyslogWriter ---

#[test]
fn plain_write_without_metadata_is_one_info_call() {
    let mut writer = writer();
    writer.write("hello").expect("write");
    assert_eq!(lines(writer), vec![(SyslogPriority::Info, "hello".to_owned())]);
}

#[test]
fn categorized_write_uses_mapped_priority_and_prefix() {
    let mut writer = writer();
    writer
        .write_categorized(LogGroup::BackendProc, LogCategory::Error, "boom")
        .expect("write");
    assert_eq!(
        lines(writer),
        vec![(
            SyslogPriority::Error,
            "Backend Session Process -- ERROR --: boom".to_owned()
        )]
    );
}

#[test]
fn metadata_is_sent_as_separate_call_at_same_priority() {
    let mut writer = writer();
    writer.add_meta("user", "alice", false);
    writer.add_meta("secret", "x", true);
    writer
        .write_categorized(LogGroup::Client, LogCategory::Crit, "down")
        .expect("write");
    assert_eq!(
        lines(writer),
        vec![
            (SyslogPriority::Critical, "user=alice".to_owned()),
            (SyslogPriority::Critical, "Client !! CRITICAL !!: down".to_owned()),
        ]
    );
}

#[test]
fn armed_prepend_applies_to_both_calls_and_unarmed_to_neither() {
    let mut writer = writer();
    writer.add_meta("id", "V", false);
    writer.prepend_meta("id", true);
    writer.write("msg").expect("write");

    writer.add_meta("id", "W", false);
    writer.prepend_meta("id", false);
    writer.write("again").expect("write");

    assert_eq!(
        lines(writer),
        vec![
            (SyslogPriority::Info, "V id=V".to_owned()),
            (SyslogPriority::Info, "V msg".to_owned()),
            (SyslogPriority::Info, "id=W".to_owned()),
            (SyslogPriority::Info, "again".to_owned()),
        ]
    );
}

#[test]
fn state_is_cleared_after_each_write() {
    let mut writer = writer();
    writer.add_meta("k", "v", false);
    writer.prepend_meta("k", true);
    writer.write("first").expect("write");

    assert!(writer.state().metadata.is_empty());
    assert!(writer.state().prepend_label.is_empty());
    assert!(!writer.state().prepend_meta);

    writer.write("second").expect("write");
    let recorded = lines(writer);
    assert_eq!(recorded.last(), Some(&(SyslogPriority::Info, "second".to_owned())));
    assert_eq!(recorded.len(), 3);
}

#[test]
fn disabled_metadata_suppresses_metadata_call() {
    let mut writer = writer();
    writer.enable_log_meta(false);
    writer.add_meta("k", "v", false);
    writer.write("only").expect("write");
    assert_eq!(lines(writer), vec![(SyslogPriority::Info, "only".to_owned())]);
}

#[test]
fn copied_metadata_and_tags_render_on_metadata_call() {
    let mut set = MetadataSet::new();
    set.add_meta_tag("peer", &LogTag::new("a", "b"), false);
    let expected = set.to_string();

    let mut writer = writer();
    writer.add_meta_copy(&set);
    writer.write("tagged").expect("write");
    assert_eq!(lines(writer)[0].1, expected);
}

#[test]
fn timestamp_is_always_reported_enabled() {
    let mut writer = writer();
    writer.enable_timestamp(false);
    assert!(writer.timestamp_enabled());
}

#[test]
fn colours_are_ignored() {
    let mut writer = writer();
    writer
        .write_with_colours("plain", ColourPair::new("\x1b[31m", "\x1b[0m"))
        .expect("write");
    assert_eq!(lines(writer), vec![(SyslogPriority::Info, "plain".to_owned())]);
}
