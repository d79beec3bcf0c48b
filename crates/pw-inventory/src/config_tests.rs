// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const DOC: &str = r#"
[[hosts]]
id = "web-1"
name = "web-1"
enabled = true

[[checks]]
id = "ping-web-1"
name = "ping"
type = "ping"
hosts = ["web-1"]
threshold = 3
timeout = "10s"

[checks.interval]
ok = "5m"
warning = "2m"
critical = "1m"
unknown = "1m"
"#;

#[test]
fn parses_and_lowers_a_well_formed_document() {
    let doc = Document::parse(DOC).expect("parse");
    let (hosts, checks) = doc.into_entities(1000).expect("lower");
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].id, HostId::new("web-1"));
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].threshold, 3);
    assert_eq!(checks[0].interval.critical, Some(Duration::from_secs(60)));
    assert_eq!(checks[0].timeout, Duration::from_secs(10));
}

#[test]
fn rejects_a_check_referencing_an_undeclared_host() {
    let doc = Document::parse(
        r#"
[[checks]]
id = "c1"
name = "c1"
type = "ping"
hosts = ["ghost"]
timeout = "10s"
"#,
    )
    .expect("parse");
    let err = doc.into_entities(0).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key, .. } if key.contains("hosts")));
}

#[test]
fn rejects_a_zero_threshold() {
    let doc = Document::parse(
        r#"
[[checks]]
id = "c1"
name = "c1"
type = "ping"
threshold = 0
timeout = "10s"
"#,
    )
    .expect("parse");
    let err = doc.into_entities(0).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key, .. } if key.contains("threshold")));
}

#[test]
fn rejects_an_unparseable_duration() {
    let doc = Document::parse(
        r#"
[[checks]]
id = "c1"
name = "c1"
type = "ping"
timeout = "not-a-duration"
"#,
    )
    .expect("parse");
    let err = doc.into_entities(0).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key, .. } if key.contains("timeout")));
}

#[test]
fn rejects_a_duplicate_host_id() {
    let doc = Document::parse(
        r#"
[[hosts]]
id = "dup"
name = "a"

[[hosts]]
id = "dup"
name = "b"
"#,
    )
    .expect("parse");
    let err = doc.into_entities(0).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key, .. } if key.contains("id")));
}

#[test]
fn rejects_a_malformed_toml_document() {
    let err = Document::parse("this is not [valid toml").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
