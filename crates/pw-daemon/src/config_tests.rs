// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const DOC: &str = r#"
[server]
workers = 5

[monitoring]
default_interval = "45s"
default_threshold = 2
soft_fail_enabled = true

[database]
cleanup_interval = "12h"
history_retention = "7d"

[notify]
enabled = true
user_key = "u"
api_token = "t"

[[hosts]]
id = "web-1"
name = "web-1"

[[checks]]
id = "ping-web-1"
name = "ping"
type = "ping"
hosts = ["web-1"]
timeout = "10s"
"#;

#[test]
fn parses_and_lowers_the_full_document() {
    let doc = DaemonDocument::parse(DOC).expect("parse");
    let config = doc.into_config(0).expect("lower");

    assert_eq!(config.scheduler.workers, 5);
    assert_eq!(config.scheduler.default_interval, Duration::from_secs(45));
    assert_eq!(config.scheduler.default_threshold, 2);
    assert_eq!(config.purge_interval, Duration::from_secs(12 * 3600));
    assert_eq!(config.history_retention, Duration::from_secs(7 * 24 * 3600));
    assert!(config.notify.enabled);
    assert_eq!(config.hosts.len(), 1);
    assert_eq!(config.checks.len(), 1);
}

#[test]
fn defaults_apply_when_sections_are_absent() {
    let doc = DaemonDocument::parse("").expect("parse");
    let config = doc.into_config(0).expect("lower");
    assert_eq!(config.scheduler.workers, 3);
    assert_eq!(config.scheduler.default_interval, Duration::from_secs(30));
    assert!(!config.notify.enabled);
    assert!(config.hosts.is_empty());
}

#[test]
fn rejects_an_unparseable_duration_in_the_monitoring_section() {
    let doc = DaemonDocument::parse(
        r#"
[monitoring]
default_interval = "soon"
"#,
    )
    .expect("parse");
    let err = doc.into_config(0).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key, .. } if key.contains("default_interval")));
}
