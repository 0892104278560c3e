//! Property tests for `host[:port]` parsing.

use proptest::prelude::*;

use publisher::config::{HostSpec, UploadConfig, DEFAULT_SSH_PORT};

fn host_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9][a-z0-9.-]{0,30}").unwrap()
}

fn upload(host: &str) -> UploadConfig {
    UploadConfig {
        host: host.to_string(),
        user: String::new(),
        pass: String::new(),
        key: String::new(),
        destination: "/srv/site".to_string(),
        execute: Vec::new(),
        fail_on_command_error: false,
    }
}

#[test]
fn example_host_specs() {
    let with_port = upload("example.com:2222");
    assert_eq!(with_port.host(), "example.com");
    assert_eq!(with_port.port(), Ok(2222));

    let without_port = upload("example.com");
    assert_eq!(without_port.host(), "example.com");
    assert_eq!(without_port.port(), Ok(22));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,64}") {
        let _ = HostSpec::parse(&s);
        let _ = upload(&s).port();
    }

    /// PROPERTY: `host:port` splits back into its parts.
    #[test]
    fn property_host_and_port_round_trip(host in host_name(), port in any::<u16>()) {
        let spec = HostSpec::parse(&format!("{}:{}", host, port)).unwrap();
        prop_assert_eq!(spec.host, host);
        prop_assert_eq!(spec.port, port);
    }

    /// PROPERTY: A spec without `:` uses the default port and keeps the host.
    #[test]
    fn property_missing_port_defaults(host in host_name()) {
        let config = upload(&host);
        prop_assert_eq!(config.host(), host.as_str());
        prop_assert_eq!(config.port(), Ok(DEFAULT_SSH_PORT));
    }

    /// PROPERTY: A non-numeric port is rejected, never defaulted.
    #[test]
    fn property_non_numeric_port_is_rejected(
        host in host_name(),
        port in "[a-zA-Z][a-zA-Z0-9]{0,8}"
    ) {
        let spec = format!("{}:{}", host, port);
        prop_assert!(HostSpec::parse(&spec).is_err());
    }
}
