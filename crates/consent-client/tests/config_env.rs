use consent_client::config::{ENV_MAX_RETRIES, ENV_MOCK, ENV_PLAN, ENV_TIMEOUT_MS, ENV_URL};
use consent_client::{ClientConfig, ClientError};
use std::collections::HashMap;
use std::time::Duration;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
  let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
  move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_when_nothing_is_set() {
  let config = ClientConfig::from_lookup(lookup(&[])).expect("config");
  assert_eq!(config, ClientConfig::default());
  let policy = config.submission_policy();
  assert_eq!(policy.timeout, Duration::from_secs(15));
  assert_eq!(policy.max_retries, 1);
  assert_eq!(config.poll_interval(), Duration::from_secs(1));
}

#[test]
fn values_are_read_from_lookup() {
  let config = ClientConfig::from_lookup(lookup(&[(ENV_URL, "http://hub.local:9000"),
                                                  (ENV_TIMEOUT_MS, "2500"),
                                                  (ENV_MAX_RETRIES, "0"),
                                                  (ENV_PLAN, " Classic "),
                                                  (ENV_MOCK, "true")])).expect("config");
  assert_eq!(config.base_url, "http://hub.local:9000");
  assert_eq!(config.timeout_ms, 2500);
  assert_eq!(config.max_retries, 0);
  assert_eq!(config.plan, "classic");
  assert!(config.mock);
}

#[test]
fn invalid_numbers_are_config_errors() {
  let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "soon")])).unwrap_err();
  assert!(matches!(err, ClientError::Config(ref m) if m.contains(ENV_TIMEOUT_MS)));

  let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "0")])).unwrap_err();
  assert!(matches!(err, ClientError::Config(_)));

  let err = ClientConfig::from_lookup(lookup(&[(ENV_MOCK, "maybe")])).unwrap_err();
  assert!(matches!(err, ClientError::Config(_)));
}
