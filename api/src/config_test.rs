use super::*;

#[test]
fn default_points_at_local_backend() {
    assert_eq!(ApiConfig::default().base_url(), "http://localhost:8080");
}

#[test]
fn new_trims_whitespace_and_trailing_slashes() {
    let config = ApiConfig::new("  https://api.nearline.dev//  ").unwrap();
    assert_eq!(config.base_url(), "https://api.nearline.dev");
}

#[test]
fn new_rejects_empty_url() {
    assert_eq!(ApiConfig::new("  / "), Err(ConfigError::EmptyBaseUrl));
}

#[test]
fn new_rejects_non_http_scheme() {
    assert_eq!(
        ApiConfig::new("ftp://example.com"),
        Err(ConfigError::InvalidBaseUrl("ftp://example.com".to_owned()))
    );
}

#[test]
fn url_joins_with_single_slash() {
    let config = ApiConfig::new("http://127.0.0.1:8080/").unwrap();
    assert_eq!(config.url("/exams"), "http://127.0.0.1:8080/exams");
    assert_eq!(config.url("users/me"), "http://127.0.0.1:8080/users/me");
}

// Env manipulation requires unsafe in edition 2024; this is the only test
// touching NEARLINE_API_URL.
#[test]
fn from_env_reads_and_falls_back() {
    unsafe { std::env::remove_var(API_URL_ENV) };
    assert_eq!(ApiConfig::from_env(), Ok(ApiConfig::default()));

    unsafe { std::env::set_var(API_URL_ENV, "https://exam.example.com/") };
    assert_eq!(ApiConfig::from_env().unwrap().base_url(), "https://exam.example.com");

    unsafe { std::env::set_var(API_URL_ENV, "exam.example.com") };
    assert!(ApiConfig::from_env().is_err());

    unsafe { std::env::remove_var(API_URL_ENV) };
}
