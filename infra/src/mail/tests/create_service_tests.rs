//! Unit tests for mail service creation

use lh_shared::{MailConfig, MailProvider};

use crate::mail::create_mail_service;

#[test]
fn test_create_mock_service() {
    let service = create_mail_service(&MailConfig::default()).unwrap();
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_create_http_service() {
    let config = MailConfig {
        provider: MailProvider::Http,
        api_url: Some("https://mail.example.com/send".to_string()),
        api_key: Some("key".to_string()),
        ..MailConfig::default()
    };

    let service = create_mail_service(&config).unwrap();
    assert_eq!(service.provider_name(), "HTTP");
}

#[test]
fn test_create_http_service_without_credentials_fails() {
    let config = MailConfig {
        provider: MailProvider::Http,
        ..MailConfig::default()
    };

    assert!(create_mail_service(&config).is_err());
}
