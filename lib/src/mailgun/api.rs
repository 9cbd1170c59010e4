use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::Error;

pub const MAILGUN_BASE_API: &str = "https://api.eu.mailgun.net/v3";

/// Mailgun only accepts this user name for API key authentication
pub const MAILGUN_ACCOUNT: &str = "api";

// Request timeout, in seconds
pub(crate) const MAILGUN_REQUEST_TIMEOUT: u64 = 30;

/// Multipart part names
pub const FIELD_FROM: &str = "from";
pub const FIELD_TO: &str = "to";
pub const FIELD_BCC: &str = "bcc";
pub const FIELD_SUBJECT: &str = "subject";
pub const FIELD_HTML: &str = "html";
pub const FIELD_TEXT: &str = "text";
pub const FIELD_ATTACHMENT: &str = "attachment";

#[inline]
pub fn build_messages_url(base: &str, domain: &str) -> Result<url::Url, Error> {
    let url = format!("{}/{}/messages", base.trim_end_matches('/'), domain);
    Ok(url::Url::parse(&url)?)
}

/// Base64 token for `Authorization: Basic <token>`.
///
/// An absent key is sent as an empty password.
pub fn basic_auth_token(account: &str, api_key: Option<&str>) -> String {
    let credentials = format!("{}:{}", account, api_key.unwrap_or(""));
    STANDARD.encode(credentials.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_with_key() {
        assert_eq!(basic_auth_token(MAILGUN_ACCOUNT, Some("k3y")), STANDARD.encode("api:k3y"));
        assert_eq!(basic_auth_token(MAILGUN_ACCOUNT, Some("k3y")), "YXBpOmszeQ==");
    }

    #[test]
    fn token_without_key() {
        assert_eq!(basic_auth_token(MAILGUN_ACCOUNT, None), "YXBpOg==");
        assert_ne!(basic_auth_token(MAILGUN_ACCOUNT, None), STANDARD.encode("api:null"));
    }

    #[test]
    fn messages_url() {
        let url = build_messages_url("http://127.0.0.1:8080/v3/", "mg.example.com").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v3/mg.example.com/messages");
    }
}
