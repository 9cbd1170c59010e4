use serde::Deserialize;

use crate::mailgun::api;
use crate::Error;

pub const DEFAULT_PATH: &str = "/etc/mailgun-relay/mailgun.toml";
const ENV_PREFIX: &str = "MAILGUN";

/// Settings for a `Mailer`. Read-only once the mailer is built.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub verified_sending_domain: String,

    /// May be blank; operations that need it will refuse to send
    pub default_sender: String,
    pub default_sender_display: String,

    /// Base of the messages endpoint, e.g. `https://api.eu.mailgun.net/v3`
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            verified_sending_domain: String::new(),
            default_sender: String::new(),
            default_sender_display: String::new(),
            api_base: api::MAILGUN_BASE_API.to_string(),
        }
    }
}

impl Config {
    pub fn new(api_key: &str, verified_sending_domain: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            verified_sending_domain: verified_sending_domain.to_string(),
            ..Default::default()
        }
    }

    pub fn with_default_sender(mut self, address: &str, display: &str) -> Self {
        self.default_sender = address.to_string();
        self.default_sender_display = display.to_string();
        self
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.to_string();
        self
    }

    /// Loads config from the filesystem and merges it with any
    /// environment variables prefixed with MAILGUN_.
    ///
    /// A missing file is not an error; environment variables alone are
    /// enough to configure a mailer.
    pub fn load(path: Option<&str>) -> Result<Self, Error> {
        let path = path.unwrap_or(DEFAULT_PATH);

        log::debug!("Loading config from {}", path);

        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize::<Self>()?)
    }

    /// Full URL of the messages endpoint for the verified sending domain
    pub fn messages_url(&self) -> Result<url::Url, Error> {
        if self.verified_sending_domain.trim().is_empty() {
            return Err(Error::Configuration(
                "missing verified sending domain".to_string(),
            ));
        }

        api::build_messages_url(&self.api_base, self.verified_sending_domain.trim())
    }

    pub(crate) fn has_default_sender(&self) -> bool {
        !self.default_sender.trim().is_empty()
    }
}
