use std::error;
use std::fmt;

/// All possible mailgun-relay errors.
///
/// Provider-side failures (non-2xx responses) are not represented here: the
/// response body is handed back to the caller as-is.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A required identity or endpoint setting is missing or unusable
    Configuration(String),
    /// The request itself is malformed (e.g., no recipients)
    InvalidRequest(String),
    /// The configuration source could not be loaded
    Config(String),
    Transport(String),
    RequestTimeout,
}

impl Error {
    /// True if the outbound request could not be completed
    pub fn is_transport(&self) -> bool {
        match *self {
            Error::Transport(_) | Error::RequestTimeout => true,
            _ => false,
        }
    }

    pub fn is_configuration(&self) -> bool {
        match *self {
            Error::Configuration(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Configuration(ref msg) => write!(f, "Configuration: {}", msg),
            Error::InvalidRequest(ref msg) => write!(f, "InvalidRequest: {}", msg),
            Error::Config(ref msg) => write!(f, "Config: {}", msg),
            Error::Transport(ref msg) => write!(f, "Transport: {}", msg),
            Error::RequestTimeout => f.write_str("RequestTimeout"),
        }
    }
}

impl error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::RequestTimeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Configuration(format!("invalid endpoint URL: {}", err))
    }
}

impl From<::config::ConfigError> for Error {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_kinds() {
        assert!(Error::Transport("connection refused".to_string()).is_transport());
        assert!(Error::RequestTimeout.is_transport());
        assert!(!Error::Configuration("missing default sender".to_string()).is_transport());
    }

    #[test]
    fn display() {
        let err = Error::Configuration("missing default sender".to_string());
        assert_eq!(err.to_string(), "Configuration: missing default sender");
    }

    #[test]
    fn parse_error_is_configuration() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.is_configuration());
    }
}
