//! Transactional email through the Mailgun messages API.
//!
//! ```no_run
//! use mailgun_relay::{Config, Mailer};
//!
//! # fn main() -> Result<(), mailgun_relay::Error> {
//! let config = Config::load(None)?;
//! let mailer = Mailer::new(config)?;
//!
//! let resp = mailer.send_simple(true, "someone@example.com", "Hello", "<p>Hi!</p>")?;
//! println!("{}", resp);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod email;
mod error;
pub mod mailer;
pub mod mailgun;

pub use config::Config;
pub use email::EmailRequest;
pub use error::Error;
pub use mailer::Mailer;
pub use mailgun::{Attachments, ProviderResponse};
