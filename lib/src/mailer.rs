use crate::config::Config;
use crate::email::EmailRequest;
use crate::mailgun::{Attachments, HttpTransport, Transport};
use crate::Error;

const MISSING_DEFAULT_SENDER: &str = "missing default sender";
const MISSING_SENDER: &str = "missing sender and default sender";

/// Sends email through Mailgun on behalf of a configured default sender.
///
/// Every `send_*` variant resolves its sender and recipients, then goes
/// through `send_email`. Each call makes exactly one request and returns the
/// provider's response text, whatever its status.
pub struct Mailer<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl Mailer<HttpTransport> {
    pub fn new(config: Config) -> Result<Self, Error> {
        Ok(Self::with_transport(config, HttpTransport::new()?))
    }
}

impl<T: Transport> Mailer<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send to a single recipient from the default sender, optionally
    /// copying the default sender.
    pub fn send_simple(
        &self,
        copy_to_sender: bool,
        recipient: &str,
        subject: &str,
        message: &str,
    ) -> Result<String, Error> {
        self.send_with_bcc(copy_to_sender, &[recipient], subject, message, None, None)
    }

    /// Send from `sender`, or from the default sender if `sender` is blank.
    ///
    /// The default display name is only used together with the default
    /// address; an explicit sender goes out without a display name.
    pub fn send_from(
        &self,
        sender: &str,
        recipients: &[&str],
        subject: &str,
        message: &str,
    ) -> Result<String, Error> {
        let (sender, sender_display) = if sender.trim().is_empty() {
            if !self.config.has_default_sender() {
                return Err(Error::Configuration(MISSING_SENDER.to_string()));
            }

            (
                self.config.default_sender.clone(),
                self.config.default_sender_display.clone(),
            )
        } else {
            (sender.to_string(), String::new())
        };

        self.send_email(EmailRequest {
            sender,
            sender_display,
            recipients: owned_addresses(recipients),
            subject: subject.to_string(),
            body: message.to_string(),
            is_html: true,
            ..Default::default()
        })
    }

    pub fn send(
        &self,
        copy_to_sender: bool,
        recipients: &[&str],
        subject: &str,
        message: &str,
        attachments: Option<Attachments>,
    ) -> Result<String, Error> {
        self.send_with_bcc(copy_to_sender, recipients, subject, message, attachments, None)
    }

    /// Send from the default sender with optional attachments and bcc.
    ///
    /// `copy_to_sender` appends the default sender to the primary
    /// recipients only, never to `bcc`.
    /// An empty `bcc` list is treated like `None`.
    pub fn send_with_bcc(
        &self,
        copy_to_sender: bool,
        recipients: &[&str],
        subject: &str,
        message: &str,
        attachments: Option<Attachments>,
        bcc: Option<&[&str]>,
    ) -> Result<String, Error> {
        if !self.config.has_default_sender() {
            return Err(Error::Configuration(MISSING_DEFAULT_SENDER.to_string()));
        }

        let mut recipients = owned_addresses(recipients);
        if copy_to_sender {
            recipients.push(self.config.default_sender.clone());
        }

        self.send_email(EmailRequest {
            sender: self.config.default_sender.clone(),
            sender_display: self.config.default_sender_display.clone(),
            recipients,
            bcc: bcc.map(owned_addresses),
            subject: subject.to_string(),
            body: message.to_string(),
            is_html: true,
            attachments,
        })
    }

    /// Map a fully resolved request onto Mailgun fields and post it
    pub fn send_email(&self, email: EmailRequest) -> Result<String, Error> {
        if email.sender.trim().is_empty() {
            return Err(Error::Configuration(MISSING_DEFAULT_SENDER.to_string()));
        }

        if email.recipients.is_empty() {
            return Err(Error::InvalidRequest("no recipients".to_string()));
        }

        let url = self.config.messages_url()?;

        log::info!(
            "Sending \"{}\" from {} to {} recipient(s), {} attachment(s)",
            email.subject,
            email.sender,
            email.recipients.len(),
            email.attachments.as_ref().map_or(0, |a| a.len())
        );

        self.transport
            .post(&url, self.config.api_key.as_deref(), email.into())
    }
}

fn owned_addresses(addresses: &[&str]) -> Vec<String> {
    addresses.iter().map(|a| a.to_string()).collect()
}
