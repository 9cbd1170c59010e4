use std::path::PathBuf;

use mailgun_relay::mailgun::Transport;
use mailgun_relay::{Attachments, Config, EmailRequest, Mailer};

const PROBE_SUBJECT: &str = "mailgun-relay probe";
const PROBE_MESSAGE: &str = "<p>mailgun-relay probe message</p>";

/// A one-off send of a local file, used to check a Mailgun setup by hand.
#[derive(Debug)]
pub struct Probe {
    pub file: PathBuf,
    pub sender: String,
    pub sender_display: String,
    pub to: Vec<String>,
    pub bcc: Vec<String>,
}

impl Probe {
    fn request(&self) -> Result<EmailRequest, Box<dyn std::error::Error>> {
        let data = std::fs::read(&self.file)?;
        let name = self
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or("probe file has no file name")?;

        let mut attachments = Attachments::new();
        attachments.insert(name, data);

        Ok(EmailRequest {
            sender: self.sender.clone(),
            sender_display: self.sender_display.clone(),
            recipients: self.to.clone(),
            bcc: if self.bcc.is_empty() {
                None
            } else {
                Some(self.bcc.clone())
            },
            subject: PROBE_SUBJECT.to_string(),
            body: PROBE_MESSAGE.to_string(),
            is_html: true,
            attachments: Some(attachments),
        })
    }
}

/// Best effort: every failure is logged and dropped, never returned.
pub fn run<T: Transport>(mailer: &Mailer<T>, probe: &Probe) {
    let result = probe
        .request()
        .and_then(|email| mailer.send_email(email).map_err(|e| e.into()));

    match result {
        Ok(resp) => log::info!("Probe sent: {}", resp),
        Err(e) => log::error!("Probe failed: {}", e),
    }
}

/// Load the config and build a mailer, then `run`. Setup failures are
/// logged and dropped like send failures.
pub fn run_from_config(config_path: Option<&str>, probe: &Probe) {
    let mailer = Config::load(config_path).and_then(Mailer::new);

    match mailer {
        Ok(mailer) => run(&mailer, probe),
        Err(e) => log::error!("Probe failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailgun_relay::mailgun::{Field, FieldMap};
    use mailgun_relay::Error;
    use std::cell::RefCell;
    use std::io::Write;

    #[derive(Default)]
    struct RecordingTransport {
        sent: RefCell<Vec<FieldMap>>,
        fail: bool,
    }

    impl Transport for RecordingTransport {
        fn post(&self, _url: &url::Url, _api_key: Option<&str>, fields: FieldMap)
            -> Result<String, Error> {
            self.sent.borrow_mut().push(fields);

            if self.fail {
                Err(Error::Transport("connection refused".to_string()))
            } else {
                Ok("{}".to_string())
            }
        }
    }

    fn probe(file: PathBuf) -> Probe {
        Probe {
            file,
            sender: "probe@x.com".to_string(),
            sender_display: "Probe".to_string(),
            to: vec!["a@x.com".to_string()],
            bcc: vec!["d@x.com".to_string()],
        }
    }

    fn mailer(transport: RecordingTransport) -> Mailer<RecordingTransport> {
        Mailer::with_transport(Config::new("k3y", "mg.example.com"), transport)
    }

    #[test]
    fn sends_file_as_attachment() {
        let path = std::env::temp_dir().join("mailgun_relay_probe.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"probe contents").unwrap();
        drop(file);

        let mailer = mailer(RecordingTransport::default());
        run(&mailer, &probe(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let sent = mailer.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text("from"), Some("Probe <probe@x.com>"));
        assert_eq!(sent[0].text("bcc"), Some("d@x.com"));

        let mut expected = Attachments::new();
        expected.insert("mailgun_relay_probe.txt".to_string(), b"probe contents".to_vec());
        assert_eq!(sent[0].get("attachment"), Some(&Field::Attachments(expected)));
    }

    #[test]
    fn missing_file_is_swallowed() {
        let mailer = mailer(RecordingTransport::default());
        run(&mailer, &probe(PathBuf::from("/nonexistent/probe.pdf")));

        assert!(mailer.transport().sent.borrow().is_empty());
    }

    #[test]
    fn transport_failure_is_swallowed() {
        let path = std::env::temp_dir().join("mailgun_relay_probe_fail.txt");
        std::fs::write(&path, b"probe").unwrap();

        let mailer = mailer(RecordingTransport {
            fail: true,
            ..Default::default()
        });
        run(&mailer, &probe(path.clone()));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(mailer.transport().sent.borrow().len(), 1);
    }

    #[test]
    fn broken_config_is_swallowed() {
        let path = std::env::temp_dir().join("mailgun_relay_broken_config.toml");
        std::fs::write(&path, "api_key = [unterminated\n").unwrap();

        run_from_config(path.to_str(), &probe(PathBuf::from("/nonexistent/probe.pdf")));
        std::fs::remove_file(&path).unwrap();
    }
}
