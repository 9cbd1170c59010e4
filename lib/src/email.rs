use crate::mailgun::{Attachments, Field, FieldMap};

/// One outgoing message, before it is mapped onto Mailgun fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmailRequest {
    pub sender: String,

    /// Display name shown alongside the sender address, if any
    pub sender_display: String,

    pub recipients: Vec<String>,

    /// An empty list sends no `bcc` field at all
    pub bcc: Option<Vec<String>>,
    pub subject: String,
    pub body: String,

    /// Body goes out as `html` if set, `text` otherwise
    pub is_html: bool,

    pub attachments: Option<Attachments>,
}

impl EmailRequest {
    pub fn new() -> Self {
        Default::default()
    }

    /// `"Display <address>"`, or the bare address without a display name
    pub fn from_field(&self) -> String {
        if self.sender_display.trim().is_empty() {
            self.sender.clone()
        } else {
            format!("{} <{}>", self.sender_display, self.sender)
        }
    }
}

impl From<EmailRequest> for FieldMap {
    fn from(email: EmailRequest) -> FieldMap {
        let mut fields = FieldMap::new();

        fields.insert(Field::From(email.from_field()));
        fields.insert(Field::To(email.recipients.join(", ")));
        fields.insert(Field::Subject(email.subject));

        if email.is_html {
            fields.insert(Field::Html(email.body));
        } else {
            fields.insert(Field::Text(email.body));
        }

        if let Some(bcc) = email.bcc.filter(|b| !b.is_empty()) {
            fields.insert(Field::Bcc(bcc.join(", ")));
        }

        if let Some(attachments) = email.attachments {
            fields.insert(Field::Attachments(attachments));
        }

        fields
    }
}
