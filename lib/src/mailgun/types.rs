use std::collections::BTreeMap;

use serde::Deserialize;

use super::api;

/// Attachment filename -> raw content
pub type Attachments = BTreeMap<String, Vec<u8>>;

/// A single field of the Mailgun messages API.
///
/// Every variant except `Attachments` is sent as a text part named after the
/// field. `Attachments` expands to one binary `attachment` part per entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    From(String),
    To(String),
    Bcc(String),
    Subject(String),
    Html(String),
    Text(String),
    Attachments(Attachments),
}

impl Field {
    pub fn name(&self) -> &'static str {
        match *self {
            Field::From(_) => api::FIELD_FROM,
            Field::To(_) => api::FIELD_TO,
            Field::Bcc(_) => api::FIELD_BCC,
            Field::Subject(_) => api::FIELD_SUBJECT,
            Field::Html(_) => api::FIELD_HTML,
            Field::Text(_) => api::FIELD_TEXT,
            Field::Attachments(_) => api::FIELD_ATTACHMENT,
        }
    }

    /// Value of a text field, `None` for attachments
    pub fn as_text(&self) -> Option<&str> {
        match *self {
            Field::From(ref v)
            | Field::To(ref v)
            | Field::Bcc(ref v)
            | Field::Subject(ref v)
            | Field::Html(ref v)
            | Field::Text(ref v) => Some(v),
            Field::Attachments(_) => None,
        }
    }

    fn is_body(&self) -> bool {
        match *self {
            Field::Html(_) | Field::Text(_) => true,
            _ => false,
        }
    }
}

/// The fields of one outgoing message, at most one of each kind, kept in
/// insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldMap {
    fields: Vec<Field>,
}

impl FieldMap {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a field, replacing any existing field of the same kind
    pub fn insert(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name() == field.name()) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Field::as_text)
    }

    pub fn has_body(&self) -> bool {
        self.fields.iter().any(Field::is_body)
    }

    /// Mailgun rejects messages without a body field, so add an empty text
    /// body if neither `html` nor `text` is present.
    pub fn ensure_body(&mut self) {
        if !self.has_body() {
            self.fields.push(Field::Text(String::new()));
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl IntoIterator for FieldMap {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Media type declared on an attachment part, inferred from the filename
pub fn attachment_content_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Success payload returned by Mailgun, e.g.
/// `{"id":"<2024...@mg.example.com>","message":"Queued. Thank you."}`
///
/// Callers receive the raw response text; this is only a convenience view
/// over it.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ProviderResponse {
    pub id: Option<String>,
    pub message: Option<String>,
}

impl ProviderResponse {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_same_kind() {
        let mut fields = FieldMap::new();
        fields.insert(Field::Subject("first".to_string()));
        fields.insert(Field::To("a@x.com".to_string()));
        fields.insert(Field::Subject("second".to_string()));

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.text(api::FIELD_SUBJECT), Some("second"));
    }

    #[test]
    fn ensure_body_adds_empty_text() {
        let mut fields = FieldMap::new();
        assert!(fields.is_empty());

        fields.insert(Field::From("b@x.com".to_string()));
        fields.ensure_body();

        assert_eq!(fields.text(api::FIELD_TEXT), Some(""));
        assert!(fields.get(api::FIELD_HTML).is_none());
    }

    #[test]
    fn ensure_body_keeps_html() {
        let mut fields = FieldMap::new();
        fields.insert(Field::Html("<p>hi</p>".to_string()));
        fields.ensure_body();

        assert_eq!(fields.len(), 1);
        assert!(fields.get(api::FIELD_TEXT).is_none());
    }

    #[test]
    fn attachment_field_name() {
        let field = Field::Attachments(Attachments::new());
        assert_eq!(field.name(), "attachment");
        assert!(field.as_text().is_none());
    }

    #[test]
    fn content_types() {
        assert_eq!(attachment_content_type("file1.pdf"), "application/pdf");
        assert_eq!(attachment_content_type("file2.txt"), "text/plain");
        assert_eq!(attachment_content_type("blob"), "application/octet-stream");
    }

    #[test]
    fn parse_provider_response() {
        let body = r#"{"id":"<20240403180533.9b900b9b62429cc6@mg.example.com>","message":"Queued. Thank you."}"#;
        let resp = ProviderResponse::parse(body).unwrap();

        assert_eq!(resp.message.as_deref(), Some("Queued. Thank you."));
        assert!(ProviderResponse::parse("Forbidden").is_none());
    }
}
