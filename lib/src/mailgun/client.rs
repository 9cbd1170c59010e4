use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::header::AUTHORIZATION;

use super::api;
use super::types::{attachment_content_type, Field, FieldMap};

use crate::Error;

/// Sends an encoded message to the provider and hands back the raw response
/// body.
pub trait Transport {
    fn post(&self, url: &url::Url, api_key: Option<&str>, fields: FieldMap)
        -> Result<String, Error>;
}

/// Blocking multipart transport for the Mailgun messages API
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(api::MAILGUN_REQUEST_TIMEOUT))
            .build()?;

        Ok(Self { client })
    }
}

/// Encode fields as multipart parts. Attachments become one `attachment`
/// part each, carrying the filename and an inferred content type.
pub(crate) fn build_form(fields: FieldMap) -> Result<Form, Error> {
    let mut form = Form::new();

    for field in fields {
        let name = field.name();

        match field {
            Field::Attachments(attachments) => {
                for (filename, data) in attachments {
                    let content_type = attachment_content_type(&filename);

                    log::debug!(
                        "Attachment part: {}, {}, {} bytes",
                        filename,
                        content_type,
                        data.len()
                    );

                    let part = Part::bytes(data)
                        .file_name(filename)
                        .mime_str(&content_type)?;

                    form = form.part(name, part);
                }
            }
            Field::From(value)
            | Field::To(value)
            | Field::Bcc(value)
            | Field::Subject(value)
            | Field::Html(value)
            | Field::Text(value) => {
                form = form.text(name, value);
            }
        }
    }

    Ok(form)
}

impl Transport for HttpTransport {
    fn post(
        &self,
        url: &url::Url,
        api_key: Option<&str>,
        mut fields: FieldMap,
    ) -> Result<String, Error> {
        fields.ensure_body();

        let form = build_form(fields)?;
        let token = api::basic_auth_token(api::MAILGUN_ACCOUNT, api_key);

        let resp = self
            .client
            .post(url.clone())
            .header(AUTHORIZATION, format!("Basic {}", token))
            .multipart(form)
            .send()?;

        let status = resp.status();

        // Provider errors are returned to the caller as data
        let body = resp.text()?;

        if !status.is_success() {
            log::warn!("Mailgun returned {}: {}", status, body);
        }

        Ok(body)
    }
}

