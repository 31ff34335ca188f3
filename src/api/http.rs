//! `reqwest`-backed [`HttpTransport`].

use super::transport::{HttpRequest, HttpResponse, HttpTransport, Method, RequestBody};
use crate::domain::{MenuhubError, Result};
use crate::form::{FieldValue, TransferPayload};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport identifying itself as `user_agent`.
    ///
    /// # Errors
    ///
    /// Returns [`MenuhubError::Config`] if the TLS backend cannot be initialised.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MenuhubError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let RequestBody::Multipart(payload) = request.body {
            builder = builder.multipart(multipart_form(payload)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| MenuhubError::transport(e.status().map(|s| s.as_u16()), e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| MenuhubError::transport(Some(status), format!("failed to read body: {e}")))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

/// Converts a payload into a multipart form, keeping field order.
fn multipart_form(payload: TransferPayload) -> Result<Form> {
    payload
        .into_fields()
        .into_iter()
        .try_fold(Form::new(), |form, (name, value)| match value {
            FieldValue::Text(text) => Ok(form.text(name, text)),
            FieldValue::File(file) => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| {
                        MenuhubError::validation(name.clone(), format!("invalid content type: {e}"))
                    })?;
                Ok(form.part(name, part))
            }
        })
}
