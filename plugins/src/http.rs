//! Error type and response helpers shared by the Sheets and Discord clients.
use serde::de::DeserializeOwned;
use std::{error::Error as StdError, fmt};

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceHttpErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Status,
    Url,
    Unknown,
}

impl ServiceHttpErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Status => "status",
            Self::Url => "url",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ServiceHttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct ServiceHttpError {
    service: &'static str,
    kind: ServiceHttpErrorKind,
    status: Option<u16>,
    url: Option<String>,
    message: String,
    source: Option<anyhow::Error>,
}

impl ServiceHttpError {
    pub fn kind(&self) -> ServiceHttpErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub(crate) fn from_reqwest(service: &'static str, err: reqwest::Error, url: String) -> Self {
        let kind = if err.is_timeout() {
            ServiceHttpErrorKind::Timeout
        } else if err.is_connect() {
            ServiceHttpErrorKind::Connect
        } else if err.is_request() {
            ServiceHttpErrorKind::Request
        } else if err.is_body() {
            ServiceHttpErrorKind::Body
        } else if err.is_decode() {
            ServiceHttpErrorKind::Decode
        } else {
            ServiceHttpErrorKind::Unknown
        };
        let status = err.status().map(|s| s.as_u16());
        let message = err.to_string();
        ServiceHttpError {
            service,
            kind,
            status,
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }

    pub(crate) fn url_error(service: &'static str, base: &str, message: impl Into<String>) -> Self {
        ServiceHttpError {
            service,
            kind: ServiceHttpErrorKind::Url,
            status: None,
            url: Some(base.to_string()),
            message: message.into(),
            source: None,
        }
    }

    fn status_error(service: &'static str, status: u16, url: String, preview: String) -> Self {
        ServiceHttpError {
            service,
            kind: ServiceHttpErrorKind::Status,
            status: Some(status),
            url: Some(url),
            message: preview,
            source: None,
        }
    }

    fn decode_error(
        service: &'static str,
        status: u16,
        url: String,
        err: serde_json::Error,
        preview: String,
    ) -> Self {
        let message = format!("failed to decode response body: {} | body={}", err, preview);
        ServiceHttpError {
            service,
            kind: ServiceHttpErrorKind::Decode,
            status: Some(status),
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }
}

impl fmt::Display for ServiceHttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} http error kind={}", self.service, self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={}", status)?;
        }
        if let Some(url) = &self.url {
            write!(f, " url={}", url)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl StdError for ServiceHttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

/// Read the body, fail on non-2xx, decode JSON into `T`.
pub(crate) async fn parse_json_response<T: DeserializeOwned>(
    service: &'static str,
    resp: reqwest::Response,
) -> anyhow::Result<T> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| ServiceHttpError::from_reqwest(service, err, url.clone()))?;

    if !status.is_success() {
        let preview = preview_body(&body);
        return Err(ServiceHttpError::status_error(service, status.as_u16(), url, preview).into());
    }

    serde_json::from_str::<T>(&body).map_err(|err| {
        let preview = preview_body(&body);
        ServiceHttpError::decode_error(service, status.as_u16(), url, err, preview).into()
    })
}

pub(crate) async fn ensure_success(service: &'static str, resp: reqwest::Response) -> anyhow::Result<()> {
    let status = resp.status();
    let url = resp.url().to_string();

    if status.is_success() {
        return Ok(());
    }

    let body = resp
        .text()
        .await
        .map_err(|err| ServiceHttpError::from_reqwest(service, err, url.clone()))?;
    let preview = preview_body(&body);
    Err(ServiceHttpError::status_error(service, status.as_u16(), url, preview).into())
}
