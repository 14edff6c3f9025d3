use serde_json::Value;
use thiserror::Error;

use crate::form::user::SignupFormData;

pub const SIGNUP_PATH: &str = "/api/auth/signup";

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Status and raw body of a signup response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl SignupResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `message` field of a JSON body, if it holds something worth showing.
    ///
    /// Strings are shown as-is, numbers and `true` in their JSON form. Empty
    /// strings, zero, `false`, `null`, objects and arrays count as absent.
    pub fn message(&self) -> Option<String> {
        let body = serde_json::from_slice::<Value>(&self.body).ok()?;

        match body.get("message")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

/// Delivers a signup payload to the endpoint.
#[allow(async_fn_in_trait)]
pub trait SignupTransport {
    async fn send(&self, form: &SignupFormData) -> Result<SignupResponse, TransportError>;
}

/// Posts signups to a live server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let endpoint = reqwest::Url::parse(base_url)
            .and_then(|base| base.join(SIGNUP_PATH))
            .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

impl SignupTransport for HttpTransport {
    async fn send(&self, form: &SignupFormData) -> Result<SignupResponse, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TransportError::Connection(e.to_string())
                } else {
                    TransportError::Http(e)
                }
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(SignupResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_joined_onto_the_base_url() {
        let transport = HttpTransport::new("http://127.0.0.1:5000").unwrap();
        assert_eq!(
            transport.endpoint().as_str(),
            "http://127.0.0.1:5000/api/auth/signup"
        );

        let transport = HttpTransport::new("https://cursus.example/app/").unwrap();
        assert_eq!(
            transport.endpoint().as_str(),
            "https://cursus.example/api/auth/signup"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(
            HttpTransport::new("not a url"),
            Err(TransportError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn success_covers_the_2xx_range() {
        assert!(SignupResponse::new(200, "").is_success());
        assert!(SignupResponse::new(201, "").is_success());
        assert!(!SignupResponse::new(302, "").is_success());
        assert!(!SignupResponse::new(409, "").is_success());
    }

    #[test]
    fn extracts_message_only_from_json_bodies() {
        assert_eq!(
            SignupResponse::new(409, r#"{"message":"Email taken"}"#).message(),
            Some("Email taken".to_string())
        );
        assert_eq!(SignupResponse::new(400, "").message(), None);
        assert_eq!(SignupResponse::new(500, "<html>oops</html>").message(), None);
        assert_eq!(SignupResponse::new(400, r#"{"error":"x"}"#).message(), None);
        assert_eq!(SignupResponse::new(400, r#"{"message":""}"#).message(), None);
    }

    #[test]
    fn shows_non_string_messages() {
        assert_eq!(
            SignupResponse::new(400, r#"{"message":42}"#).message(),
            Some("42".to_string())
        );
        assert_eq!(
            SignupResponse::new(400, r#"{"message":true}"#).message(),
            Some("true".to_string())
        );
        assert_eq!(SignupResponse::new(400, r#"{"message":0}"#).message(), None);
        assert_eq!(SignupResponse::new(400, r#"{"message":null}"#).message(), None);
        assert_eq!(SignupResponse::new(400, r#"{"message":{"a":1}}"#).message(), None);
        assert_eq!(SignupResponse::new(400, "[1,2]").message(), None);
    }
}
