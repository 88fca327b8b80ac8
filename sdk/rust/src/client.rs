use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinRequest {
    pub email: String,
    pub company: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("gateway returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Client-side email check: one `@`, a dotted domain part, no whitespace.
///
/// Length is left to the gateway.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub struct WaitlistClient {
    client: Client,
    endpoint: String,
}

impl WaitlistClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Post one signup to the gateway.
    ///
    /// Any 2xx status counts as joined. The body is returned when it parses
    /// as a [`JoinResponse`] and ignored otherwise.
    pub async fn join(
        &self,
        email: &str,
        company: &str,
    ) -> Result<Option<JoinResponse>, ClientError> {
        let req = JoinRequest {
            email: email.to_string(),
            company: company.to_string(),
        };

        let resp = self.client.post(&self.endpoint).json(&req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        Ok(resp.json::<JoinResponse>().await.ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one connection with a fixed raw HTTP response.
    async fn one_shot_server(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}/submit")
    }

    #[tokio::test]
    async fn success_status_with_unexpected_body_is_joined() {
        let url = one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
        )
        .await;

        let joined = WaitlistClient::new(&url).join("a@b.co", "").await.unwrap();
        assert!(joined.is_none());
    }

    #[tokio::test]
    async fn success_body_is_returned_when_it_parses() {
        let url = one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 57\r\nConnection: close\r\n\r\n{\"success\":true,\"message\":\"Successfully joined waitlist\"}",
        )
        .await;

        let joined = WaitlistClient::new(&url).join("a@b.co", "").await.unwrap();
        assert_eq!(joined.unwrap().message, "Successfully joined waitlist");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let url = one_shot_server(
            "HTTP/1.1 429 Too Many Requests\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let err = WaitlistClient::new(&url).join("a@b.co", "").await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status, .. } if status == StatusCode::TOO_MANY_REQUESTS));
    }

    #[test]
    fn accepts_simple_address() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("first.last@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("@b.co"));
        assert!(!validate_email("a@.co"));
        assert!(!validate_email("a@b."));
        assert!(!validate_email("a@b@c.co"));
        assert!(!validate_email("a b@c.co"));
    }
}
