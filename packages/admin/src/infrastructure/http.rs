//! reqwest を使った AdminApi 実装
//!
//! Endpoints live under `<base>/admin/api/chat/`. The server keeps admin routes
//! behind its login session, so an optional `Cookie` header is forwarded
//! verbatim on every request. Redirects are not followed: the server answers
//! a missing or expired session with a redirect to its login page.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url, header, redirect};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    domain::{AdminApi, AdminMessage, BlacklistEntry, ChatConfig, ChatUserRecord, SensitiveWord},
    error::AdminError,
};

#[derive(Debug, Serialize)]
struct NewSensitiveWord<'a> {
    word: &'a str,
}

#[derive(Debug, Serialize)]
struct PromoteRequest<'a> {
    user_id: &'a str,
    reason: &'a str,
}

/// Reported when the server redirects to its login page
pub const LOGIN_REQUIRED_TEXT: &str = "Login required";

/// `{"error": "..."}` body of a rejected request
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct HttpAdminApi {
    client: reqwest::Client,
    base_url: Url,
    cookie: Option<String>,
}

impl HttpAdminApi {
    /// # Arguments
    ///
    /// * `base_url` - Chat server base URL (e.g. `http://127.0.0.1:5000`)
    /// * `cookie` - Session cookie forwarded as the `Cookie` header
    pub fn new(base_url: &str, cookie: Option<String>) -> Result<Self, AdminError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AdminError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            base_url,
            cookie,
        })
    }

    /// Endpoint URL under `admin/api/chat/`; each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, AdminError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AdminError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["admin", "api", "chat"])
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, AdminError> {
        let builder = self.client.request(method, self.endpoint(segments)?);
        Ok(match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str) -> Result<T, AdminError> {
        let response = self.request(Method::GET, &[resource])?.send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Send a mutation and wait for the acknowledgement. The ack body is ignored.
    async fn acknowledge(&self, builder: RequestBuilder) -> Result<(), AdminError> {
        let response = builder.send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn an error status into [`AdminError::Rejected`] with the server's text.
async fn check_status(response: Response) -> Result<Response, AdminError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status.is_redirection() {
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        tracing::warn!("Admin request redirected with {} to '{}'", status, location);
        return Err(AdminError::rejected(status.as_u16(), LOGIN_REQUIRED_TEXT));
    }
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(error) => error.error,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    tracing::warn!("Admin request rejected with {}: {}", status, message);
    Err(AdminError::rejected(status.as_u16(), message))
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn get_config(&self) -> Result<ChatConfig, AdminError> {
        self.fetch("config").await
    }

    async fn save_config(&self, config: &ChatConfig) -> Result<(), AdminError> {
        self.acknowledge(self.request(Method::POST, &["config"])?.json(config))
            .await
    }

    async fn list_sensitive_words(&self) -> Result<Vec<SensitiveWord>, AdminError> {
        self.fetch("sensitive").await
    }

    async fn add_sensitive_word(&self, word: &str) -> Result<(), AdminError> {
        self.acknowledge(
            self.request(Method::POST, &["sensitive"])?
                .json(&NewSensitiveWord { word }),
        )
        .await
    }

    async fn delete_sensitive_word(&self, id: &str) -> Result<(), AdminError> {
        self.acknowledge(self.request(Method::DELETE, &["sensitive", id])?)
            .await
    }

    async fn list_blacklist(&self) -> Result<Vec<BlacklistEntry>, AdminError> {
        self.fetch("blacklist").await
    }

    async fn promote_user(&self, user_id: &str, reason: &str) -> Result<(), AdminError> {
        self.acknowledge(
            self.request(Method::POST, &["blacklist"])?
                .json(&PromoteRequest { user_id, reason }),
        )
        .await
    }

    async fn delete_blacklist_entry(&self, id: &str) -> Result<(), AdminError> {
        self.acknowledge(self.request(Method::DELETE, &["blacklist", id])?)
            .await
    }

    async fn list_messages(&self) -> Result<Vec<AdminMessage>, AdminError> {
        self.fetch("messages").await
    }

    async fn delete_message(&self, id: &str) -> Result<(), AdminError> {
        self.acknowledge(self.request(Method::DELETE, &["messages", id])?)
            .await
    }

    async fn list_users(&self) -> Result<Vec<ChatUserRecord>, AdminError> {
        self.fetch("users").await
    }
}
