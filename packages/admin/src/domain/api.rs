//! Admin API trait 定義
//!
//! The console depends on this interface; the HTTP implementation lives in
//! the infrastructure layer.

use async_trait::async_trait;

use crate::error::AdminError;

use super::entity::{AdminMessage, BlacklistEntry, ChatConfig, ChatUserRecord, SensitiveWord};

/// Request/response calls against the chat server's admin endpoints.
///
/// Mutations return once the server acknowledges; callers reload the
/// affected collection themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn get_config(&self) -> Result<ChatConfig, AdminError>;

    /// Submit the full configuration object
    async fn save_config(&self, config: &ChatConfig) -> Result<(), AdminError>;

    async fn list_sensitive_words(&self) -> Result<Vec<SensitiveWord>, AdminError>;

    async fn add_sensitive_word(&self, word: &str) -> Result<(), AdminError>;

    async fn delete_sensitive_word(&self, id: &str) -> Result<(), AdminError>;

    async fn list_blacklist(&self) -> Result<Vec<BlacklistEntry>, AdminError>;

    /// Blacklist a chat user
    async fn promote_user(&self, user_id: &str, reason: &str) -> Result<(), AdminError>;

    async fn delete_blacklist_entry(&self, id: &str) -> Result<(), AdminError>;

    async fn list_messages(&self) -> Result<Vec<AdminMessage>, AdminError>;

    async fn delete_message(&self, id: &str) -> Result<(), AdminError>;

    async fn list_users(&self) -> Result<Vec<ChatUserRecord>, AdminError>;
}
