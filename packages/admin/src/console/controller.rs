//! Admin Console controller.
//!
//! Every mutation waits for the server's acknowledgement and then reloads the
//! affected collection in full, so each list on the screen always mirrors the
//! server. There is no optimistic update and no retry.

use crate::{
    domain::{AdminApi, ChatConfig},
    error::AdminError,
};

use super::screen::AdminScreen;

/// Confirmation shown after the configuration is saved.
pub const SAVED_TEXT: &str = "Saved";

pub struct AdminConsole<A: AdminApi> {
    api: A,
    screen: AdminScreen,
}

impl<A: AdminApi> AdminConsole<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            screen: AdminScreen::default(),
        }
    }

    pub fn screen(&self) -> &AdminScreen {
        &self.screen
    }

    // ========================================
    // Loads
    // ========================================

    pub async fn load_config(&mut self) -> Result<(), AdminError> {
        self.screen.config = Some(self.api.get_config().await?);
        Ok(())
    }

    pub async fn load_sensitive_words(&mut self) -> Result<(), AdminError> {
        self.screen.sensitive_words = self.api.list_sensitive_words().await?;
        Ok(())
    }

    pub async fn load_blacklist(&mut self) -> Result<(), AdminError> {
        self.screen.blacklist = self.api.list_blacklist().await?;
        Ok(())
    }

    pub async fn load_messages(&mut self) -> Result<(), AdminError> {
        self.screen.messages = self.api.list_messages().await?;
        Ok(())
    }

    pub async fn load_users(&mut self) -> Result<(), AdminError> {
        self.screen.users = self.api.list_users().await?;
        Ok(())
    }

    /// Initial load of every resource.
    ///
    /// Each resource loads independently; a failure leaves that list as it
    /// was and the first error is returned after all loads ran.
    pub async fn load_all(&mut self) -> Result<(), AdminError> {
        let results = [
            self.load_config().await,
            self.load_sensitive_words().await,
            self.load_blacklist().await,
            self.load_messages().await,
            self.load_users().await,
        ];
        let mut first_error = None;
        for result in results {
            if let Err(e) = result {
                tracing::warn!("Failed to load admin data: {}", e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    // ========================================
    // Mutations
    // ========================================

    /// Submit the full configuration, reload it, and return the confirmation text.
    pub async fn save_config(&mut self, config: ChatConfig) -> Result<&'static str, AdminError> {
        self.api.save_config(&config).await?;
        tracing::info!("Chat configuration saved (status {})", config.status);
        self.load_config().await?;
        Ok(SAVED_TEXT)
    }

    /// Add a sensitive word. A blank word is rejected without a request.
    pub async fn add_sensitive_word(&mut self, word: &str) -> Result<(), AdminError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(AdminError::EmptyField("Sensitive word"));
        }
        self.api.add_sensitive_word(word).await?;
        self.load_sensitive_words().await
    }

    pub async fn delete_sensitive_word(&mut self, id: &str) -> Result<(), AdminError> {
        self.api.delete_sensitive_word(id).await?;
        self.load_sensitive_words().await
    }

    /// Blacklist a user. Both the user list and the blacklist change.
    pub async fn promote_user(&mut self, user_id: &str, reason: &str) -> Result<(), AdminError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AdminError::EmptyField("Reason"));
        }
        self.api.promote_user(user_id, reason).await?;
        tracing::info!("User {} blacklisted", user_id);
        self.load_users().await?;
        self.load_blacklist().await
    }

    pub async fn delete_blacklist_entry(&mut self, id: &str) -> Result<(), AdminError> {
        self.api.delete_blacklist_entry(id).await?;
        self.load_blacklist().await
    }

    pub async fn delete_message(&mut self, id: &str) -> Result<(), AdminError> {
        self.api.delete_message(id).await?;
        self.load_messages().await
    }
}
