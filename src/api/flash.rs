//! One-shot status messages carried in the session.
//!
//! Handlers queue a message before redirecting; the next rendered page drains
//! the queue, so each message is shown exactly once.

use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use crate::constants::session::FLASH_KEY;

pub const ITEM_CREATED: &str = "Item created.";
pub const ITEM_UPDATED: &str = "Item updated.";
pub const ITEM_DELETED: &str = "Item deleted.";
pub const SETTINGS_UPDATED: &str = "Settings updated.";
pub const INVALID_INPUT: &str = "Invalid input.";
pub const LOGIN_SUCCESS: &str = "Login success.";
pub const LOGIN_FAILED: &str = "Invalid username or password.";
pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";
pub const GOODBYE: &str = "Goodbye.";

/// Appends a message to the session's queue.
pub async fn push(session: &Session, message: impl Into<String>) -> Result<(), SessionError> {
    let mut queue: Vec<String> = session.get(FLASH_KEY).await?.unwrap_or_default();
    queue.push(message.into());
    session.insert(FLASH_KEY, queue).await
}

/// Removes and returns every queued message, oldest first.
pub async fn take(session: &Session) -> Result<Vec<String>, SessionError> {
    Ok(session
        .remove::<Vec<String>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn messages_are_drained_once_in_order() {
        let session = session();

        push(&session, ITEM_CREATED).await.unwrap();
        push(&session, INVALID_INPUT).await.unwrap();

        assert_eq!(
            take(&session).await.unwrap(),
            vec![ITEM_CREATED.to_string(), INVALID_INPUT.to_string()]
        );
        assert!(take(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_queue_is_empty() {
        assert!(take(&session()).await.unwrap().is_empty());
    }
}
