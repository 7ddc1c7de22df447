//! One-shot flash messages stored in the session.
//!
//! Handlers push a message before redirecting. The next page that renders
//! takes the queue, which empties it.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::models::{Flash, session_keys};

/// Queue a flash message for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn push_flash(
    session: &Session,
    flash: Flash,
) -> Result<(), tower_sessions::session::Error> {
    let mut queued: Vec<Flash> = session
        .get(session_keys::FLASHES)
        .await?
        .unwrap_or_default();
    queued.push(flash);
    session.insert(session_keys::FLASHES, queued).await
}

/// Queue a flash message, logging instead of failing if the session is broken.
///
/// A lost flash is not worth turning a successful POST into an error page.
pub async fn flash(session: &Session, flash: Flash) {
    if let Err(e) = push_flash(session, flash).await {
        tracing::warn!(error = %e, "failed to store flash message");
    }
}

/// Take (and clear) the pending flash messages.
///
/// For handlers that only render on some branches, so a redirect doesn't
/// swallow the queue.
pub async fn take_flashes(session: &Session) -> Vec<Flash> {
    session
        .remove::<Vec<Flash>>(session_keys::FLASHES)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read flash messages");
            None
        })
        .unwrap_or_default()
}

/// Extractor that takes (and clears) the pending flash messages.
#[derive(Debug, Default)]
pub struct Flashes(pub Vec<Flash>);

impl<S> FromRequestParts<S> for Flashes
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flashes = match parts.extensions.get::<Session>() {
            Some(session) => take_flashes(session).await,
            None => Vec::new(),
        };

        Ok(Self(flashes))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_flashes_queue_in_order() {
        let session = session();
        push_flash(&session, Flash::error("Missing data")).await.unwrap();
        push_flash(&session, Flash::success("Shift assigned successfully"))
            .await
            .unwrap();

        let queued: Vec<Flash> = session.get(session_keys::FLASHES).await.unwrap().unwrap();
        assert_eq!(
            queued,
            vec![
                Flash::error("Missing data"),
                Flash::success("Shift assigned successfully"),
            ]
        );
    }

    #[tokio::test]
    async fn test_extractor_drains_queue() {
        let session = session();
        flash(&session, Flash::info("Your cart is empty")).await;

        let mut parts = axum::http::Request::builder()
            .body(())
            .unwrap()
            .into_parts()
            .0;
        parts.extensions.insert(session.clone());

        let Flashes(first) = Flashes::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(first, vec![Flash::info("Your cart is empty")]);

        let Flashes(second) = Flashes::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(second.is_empty());
    }
}
