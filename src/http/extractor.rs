use async_trait::async_trait;
use axum::extract::{Extension, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::http::error::Error;
use crate::http::ApiContext;

/// Header game servers put the shared secret in.
pub const GAME_AUTH_HEADER: &str = "x-game-auth";

/// Proof that the request carried the configured shared secret.
///
/// Add this as a parameter to a handler function to require the secret; the
/// request is rejected with `401 Unauthorized` before any other extractor or
/// upstream call runs.
#[derive(Debug, Clone, Copy)]
pub struct GameAuth;

impl GameAuth {
    fn from_headers(ctx: &ApiContext, headers: &HeaderMap) -> Result<Self, Error> {
        let presented = headers
            .get(GAME_AUTH_HEADER)
            .and_then(|value| value.to_str().ok());

        match presented {
            Some(secret) if secret == ctx.config.game_shared_secret => Ok(GameAuth),
            Some(_) => {
                log::warn!("rejecting request with wrong {GAME_AUTH_HEADER}");
                Err(Error::Unauthorized)
            }
            None => {
                log::debug!("rejecting request without {GAME_AUTH_HEADER}");
                Err(Error::Unauthorized)
            }
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for GameAuth
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = Extension::<ApiContext>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::Anyhow(anyhow::anyhow!("ApiContext missing from request: {e}")))?;

        Self::from_headers(&ctx, &parts.headers)
    }
}
