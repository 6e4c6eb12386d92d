use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::routing::post;
use axum::{Json, Router};

use crate::dto::rank::{RankOutcome, RankRequest};
use crate::http::extractor::GameAuth;
use crate::http::{ApiContext, Error, Result};
use crate::logic::rank::RanksHandler;

pub fn router() -> Router {
    Router::new().route("/rank", post(set_rank))
}

#[derive(serde::Serialize)]
struct RankBody {
    ok: bool,
    #[serde(flatten)]
    outcome: RankOutcome,
}

// `GameAuth` comes before the body so an unauthenticated caller learns nothing
// about the request shape.
async fn set_rank(
    ctx: Extension<ApiContext>,
    _auth: GameAuth,
    body: std::result::Result<Json<RankRequest>, JsonRejection>,
) -> Result<Json<RankBody>> {
    let Json(req) = body.map_err(|rejection| {
        log::debug!("[set_rank] unreadable body: {rejection}");
        Error::BadRequest(format!("invalid request body: {}", rejection.body_text()))
    })?;

    let assignment = req.validate()?;
    let outcome = ctx.ranks.set_user_role(assignment).await?;

    Ok(Json(RankBody { ok: true, outcome }))
}
