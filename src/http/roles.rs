use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query};
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::id::ResourceId;
use crate::dto::role::GroupRole;
use crate::http::{ApiContext, Error, Result};
use crate::logic::roles::RolesHandler;

pub fn router() -> Router {
    // Not gated by the shared secret, unlike `/rank`.
    Router::new().route("/roles", get(list_roles))
}

#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct RolesQuery {
    #[serde(rename = "groupId")]
    group_id: Option<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct RolesBody {
    ok: bool,
    group_id: ResourceId,
    roles: Vec<GroupRole>,
}

async fn list_roles(
    ctx: Extension<ApiContext>,
    query: std::result::Result<Query<RolesQuery>, QueryRejection>,
) -> Result<Json<RolesBody>> {
    let Query(query) = query.map_err(|rejection| {
        log::debug!("[list_roles] unreadable query: {rejection}");
        Error::BadRequest(format!("invalid query string: {}", rejection.body_text()))
    })?;

    let group_id = query
        .group_id
        .filter(|id| !id.is_empty())
        .map(ResourceId::Text)
        .ok_or_else(|| Error::BadRequest("Missing groupId.".to_owned()))?;

    let roles = ctx.roles.list_roles(&group_id).await?;

    Ok(Json(RolesBody {
        ok: true,
        group_id,
        roles,
    }))
}
