use http::Method;
use serde_json::Value;

use crate::{
    cloud::CloudClient,
    dto::{id::ResourceId, role::GroupRole},
    http::{Error, Result, ResultExt},
};

/// Roles are fetched as a single page of this size; roles past it are not seen.
pub const ROLES_PAGE_SIZE: u32 = 100;

pub trait RolesHandler {
    fn list_roles(
        &self,
        group_id: &ResourceId,
    ) -> impl std::future::Future<Output = Result<Vec<GroupRole>, Error>> + Send;

    fn resolve_role_id(
        &self,
        group_id: &ResourceId,
        role_name: &str,
    ) -> impl std::future::Future<Output = Result<u64, Error>> + Send;
}

#[derive(Clone)]
pub struct Handler {
    cloud: CloudClient,
}

impl Handler {
    pub fn new(cloud: CloudClient) -> Self {
        Self { cloud }
    }
}

impl RolesHandler for Handler {
    // Fetches the first page of roles of `group_id`.
    async fn list_roles(&self, group_id: &ResourceId) -> Result<Vec<GroupRole>, Error> {
        let group = group_id.to_string();
        let mut url = self.cloud.endpoint(["groups", group.as_str(), "roles"]);
        url.query_pairs_mut()
            .append_pair("maxPageSize", &ROLES_PAGE_SIZE.to_string());

        let payload = self.cloud.call(Method::GET, url, None).await?;
        parse_roles(payload)
    }

    // Case-insensitive exact match on display name; the first match wins.
    async fn resolve_role_id(&self, group_id: &ResourceId, role_name: &str) -> Result<u64, Error> {
        let roles = self.list_roles(group_id).await?;

        match find_role(&roles, role_name) {
            Some(role) => {
                log::debug!(
                    "[resolve_role_id] {role_name:?} in group {group_id} is role {}",
                    role.id
                );
                Ok(role.id)
            }
            None => Err(Error::RoleNotFound {
                group_id: group_id.to_string(),
                role_name: role_name.to_owned(),
            }),
        }
    }
}

pub fn find_role<'a>(roles: &'a [GroupRole], role_name: &str) -> Option<&'a GroupRole> {
    let wanted = role_name.to_lowercase();
    roles
        .iter()
        .find(|role| role.display_name.to_lowercase() == wanted)
}

/// Accepts `{"groupRoles": [...]}` or a bare list.
fn parse_roles(payload: Value) -> Result<Vec<GroupRole>, Error> {
    let list = match payload {
        Value::Object(mut body) => match body.remove("groupRoles") {
            Some(list @ Value::Array(_)) => list,
            _ => {
                return Err(Error::MalformedResponse(
                    "roles payload has no groupRoles list".to_owned(),
                ))
            }
        },
        list @ Value::Array(_) => list,
        _ => {
            return Err(Error::MalformedResponse(
                "roles payload is not a list".to_owned(),
            ))
        }
    };

    serde_json::from_value(list).or_malformed("unrecognized role entry")
}
