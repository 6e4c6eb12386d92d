use http::Method;

use crate::{
    cloud::CloudClient,
    commons::role_path,
    dto::{
        id::ResourceId,
        rank::{RankOutcome, RoleAssignment, RoleSelector},
    },
    http::{Error, Result},
};

use super::membership::{self, MembershipsHandler};
use super::roles::{self, RolesHandler};

pub trait RanksHandler {
    fn set_user_role(
        &self,
        assignment: RoleAssignment,
    ) -> impl std::future::Future<Output = Result<RankOutcome, Error>> + Send;
}

#[derive(Clone)]
pub struct Handler {
    cloud: CloudClient,
    roles_handler: roles::Handler,
    memberships_handler: membership::Handler,
}

impl Handler {
    pub fn new(
        cloud: CloudClient,
        roles_handler: roles::Handler,
        memberships_handler: membership::Handler,
    ) -> Self {
        Self {
            cloud,
            roles_handler,
            memberships_handler,
        }
    }

    async fn update_membership_role(
        &self,
        group_id: &ResourceId,
        membership_id: &str,
        role_id: &ResourceId,
    ) -> Result<serde_json::Value> {
        let group = group_id.to_string();
        let url = self
            .cloud
            .endpoint(["groups", group.as_str(), "memberships", membership_id]);
        let body = serde_json::json!({ "role": role_path(group_id, role_id) });

        self.cloud.call(Method::PATCH, url, Some(&body)).await
    }
}

impl RanksHandler for Handler {
    // Resolves the role (unless given by id), finds the user's membership and
    // patches it. Any failure stops the sequence before the PATCH is sent.
    async fn set_user_role(&self, assignment: RoleAssignment) -> Result<RankOutcome, Error> {
        let RoleAssignment {
            group_id,
            user_id,
            role,
        } = assignment;

        let role_id = match role {
            RoleSelector::Id(id) => id,
            RoleSelector::Name(name) => ResourceId::Number(
                self.roles_handler.resolve_role_id(&group_id, &name).await?,
            ),
        };

        let membership_id = self
            .memberships_handler
            .find_membership_id(&group_id, &user_id)
            .await?;

        let result = self
            .update_membership_role(&group_id, &membership_id, &role_id)
            .await?;

        log::info!(
            "[set_user_role] user {user_id} in group {group_id} set to role {role_id} (membership {membership_id})"
        );

        Ok(RankOutcome {
            group_id,
            user_id,
            role_id,
            membership_id,
            result,
        })
    }
}
