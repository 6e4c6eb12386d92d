use crate::http::Error;

use super::id::ResourceId;

pub const MISSING_FIELDS: &str = "Missing groupId, userId, and roleId/roleName.";

/// Body of `POST /rank`.
#[derive(serde::Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RankRequest {
    pub group_id: Option<ResourceId>,
    pub user_id: Option<ResourceId>,
    pub role_id: Option<ResourceId>,
    pub role_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleSelector {
    Id(ResourceId),
    Name(String),
}

/// A validated [`RankRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleAssignment {
    pub group_id: ResourceId,
    pub user_id: ResourceId,
    pub role: RoleSelector,
}

impl RankRequest {
    /// A present role id wins over a role name.
    pub fn validate(self) -> Result<RoleAssignment, Error> {
        let present = |id: Option<ResourceId>| id.filter(|id| !id.is_blank());

        let group_id = present(self.group_id);
        let user_id = present(self.user_id);
        let role = match (present(self.role_id), self.role_name) {
            (Some(id), _) => Some(RoleSelector::Id(id)),
            (None, Some(name)) if !name.is_empty() => Some(RoleSelector::Name(name)),
            _ => None,
        };

        match (group_id, user_id, role) {
            (Some(group_id), Some(user_id), Some(role)) => Ok(RoleAssignment {
                group_id,
                user_id,
                role,
            }),
            _ => Err(Error::BadRequest(MISSING_FIELDS.to_owned())),
        }
    }
}

/// What a successful role change reports back to the game server.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankOutcome {
    pub group_id: ResourceId,
    pub user_id: ResourceId,
    pub role_id: ResourceId,
    pub membership_id: String,
    /// The upstream PATCH response, untouched.
    pub result: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: serde_json::Value) -> RankRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn role_id_takes_precedence_over_name() {
        let assignment = request(serde_json::json!({
            "groupId": 100, "userId": "7", "roleId": 9, "roleName": "Officer"
        }))
        .validate()
        .unwrap();

        assert_eq!(assignment.group_id, ResourceId::Number(100));
        assert_eq!(assignment.user_id, ResourceId::Text("7".into()));
        assert_eq!(assignment.role, RoleSelector::Id(ResourceId::Number(9)));
    }

    #[test]
    fn blank_role_id_falls_back_to_name() {
        let assignment = request(serde_json::json!({
            "groupId": 100, "userId": 7, "roleId": 0, "roleName": "Officer"
        }))
        .validate()
        .unwrap();

        assert_eq!(assignment.role, RoleSelector::Name("Officer".into()));
    }

    #[test]
    fn missing_fields_are_rejected() {
        for body in [
            serde_json::json!({"userId": 7, "roleId": 9}),
            serde_json::json!({"groupId": 100, "roleId": 9}),
            serde_json::json!({"groupId": 100, "userId": 7}),
            serde_json::json!({"groupId": 100, "userId": 7, "roleName": ""}),
            serde_json::json!({"groupId": "", "userId": 7, "roleId": 9}),
        ] {
            let err = request(body).validate().unwrap_err();
            assert!(matches!(err, Error::BadRequest(ref msg) if msg == MISSING_FIELDS));
        }
    }
}
