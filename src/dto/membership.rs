use crate::commons::{last_segment, nth_segment};

/// One entry of `GET groups/{groupId}/memberships`.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default)]
pub struct GroupMembership {
    /// `groups/{groupId}/memberships/{membershipId}`
    #[serde(default)]
    pub path: String,
    /// `users/{userId}`
    #[serde(default)]
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl GroupMembership {
    pub fn user_id(&self) -> &str {
        last_segment(&self.user)
    }

    pub fn membership_id(&self) -> Option<&str> {
        nth_segment(&self.path, 3)
    }
}

#[derive(serde::Deserialize, Debug, Default)]
pub struct MembershipPage {
    #[serde(rename = "groupMemberships", default)]
    group_memberships: Option<Vec<GroupMembership>>,
    #[serde(rename = "nextPageToken", default)]
    next_page_token: Option<String>,
}

impl MembershipPage {
    pub fn memberships(&self) -> &[GroupMembership] {
        self.group_memberships.as_deref().unwrap_or_default()
    }

    /// The token for the following page; `None` on the last page.
    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::MembershipPage;

    #[test]
    fn empty_or_null_token_ends_pagination() {
        let last: MembershipPage =
            serde_json::from_str(r#"{"groupMemberships": [], "nextPageToken": ""}"#).unwrap();
        let null: MembershipPage =
            serde_json::from_str(r#"{"groupMemberships": null, "nextPageToken": null}"#).unwrap();

        assert_eq!(last.next_page_token(), None);
        assert_eq!(null.next_page_token(), None);
        assert!(null.memberships().is_empty());
    }

    #[test]
    fn membership_exposes_user_and_own_id() {
        let page: MembershipPage = serde_json::from_str(
            r#"{
                "groupMemberships": [
                    {"path": "groups/100/memberships/m2", "user": "users/7", "role": "groups/100/roles/5"}
                ],
                "nextPageToken": "tok"
            }"#,
        )
        .unwrap();

        let membership = &page.memberships()[0];
        assert_eq!(membership.user_id(), "7");
        assert_eq!(membership.membership_id(), Some("m2"));
        assert_eq!(page.next_page_token(), Some("tok"));
    }
}
