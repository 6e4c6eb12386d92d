use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A role as listed by `GET groups/{groupId}/roles`.
///
/// Only `id` and `displayName` are interpreted; every other field the
/// upstream sends is kept as-is in `rest`.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct GroupRole {
    #[serde(deserialize_with = "numeric_id")]
    pub id: u64,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Open Cloud sends role ids as strings; older payloads use numbers.
fn numeric_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("role id {s:?} is not numeric"))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::GroupRole;

    #[test]
    fn string_and_number_ids_parse() {
        let roles: Vec<GroupRole> = serde_json::from_value(json!([
            {"id": "9", "displayName": "Officer", "rank": 200, "memberCount": 3},
            {"id": 5, "displayName": "Member"},
        ]))
        .unwrap();

        assert_eq!(roles[0].id, 9);
        assert_eq!(roles[0].rest["rank"], 200);
        assert_eq!(roles[1].id, 5);
        assert!(roles[1].rest.is_empty());
    }

    #[test]
    fn other_fields_pass_through_untyped() {
        let role: GroupRole = serde_json::from_value(json!({
            "id": "9",
            "displayName": "Officer",
            "memberCount": "3",
            "description": "Runs the raids",
            "permissions": {"viewWallPosts": true},
            "createTime": "2024-01-01T00:00:00Z",
        }))
        .unwrap();

        let out = serde_json::to_value(&role).unwrap();
        assert_eq!(out["id"], 9);
        assert_eq!(out["displayName"], "Officer");
        assert_eq!(out["memberCount"], "3");
        assert_eq!(out["description"], "Runs the raids");
        assert_eq!(out["permissions"]["viewWallPosts"], true);
        assert_eq!(out["createTime"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let parsed = serde_json::from_value::<GroupRole>(json!(
            {"id": "officer", "displayName": "Officer"}
        ));

        assert!(parsed.is_err());
    }
}
