use std::fmt::{self, Display};

/// An upstream identifier as game servers send it: a JSON number or a string.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Text(String),
}

impl ResourceId {
    /// `0` and `""` count as absent.
    pub fn is_blank(&self) -> bool {
        match self {
            ResourceId::Number(n) => *n == 0,
            ResourceId::Text(s) => s.is_empty(),
        }
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{n}"),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        ResourceId::Number(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceId;

    #[test]
    fn numbers_and_strings_render_the_same() {
        let number: ResourceId = serde_json::from_str("7").unwrap();
        let text: ResourceId = serde_json::from_str("\"7\"").unwrap();

        assert_eq!(number, ResourceId::Number(7));
        assert_eq!(text, ResourceId::Text("7".into()));
        assert_eq!(number.to_string(), text.to_string());
    }

    #[test]
    fn zero_and_empty_are_blank() {
        assert!(ResourceId::Number(0).is_blank());
        assert!(ResourceId::from("").is_blank());
        assert!(!ResourceId::from("0").is_blank());
        assert!(!ResourceId::Number(42).is_blank());
    }
}
