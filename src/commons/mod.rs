use std::fmt::Display;

/// Trailing `/`-delimited segment of a resource path, e.g. `156` for `users/156`.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// The `n`th `/`-delimited segment of a resource path, counting from zero.
pub fn nth_segment(path: &str, n: usize) -> Option<&str> {
    path.split('/').nth(n).filter(|s| !s.is_empty())
}

pub fn role_path(group_id: impl Display, role_id: impl Display) -> String {
    format!("groups/{group_id}/roles/{role_id}")
}
