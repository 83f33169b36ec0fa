// ============================================================================
// Menukit Core - Resource Suggestion Heuristic
// File: crates/menukit-core/src/suggest.rs
// Description: Route path -> likely permission resource token
// ============================================================================
//! Guesses the permission resource a route most likely belongs to, and scores
//! candidate permissions against that guess. The permission editor uses this
//! for its "smart suggestions" view; it is a heuristic, never an enforcement.

use crate::domain::Permission;

/// Leading segments that only mark an administrative namespace, never a
/// resource.
const ADMIN_PREFIXES: &[&str] = &["admin", "system-admin", "app"];

/// Namespaces that contain resources rather than being one; the real
/// resource is the segment after them.
const CONTAINER_SEGMENTS: &[&str] = &["iam", "master", "masters", "settings", "system", "config"];

/// Derive a resource token from a route path. Returns `None` for empty or
/// absent paths (group nodes).
pub fn suggest_resource(route_path: &str) -> Option<String> {
    let path = route_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let mut segments = path
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .into_iter();

    let mut first = segments.next()?;
    if ADMIN_PREFIXES.contains(&first.as_str()) {
        first = segments.next()?;
    }
    if CONTAINER_SEGMENTS.contains(&first.as_str()) {
        if let Some(next) = segments.next() {
            return Some(next);
        }
    }
    Some(first)
}

/// Naive singular form, so "users" still matches "user-profiles". The
/// result is kept at three characters minimum to avoid degenerate stems.
fn stem(s: &str) -> &str {
    match s.strip_suffix('s') {
        Some(t) if t.len() >= 3 => t,
        _ => s,
    }
}

fn overlaps(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let (a, b) = (stem(a), stem(b));
    a.contains(b) || b.contains(a)
}

/// Score a candidate permission against a suggested token.
///
/// 3: resource equals the token (case-insensitive)
/// 2: resource contains the token or vice versa, modulo a naive
///    plural/singular mismatch
/// 1: only the code or name mentions the token
/// 0: unrelated
pub fn score_permission(permission: &Permission, token: &str) -> u8 {
    let token = token.to_lowercase();
    if token.is_empty() {
        return 0;
    }
    let resource = permission.resource.to_lowercase();

    if resource == token {
        3
    } else if overlaps(&resource, &token) {
        2
    } else if permission.code.to_lowercase().contains(&token)
        || permission.name.to_lowercase().contains(&token)
    {
        1
    } else {
        0
    }
}

/// Smart-suggestions view: candidates scoring at least 2, best first, code
/// as the tiebreak.
pub fn suggest_permissions<'a>(
    permissions: &'a [Permission],
    token: &str,
) -> Vec<(&'a Permission, u8)> {
    let mut scored: Vec<(&Permission, u8)> = permissions
        .iter()
        .map(|p| (p, score_permission(p, token)))
        .filter(|(_, score)| *score >= 2)
        .collect();
    scored.sort_by(|(a, sa), (b, sb)| sb.cmp(sa).then_with(|| a.code.cmp(&b.code)));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PermissionAction, PermissionCategory};

    fn permission(code: &str, name: &str, resource: &str) -> Permission {
        Permission::new(
            code.to_string(),
            name.to_string(),
            None,
            resource.to_string(),
            PermissionAction::Read,
            PermissionCategory::Page,
        )
        .unwrap()
    }

    #[test]
    fn test_suggest_skips_admin_prefix_and_container() {
        assert_eq!(
            suggest_resource("/system-admin/iam/users"),
            Some("users".to_string())
        );
    }

    #[test]
    fn test_suggest_plain_path() {
        assert_eq!(suggest_resource("/reports/daily"), Some("reports".to_string()));
    }

    #[test]
    fn test_suggest_strips_query_and_fragment() {
        assert_eq!(
            suggest_resource("/admin/roles?tab=members#top"),
            Some("roles".to_string())
        );
    }

    #[test]
    fn test_suggest_container_without_follow_up_segment() {
        assert_eq!(suggest_resource("/admin/iam"), Some("iam".to_string()));
    }

    #[test]
    fn test_empty_path_yields_none() {
        assert_eq!(suggest_resource(""), None);
        assert_eq!(suggest_resource("///"), None);
        assert_eq!(suggest_resource("/admin"), None);
    }

    #[test]
    fn test_scoring_tiers() {
        assert_eq!(score_permission(&permission("p1", "View users", "users"), "users"), 3);
        assert_eq!(
            score_permission(&permission("p2", "View profiles", "user-profiles"), "users"),
            2
        );
        assert_eq!(
            score_permission(&permission("users.export", "Export", "audit"), "users"),
            1
        );
        assert_eq!(score_permission(&permission("p4", "Other", "roles"), "users"), 0);
    }

    #[test]
    fn test_suggestions_sorted_and_filtered() {
        let perms = vec![
            permission("b.partial", "Profiles", "user-profiles"),
            permission("a.exact", "Users", "users"),
            permission("c.exact", "Users too", "users"),
            permission("d.name-only", "users report", "audit"),
        ];
        let out = suggest_permissions(&perms, "users");
        let codes: Vec<_> = out.iter().map(|(p, _)| p.code.as_str()).collect();
        assert_eq!(codes, vec!["a.exact", "c.exact", "b.partial"]);
        assert_eq!(out[0].1, 3);
    }
}
