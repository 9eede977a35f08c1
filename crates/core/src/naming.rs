//! Naming conventions shared by the model layer and the generator
//!
//! Every table and column name the store sees is derived from a type name
//! through these functions, so the generator and the client must agree on them.

use once_cell::sync::Lazy;
use regex::Regex;

static MATCH_FIRST_CAP: Lazy<Regex> =
    Lazy::new(|| Regex::new("(.)([A-Z][a-z]+)").expect("static regex"));
static MATCH_ALL_CAP: Lazy<Regex> =
    Lazy::new(|| Regex::new("([a-z0-9])([A-Z])").expect("static regex"));

/// Convert a type name to snake_case (`TenantUserRel` -> `tenant_user_rel`)
pub fn to_snake_case(name: &str) -> String {
    let snake = MATCH_FIRST_CAP.replace_all(name, "${1}_${2}");
    let snake = MATCH_ALL_CAP.replace_all(&snake, "${1}_${2}");
    snake.to_lowercase()
}

/// Kind name of a type. A trailing `List` is dropped so that a collection
/// shares the kind of its items.
pub fn kind_name(type_name: &str) -> String {
    let base = type_name.strip_suffix("List").unwrap_or(type_name);
    to_snake_case(base)
}

/// Table name of a type: snake_case, pluralized by appending `s` unless the
/// name already ends in `s`. Irregular plurals are not handled.
pub fn table_name(type_name: &str) -> String {
    let snake = to_snake_case(type_name);
    if snake.ends_with('s') {
        snake
    } else {
        format!("{}s", snake)
    }
}

/// Foreign key column referencing a kind: `<kind>_<pk field>`
pub fn foreign_key(kind: &str, pk_field: &str) -> String {
    format!("{}_{}", kind, pk_field)
}

/// Lowercase the first character (`UserCommon` -> `userCommon`)
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("User"), "user");
        assert_eq!(to_snake_case("TenantUserRel"), "tenant_user_rel");
        assert_eq!(to_snake_case("HTTPRoute"), "http_route");
        assert_eq!(to_snake_case("TenantResourceQuota"), "tenant_resource_quota");
    }

    #[test]
    fn test_kind_name_strips_list() {
        assert_eq!(kind_name("TenantList"), "tenant");
        assert_eq!(kind_name("Tenant"), "tenant");
        assert_eq!(kind_name("TenantUserRelList"), "tenant_user_rel");
    }

    #[test]
    fn test_table_name_pluralization() {
        assert_eq!(table_name("User"), "users");
        assert_eq!(table_name("TenantUserRel"), "tenant_user_rels");
        // already plural-looking names are kept as they are
        assert_eq!(table_name("Status"), "status");
    }

    #[test]
    fn test_foreign_key() {
        assert_eq!(foreign_key("user", "id"), "user_id");
        assert_eq!(foreign_key("tenant_user_rel", "id"), "tenant_user_rel_id");
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("UserCommon"), "userCommon");
        assert_eq!(lower_first(""), "");
    }
}
