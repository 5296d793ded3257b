//! Identifier rendering for generated Go code.
//!
//! Two rules here are load-bearing for the output shape:
//!
//! - a column is a foreign key candidate only when its name *ends* in
//!   `_id` and has at least one character before it (`^(.+)_id$`);
//! - the type prefix is removed only at the very start of a rendered name.

use regex::Regex;
use std::sync::LazyLock;

static FOREIGN_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<stem>.+)_id$").expect("foreign key pattern is valid"));

/// Convert a snake_case catalog identifier to CamelCase.
///
/// Every `_`-delimited segment gets its first character uppercased and the
/// underscores are dropped. Input that is already CamelCase passes through
/// unchanged.
///
/// ```
/// use schema2go::naming::camel_case;
///
/// assert_eq!(camel_case("user_id"), "UserId");
/// assert_eq!(camel_case("UserId"), "UserId");
/// ```
pub fn camel_case(ident: &str) -> String {
    ident
        .split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Remove `prefix` from the start of a rendered type name.
///
/// An empty prefix, or one that does not occur at position 0, leaves the
/// name untouched.
pub fn strip_type_prefix<'a>(rendered: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return rendered;
    }
    rendered.strip_prefix(prefix).unwrap_or(rendered)
}

/// The referenced entity name of a `<stem>_id` column, if it is one.
pub fn foreign_key_stem(column: &str) -> Option<&str> {
    FOREIGN_KEY
        .captures(column)
        .and_then(|caps| caps.name("stem"))
        .map(|m| m.as_str())
}

/// Whether `column` looks like a foreign key (`<stem>_id`).
pub fn is_foreign_key(column: &str) -> bool {
    FOREIGN_KEY.is_match(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("user_id"), "UserId");
        assert_eq!(camel_case("id"), "Id");
        assert_eq!(camel_case("whatsapp_messages"), "WhatsappMessages");
        assert_eq!(camel_case("tbl_user"), "TblUser");
    }

    #[test]
    fn test_camel_case_is_idempotent() {
        for ident in ["user_id", "team", "a_b_c", "already_Camel", ""] {
            let once = camel_case(ident);
            assert_eq!(camel_case(&once), once);
        }
    }

    #[test]
    fn test_camel_case_collapses_repeated_underscores() {
        assert_eq!(camel_case("a__b"), "AB");
        assert_eq!(camel_case("_leading"), "Leading");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_strip_type_prefix_only_at_start() {
        assert_eq!(strip_type_prefix("TblUser", "Tbl"), "User");
        assert_eq!(strip_type_prefix("UserTbl", "Tbl"), "UserTbl");
        assert_eq!(strip_type_prefix("TblUser", ""), "TblUser");
    }

    #[test]
    fn test_foreign_key_stem() {
        assert_eq!(foreign_key_stem("team_id"), Some("team"));
        assert_eq!(foreign_key_stem("parent_team_id"), Some("parent_team"));
        assert_eq!(foreign_key_stem("id"), None);
        assert_eq!(foreign_key_stem("_id"), None);
        assert_eq!(foreign_key_stem("team_identity"), None);
        assert_eq!(foreign_key_stem("teamid"), None);
    }

    #[test]
    fn test_is_foreign_key() {
        assert!(is_foreign_key("user_id"));
        assert!(!is_foreign_key("user_id_x"));
        assert!(!is_foreign_key("id"));
    }
}
