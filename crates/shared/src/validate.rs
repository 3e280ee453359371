use std::sync::LazyLock;

use regex::Regex;

pub static RE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("id regex"));

pub const HOLDER: &str = "holder";
pub const MEMBER: &str = "member";

/// Upper bound for the people one submission may speak for.
pub const MAX_PARTICIPANTS: i64 = 50;
/// Upper bound for the diners of one meal.
pub const MAX_HEADCOUNT: i64 = 200;

fn is_valid_id(value: &str) -> bool {
    value.len() >= 3 && RE_ID.is_match(value)
}

pub fn validate_user_id(value: &str) -> crate::Result<()> {
    if !is_valid_id(value) {
        crate::user!(
            "Invalid user_id: use at least 3 letters, digits or underscores"
        );
    }

    Ok(())
}

pub fn validate_family_id(value: &str) -> crate::Result<()> {
    if !is_valid_id(value) {
        crate::user!(
            "Invalid family_id: use at least 3 letters, digits or underscores"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids() {
        assert!(validate_user_id("alice_01").is_ok());
        assert!(validate_user_id("al").is_err());
        assert!(validate_user_id("al ice").is_err());
        assert!(validate_family_id("FAM9X2").is_ok());
        assert!(validate_family_id("fam-1").is_err());
    }
}
