//! Input validation for group operations.

use validator::ValidateEmail;

use super::error::GroupError;

/// Maximum group name length, matching the `groups.name` column.
pub const MAX_GROUP_NAME_LEN: usize = 255;

/// Validates a group name and returns it trimmed.
///
/// # Errors
///
/// Returns `GroupError::EmptyName` for blank names and
/// `GroupError::NameTooLong` past `MAX_GROUP_NAME_LEN` characters.
pub fn validate_group_name(name: &str) -> Result<String, GroupError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GroupError::EmptyName);
    }
    if name.chars().count() > MAX_GROUP_NAME_LEN {
        return Err(GroupError::NameTooLong {
            max: MAX_GROUP_NAME_LEN,
        });
    }
    Ok(name.to_string())
}

/// Trims and lowercases an email, rejecting malformed addresses.
///
/// # Errors
///
/// Returns `GroupError::InvalidEmail` if the address is not well formed.
pub fn normalize_email(email: &str) -> Result<String, GroupError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(GroupError::InvalidEmail(email));
    }
    Ok(email)
}

/// Derives a display username from the local part of an email.
///
/// Characters other than ASCII alphanumerics, `.`, `_` and `-` are dropped.
#[must_use]
pub fn derive_username(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let username: String = local
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect::<String>()
        .to_lowercase();

    if username.is_empty() {
        "user".to_string()
    } else {
        username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_group_name_is_trimmed() {
        assert_eq!(validate_group_name("  Flatmates  ").unwrap(), "Flatmates");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_group_name_rejected(#[case] name: &str) {
        assert!(matches!(validate_group_name(name), Err(GroupError::EmptyName)));
    }

    #[test]
    fn test_group_name_length_limit() {
        let at_limit = "x".repeat(MAX_GROUP_NAME_LEN);
        assert!(validate_group_name(&at_limit).is_ok());

        let too_long = "x".repeat(MAX_GROUP_NAME_LEN + 1);
        assert!(matches!(
            validate_group_name(&too_long),
            Err(GroupError::NameTooLong { max: 255 })
        ));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Bob@Example.COM ").unwrap(),
            "bob@example.com"
        );
    }

    #[rstest]
    #[case("")]
    #[case("bob")]
    #[case("bob@")]
    #[case("@example.com")]
    fn test_malformed_email_rejected(#[case] email: &str) {
        assert!(matches!(
            normalize_email(email),
            Err(GroupError::InvalidEmail(_))
        ));
    }

    #[rstest]
    #[case("alice@example.com", "alice")]
    #[case("Alice.Smith@example.com", "alice.smith")]
    #[case("bob+trips@example.com", "bobtrips")]
    #[case("+++@example.com", "user")]
    fn test_derive_username(#[case] email: &str, #[case] expected: &str) {
        assert_eq!(derive_username(email), expected);
    }
}
