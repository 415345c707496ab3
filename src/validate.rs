//! Project name validation against npm package naming rules
//!
//! New packages must be lowercase, URL-friendly, at most 214 characters and
//! must not start with a period or underscore. The full problem list is
//! collected so the CLI can show the user everything wrong at once.

/// Outcome of validating a candidate project name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub problems: Vec<String>,
}

fn is_url_friendly(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_uppercase() || c.is_ascii_digit() || "-_.~".contains(c)
}

/// Validate `name` as an npm package name
pub fn validate_npm_name(name: &str) -> Validation {
    let mut problems = Vec::new();

    if name.is_empty() {
        problems.push("name length must be greater than zero".to_string());
    }
    if name.starts_with('.') {
        problems.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        problems.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        problems.push("name cannot contain leading or trailing spaces".to_string());
    }
    if name.len() > 214 {
        problems.push("name cannot contain more than 214 characters".to_string());
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("name can no longer contain capital letters".to_string());
    }
    if name.chars().any(|c| !is_url_friendly(c)) {
        problems.push("name can only contain URL-friendly characters".to_string());
    }

    Validation {
        valid: problems.is_empty(),
        problems,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_npm_name("my-app").valid);
        assert!(validate_npm_name("app2").valid);
        assert!(validate_npm_name("some.package~name").valid);
    }

    #[test]
    fn test_capital_letters_rejected() {
        let validation = validate_npm_name("MyApp");
        assert!(!validation.valid);
        assert!(
            validation
                .problems
                .iter()
                .any(|p| p.contains("capital letters"))
        );
    }

    #[test]
    fn test_leading_period_and_underscore_rejected() {
        assert!(!validate_npm_name(".hidden").valid);
        assert!(!validate_npm_name("_private").valid);
    }

    #[test]
    fn test_unfriendly_characters_rejected() {
        let validation = validate_npm_name("my app!");
        assert!(!validation.valid);
        assert!(
            validation
                .problems
                .iter()
                .any(|p| p.contains("URL-friendly"))
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(!validate_npm_name("").valid);
    }

    #[test]
    fn test_overlong_name_rejected() {
        let name = "a".repeat(215);
        let validation = validate_npm_name(&name);
        assert!(!validation.valid);
        assert!(validation.problems.iter().any(|p| p.contains("214")));
    }

    #[test]
    fn test_multiple_problems_are_collected() {
        let validation = validate_npm_name(".Bad Name");
        assert!(validation.problems.len() >= 3);
    }
}
