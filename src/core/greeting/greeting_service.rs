//! A service for greeting someone.

use tracing::instrument;

/// The greeting for the root endpoint.
#[instrument(ret)]
pub fn index() -> String {
    greet(None)
}

/// Returns a greeting based on someone's name.
///
/// An absent or empty name falls back to `World`. Any other value is used
/// verbatim, with no trimming or escaping.
#[instrument(ret)]
pub fn greet(name: Option<&str>) -> String {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => "World",
    };
    format!("Hello, {}!", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_hello_world() {
        assert_eq!("Hello, World!", index());
    }

    #[test]
    fn greet_with_name() {
        assert_eq!("Hello, Bob!", greet(Some("Bob")));
    }

    #[test]
    fn greet_without_name_defaults_to_world() {
        assert_eq!("Hello, World!", greet(None));
    }

    #[test]
    fn greet_with_empty_name_defaults_to_world() {
        assert_eq!("Hello, World!", greet(Some("")));
    }

    #[test]
    fn greet_uses_name_verbatim() {
        assert_eq!("Hello,  spaced out !", greet(Some(" spaced out ")));
        assert_eq!("Hello, <b>Bob</b>!", greet(Some("<b>Bob</b>")));
    }

    #[test]
    fn greet_is_idempotent() {
        assert_eq!(greet(Some("Bob")), greet(Some("Bob")));
    }
}
