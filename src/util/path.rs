//! Path helpers

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Returns the input unchanged if a variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_undefined_var_when_expanding_then_returns_input() {
        let input = "$TRIPMATE_SURELY_UNDEFINED_VAR/trips";
        assert_eq!(expand_env_vars(input), input);
    }

    #[test]
    fn given_plain_path_when_expanding_then_unchanged() {
        assert_eq!(expand_env_vars("/var/lib/trips"), "/var/lib/trips");
    }
}
