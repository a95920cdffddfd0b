use super::DocumentError;
use tracing::debug;

/// Pick the YAML input: `INPUT_ARGS` first, then the positional argument
pub fn resolve_input<'a>(
    env_value: Option<&'a str>,
    cli_arg: Option<&'a str>,
) -> Result<&'a str, DocumentError> {
    match (env_value, cli_arg) {
        (Some(text), _) => {
            debug!(source = "INPUT_ARGS", "Using YAML input from environment");
            Ok(text)
        }
        (None, Some(text)) => {
            debug!(source = "argument", "Using YAML input from command line");
            Ok(text)
        }
        (None, None) => Err(DocumentError::MissingInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_takes_precedence() {
        assert_eq!(
            resolve_input(Some("namespace: env"), Some("namespace: arg")).ok(),
            Some("namespace: env")
        );
    }

    #[test]
    fn test_falls_back_to_argument() {
        assert_eq!(
            resolve_input(None, Some("namespace: arg")).ok(),
            Some("namespace: arg")
        );
    }

    #[test]
    fn test_missing_input() {
        assert!(matches!(
            resolve_input(None, None),
            Err(DocumentError::MissingInput)
        ));
    }
}
