pub mod generate;
pub mod inspect;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_ARTIFACT_ERROR: u8 = 3;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

/// Map an error message to the process exit code.
pub fn exit_code_for(msg: &str) -> u8 {
    if msg.starts_with("description error:")
        || msg.starts_with("invalid ")
        || msg.starts_with("failed to parse manifest")
        || msg.starts_with("failed to read manifest")
        || msg.starts_with("unsupported manifest version")
    {
        EXIT_CONFIG_ERROR
    } else if msg.starts_with("failed to read artifact") {
        EXIT_ARTIFACT_ERROR
    } else {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_pretty_serializes_object() {
        let val = serde_json::json!({"key": "value"});
        let result = json_pretty(&val).unwrap();
        assert!(result.contains("\"key\""));
        assert!(result.contains("\"value\""));
    }

    #[test]
    fn exit_codes_are_distinct() {
        assert_ne!(EXIT_SUCCESS, EXIT_FAILURE);
        assert_ne!(EXIT_FAILURE, EXIT_CONFIG_ERROR);
        assert_ne!(EXIT_CONFIG_ERROR, EXIT_ARTIFACT_ERROR);
    }

    #[test]
    fn configuration_errors_map_to_config_exit() {
        assert_eq!(
            exit_code_for("description error: unsupported description_version: 9, expected 1"),
            EXIT_CONFIG_ERROR
        );
        assert_eq!(
            exit_code_for("invalid exclude pattern '[': unclosed character class"),
            EXIT_CONFIG_ERROR
        );
        assert_eq!(
            exit_code_for("unsupported manifest version: 3, expected 0"),
            EXIT_CONFIG_ERROR
        );
    }

    #[test]
    fn artifact_errors_map_to_artifact_exit() {
        assert_eq!(
            exit_code_for("failed to read artifact for g:n:1 at /x.jar: not found"),
            EXIT_ARTIFACT_ERROR
        );
    }

    #[test]
    fn other_errors_map_to_failure() {
        assert_eq!(
            exit_code_for("failed to write manifest to /ro/depstrap.json: denied"),
            EXIT_FAILURE
        );
    }
}
