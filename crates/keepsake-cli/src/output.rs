//! Output formatting helpers for the CLI.

use keepsake_core::VaultConfig;

/// JSON document for a freshly stored token.
pub fn token_json(token: &str, config: &VaultConfig) -> serde_json::Value {
    serde_json::json!({
        "token": token,
        "salt_length": config.salt_length,
        "kdf_iterations": config.kdf_iterations,
    })
}

/// JSON document for a token written to a file.
pub fn token_file_json(path: &str) -> serde_json::Value {
    serde_json::json!({ "output": path })
}

/// JSON document for retrieved plaintext.
pub fn plaintext_json(plaintext: &str) -> serde_json::Value {
    serde_json::json!({ "plaintext": plaintext })
}

/// Print a JSON value, pretty-printed.
pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_json_shape() {
        let value = token_json("abc", &VaultConfig::default());
        assert_eq!(value["token"], "abc");
        assert_eq!(value["salt_length"], 16);
        assert_eq!(value["kdf_iterations"], 390_000);
    }

    #[test]
    fn test_plaintext_json_shape() {
        let value = plaintext_json("hello world");
        assert_eq!(value["plaintext"], "hello world");
        assert!(value.get("token").is_none());
    }
}
