//! Input helper functions for the CLI.

use std::io::{self, IsTerminal, Read};

use dialoguer::{Input, Password};
use zeroize::Zeroizing;

use crate::constants::PASSKEY_ENV;
use crate::errors::CliError;

fn passkey_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSKEY_ENV)
        .ok()
        .filter(|value| !value.is_empty())
        .map(Zeroizing::new)
}

/// Prompt for a passkey, or read it from KEEPSAKE_PASSKEY.
pub fn prompt_passkey(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = passkey_from_env() {
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No passkey provided and no TTY available. Set {}.",
            PASSKEY_ENV
        ));
    }
    Password::new()
        .with_prompt("Passkey")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passkey: {}", e))
}

/// Prompt for a new passkey with confirmation, or read it from KEEPSAKE_PASSKEY.
pub fn prompt_new_passkey(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = passkey_from_env() {
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No passkey provided and no TTY available. Set {}.",
            PASSKEY_ENV
        ));
    }
    Password::new()
        .with_prompt("Create passkey")
        .with_confirmation("Confirm passkey", "Passkeys do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passkey: {}", e))
}

/// Read the plaintext to store from `--data`, stdin, or an interactive prompt.
pub fn read_plaintext(no_input: bool, data: Option<String>) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = data {
        if value.is_empty() {
            return Err(CliError::invalid_input("--data cannot be empty").into());
        }
        return Ok(Zeroizing::new(value));
    }

    if !io::stdin().is_terminal() {
        let mut buffer = Zeroizing::new(String::new());
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = Zeroizing::new(strip_final_newline(&buffer).to_string());
        if trimmed.is_empty() {
            return Err(anyhow::anyhow!("No input provided on stdin"));
        }
        return Ok(trimmed);
    }

    if no_input {
        return Err(
            CliError::invalid_input("--no-input requires --data or content on stdin").into(),
        );
    }

    Input::<String>::new()
        .with_prompt("Data to store")
        .interact_text()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read data: {}", e))
}

/// Drop the single line ending a pipe or heredoc adds; keep any others.
fn strip_final_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

/// Read a token from a positional argument, a file, stdin, or a prompt.
pub fn read_token(
    no_input: bool,
    token: Option<String>,
    input: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(value) = token {
        return Ok(value);
    }

    if let Some(path) = input {
        return crate::fs::read_token_file(std::path::Path::new(path));
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        if buffer.trim().is_empty() {
            return Err(anyhow::anyhow!("No token provided on stdin"));
        }
        return Ok(buffer.trim().to_string());
    }

    if no_input {
        return Err(CliError::invalid_input(
            "--no-input requires a TOKEN argument, --input, or a token on stdin",
        )
        .into());
    }

    Input::<String>::new()
        .with_prompt("Token")
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_final_newline_removes_one_line_ending() {
        assert_eq!(strip_final_newline("a\n"), "a");
        assert_eq!(strip_final_newline("a\r\n"), "a");
        assert_eq!(strip_final_newline("a\n\n"), "a\n");
        assert_eq!(strip_final_newline("a"), "a");
        assert_eq!(strip_final_newline("\n"), "");
    }
}
