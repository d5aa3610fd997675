//! Passkey prompting with retry for retrieval.

use tracing::debug;
use zeroize::Zeroizing;

use keepsake_core::VaultError;

use crate::errors::CliError;
use crate::helpers::prompt_passkey;

use super::context::AppContext;

/// Open `token`, re-prompting after a wrong passkey until success or lockout.
///
/// Interactive sessions keep asking while the limiter allows it. A passkey
/// from KEEPSAKE_PASSKEY or a non-interactive run gets exactly one attempt.
pub fn retrieve_with_retry(
    ctx: &AppContext,
    token: &str,
    interactive: bool,
) -> anyhow::Result<Zeroizing<String>> {
    let vault = ctx.vault()?;
    let limiter = ctx.limiter()?;
    let env_supplied = std::env::var(crate::constants::PASSKEY_ENV)
        .map(|value| !value.is_empty())
        .unwrap_or(false);
    let retry = interactive && !env_supplied;

    loop {
        let passkey = prompt_passkey(interactive)?;
        match vault.retrieve(limiter, token, &passkey) {
            Ok(plaintext) => return Ok(Zeroizing::new(plaintext)),
            Err(VaultError::WrongPasskey { remaining }) if retry && remaining > 0 => {
                debug!(remaining, "wrong passkey; prompting again");
                eprintln!(
                    "Incorrect passkey. {} attempt{} remaining.",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
                continue;
            }
            Err(err) => return Err(CliError::from(err).into()),
        }
    }
}
