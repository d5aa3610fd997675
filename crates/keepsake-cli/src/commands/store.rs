use std::io::IsTerminal;
use std::path::Path;

use crate::app::AppContext;
use crate::cli::StoreArgs;
use crate::errors::CliError;
use crate::fs::write_token_file;
use crate::helpers::{prompt_new_passkey, read_plaintext};
use crate::output::{print_json, token_file_json, token_json};

pub fn handle_store(ctx: &AppContext, args: &StoreArgs) -> anyhow::Result<()> {
    let interactive = std::io::stdin().is_terminal() && !args.no_input;
    let vault = ctx.vault()?;

    let plaintext = read_plaintext(args.no_input, args.data.clone())?;
    let passkey = prompt_new_passkey(interactive)?;

    let token = vault
        .store(&plaintext, &passkey)
        .map_err(CliError::from)?;

    match args.output.as_deref() {
        Some(path) => {
            write_token_file(Path::new(path), &token)?;
            if args.json {
                print_json(&token_file_json(path))?;
            } else if !ctx.quiet() {
                println!("Token written to {}", path);
            }
        }
        None => {
            if args.json {
                print_json(&token_json(&token, &ctx.config()?.vault))?;
            } else {
                println!("{}", token);
            }
        }
    }

    if !ctx.quiet() && !args.json {
        eprintln!("Keep this token and your passkey. Neither can be recovered.");
    }
    Ok(())
}
