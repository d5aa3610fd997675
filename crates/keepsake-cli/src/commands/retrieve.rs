use std::io::IsTerminal;

use crate::app::{retrieve_with_retry, AppContext};
use crate::cli::RetrieveArgs;
use crate::helpers::read_token;
use crate::output::{plaintext_json, print_json};

pub fn handle_retrieve(ctx: &AppContext, args: &RetrieveArgs) -> anyhow::Result<()> {
    let token = read_token(args.no_input, args.token.clone(), args.input.as_deref())?;

    // Stdin may have carried the token, so only a TTY allows prompting.
    let interactive = std::io::stdin().is_terminal() && !args.no_input;
    let plaintext = retrieve_with_retry(ctx, &token, interactive)?;

    if args.json {
        print_json(&plaintext_json(&plaintext))?;
    } else {
        println!("{}", plaintext.as_str());
    }
    Ok(())
}
