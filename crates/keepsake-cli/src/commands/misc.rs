use clap::CommandFactory;
use clap_complete::generate;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::Cli;
use crate::config::render_config;

pub fn handle_config(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    let config = ctx.config()?;
    if !ctx.quiet() {
        println!("# {}", resolve_config_path(cli)?.display());
    }
    print!("{}", render_config(config)?);
    Ok(())
}

pub fn handle_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "keepsake", &mut std::io::stdout());
    Ok(())
}
