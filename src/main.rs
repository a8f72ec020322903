use anyhow::{Context, Result};
use clap::Parser;
use mdsite::{build_site, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path();

    build_site(&config_path)
        .with_context(|| format!("failed to build site from `{}`", config_path.display()))?;

    Ok(())
}
