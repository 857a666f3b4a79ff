use std::path::{Path, PathBuf};

use clap::Parser;
use lockbox::cli::{output, session::Session, Cli};
use lockbox::config::Settings;
use lockbox::errors::Result;
use lockbox::vault::Vault;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut settings = Settings::load(Path::new("."))?;

    // CLI flags win over the config file.
    if let Some(kdf) = &cli.kdf {
        settings.kdf = kdf.clone();
    }
    if let Some(out_dir) = &cli.out_dir {
        settings.out_dir = out_dir.clone();
    }

    let vault = Vault::with_kdf(settings.kdf_config()?);
    let mut session = Session::new(vault, PathBuf::from(&settings.out_dir));
    session.run()
}
