//! CLI entry point for scrambled tile reassembly

use clap::Parser;
use retile::io::cli::{Cli, Session};

fn main() -> retile::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let mut session = Session::new(cli);
    session.run().map(|_| ())
}
