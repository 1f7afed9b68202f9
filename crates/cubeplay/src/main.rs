//! Headless command-line driver for a 3x3x3 Rubik's cube.

mod cli;
mod net;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    env_logger::builder().init();
    color_eyre::install().expect("error initializing panic handler");

    cli::exec(args)
}
