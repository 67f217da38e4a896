//! Evidentia CLI binary.

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;

use evidentia::cli::args::EvidentiaArgs;
use evidentia::cli::commands::execute_command;

fn init_logging(args: &EvidentiaArgs) {
    // Flags set the default level, RUST_LOG refines it per module.
    Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn run(args: EvidentiaArgs) -> anyhow::Result<()> {
    let command = args.command.name();
    execute_command(args).with_context(|| format!("{command} failed"))
}

fn main() {
    let args = EvidentiaArgs::parse();
    init_logging(&args);

    if let Err(e) = run(args) {
        // {:#} prints the whole context chain on one line
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
