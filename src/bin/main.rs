use std::process;

use clap::Parser;
use lcb_parser::Cli;

#[macro_use]
extern crate log;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.validate() {
        eprintln!("error: {e}");
        process::exit(1);
    }

    lcb_logger::Logger::init(cli.verbose + u8::from(!cli.quiet));
    cli.log_args();

    if let Err(e) = lcb_finder::run(&cli) {
        error!("{e:?}");
        eprintln!("error: {e}");
        process::exit(1);
    }
}
