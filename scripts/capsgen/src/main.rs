use std::path::PathBuf;

use capsgen::{list_pcells, run};
use clap::Parser;

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate sky130 capacitor cells from a TOML configuration"
)]
pub struct Args {
    /// The output GDS file.
    #[arg(short, long, required_unless_present = "list")]
    output: Option<PathBuf>,
    /// The input configuration file.
    #[arg(required_unless_present = "list")]
    config: Option<PathBuf>,
    /// List the available cells and their parameters, then exit.
    #[arg(short, long)]
    list: bool,
}

pub fn main() {
    let args = Args::parse();
    if args.list {
        print!("{}", list_pcells());
        return;
    }
    // Both are present unless `--list` was given; clap enforces this.
    let config = args.config.expect("missing configuration file");
    let output = args.output.expect("missing output path");
    let count = run(config, &output).expect("failed to generate capacitor cells");
    println!("wrote {} cells to {}", count, output.display());
}
