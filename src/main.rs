use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use romconv::{
    bin2hex::{self, BinToHexArgs},
    hex2wav::{self, HexToWavArgs},
    instrumentation,
};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[clap(long, global = true)]
    #[clap(help = "Enable chrome tracing")]
    #[clap(long_help = "Enable chrome tracing which on program exit will generate
a json file to be opened with a chrome tracing compatible
viewer.")]
    trace: bool,
    #[clap(short, long, global = true, action = ArgAction::Count)]
    #[clap(help = "Increase logging verbosity (-v, -vv, -vvv)")]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[clap(about = "Convert binary program images to hex, Intel HEX and mnemonic files")]
    #[clap(aliases = &["b", "bin"])]
    Bin2hex(BinToHexArgs),
    #[clap(about = "Convert hex files to Kansas City Standard WAV and Intel HEX files")]
    #[clap(aliases = &["w", "wav"])]
    Hex2wav(HexToWavArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _trace_guard = instrumentation::init(cli.trace, cli.verbose);

    match &cli.command {
        Command::Bin2hex(args) => bin2hex::convert(args),
        Command::Hex2wav(args) => hex2wav::convert(args),
    }
}
