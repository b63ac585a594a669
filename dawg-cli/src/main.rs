use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dawg_core::builder::Builder;
use dawg_core::codec;
use dawg_core::dumper::Dumper;
use dawg_core::error::DawgErrorKind;
use dawg_core::DawgResult;
use log::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a sorted word list into a binary DAWG.
    Create {
        /// Input word list, or `-` to read from stdin.
        input: PathBuf,
        /// Output DAWG file.
        output: PathBuf,
    },
    /// Decompile a binary DAWG back into its sorted word list.
    Dump {
        /// Input DAWG file.
        input: PathBuf,
        /// Output word list. Falls back to stdout if it cannot be created.
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            eprint!("{err}");
            return ExitCode::SUCCESS;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> DawgResult<()> {
    match args.command {
        Commands::Create { input, output } => create(&input, &output),
        Commands::Dump { input, output } => dump(&input, &output),
    }
}

fn create(input: &PathBuf, output: &PathBuf) -> DawgResult<()> {
    let arena = if input.as_os_str() == "-" {
        let stdin = io::stdin();
        Builder::new().build(stdin.lock())?
    } else {
        let file =
            File::open(input).map_err(|err| DawgErrorKind::Io.with_error(anyhow::anyhow!(err)))?;
        Builder::new().build(BufReader::new(file))?
    };

    let mut out = File::create(output)
        .map(BufWriter::new)
        .map_err(|err| DawgErrorKind::Io.with_error(anyhow::anyhow!(err)))?;
    codec::write_arena(&mut out, &arena)?;

    info!("wrote {} arena edges to {}", arena.len(), output.display());
    Ok(())
}

fn dump(input: &PathBuf, output: &PathBuf) -> DawgResult<()> {
    let mut file =
        File::open(input).map_err(|err| DawgErrorKind::Io.with_error(anyhow::anyhow!(err)))?;
    let arena = codec::read_arena(&mut file)?;
    let dumper = Dumper::new(&arena);

    match File::create(output) {
        Ok(file) => dumper.dump(&mut BufWriter::new(file)),
        Err(_) => dumper.dump(&mut io::stdout().lock()),
    }
}
