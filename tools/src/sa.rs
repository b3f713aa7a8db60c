use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::info;
use skew_bwt::{Algorithm, SuffixArrayBuilder};

mod common;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Skew,
    Doubling,
    Naive,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Skew => Algorithm::Skew,
            AlgorithmArg::Doubling => Algorithm::Doubling,
            AlgorithmArg::Naive => Algorithm::Naive,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Constructs the suffix array of the given file, one offset per line."
)]
struct Args {
    #[arg(short = 'i', long, help = "Path to an input text file")]
    input_file: String,

    #[arg(short = 'o', long, help = "Path to an output file (stdout if omitted)")]
    output_file: Option<String>,

    #[arg(short = 'a', long, value_enum, default_value_t = AlgorithmArg::Skew)]
    algorithm: AlgorithmArg,

    #[arg(short = 'c', long, help = "Flag to remap bytes to a dense alphabet")]
    compact: bool,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    common::init_logger(args.verbose)?;

    let text: Vec<usize> = common::read_bytes(&args.input_file)?
        .into_iter()
        .map(usize::from)
        .collect();

    let now = Instant::now();
    let sa = SuffixArrayBuilder::new(&text)?
        .compact_alphabet(args.compact)
        .algorithm(args.algorithm.into())
        .verbose(args.verbose > 0)
        .build()?;
    info!("Elapsed sec: {}", now.elapsed().as_millis() as f64 / 1000.0);

    let mut writer: Box<dyn Write> = match args.output_file.as_ref() {
        Some(output_file) => Box::new(BufWriter::new(File::create(output_file)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    for pos in sa {
        writeln!(writer, "{}", pos)?;
    }
    writer.flush()?;

    Ok(())
}
