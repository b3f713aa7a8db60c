use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use clap::Parser;
use log::info;
use skew_bwt::BwtBuilder;

mod common;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Constructs the BWT of the given text. \
                  Bytes 0xff are replaced with 0xfe and the last byte is replaced with 0xff."
)]
struct Args {
    #[arg(short = 'i', long, help = "Path to an input text file")]
    input_file: String,

    #[arg(short = 'o', long, help = "Path to an output bwt file")]
    output_file: Option<String>,

    #[arg(
        short = 't',
        long,
        help = "Flag to append a terminal byte 0xff instead of overwriting the last byte"
    )]
    terminator: bool,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    common::init_logger(args.verbose)?;

    let mut text = common::read_bytes(&args.input_file)?;
    if args.terminator {
        text.push(skew_bwt::bwt::SENTINEL);
    }
    let builder = BwtBuilder::new(&text)?.verbose(args.verbose > 0);

    let now = Instant::now();
    if let Some(output_file) = args.output_file.as_ref() {
        let writer = BufWriter::new(File::create(output_file)?);
        builder.build(writer)?;
    } else {
        builder.build(NullWriter)?;
    }
    info!("Elapsed sec: {}", now.elapsed().as_millis() as f64 / 1000.0);

    Ok(())
}

struct NullWriter;

impl std::io::Write for NullWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
