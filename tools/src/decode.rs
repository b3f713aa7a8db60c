use std::error::Error;
use std::fs::File;
use std::io::Write;

use clap::Parser;
use log::info;

mod common;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Restores the text from its BWT.")]
struct Args {
    #[arg(short = 'i', long, help = "Path to an input bwt file")]
    input_file: String,

    #[arg(short = 'o', long, help = "Path to an output text file")]
    output_file: String,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    common::init_logger(args.verbose)?;

    let bwt = common::read_bytes(&args.input_file)?;
    info!("BWT length: {}", bwt.len());
    let text = skew_bwt::decode_bwt(&bwt)?;

    let mut writer = File::create(&args.output_file)?;
    writer.write_all(&text)?;

    Ok(())
}
