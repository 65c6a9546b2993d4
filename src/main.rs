// comp40: a lossy block-transform image codec. See SPEC_FULL.md.

#![allow(dead_code)]

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use comp40::codec;
use comp40::error::CodecError;
use comp40::image::{PpmReader, PpmWriter};

#[derive(Parser)]
#[command(name = "comp40", about = "Lossy block-transform image compressor")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Read a PPM (P6) image and write a compressed image to stdout (or --output).
  Compress {
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    output: Option<PathBuf>,
  },
  /// Read a compressed image and write a PPM (P6) image to stdout (or --output).
  Decompress {
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    output: Option<PathBuf>,
  },
}

fn open_input(path: &Option<PathBuf>) -> io::Result<Box<dyn Read>> {
  match path {
    Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
    None => Ok(Box::new(BufReader::new(io::stdin()))),
  }
}

fn open_output(path: &Option<PathBuf>) -> io::Result<Box<dyn Write>> {
  match path {
    Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
    None => Ok(Box::new(BufWriter::new(io::stdout()))),
  }
}

fn run(cli: Cli) -> Result<(), CodecError> {
  match cli.command {
    Command::Compress { input, output } => {
      let reader = open_input(&input)?;
      let mut writer = open_output(&output)?;
      let image = PpmReader::read(reader)?;
      codec::compress(&image, &mut writer)?;
      writer.flush()?;
      Ok(())
    }
    Command::Decompress { input, output } => {
      let reader = open_input(&input)?;
      let mut writer = open_output(&output)?;
      let image = codec::decompress(reader)?;
      PpmWriter::write(&mut writer, &image)?;
      writer.flush()?;
      Ok(())
    }
  }
}

fn main() {
  env_logger::init();
  let cli = Cli::parse();
  if let Err(err) = run(cli) {
    log::error!("{}", err);
    std::process::exit(1);
  }
}
