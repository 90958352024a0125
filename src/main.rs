use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_derive::{Parser, Subcommand};
use tracing::info;

mod command;
mod normalize;
mod pna;
#[cfg(test)]
mod testutil;

#[derive(Debug, Parser)]
#[command(name = "pna-tools", about = "Extracts and repacks PNA sprite archives")]
struct Args {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Extract every embedded image of an archive to an output directory
    #[command(name = "e")]
    Extract {
        /// Path to the .pna archive
        archive: PathBuf,

        /// Directory the images are written to (must exist)
        #[arg(default_value = "./out")]
        output: PathBuf,
    },

    /// Rebuild an archive, substituting payloads from a replacement directory
    #[command(name = "i")]
    Repack {
        /// Directory holding `{stem}_{index}.png` replacement images
        replacements: PathBuf,

        /// Path to the original .pna archive
        archive: PathBuf,

        /// Path the rebuilt archive is written to
        #[arg(default_value = "out.pna")]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    // a bare invocation prints usage and exits cleanly
    if std::env::args().len() < 3 {
        let _ = Args::command().print_help();
        return;
    }

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Failed to process archive: {:#}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.mode {
        Mode::Extract { archive, output } => {
            let entries = command::extract::extract(&archive, &output)?;
            let written = entries.iter().filter(|e| e.size > 0).count();
            info!("Extracted {} images from {}", written, archive.display());
        }
        Mode::Repack { replacements, archive, output } => {
            let data = command::repack::repack(&replacements, &archive)?;
            std::fs::write(&output, &data)
                .with_context(|| format!("Failed to write repacked archive to {}", output.display()))?;
            info!("Wrote {} bytes to {}", data.len(), output.display());
        }
    }
    Ok(())
}
