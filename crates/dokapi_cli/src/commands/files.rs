//! Files command - List referenced content files.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::debug;

#[derive(Args)]
pub struct FilesArgs {
    /// Book directory containing dokapi.json
    #[arg(env = "DOKAPI_INPUT")]
    input: PathBuf,

    /// Print paths relative to the content directory
    #[arg(long)]
    relative: bool,
}

pub fn execute(args: FilesArgs) -> Result<()> {
    debug!("Listing content files of {}", args.input.display());
    let book = dokapi_book::parse(&args.input)?;
    let content_dir = book.content_dir();

    for file in book.referenced_files() {
        let shown = if args.relative {
            file.strip_prefix(&content_dir).unwrap_or(file)
        } else {
            file.as_path()
        };
        println!("{}", shown.display());
    }

    Ok(())
}
