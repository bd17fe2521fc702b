//! Print or write the OpenAPI document.

use std::path::PathBuf;

use attendance::doc::ApiDoc;
use clap::{Parser, ValueEnum};
use color_eyre::eyre::Result;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Render the attendance API's OpenAPI document"
)]
struct CliArgs {
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write to this file instead of standard output.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let document = ApiDoc::openapi();
    let rendered = match args.format {
        Format::Json => document.to_pretty_json()?,
        Format::Yaml => document.to_yaml()?,
    };
    match args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }
    Ok(())
}
