use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::catalog_cmd::{check_cmd, list_cmd};
use crate::config_data::write_sample_cfg;

mod catalog_cmd;
mod config_data;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Validates a content catalog
    Check(CheckArgs),
    /// Lists one page of blog posts from a content catalog
    List(ListArgs),
    /// Writes a sample configuration file
    SampleConfig(SampleConfigArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct CheckArgs {
    /// Catalog file
    #[arg(short, long, default_value = "content.toml")]
    catalog: PathBuf,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ListArgs {
    /// Catalog file
    #[arg(long, default_value = "content.toml")]
    catalog: PathBuf,

    /// Category to show. "All" for every category
    #[arg(short, long, default_value = "All")]
    category: String,

    /// Text to look for in titles, excerpts and tags
    #[arg(short, long, default_value = "")]
    query: String,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Posts per page
    #[arg(long, default_value_t = safari_site::listing::DEFAULT_PAGE_SIZE)]
    page_size: u32,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct SampleConfigArgs {
    /// Where to write the configuration
    #[arg(short, long, default_value = "safari-site.toml")]
    out_file: PathBuf,
}

fn run(args: Args) -> Result<bool> {
    match args {
        Args::Check(args) => check_cmd(&args.catalog),
        Args::List(args) => list_cmd(&args.catalog, &args.category, &args.query, args.page, args.page_size).map(|_| true),
        Args::SampleConfig(args) => {
            write_sample_cfg(&args.out_file)?;
            println!("Sample configuration written to {}", args.out_file.display());
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
