mod convert;
mod error;
mod notebook;
mod render;
mod utils;

use clap::Parser;
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Convert Jupyter notebooks (.ipynb) into plain human-readable text files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a .ipynb file or a directory containing .ipynb files.
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Output directory for the generated .txt files.
    /// Defaults to the directory of this executable if not set in config.
    #[arg(short, long, value_name = "OUTDIR")]
    outdir: Option<PathBuf>,

    /// Overwrite existing .txt files.
    #[arg(long)]
    overwrite: bool,

    /// Path to a specific configuration file.
    /// Defaults to $XDG_CONFIG_HOME/ipynb2txt/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Suppress the progress bar and the final summary.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Deserialize, Default)]
struct FileConfig {
    outdir: Option<PathBuf>,
    overwrite: Option<bool>,
}

fn default_outdir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

fn load_file_config(explicit_path: Option<&Path>) -> Result<FileConfig> {
    let path = if let Some(p) = explicit_path {
        if !p.exists() {
            return Err(eyre!("Config file not found: {}", p.display()));
        }
        Some(p.to_path_buf())
    } else {
        // Search: XDG/OS config dir, then nothing
        dirs::config_dir()
            .map(|d| d.join("ipynb2txt/config.toml"))
            .filter(|p| p.exists())
    };

    match path {
        None => Ok(FileConfig::default()),
        Some(p) => {
            let content = fs::read_to_string(&p)
                .wrap_err_with(|| format!("Failed to read config: {}", p.display()))?;
            toml::from_str(&content)
                .wrap_err_with(|| format!("Failed to parse config: {}", p.display()))
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 1. Load config file (CLI path > default path)
    let file_cfg = load_file_config(cli.config.as_deref())?;

    // 2. Resolve outdir (CLI > Config > executable directory)
    let outdir = cli
        .outdir
        .or(file_cfg.outdir)
        .or_else(default_outdir)
        .ok_or_else(|| {
            eyre!("Could not determine output directory.\nUse --outdir to specify manually, or set outdir in config.toml.")
        })?;

    // 3. Resolve overwrite (the CLI flag wins; config can turn it on by default)
    let overwrite = cli.overwrite || file_cfg.overwrite.unwrap_or(false);

    // 4. Build the conversion config
    let config = utils::ConvertConfig {
        input: cli.path,
        outdir,
        overwrite,
        quiet: cli.quiet,
    };

    // 5. Run the conversion
    let summary = convert::execute(&config)?;
    if summary.found == 0 {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
