use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use eyre::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tempfile::NamedTempFile;

use crate::notebook;
use crate::render;
use crate::utils::{self, ConvertConfig};

/// Per-run outcome counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub found: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// The main entry point for the conversion logic.
/// Discovers candidate notebooks and converts them one by one; a failing
/// file is reported and does not abort the rest of the batch.
pub fn execute(config: &ConvertConfig) -> Result<Summary> {
    let files = utils::find_notebook_files(&config.input);
    let mut summary = Summary {
        found: files.len(),
        ..Summary::default()
    };

    if files.is_empty() {
        println!("No .ipynb files found at: {}", config.input.display());
        return Ok(summary);
    }

    let pb = if config.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::with_draw_target(
            Some(files.len() as u64),
            ProgressDrawTarget::stdout(),
        );
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
            )
            .unwrap()
            .progress_chars("=>-"),
        );
        bar.println(format!("Found {} notebooks.", files.len()));
        bar
    };

    for path in &files {
        let txt_path = utils::output_path_for(path, &config.outdir);

        if txt_path.exists() && !config.overwrite {
            report(
                &pb,
                config.quiet,
                format!(
                    "Skipping existing file (use --overwrite to replace): {}",
                    txt_path.display()
                ),
            );
            summary.skipped += 1;
            pb.inc(1);
            continue;
        }

        match convert_file(path, &txt_path, &config.outdir) {
            Ok(()) => {
                report(
                    &pb,
                    config.quiet,
                    format!("Converted: {} -> {}", path.display(), txt_path.display()),
                );
                summary.converted += 1;
            }
            Err(e) => {
                report(
                    &pb,
                    config.quiet,
                    format!("Failed to convert {}: {:#}", path.display(), e),
                );
                summary.failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    if !config.quiet {
        let mut line = format!(
            "Done. {} converted, {} skipped.",
            summary.converted, summary.skipped
        );
        if summary.failed > 0 {
            line.push_str(&format!(" Completed with {} error(s).", summary.failed));
        }
        eprintln!("{line}");
    }

    Ok(summary)
}

/// Per-file outcome lines always go to stdout; with a visible bar they must
/// be routed through it so the bar redraw does not garble them.
fn report(pb: &ProgressBar, quiet: bool, msg: String) {
    if quiet {
        println!("{msg}");
    } else {
        pb.println(msg);
    }
}

/// Convert a single notebook.
///
/// The text is written to a temporary file in the destination directory and
/// renamed over the final path once fully written, so a failed conversion
/// never leaves a partial `.txt` behind.
fn convert_file(src: &Path, dst: &Path, outdir: &Path) -> Result<()> {
    fs::create_dir_all(outdir).wrap_err_with(|| {
        format!("Failed to create output directory: {}", outdir.display())
    })?;

    let notebook = notebook::parse_notebook(src)?;

    let display_name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| src.display().to_string());

    let mut tmp = NamedTempFile::new_in(outdir).wrap_err_with(|| {
        format!("Failed to create temporary file in: {}", outdir.display())
    })?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        render::write_notebook(&mut writer, &display_name, &notebook)
            .wrap_err_with(|| format!("Failed to write: {}", dst.display()))?;
        writer.flush().wrap_err("Failed to flush output")?;
    }
    tmp.persist(dst)
        .wrap_err_with(|| format!("Failed to write: {}", dst.display()))?;

    Ok(())
}
