//! # ipynb2txt
//!
//! A CLI tool that converts Jupyter notebook files (`.ipynb`) into plain
//! human-readable text files.
//!
//! ## What it does
//!
//! A notebook is a JSON document holding an ordered list of cells along with
//! the outputs captured when code cells ran. This tool extracts the cell
//! sources and text outputs and writes them to a `.txt` file with clear
//! separators, preserving cell order. The result is a greppable, diff-friendly
//! rendering of notebook content that needs no notebook viewer.
//!
//! The input notebook is never modified.
//!
//! ## Usage
//!
//! ```sh
//! # Convert one notebook
//! ipynb2txt analysis.ipynb -o ./txt
//!
//! # Convert every notebook in a directory, replacing earlier runs
//! ipynb2txt ./notebooks -o ./txt --overwrite
//! ```
//!
//! Existing `.txt` files are skipped unless `--overwrite` is given.
//! Preferences can be persisted in `~/.config/ipynb2txt/config.toml`.
//!
//! ## Out of scope
//!
//! Notebook code is not executed, rich outputs (images, HTML, LaTeX) are not
//! rendered, and directories are not traversed recursively.
