//! Rendering of a parsed notebook into the plain-text output format.
//!
//! Rendering is a pure function of the input document: the same notebook
//! always produces byte-identical text.

use std::io::Write;

use crate::notebook::{Cell, CellType, Notebook, OutputType};

/// Separator written after the header and after every cell block: a newline,
/// eighty dashes, and a newline.
pub const CELL_SEPARATOR: &str =
    "\n--------------------------------------------------------------------------------\n";

/// Render one cell as a text block.
///
/// The block starts with a `Cell type:` line. Markdown and code cells get a
/// label line and their trimmed source; code cells additionally get an
/// `-- Outputs --` section when outputs were captured. Any other cell type
/// falls back to its trimmed raw source with no label.
pub fn cell_block(cell: &Cell) -> String {
    let mut parts: Vec<String> = vec![format!("Cell type: {}", cell.cell_type)];

    match &cell.cell_type {
        CellType::Markdown => {
            parts.push("-- Markdown --".to_string());
            parts.push(cell.source_text().trim_end().to_string());
        }
        CellType::Code => {
            parts.push("-- Code --".to_string());
            parts.push(cell.source_text().trim_end().to_string());

            if !cell.outputs.is_empty() {
                let mut out_lines: Vec<String> = vec!["-- Outputs --".to_string()];
                for (i, output) in cell.outputs.iter().enumerate() {
                    out_lines.push(format!("[{}] output_type: {}", i + 1, output.output_type));

                    if let Some(text) = &output.text
                        && !text.is_empty()
                    {
                        out_lines.push(text.concat().trim_end().to_string());
                    }

                    if let Some(plain) = output.text_plain() {
                        out_lines.push(plain.trim_end().to_string());
                    }

                    if output.output_type == OutputType::Error {
                        out_lines
                            .extend(output.traceback.iter().map(|l| l.trim_end().to_string()));
                    }
                }
                parts.push(out_lines.join("\n"));
            }
        }
        CellType::Other(_) => {
            parts.push(cell.source_text().trim_end().to_string());
        }
    }

    parts.join("\n")
}

/// Write the full text rendering of a notebook: a header naming the source
/// and its kernelspec, then every cell block in order, each followed by the
/// separator.
pub fn write_notebook<W: Write>(
    writer: &mut W,
    display_name: &str,
    notebook: &Notebook,
) -> std::io::Result<()> {
    let kernelspec = match &notebook.metadata.kernelspec {
        Some(value) if !value.is_null() => serde_json::to_string(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?,
        _ => String::from("{}"),
    };

    writeln!(writer, "Notebook: {display_name}")?;
    writeln!(writer, "Kernelspec: {kernelspec}")?;
    write!(writer, "{CELL_SEPARATOR}")?;

    for (i, cell) in notebook.cells.iter().enumerate() {
        writeln!(writer, "Cell {}", i + 1)?;
        write!(writer, "{}", cell_block(cell))?;
        write!(writer, "{CELL_SEPARATOR}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::{parse_notebook_from_str, SourceText};

    fn render(notebook: &Notebook, name: &str) -> String {
        let mut buf = Vec::new();
        write_notebook(&mut buf, name, notebook).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn separator_is_eighty_dashes_between_newlines() {
        assert_eq!(CELL_SEPARATOR.len(), 82);
        assert!(CELL_SEPARATOR.starts_with('\n'));
        assert!(CELL_SEPARATOR.ends_with('\n'));
        assert!(CELL_SEPARATOR.trim().chars().all(|c| c == '-'));
        assert_eq!(CELL_SEPARATOR.trim().len(), 80);
    }

    #[test]
    fn markdown_cell_block() {
        let cell = Cell {
            cell_type: CellType::Markdown,
            source: Some(SourceText::Fragments(vec![
                "# Title\n".to_string(),
                "body".to_string(),
            ])),
            outputs: Vec::new(),
        };
        assert_eq!(
            cell_block(&cell),
            "Cell type: markdown\n-- Markdown --\n# Title\nbody"
        );
    }

    #[test]
    fn code_cell_block_with_stream_output() {
        let nb = parse_notebook_from_str(
            r#"{
                "cells": [
                    {
                        "cell_type": "code",
                        "source": ["print(1)"],
                        "outputs": [{"output_type": "stream", "text": ["1\n"]}]
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            cell_block(&nb.cells[0]),
            "Cell type: code\n-- Code --\nprint(1)\n-- Outputs --\n[1] output_type: stream\n1"
        );
    }

    #[test]
    fn code_cell_without_outputs_has_no_outputs_section() {
        let nb = parse_notebook_from_str(
            r#"{"cells": [{"cell_type": "code", "source": ["x = 1\n"]}]}"#,
        )
        .unwrap();
        assert_eq!(cell_block(&nb.cells[0]), "Cell type: code\n-- Code --\nx = 1");
    }

    #[test]
    fn unrecognized_cell_type_renders_unlabeled_source() {
        let nb = parse_notebook_from_str(
            r#"{"cells": [{"cell_type": "raw", "source": "%%raw directive\n"}]}"#,
        )
        .unwrap();
        assert_eq!(cell_block(&nb.cells[0]), "Cell type: raw\n%%raw directive");
    }

    #[test]
    fn error_output_renders_traceback_lines() {
        let nb = parse_notebook_from_str(
            r#"{
                "cells": [
                    {
                        "cell_type": "code",
                        "source": ["1 / 0"],
                        "outputs": [
                            {
                                "output_type": "error",
                                "traceback": ["Traceback:   ", "ZeroDivisionError: division by zero"]
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            cell_block(&nb.cells[0]),
            "Cell type: code\n-- Code --\n1 / 0\n-- Outputs --\n\
             [1] output_type: error\nTraceback:\nZeroDivisionError: division by zero"
        );
    }

    #[test]
    fn execute_result_renders_text_plain_data() {
        let nb = parse_notebook_from_str(
            r#"{
                "cells": [
                    {
                        "cell_type": "code",
                        "source": ["2 + 2"],
                        "outputs": [
                            {"output_type": "execute_result", "data": {"text/plain": "4"}}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            cell_block(&nb.cells[0]),
            "Cell type: code\n-- Code --\n2 + 2\n-- Outputs --\n[1] output_type: execute_result\n4"
        );
    }

    #[test]
    fn document_header_and_cell_numbering() {
        let nb = parse_notebook_from_str(
            r#"{
                "metadata": {"kernelspec": {"name": "python3", "display_name": "Python 3"}},
                "cells": [
                    {"cell_type": "markdown", "source": ["first"]},
                    {"cell_type": "code", "source": ["second"]},
                    {"cell_type": "raw", "source": ["third"]}
                ]
            }"#,
        )
        .unwrap();
        let text = render(&nb, "sample.ipynb");

        assert!(text.starts_with("Notebook: sample.ipynb\n"));
        assert!(text.contains(
            "Kernelspec: {\"display_name\":\"Python 3\",\"name\":\"python3\"}\n"
        ));

        let headers: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("Cell ") && !l.starts_with("Cell type:"))
            .collect();
        assert_eq!(headers, vec!["Cell 1", "Cell 2", "Cell 3"]);

        assert_eq!(text.matches(CELL_SEPARATOR.trim()).count(), 4);
        assert!(text.ends_with(CELL_SEPARATOR));
    }

    #[test]
    fn missing_kernelspec_renders_empty_mapping() {
        let nb = parse_notebook_from_str(r#"{"cells": []}"#).unwrap();
        let text = render(&nb, "empty.ipynb");
        assert_eq!(
            text,
            format!("Notebook: empty.ipynb\nKernelspec: {{}}\n{CELL_SEPARATOR}")
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let json = r#"{
            "metadata": {"kernelspec": {"name": "ir", "display_name": "R"}},
            "cells": [
                {"cell_type": "code", "source": ["plot(x)"], "outputs": [
                    {"output_type": "display_data", "data": {"text/plain": ["<plot>"]}}
                ]}
            ]
        }"#;
        let a = render(&parse_notebook_from_str(json).unwrap(), "r.ipynb");
        let b = render(&parse_notebook_from_str(json).unwrap(), "r.ipynb");
        assert_eq!(a, b);
    }
}
