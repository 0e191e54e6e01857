use std::fs;
use std::path::{Path, PathBuf};

/// Configuration required to run the conversion.
/// This decouples the logic from how the arguments were parsed (CLI/Config file).
#[derive(Clone)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub outdir: PathBuf,
    pub overwrite: bool,
    pub quiet: bool,
}

/// Collect candidate notebook files for an input path.
///
/// A file is a candidate if its extension is `.ipynb` (matched
/// case-insensitively). A directory yields its immediate `.ipynb` children
/// in lexical filename order; there is no recursion. Unreadable or missing
/// paths yield no candidates.
pub fn find_notebook_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        if has_ipynb_extension(path) {
            return vec![path.to_path_buf()];
        }
        return Vec::new();
    }

    let Ok(entries) = fs::read_dir(path) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| has_ipynb_extension(p))
        .collect();
    files.sort();
    files
}

fn has_ipynb_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ipynb"))
}

/// Derived output path: the input base name without its extension, plus
/// `.txt`, inside the output directory.
pub fn output_path_for(input: &Path, outdir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    outdir.join(format!("{stem}.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_children_come_back_in_lexical_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.ipynb", "a.ipynb", "notes.txt", "c.IPYNB"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/d.ipynb"), "{}").unwrap();

        let files = find_notebook_files(dir.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.ipynb", "b.ipynb", "c.IPYNB"]);
    }

    #[test]
    fn single_file_is_its_own_candidate_list() {
        let dir = tempfile::tempdir().unwrap();
        let nb = dir.path().join("one.ipynb");
        fs::write(&nb, "{}").unwrap();

        assert_eq!(find_notebook_files(&nb), vec![nb]);
    }

    #[test]
    fn non_notebook_inputs_yield_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let other = dir.path().join("readme.md");
        fs::write(&other, "hi").unwrap();

        assert!(find_notebook_files(&other).is_empty());
        assert!(find_notebook_files(&dir.path().join("does-not-exist")).is_empty());
    }

    #[test]
    fn output_path_swaps_extension_and_directory() {
        let out = Path::new("/tmp/out");
        assert_eq!(
            output_path_for(Path::new("/data/report.ipynb"), out),
            PathBuf::from("/tmp/out/report.txt")
        );
        assert_eq!(
            output_path_for(Path::new("a.b.ipynb"), out),
            PathBuf::from("/tmp/out/a.b.txt")
        );
    }
}
