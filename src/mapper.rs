//! Output-to-source path mapping
//!
//! Derives the candidate source locations for a generated file by stripping
//! the compiler's output suffix and substituting each source extension.

use std::path::{Path, PathBuf};

/// Source extensions probed for each output file, in match order.
pub const SOURCE_EXTENSIONS: [&str; 2] = ["ts", "tsx"];

/// Generated suffixes: `.d.ts` or `.js`, optionally followed by `.map`.
/// Longest first so the `.map` variants win over their prefixes.
const OUTPUT_SUFFIXES: [&str; 4] = [".d.ts.map", ".js.map", ".d.ts", ".js"];

/// Strip a generated suffix from an output file name.
///
/// Returns `None` for names that carry no known suffix.
pub fn strip_output_suffix(file_name: &str) -> Option<&str> {
    OUTPUT_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
}

/// Candidate source paths for one output file, in probe order.
///
/// A name without a generated suffix maps to itself, so plain assets copied
/// into the output tree survive as long as the same name exists under the
/// source root.
pub fn source_candidates(source_root: &Path, rel_dir: &Path, file_name: &str) -> Vec<PathBuf> {
    let dir = source_root.join(rel_dir);
    match strip_output_suffix(file_name) {
        Some(stem) => SOURCE_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{stem}.{ext}")))
            .collect(),
        None => vec![dir.join(file_name)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_each_generated_suffix() {
        assert_eq!(strip_output_suffix("a.js"), Some("a"));
        assert_eq!(strip_output_suffix("a.js.map"), Some("a"));
        assert_eq!(strip_output_suffix("a.d.ts"), Some("a"));
        assert_eq!(strip_output_suffix("a.d.ts.map"), Some("a"));
    }

    #[test]
    fn keeps_inner_dots_intact() {
        assert_eq!(strip_output_suffix("a.test.js"), Some("a.test"));
        assert_eq!(strip_output_suffix("v1.2.d.ts.map"), Some("v1.2"));
    }

    #[test]
    fn unknown_names_do_not_strip() {
        assert_eq!(strip_output_suffix("styles.css"), None);
        assert_eq!(strip_output_suffix("a.ts"), None);
        assert_eq!(strip_output_suffix("a.map"), None);
        assert_eq!(strip_output_suffix("ajs"), None);
    }

    #[test]
    fn candidates_probe_ts_then_tsx() {
        let candidates =
            source_candidates(Path::new("src"), Path::new("widgets"), "button.js");
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("src/widgets/button.ts"),
                PathBuf::from("src/widgets/button.tsx"),
            ]
        );
    }

    #[test]
    fn candidates_for_plain_asset_is_same_name() {
        let candidates = source_candidates(Path::new("src"), Path::new(""), "logo.svg");
        assert_eq!(candidates, vec![PathBuf::from("src/logo.svg")]);
    }

    #[test]
    fn candidates_at_tree_root() {
        let candidates = source_candidates(Path::new("src"), Path::new(""), "index.d.ts");
        assert_eq!(
            candidates,
            vec![PathBuf::from("src/index.ts"), PathBuf::from("src/index.tsx")]
        );
    }
}
