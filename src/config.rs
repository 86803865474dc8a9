//! Project configuration
//!
//! Reads `rootDir` and `outDir` from a tsconfig-style file. The format is
//! comment- and trailing-comma-tolerant JSON, so parsing goes through
//! `json5`. Every other key in the file is ignored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{SweepError, SweepResult};

/// Resolved source and output roots for one project.
///
/// Immutable for the process lifetime; both roots are resolved relative to
/// the directory containing the config file.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Directory containing the human-authored sources
    pub source_root: PathBuf,
    /// Directory populated by the compiler
    pub output_root: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

// The fields deserialize as raw values: a non-string `rootDir` must fail the
// same way as a missing one, not as a parse error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    root_dir: Option<serde_json::Value>,
    out_dir: Option<serde_json::Value>,
}

impl ProjectConfig {
    /// Load the configuration from a tsconfig-style file.
    pub fn load(path: &Path) -> SweepResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SweepError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                SweepError::Io(e)
            }
        })?;

        let parsed: ConfigFile =
            json5::from_str(&text).map_err(|e| SweepError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let options = parsed.compiler_options;
        let roots = options
            .root_dir
            .as_ref()
            .and_then(|v| v.as_str())
            .zip(options.out_dir.as_ref().and_then(|v| v.as_str()));

        let (root_dir, out_dir) = roots.ok_or_else(|| SweepError::MissingRoots {
            path: path.to_path_buf(),
        })?;

        let project_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self {
            source_root: project_dir.join(root_dir),
            output_root: project_dir.join(out_dir),
        })
    }
}
