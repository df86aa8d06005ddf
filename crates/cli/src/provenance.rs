use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Contents of `<report>.provenance.json`.
#[derive(Debug, Serialize)]
pub struct Sidecar {
    pub code_rev: String,
    pub judge_version: &'static str,
    pub params: Value,
    pub outputs: Vec<String>,
}

impl Sidecar {
    pub fn new(params: Value) -> Self {
        Self {
            code_rev: current_git_rev(),
            judge_version: brainwall::VERSION,
            params,
            outputs: Vec::new(),
        }
    }
}

/// Write the sidecar next to `report` and return its path.
pub fn write_sidecar(report: &Path, mut sidecar: Sidecar) -> Result<PathBuf> {
    let path = sidecar_path(report);
    sidecar.outputs.push(report.to_string_lossy().into_owned());
    fs::write(&path, serde_json::to_vec_pretty(&sidecar)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(report: &Path) -> PathBuf {
    let stem = report
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    report.with_file_name(format!("{stem}.provenance.json"))
}

pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
