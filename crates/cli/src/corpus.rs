use anyhow::{Context, Result};
use brainwall::{ProblemDoc, SolutionDoc, ValidationError};
use std::fs;
use std::path::{Path, PathBuf};

/// Highest bonus-usage mask a candidate file name may carry (`<n>_<mask>.json`).
pub const MAX_MASK: u32 = 7;

/// Read and parse a problem document. I/O failures count as malformed input.
pub fn load_problem(path: &Path) -> brainwall::Result<ProblemDoc> {
    ProblemDoc::from_json(&read(path)?)
}

pub fn load_solution(path: &Path) -> brainwall::Result<SolutionDoc> {
    SolutionDoc::from_json(&read(path)?)
}

fn read(path: &Path) -> brainwall::Result<String> {
    fs::read_to_string(path)
        .map_err(|e| ValidationError::Parse(format!("reading {}: {e}", path.display())))
}

/// Sorted problem numbers of the `<n>.json` files directly inside `dir`.
///
/// Files whose stem is not a plain number are ignored.
pub fn numeric_stems(dir: &Path) -> Result<Vec<u32>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(n) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<u32>().ok())
        {
            out.push(n);
        }
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

pub fn numbered(dir: &Path, n: u32) -> PathBuf {
    dir.join(format!("{n}.json"))
}

/// Existing candidate files for problem `n` in `dir`: the plain `<n>.json`
/// first, then `<n>_<mask>.json` for masks in ascending order.
pub fn candidates(dir: &Path, n: u32) -> Vec<PathBuf> {
    std::iter::once(numbered(dir, n))
        .chain((1..=MAX_MASK).map(|mask| dir.join(format!("{n}_{mask}.json"))))
        .filter(|p| p.is_file())
        .collect()
}
