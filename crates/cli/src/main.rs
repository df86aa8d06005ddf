use anyhow::{Context, Result};
use brainwall::judge::Edge;
use brainwall::{
    collected_bonuses, validate, validate_with, JudgeCfg, Judgement, Modifier, ProblemDoc,
    ValidationResult,
};
use clap::{Args, Parser, Subcommand};
use polars::prelude::*;
use rayon::prelude::*;
use serde_json::json;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod corpus;
mod provenance;

/// Exit status of `check` when the placement is rejected or unreadable.
const REJECTED: u8 = 42;
const ACCEPTED: u8 = 0;

#[derive(Parser)]
#[command(name = "brainwall")]
#[command(about = "Judge figure placements against hole problems")]
struct Cmd {
    /// Log at DEBUG instead of INFO (logs go to stderr)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Judge one solution; prints collected bonuses and score, exits 42 on rejection
    Check {
        problem: PathBuf,
        solution: PathBuf,
        #[command(flatten)]
        modifier: ModifierArgs,
        /// Print the full result record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Judge every `<n>.json` present in both directories
    Batch {
        problems: PathBuf,
        solutions: PathBuf,
    },
    /// Pick the best-scoring candidate per problem across solution directories
    Golden {
        problems: PathBuf,
        #[arg(long, num_args = 1.., required = true)]
        candidates: Vec<PathBuf>,
        #[arg(long)]
        begin: Option<u32>,
        #[arg(long)]
        end: Option<u32>,
        /// Write a CSV digest (and provenance sidecar) of the picks
        #[arg(long)]
        digest: Option<PathBuf>,
    },
    /// List bonuses each solution lands on, without judging it
    Bonuses {
        problems: PathBuf,
        solutions: PathBuf,
    },
}

/// Force a modifier instead of honouring the solution's bonus request.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
struct ModifierArgs {
    #[arg(long)]
    globalist: bool,
    #[arg(long)]
    wallhack: bool,
    #[arg(long)]
    superflex: bool,
    /// Split figure edge (U, V) at its midpoint
    #[arg(long, num_args = 2, value_names = ["U", "V"])]
    break_a_leg: Option<Vec<usize>>,
}

impl ModifierArgs {
    fn forced(&self) -> Option<Modifier> {
        if self.globalist {
            Some(Modifier::Globalist)
        } else if self.wallhack {
            Some(Modifier::Wallhack)
        } else if self.superflex {
            Some(Modifier::Superflex)
        } else {
            match self.break_a_leg.as_deref() {
                Some(&[u, v]) => Some(Modifier::BreakALeg(Edge(u, v))),
                _ => None,
            }
        }
    }
}

fn main() -> Result<ExitCode> {
    let cmd = Cmd::parse();
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Check {
            problem,
            solution,
            modifier,
            json,
        } => {
            let cfg = JudgeCfg {
                forced: modifier.forced(),
                ..JudgeCfg::default()
            };
            check(&problem, &solution, cfg, json, &mut out, &mut err).map(ExitCode::from)
        }
        Action::Batch {
            problems,
            solutions,
        } => batch(&problems, &solutions, &mut out, &mut err).map(|()| ExitCode::SUCCESS),
        Action::Golden {
            problems,
            candidates,
            begin,
            end,
            digest,
        } => golden(&problems, &candidates, begin, end, digest.as_deref(), &mut out)
            .map(|()| ExitCode::SUCCESS),
        Action::Bonuses {
            problems,
            solutions,
        } => bonuses(&problems, &solutions, &mut out).map(|()| ExitCode::SUCCESS),
    }
}

fn judge_files(problem: &Path, solution: &Path, cfg: JudgeCfg) -> brainwall::Result<Judgement> {
    let problem = corpus::load_problem(problem)?;
    let solution = corpus::load_solution(solution)?;
    validate_with(&problem, &solution, cfg)
}

/// Judge one pair; returns the process exit status.
fn check(
    problem: &Path,
    solution: &Path,
    cfg: JudgeCfg,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8> {
    tracing::debug!(
        problem = %problem.display(),
        solution = %solution.display(),
        forced = ?cfg.forced,
        "check"
    );
    let outcome = judge_files(problem, solution, cfg);
    if json {
        writeln!(out, "{}", serde_json::to_string(&ValidationResult::from(&outcome))?)?;
    }
    match outcome {
        Ok(judgement) => {
            if !json {
                writeln!(out, "{}", serde_json::to_string(&judgement.collected)?)?;
                writeln!(out, "{}", judgement.score)?;
            }
            Ok(ACCEPTED)
        }
        Err(e) => {
            writeln!(err, "rejected at {}: {e}", e.stage())?;
            Ok(REJECTED)
        }
    }
}

fn batch(
    problems: &Path,
    solutions: &Path,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let present: HashSet<u32> = corpus::numeric_stems(solutions)?.into_iter().collect();
    let ids: Vec<u32> = corpus::numeric_stems(problems)?
        .into_iter()
        .filter(|n| present.contains(n))
        .collect();
    let outcomes: Vec<(u32, brainwall::Result<Judgement>)> = ids
        .par_iter()
        .map(|&n| {
            let outcome = judge_files(
                &corpus::numbered(problems, n),
                &corpus::numbered(solutions, n),
                JudgeCfg::default(),
            );
            (n, outcome)
        })
        .collect();

    let mut failed = 0usize;
    for (n, outcome) in &outcomes {
        match outcome {
            Ok(j) => writeln!(out, "{n} {}", j.score)?,
            Err(e) => {
                failed += 1;
                tracing::debug!(problem = n, "{e}");
                writeln!(err, "{n} FAILED")?;
            }
        }
    }
    tracing::info!(judged = outcomes.len(), failed, "batch done");
    Ok(())
}

/// Lowest-scoring accepted candidate for one problem.
#[derive(Debug, Clone, PartialEq)]
struct Pick {
    source: String,
    file: PathBuf,
    score: u64,
}

fn source_name(dir: &Path) -> String {
    dir.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Scan `dirs` in order; ties keep the earlier candidate.
fn best_candidate(problem: &ProblemDoc, dirs: &[PathBuf], n: u32) -> Option<Pick> {
    let mut best: Option<Pick> = None;
    for dir in dirs {
        for file in corpus::candidates(dir, n) {
            let outcome = corpus::load_solution(&file).and_then(|s| validate(problem, &s));
            match outcome {
                Ok(j) if best.as_ref().map_or(true, |b| j.score < b.score) => {
                    best = Some(Pick {
                        source: source_name(dir),
                        file,
                        score: j.score,
                    });
                }
                Ok(_) => {}
                Err(e) => tracing::debug!(file = %file.display(), "{e}"),
            }
        }
    }
    best
}

fn golden(
    problems: &Path,
    dirs: &[PathBuf],
    begin: Option<u32>,
    end: Option<u32>,
    digest: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let ids: Vec<u32> = corpus::numeric_stems(problems)?
        .into_iter()
        .filter(|&n| begin.map_or(true, |b| n >= b) && end.map_or(true, |e| n <= e))
        .collect();
    let picks: Vec<(u32, Pick)> = ids
        .par_iter()
        .filter_map(|&n| match corpus::load_problem(&corpus::numbered(problems, n)) {
            Ok(problem) => best_candidate(&problem, dirs, n).map(|pick| (n, pick)),
            Err(e) => {
                tracing::warn!(problem = n, "{e}");
                None
            }
        })
        .collect();

    for (n, pick) in &picks {
        writeln!(out, "{} for {n} = {}", pick.source, pick.score)?;
    }
    tracing::info!(problems = ids.len(), picked = picks.len(), "golden done");

    if let Some(path) = digest {
        write_digest(path, &picks)?;
        let params = json!({
            "problems": problems.to_string_lossy(),
            "candidates": dirs.iter().map(|d| d.to_string_lossy().into_owned()).collect::<Vec<_>>(),
            "begin": begin,
            "end": end,
        });
        provenance::write_sidecar(path, provenance::Sidecar::new(params))?;
    }
    Ok(())
}

fn write_digest(path: &Path, picks: &[(u32, Pick)]) -> Result<()> {
    let mut df = df!(
        "problem" => picks.iter().map(|(n, _)| *n).collect::<Vec<u32>>(),
        "source" => picks.iter().map(|(_, p)| p.source.clone()).collect::<Vec<String>>(),
        "file" => picks
            .iter()
            .map(|(_, p)| p.file.to_string_lossy().into_owned())
            .collect::<Vec<String>>(),
        "score" => picks.iter().map(|(_, p)| p.score).collect::<Vec<u64>>(),
    )?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

fn bonuses(problems: &Path, solutions: &Path, out: &mut impl Write) -> Result<()> {
    for n in corpus::numeric_stems(solutions)? {
        let problem = corpus::load_problem(&corpus::numbered(problems, n));
        let solution = corpus::load_solution(&corpus::numbered(solutions, n));
        let (problem, solution) = match (problem, solution) {
            (Ok(p), Ok(s)) => (p, s),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(problem = n, "{e}");
                continue;
            }
        };
        for bonus in collected_bonuses(&problem, &solution) {
            writeln!(out, "Got bonus in {n}.json for {}: {}", bonus.problem, bonus.bonus)?;
        }
    }
    Ok(())
}
