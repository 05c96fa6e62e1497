//! Random workload runner
//!
//! This module provides the `workload` subcommand. It drives a
//! `RedBlackTree<usize, usize>` with a random interleaving of inserts and
//! removes over a bounded key universe: a drawn key that is present gets
//! removed, an absent one gets inserted with itself as the value.

use anyhow::{Context, Result, bail};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rbmap::tree::RedBlackTree;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

const DEFAULT_OPERATIONS: usize = 10_000;
const DEFAULT_KEY_UNIVERSE: usize = 10_000;

/// Arguments for the workload subcommand
#[derive(Args, Debug, Default)]
pub struct WorkloadArgs {
    /// Scenario YAML file path
    #[arg(long, short = 's')]
    pub scenario: Option<PathBuf>,

    /// Number of operations to run
    #[arg(long, short = 'n')]
    pub operations: Option<usize>,

    /// Keys are drawn from 0..key_universe
    #[arg(long, short = 'u')]
    pub key_universe: Option<usize>,

    /// Random seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Validate the tree after every operation
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub verify: Option<bool>,

    /// Write the summary as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Scenario configuration from YAML
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioConfig {
    name: Option<String>,
    operations: Option<usize>,
    key_universe: Option<usize>,
    seed: Option<u64>,
    verify: Option<bool>,
}

/// Fully resolved workload settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadConfig {
    pub operations: usize,
    pub key_universe: usize,
    pub seed: u64,
    pub verify: bool,
}

impl WorkloadConfig {
    /// Resolve settings from CLI flags, the environment and a scenario.
    ///
    /// Priority: CLI > Environment > Scenario YAML > Default
    fn resolve<F>(args: &WorkloadArgs, scenario: &ScenarioConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let operations = match args.operations {
            Some(operations) => operations,
            None => env_value(&lookup, "WORKLOAD_OPERATIONS")?
                .or(scenario.operations)
                .unwrap_or(DEFAULT_OPERATIONS),
        };

        let key_universe = match args.key_universe {
            Some(key_universe) => key_universe,
            None => env_value(&lookup, "WORKLOAD_KEY_UNIVERSE")?
                .or(scenario.key_universe)
                .unwrap_or(DEFAULT_KEY_UNIVERSE),
        };
        if key_universe == 0 {
            bail!("key universe must contain at least one key");
        }

        let seed = match args.seed {
            Some(seed) => seed,
            None => env_value(&lookup, "WORKLOAD_SEED")?
                .or(scenario.seed)
                .unwrap_or_else(rand::random),
        };

        let verify = match args.verify {
            Some(verify) => verify,
            None => env_value(&lookup, "WORKLOAD_VERIFY")?
                .or(scenario.verify)
                .unwrap_or(false),
        };

        Ok(Self {
            operations,
            key_universe,
            seed,
            verify,
        })
    }
}

/// Outcome of a workload run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub seed: u64,
    pub operations: usize,
    pub inserts: usize,
    pub removes: usize,
    pub len: usize,
    pub height: usize,
    pub black_height: usize,
}

/// Parse an environment variable, treating an unset variable as absent
fn env_value<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|error| anyhow::anyhow!("invalid {name}={raw}: {error}"))
        })
        .transpose()
}

/// Load a scenario file
fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    serde_yaml::from_str(&content).context("Failed to parse scenario YAML")
}

/// Largest height a valid tree of `len` entries may have, `2 * log2(len + 1)`
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn height_bound(len: usize) -> usize {
    (2.0 * ((len + 1) as f64).log2()).floor() as usize
}

/// Validate the invariants and the height bound
fn check(tree: &RedBlackTree<usize, usize>) -> Result<()> {
    tree.validate().context("red-black invariant violated")?;

    let bound = height_bound(tree.len());
    if tree.height() > bound {
        bail!(
            "height {} exceeds bound {} for {} entries",
            tree.height(),
            bound,
            tree.len()
        );
    }
    Ok(())
}

/// Run the workload described by `config`
pub fn execute(config: &WorkloadConfig) -> Result<Summary> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut tree = RedBlackTree::with_capacity(config.key_universe.min(config.operations));
    let mut present = vec![false; config.key_universe];
    let mut inserts = 0;
    let mut removes = 0;

    for step in 0..config.operations {
        let key = rng.random_range(0..config.key_universe);

        if present[key] {
            info!(operation = "remove", key);
            tree.remove(&key)
                .with_context(|| format!("operation {step}: removing present key {key}"))?;
            present[key] = false;
            removes += 1;
        } else {
            info!(operation = "insert", key);
            tree.insert(key, key)
                .with_context(|| format!("operation {step}: inserting absent key {key}"))?;
            present[key] = true;
            inserts += 1;
        }

        if config.verify {
            check(&tree).with_context(|| format!("after operation {step} on key {key}"))?;
        }
    }

    let expected = present.iter().filter(|&&is_present| is_present).count();
    if tree.len() != expected {
        bail!(
            "tree holds {} entries but {} keys are marked present",
            tree.len(),
            expected
        );
    }

    let black_height = tree
        .black_height()
        .context("black height differs between paths")?;

    Ok(Summary {
        seed: config.seed,
        operations: config.operations,
        inserts,
        removes,
        len: tree.len(),
        height: tree.height(),
        black_height,
    })
}

/// Write the summary as pretty-printed JSON
fn write_report(path: &Path, summary: &Summary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("Failed to encode summary")?;
    fs::write(path, json).with_context(|| format!("Failed to write report {}", path.display()))
}

/// Entry point of the workload subcommand
pub fn run(args: &WorkloadArgs) -> Result<()> {
    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => ScenarioConfig::default(),
    };
    let config = WorkloadConfig::resolve(args, &scenario, |name| env::var(name).ok())?;

    eprintln!("==============================================");
    eprintln!("  Red-Black Tree Workload (xtask)");
    eprintln!("==============================================");
    eprintln!();
    eprintln!("Configuration:");
    if let Some(name) = &scenario.name {
        eprintln!("  Scenario:       {name}");
    }
    eprintln!("  Operations:     {}", config.operations);
    eprintln!("  Key Universe:   {}", config.key_universe);
    eprintln!("  Seed:           {}", config.seed);
    eprintln!("  Verify:         {}", config.verify);
    eprintln!();

    let summary = execute(&config)?;

    eprintln!("Summary:");
    eprintln!("  Inserts:        {}", summary.inserts);
    eprintln!("  Removes:        {}", summary.removes);
    eprintln!("  Final Length:   {}", summary.len);
    eprintln!("  Height:         {}", summary.height);
    eprintln!("  Black Height:   {}", summary.black_height);

    if let Some(path) = &args.report {
        write_report(path, &summary)?;
        eprintln!("  Report:         {}", path.display());
    }

    Ok(())
}
