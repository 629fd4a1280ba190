use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "shorefx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the per-image fallback attempt plans as JSON.
    Plan(PlanArgs),
    /// Run a page scenario and report the final state as JSON.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input page model JSON.
    #[arg(long)]
    page: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page model JSON.
    #[arg(long)]
    page: PathBuf,

    /// Scenario JSON (available images + event stream).
    #[arg(long)]
    scenario: PathBuf,

    /// Seed for the wave parameter draws.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write the report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_page_json(path: &Path) -> anyhow::Result<shorefx::PageModel> {
    let f = File::open(path).with_context(|| format!("open page model '{}'", path.display()))?;
    let r = BufReader::new(f);
    let model: shorefx::PageModel =
        serde_json::from_reader(r).with_context(|| "parse page model JSON")?;
    Ok(model)
}

fn read_scenario_json(path: &Path) -> anyhow::Result<shorefx::Scenario> {
    let f = File::open(path).with_context(|| format!("open scenario '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scenario: shorefx::Scenario =
        serde_json::from_reader(r).with_context(|| "parse scenario JSON")?;
    Ok(scenario)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let model = read_page_json(&args.page)?;
    let plans = shorefx::sim::attempt_plans(&model)?;
    println!("{}", serde_json::to_string_pretty(&plans)?);
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let model = read_page_json(&args.page)?;
    let scenario = read_scenario_json(&args.scenario)?;
    let report = shorefx::simulate(&model, &scenario, args.seed)?;

    let json = serde_json::to_string_pretty(&report)?;
    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json)
                .with_context(|| format!("write report '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
