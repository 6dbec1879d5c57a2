//! Console front end: runs boot code and repairs its infinite loop.

mod report;
mod telemetry;

use anyhow::{Context, Result};
use argh::FromArgs;
use handheld_core::{ConsoleConfig, OutputFormat, Parts};
use handheld_ir::{parse_program, validate_program, Program};
use handheld_vm::{find_fix_detailed, run, EndCondition};
use report::{PartOne, Report};
use std::path::PathBuf;
use tracing::{debug, info};

/// Run handheld boot code: report the accumulator when the program first
/// loops, then find the single nop/jmp flip that lets it terminate.
#[derive(FromArgs)]
struct Arguments {
    /// program file to read,
    /// if not specified, stdin is used
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// output format: `text` or `json`
    #[argh(option, short = 'f')]
    format: Option<OutputFormat>,

    /// which answers to compute: `both`, `1` or `2`
    #[argh(option, short = 'p')]
    part: Option<Parts>,

    /// tracing filter used when RUST_LOG is not set
    #[argh(option)]
    log_filter: Option<String>,
}

impl Arguments {
    fn into_config(self) -> ConsoleConfig {
        let defaults = ConsoleConfig::default();
        ConsoleConfig {
            input_path: self.input,
            format: self.format.unwrap_or(defaults.format),
            log_filter: self.log_filter.unwrap_or(defaults.log_filter),
            parts: self.part.unwrap_or(defaults.parts),
        }
    }
}

fn load_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let stdin = std::io::stdin().lock();
            std::io::read_to_string(stdin).context("failed to read stdin")
        }
    }
}

fn solve(program: &Program, config: &ConsoleConfig) -> Result<Report> {
    let mut report = Report::default();

    if config.parts.includes_one() {
        let accumulator = run(program, EndCondition::DuplicateInstruction);
        info!("Part one: {:?}", accumulator);
        report.part_one = Some(PartOne(accumulator));
    }

    if config.parts.includes_two() {
        let fix = find_fix_detailed(program).context("failed to repair the program")?;
        report.part_two = Some(fix.into());
    }

    Ok(report)
}

fn main() -> Result<()> {
    let config = argh::from_env::<Arguments>().into_config();

    telemetry::init_telemetry(&config.log_filter)?;
    debug!(?config, "Starting handheld console");

    let text = load_input(config.input_path.as_ref())?;
    let program = parse_program(&text).context("failed to parse program")?;
    info!("Loaded program with {} instructions", program.len());

    for diagnostic in validate_program(&program) {
        debug!("{}", diagnostic);
    }

    let report = solve(&program, &config)?;
    print!("{}", report.render(config.format)?);

    Ok(())
}
