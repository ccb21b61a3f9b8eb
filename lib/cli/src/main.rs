use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{AppSettings, Parser, Subcommand};
use color_eyre::eyre::{ensure, WrapErr};
use elapsed::measure_time;
use itertools::Itertools;
use log::info;
use serde::Serialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use eqsat_core::cnf::Cnf;
use eqsat_core::parsing::ParseError;
use eqsat_core::smt::SmtCnf;
use eqsat_smt::SmtSolver;
use simple_sat::options::Options;
use simple_sat::solver::Solver;

use crate::report::{print_time, EngineStats, SatReport, SmtReport, TheoryStats};

mod report;

#[derive(Parser, Debug)]
#[clap(author, version)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
struct Cli {
    /// Logging verbosity: `-v` for debug, `-vv` for trace.
    #[clap(short, long, global = true)]
    #[clap(action = clap::ArgAction::Count)]
    verbose: u8,

    /// Treat an empty clause as satisfied instead of contradictory.
    #[clap(long, global = true)]
    legacy_empty_clause: bool,

    /// Path to output results (JSON).
    #[clap(short, long, value_name = "PATH", global = true)]
    output: Option<PathBuf>,

    #[clap(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Solve a DIMACS CNF formula.
    Sat {
        /// Path to input CNF, or `-` for stdin.
        #[clap(value_name = "PATH")]
        input: PathBuf,
    },
    /// Solve a CNF over equality atoms `a=b` / `a<>b`.
    Smt {
        /// Path to input formula, or `-` for stdin.
        #[clap(value_name = "PATH")]
        input: PathBuf,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;
    info!("cli = {:?}", cli);

    let options = Options {
        legacy_empty_clause: cli.legacy_empty_clause,
    };
    match &cli.mode {
        Mode::Sat { input } => run_sat(input, options, cli.output.as_deref()),
        Mode::Smt { input } => run_smt(input, options, cli.output.as_deref()),
    }
}

fn read_input<T, R, F>(input: &Path, from_reader: R, from_file: F) -> color_eyre::Result<T>
where
    R: FnOnce(io::StdinLock<'static>) -> Result<T, ParseError>,
    F: FnOnce(&Path) -> Result<T, ParseError>,
{
    let parsed = if input == Path::new("-") {
        from_reader(io::stdin().lock())
    } else {
        from_file(input)
    };
    parsed.wrap_err_with(|| format!("Could not parse '{}'", input.display()))
}

fn input_name(input: &Path) -> String {
    match input.file_name() {
        Some(name) if input != Path::new("-") => name.to_string_lossy().into_owned(),
        _ => "<stdin>".to_string(),
    }
}

fn write_report<T: Serialize>(output: Option<&Path>, report: &T) -> color_eyre::Result<()> {
    if let Some(output) = output {
        println!("Writing result to '{}'...", output.display());
        let file = File::create(output).wrap_err_with(|| format!("Could not create '{}'", output.display()))?;
        serde_json::to_writer_pretty(file, report)?;
    }
    Ok(())
}

fn run_sat(input: &Path, options: Options, output: Option<&Path>) -> color_eyre::Result<()> {
    let time_start = Instant::now();

    let (elapsed, cnf) = measure_time(|| read_input(input, Cnf::from_reader, |path| Cnf::from_file(path)));
    let cnf = cnf?;
    info!("Parsed {} variables and {} clauses in {}", cnf.num_vars, cnf.num_clauses(), elapsed);
    let time_parse = elapsed.duration();

    let mut solver = Solver::from_cnf(&cnf, options);
    let result = solver.solve();
    let time_total = time_start.elapsed();

    println!("{}", result);
    let model = result.model().map(|model| {
        model
            .iter()
            .enumerate()
            .map(|(i, &value)| if value { i as i32 + 1 } else { -(i as i32 + 1) })
            .collect_vec()
    });
    if let Some(model) = result.model() {
        println!("model: {}", model.iter().map(|&value| if value { "1" } else { "0" }).join(""));
        let eval = solver.verify(&cnf, model);
        println!("eval: {}", eval);
        ensure!(eval, "The model does not satisfy the formula");
    }

    let report = SatReport {
        name: input_name(input),
        result: result.to_string(),
        model,
        time_total,
        time_parse,
        engine: EngineStats::of(&solver),
    };
    write_report(output, &report)?;

    report.engine.print(time_total);
    print_time("parse", time_parse, time_total);
    println!("All done in {:?}", time_start.elapsed());
    Ok(())
}

fn run_smt(input: &Path, options: Options, output: Option<&Path>) -> color_eyre::Result<()> {
    let time_start = Instant::now();

    let (elapsed, formula) = measure_time(|| read_input(input, SmtCnf::from_reader, |path| SmtCnf::from_file(path)));
    let formula = formula?;
    info!("Parsed {} terms and {} clauses in {}", formula.num_terms, formula.num_clauses(), elapsed);
    let time_parse = elapsed.duration();

    let mut solver = SmtSolver::new(&formula, options);
    let result = solver.solve();
    let time_total = time_start.elapsed();

    println!("{}", result);
    if let Some(classes) = result.classes() {
        println!("classes: {}", classes.iter().join(" "));
        let eval = solver.verify(&formula, classes);
        println!("eval: {}", eval);
        ensure!(eval, "The term classes do not satisfy the formula");
    }

    let report = SmtReport {
        name: input_name(input),
        result: result.to_string(),
        classes: result.classes().map(|classes| classes.to_vec()),
        time_total,
        time_parse,
        theory: TheoryStats::of(&solver),
        engine: EngineStats::of(solver.solver()),
    };
    write_report(output, &report)?;

    report.theory.print(time_total);
    report.engine.print(time_total);
    print_time("parse", time_parse, time_total);
    println!("All done in {:?}", time_start.elapsed());
    Ok(())
}
