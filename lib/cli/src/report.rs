use std::time::Duration;

use num_format::{Locale, ToFormattedString};
use serde::Serialize;
use serde_with::serde_as;
use serde_with::DurationSecondsWithFrac;

use eqsat_smt::SmtSolver;
use simple_sat::Solver;

#[serde_as]
#[derive(Debug, Serialize)]
pub struct EngineStats {
    pub num_vars: usize,
    pub num_clauses: usize,
    pub num_decisions: usize,
    pub num_propagations: usize,
    pub num_conflicts: usize,
    pub num_backjumps: usize,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub time_search: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub time_propagate: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub time_analyze: Duration,
}

impl EngineStats {
    pub fn of(solver: &Solver) -> Self {
        Self {
            num_vars: solver.num_vars(),
            num_clauses: solver.num_clauses(),
            num_decisions: solver.num_decisions(),
            num_propagations: solver.num_propagations(),
            num_conflicts: solver.num_conflicts(),
            num_backjumps: solver.num_backjumps(),
            time_search: solver.time_search,
            time_propagate: solver.time_propagate,
            time_analyze: solver.time_analyze,
        }
    }

    pub fn print(&self, time_total: Duration) {
        let format = &Locale::en;
        println!("vars:         {}", self.num_vars.to_formatted_string(format));
        println!("clauses:      {}", self.num_clauses.to_formatted_string(format));
        println!("decisions:    {}", self.num_decisions.to_formatted_string(format));
        println!("propagations: {}", self.num_propagations.to_formatted_string(format));
        println!("conflicts:    {}", self.num_conflicts.to_formatted_string(format));
        println!("backjumps:    {}", self.num_backjumps.to_formatted_string(format));
        print_time("search", self.time_search, time_total);
        print_time("propagate", self.time_propagate, time_total);
        print_time("analyze", self.time_analyze, time_total);
    }
}

#[serde_as]
#[derive(Debug, Serialize)]
pub struct TheoryStats {
    pub num_terms: usize,
    pub num_atoms: usize,
    pub num_rounds: usize,
    pub num_lemmas: usize,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub time_theory: Duration,
}

impl TheoryStats {
    pub fn of(solver: &SmtSolver) -> Self {
        Self {
            num_terms: solver.num_terms(),
            num_atoms: solver.kernel().num_atoms(),
            num_rounds: solver.num_rounds(),
            num_lemmas: solver.num_lemmas(),
            time_theory: solver.time_theory,
        }
    }

    pub fn print(&self, time_total: Duration) {
        let format = &Locale::en;
        println!("terms:        {}", self.num_terms.to_formatted_string(format));
        println!("atoms:        {}", self.num_atoms.to_formatted_string(format));
        println!("rounds:       {}", self.num_rounds.to_formatted_string(format));
        println!("lemmas:       {}", self.num_lemmas.to_formatted_string(format));
        print_time("theory", self.time_theory, time_total);
    }
}

#[serde_as]
#[derive(Debug, Serialize)]
pub struct SatReport {
    pub name: String,
    pub result: String,
    /// Signed DIMACS literals.
    pub model: Option<Vec<i32>>,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub time_total: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub time_parse: Duration,
    pub engine: EngineStats,
}

#[serde_as]
#[derive(Debug, Serialize)]
pub struct SmtReport {
    pub name: String,
    pub result: String,
    /// Class id of every term.
    pub classes: Option<Vec<usize>>,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub time_total: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub time_parse: Duration,
    pub theory: TheoryStats,
    pub engine: EngineStats,
}

pub fn print_time(name: &str, time: Duration, time_total: Duration) {
    let share = if time_total.is_zero() {
        0.0
    } else {
        100.0 * time.as_secs_f64() / time_total.as_secs_f64()
    };
    println!("time {:<11}{:?} ({:.2}%)", format!("{}:", name), time, share);
}
