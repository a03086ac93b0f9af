#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Binary entry point for the hostlist tool.
//!
//! This module is excluded from mutation testing because testing process entry/exit behavior
//! is impractical - it requires spawning subprocesses and checking exit codes.

use std::env;
use std::io;
use std::num::NonZero;
use std::process::ExitCode;

use argh::FromArgs;
use hostlist::SetOperation;
use hostlist_cli::{OutputMode, RunError, RunInput, SlurmTasks, resolve_hostlists, run};
use tracing_subscriber::EnvFilter;

/// Expand, collapse and combine hostlist expressions such as 'node[01-04,06]'.
///
/// Each argument is one operand of the set operation and may hold several whitespace separated
/// hostlists. A '-' argument (after '--') reads whitespace separated hostlists from standard input
/// as one operand.
#[derive(FromArgs)]
struct Args {
    /// combine hostlists with union (default)
    #[argh(switch, short = 'u')]
    union: bool,

    /// combine hostlists with intersection
    #[argh(switch, short = 'i')]
    intersection: bool,

    /// subtract the other hostlists from the first
    #[argh(switch, short = 'd')]
    difference: bool,

    /// keep hosts present in an odd number of hostlists
    #[argh(switch, short = 'x')]
    symmetric_difference: bool,

    /// print every hostname (default)
    #[argh(switch, short = 'e')]
    expand: bool,

    /// print a collapsed hostlist
    #[argh(switch, short = 'c')]
    collapse: bool,

    /// print the number of hostnames
    #[argh(switch, short = 'n')]
    count: bool,

    /// print nothing
    #[argh(switch, short = 'q')]
    quiet: bool,

    /// exit with failure if the resulting hostlist is empty
    #[argh(switch, short = '0')]
    non_empty: bool,

    /// separator between printed items: hostnames, or collapsed groups and chunks (default:
    /// newline when expanding, comma when collapsing)
    #[argh(option, short = 's')]
    separator: Option<String>,

    /// text to place before every printed item
    #[argh(option, short = 'p', default = "String::new()")]
    prepend: String,

    /// text to place after every printed item
    #[argh(option, short = 'a', default = "String::new()")]
    append: String,

    /// regular expression substitution FROM,TO applied to every hostname
    #[argh(option, short = 'S')]
    substitute: Option<String>,

    /// skip this many hostnames of the sorted result
    #[argh(option, default = "0")]
    offset: usize,

    /// keep at most this many hostnames after the offset
    #[argh(option)]
    limit: Option<usize>,

    /// collapse at most this many hostnames into each printed hostlist
    #[argh(option)]
    chop: Option<NonZero<usize>>,

    /// a SLURM tasks-per-node string; print each host with its task count as HOST:TASKS
    #[argh(option)]
    append_slurm_tasks: Option<String>,

    /// a SLURM tasks-per-node string; print each host once per task
    #[argh(option)]
    repeat_slurm_tasks: Option<String>,

    /// hostlist expressions
    #[argh(positional, greedy)]
    hostlists: Vec<String>,
}

impl Args {
    fn operation(&self) -> Result<SetOperation, RunError> {
        let selected: Vec<SetOperation> = [
            (self.union, SetOperation::Union),
            (self.intersection, SetOperation::Intersection),
            (self.difference, SetOperation::Difference),
            (self.symmetric_difference, SetOperation::SymmetricDifference),
        ]
        .into_iter()
        .filter_map(|(selected, operation)| selected.then_some(operation))
        .collect();

        match selected.as_slice() {
            [] => Ok(SetOperation::default()),
            [operation] => Ok(*operation),
            _ => Err(RunError::Usage(
                "only one of -u, -i, -d and -x may be given".to_string(),
            )),
        }
    }

    fn output(&self) -> Result<OutputMode, RunError> {
        let selected: Vec<OutputMode> = [
            (self.expand, OutputMode::Expand),
            (self.collapse, OutputMode::Collapse),
            (self.count, OutputMode::Count),
        ]
        .into_iter()
        .filter_map(|(selected, mode)| selected.then_some(mode))
        .collect();

        match selected.as_slice() {
            [] => Ok(OutputMode::default()),
            [mode] => Ok(*mode),
            _ => Err(RunError::Usage(
                "only one of -e, -c and -n may be given".to_string(),
            )),
        }
    }

    fn slurm_tasks(&self) -> Result<Option<SlurmTasks>, RunError> {
        match (&self.append_slurm_tasks, &self.repeat_slurm_tasks) {
            (Some(_), Some(_)) => Err(RunError::Usage(
                "only one of --append-slurm-tasks and --repeat-slurm-tasks may be given"
                    .to_string(),
            )),
            (Some(spec), None) => Ok(Some(SlurmTasks::Append(spec.clone()))),
            (None, Some(spec)) => Ok(Some(SlurmTasks::Repeat(spec.clone()))),
            (None, None) => Ok(None),
        }
    }

    fn into_run_input(self) -> Result<RunInput, RunError> {
        Ok(RunInput {
            operation: self.operation()?,
            output: self.output()?,
            slurm_tasks: self.slurm_tasks()?,
            hostlists: resolve_hostlists(&self.hostlists, io::stdin().lock())?,
            separator: self.separator,
            prepend: self.prepend,
            append: self.append,
            substitute: self.substitute,
            offset: self.offset,
            limit: self.limit,
            chop: self.chop,
            quiet: self.quiet,
        })
    }
}

fn setup_tracing() {
    let env_filter = EnvFilter::builder().parse_lossy(
        env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| "warn".to_string()),
    );

    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();
}

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    setup_tracing();

    let args: Args = argh::from_env();
    let non_empty = args.non_empty;

    let outcome = match args.into_run_input().and_then(|input| run(&input)) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("hostlist: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(output) = &outcome.output {
        println!("{output}");
    }

    if non_empty && outcome.host_count == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
