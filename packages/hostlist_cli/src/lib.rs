#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Command-line tool to expand, collapse and combine hostlist expressions.
//!
//! This crate provides the logic of the `hostlist` binary, exposed via the [`run`] function.
//! The binary entry point is in `main.rs`.

mod transform;
mod types;

use std::io::Read;

use hostlist::{HostSet, collapse_groups, expand_hostlist, numerically_sorted};
use itertools::Itertools;
use tracing::debug;
use transform::{Substitution, apply_slurm_tasks, slice};
pub use types::*;

/// Core logic of the tool, extracted for testability.
///
/// Each hostlist in the input is expanded into one set, the sets are combined with the chosen
/// operation and the result is sorted numerically before the transforms are applied in this
/// order: offset and limit, substitution, then SLURM task pairing or collapsing.
///
/// A hostlist operand may hold several whitespace-separated hostlists, which are expanded one by
/// one into the same set. SLURM task counts are validated against the hosts even when nothing is
/// printed.
#[doc(hidden)]
pub fn run(input: &RunInput) -> Result<RunOutcome, RunError> {
    if input.hostlists.is_empty() {
        return Err(RunError::NoHostlists);
    }

    if input.slurm_tasks.is_some() && input.output != OutputMode::Expand {
        return Err(RunError::Usage(
            "SLURM task counts can only be used when expanding".to_string(),
        ));
    }

    // Validate before doing any expensive expansion.
    let substitution = input
        .substitute
        .as_deref()
        .map(Substitution::parse)
        .transpose()?;

    let sets = input
        .hostlists
        .iter()
        .map(String::as_str)
        .map(expand_operand)
        .collect::<Result<Vec<_>, _>>()?;

    let combined = input.operation.apply(sets);

    debug!(
        operation = ?input.operation,
        operand_count = input.hostlists.len(),
        host_count = combined.len(),
        "combined hostlists"
    );

    let mut hosts = slice(numerically_sorted(combined), input.offset, input.limit);

    if let Some(substitution) = &substitution {
        hosts = hosts.iter().map(|host| substitution.apply(host)).collect();
    }

    let host_count = hosts.len();

    let slurm_items = input
        .slurm_tasks
        .as_ref()
        .map(|slurm_tasks| apply_slurm_tasks(&hosts, slurm_tasks))
        .transpose()?;

    if input.quiet {
        return Ok(RunOutcome {
            output: None,
            host_count,
        });
    }

    let items = match input.output {
        OutputMode::Expand => slurm_items.unwrap_or(hosts),
        OutputMode::Collapse => collapse_groups(&hosts, input.chop)?,
        OutputMode::Count => {
            return Ok(RunOutcome {
                output: Some(host_count.to_string()),
                host_count,
            });
        }
    };

    let separator = input
        .separator
        .as_deref()
        .unwrap_or(input.output.default_separator());

    let output = items
        .iter()
        .map(|item| format!("{}{item}{}", input.prepend, input.append))
        .join(separator);

    Ok(RunOutcome {
        output: Some(output),
        host_count,
    })
}

/// Expands every whitespace-separated hostlist of one operand into a single set.
fn expand_operand(operand: &str) -> Result<HostSet, RunError> {
    let mut hosts = HostSet::default();

    for hostlist in operand.split_whitespace() {
        hosts.extend(expand_hostlist(hostlist)?);
    }

    Ok(hosts)
}

/// Resolves command-line hostlist arguments, replacing each `-` with the hostlists read from
/// `stdin`.
///
/// All whitespace-separated hostlists on standard input together form a single operand. Standard
/// input is only read once; a second `-` yields an empty operand.
#[doc(hidden)]
pub fn resolve_hostlists(args: &[String], mut stdin: impl Read) -> Result<Vec<String>, RunError> {
    let mut stdin_consumed = false;

    args.iter()
        .map(|arg| -> Result<String, RunError> {
            if arg != "-" {
                return Ok(arg.clone());
            }

            let mut text = String::new();

            if !stdin_consumed {
                stdin.read_to_string(&mut text)?;
                stdin_consumed = true;
            }

            Ok(text.split_whitespace().join(","))
        })
        .collect()
}
