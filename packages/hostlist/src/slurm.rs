//! SLURM `TASKS_PER_NODE` strings, such as `2(x3),1`.
//!
//! SLURM compresses per-node task counts with a run-length notation: each comma-separated item
//! is either a task count `k` for one node or `k(xN)` for `N` consecutive nodes with `k` tasks
//! each. The nodes themselves are listed separately, in numeric order, in a hostlist expression.

use itertools::Itertools;
use tracing::debug;

use crate::{Error, Result};

/// Parses a SLURM tasks-per-node string into one task count per node.
///
/// # Errors
///
/// Returns [`Error::BadHostlist`] if an item is not a non-negative integer, if a repeat suffix is
/// malformed or if a repeat count is zero.
///
/// # Example
///
/// ```
/// let tasks = hostlist::parse_slurm_tasks_per_node("2(x3),1").unwrap();
///
/// assert_eq!(tasks, vec![2, 2, 2, 1]);
/// ```
pub fn parse_slurm_tasks_per_node(spec: &str) -> Result<Vec<u32>> {
    let runs = spec
        .split(',')
        .map(|item| parse_item(item, spec))
        .collect::<Result<Vec<_>>>()?;

    let tasks: Vec<u32> = runs
        .into_iter()
        .flat_map(|(tasks, repeat)| itertools::repeat_n(tasks, repeat))
        .collect();

    debug!(spec, node_count = tasks.len(), "parsed SLURM tasks per node");

    Ok(tasks)
}

/// Pairs each host with its task count, in order.
///
/// SLURM lists task counts in the numeric order of the nodes, so `hosts` is normally the output
/// of [`numerically_sorted()`][crate::numerically_sorted].
///
/// # Errors
///
/// Returns [`Error::BadHostlist`] if there is not exactly one task count per host.
pub fn zip_slurm_tasks<'a, S>(hosts: &'a [S], tasks: &[u32]) -> Result<Vec<(&'a str, u32)>>
where
    S: AsRef<str>,
{
    if hosts.len() != tasks.len() {
        return Err(Error::bad_hostlist(
            hosts.iter().map(AsRef::<str>::as_ref).join(","),
            format!(
                "{} hosts but {} task counts in the SLURM tasks-per-node list",
                hosts.len(),
                tasks.len()
            ),
        ));
    }

    Ok(hosts
        .iter()
        .map(AsRef::<str>::as_ref)
        .zip(tasks.iter().copied())
        .collect())
}

fn parse_item(item: &str, spec: &str) -> Result<(u32, usize)> {
    let Some((tasks, repeat)) = item.split_once('(') else {
        return Ok((parse_number(item, spec, "task count")?, 1));
    };

    let repeat = repeat
        .strip_prefix('x')
        .and_then(|repeat| repeat.strip_suffix(')'))
        .ok_or_else(|| {
            Error::bad_hostlist(
                spec,
                format!("'{item}' does not have the form 'tasks(xcount)'"),
            )
        })?;

    let tasks = parse_number(tasks, spec, "task count")?;
    let repeat = parse_number(repeat, spec, "repeat count")?;

    if repeat == 0 {
        return Err(Error::bad_hostlist(
            spec,
            format!("'{item}' has a repeat count of zero"),
        ));
    }

    let repeat = usize::try_from(repeat).map_err(|inner| {
        Error::bad_hostlist(spec, format!("'{item}' has a repeat count that is too large: {inner}"))
    })?;

    Ok((tasks, repeat))
}

fn parse_number(text: &str, spec: &str, what: &str) -> Result<u32> {
    // u32::from_str would accept a leading '+', which SLURM never writes.
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::bad_hostlist(
            spec,
            format!("{what} '{text}' is not a non-negative integer"),
        ));
    }

    text.parse::<u32>().map_err(|inner| {
        Error::bad_hostlist(spec, format!("{what} '{text}' is out of range: {inner}"))
    })
}
