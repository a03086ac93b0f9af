//! Post-processing applied to the sorted hostnames before they are printed.

use std::iter;

use hostlist::{parse_slurm_tasks_per_node, zip_slurm_tasks};
use regex::Regex;
use tracing::debug;

use crate::{RunError, SlurmTasks};

/// A regular expression substitution applied to every match in a hostname.
///
/// The replacement may refer to capture groups as `$1` or `${name}`.
#[derive(Debug)]
pub(crate) struct Substitution {
    pattern: Regex,
    replacement: String,
}

impl Substitution {
    /// Parses a `FROM,TO` pair, splitting at the first comma.
    pub(crate) fn parse(spec: &str) -> Result<Self, RunError> {
        let (pattern, replacement) = spec
            .split_once(',')
            .ok_or_else(|| RunError::SubstitutionSyntax(spec.to_string()))?;

        let compiled = Regex::new(pattern).map_err(|source| RunError::SubstitutionPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern: compiled,
            replacement: replacement.to_string(),
        })
    }

    pub(crate) fn apply(&self, host: &str) -> String {
        self.pattern
            .replace_all(host, self.replacement.as_str())
            .into_owned()
    }
}

/// Skips `offset` hostnames, then keeps at most `limit` of the rest.
pub(crate) fn slice(hosts: Vec<String>, offset: usize, limit: Option<usize>) -> Vec<String> {
    hosts
        .into_iter()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Pairs the hostnames with SLURM task counts and renders each pair as printable items.
pub(crate) fn apply_slurm_tasks(
    hosts: &[String],
    slurm_tasks: &SlurmTasks,
) -> Result<Vec<String>, RunError> {
    let spec = match slurm_tasks {
        SlurmTasks::Append(spec) | SlurmTasks::Repeat(spec) => spec,
    };

    let tasks = parse_slurm_tasks_per_node(spec)?;
    let pairs = zip_slurm_tasks(hosts, &tasks)?;

    debug!(host_count = pairs.len(), "paired hosts with SLURM task counts");

    Ok(match slurm_tasks {
        SlurmTasks::Append(_) => pairs
            .into_iter()
            .map(|(host, count)| format!("{host}:{count}"))
            .collect(),
        SlurmTasks::Repeat(_) => pairs
            .into_iter()
            .flat_map(|(host, count)| {
                let count = usize::try_from(count).unwrap_or(usize::MAX);
                iter::repeat_n(host.to_string(), count)
            })
            .collect(),
    })
}
