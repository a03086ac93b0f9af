use std::io;
use std::num::NonZero;

use hostlist::SetOperation;
use thiserror::Error;

/// What to print once the hostlists have been combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Every hostname on its own, separated by the separator.
    #[default]
    Expand,

    /// Compact hostlist expressions, one per prefix/suffix group within each chunk.
    Collapse,

    /// Just the number of hostnames.
    Count,
}

impl OutputMode {
    /// Separator between printed items when none is given: a newline between hostnames, a comma
    /// between collapsed groups.
    #[must_use]
    pub fn default_separator(self) -> &'static str {
        match self {
            Self::Expand | Self::Count => "\n",
            Self::Collapse => ",",
        }
    }
}

/// How a SLURM tasks-per-node string is applied to the expanded hostnames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlurmTasks {
    /// Print each hostname followed by `:` and its task count.
    Append(String),

    /// Print each hostname once per task.
    Repeat(String),
}

/// Input parameters for the [`run`][crate::run] function.
#[derive(Clone, Debug, Default)]
pub struct RunInput {
    /// Hostlist expressions, one per set operand.
    pub hostlists: Vec<String>,

    /// How the operands are combined.
    pub operation: SetOperation,

    /// What to print.
    pub output: OutputMode,

    /// Placed between printed items. Defaults to [`OutputMode::default_separator`].
    pub separator: Option<String>,

    /// Placed before every printed item.
    pub prepend: String,

    /// Placed after every printed item.
    pub append: String,

    /// A `FROM,TO` regular expression substitution applied to every hostname.
    pub substitute: Option<String>,

    /// Number of hostnames to skip at the start of the sorted result.
    pub offset: usize,

    /// Maximum number of hostnames to keep after the offset.
    pub limit: Option<usize>,

    /// Collapse at most this many hostnames into each printed expression.
    pub chop: Option<NonZero<usize>>,

    /// Task counts to pair with the hostnames.
    pub slurm_tasks: Option<SlurmTasks>,

    /// Print nothing.
    pub quiet: bool,
}

/// Result of a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// The text to print, without a trailing newline. `None` in quiet mode.
    pub output: Option<String>,

    /// How many distinct hostnames the result holds.
    pub host_count: usize,
}

/// Errors that can occur while running the tool.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// No hostlist was given on the command line or on standard input.
    #[error("no hostlist given")]
    NoHostlists,

    /// Options were combined in a way that has no meaning.
    #[error("{0}")]
    Usage(String),

    /// A hostlist or SLURM tasks-per-node string was malformed.
    #[error(transparent)]
    Hostlist(#[from] hostlist::Error),

    /// The substitution was not of the form `FROM,TO`.
    #[error("substitution '{0}' must have the form FROM,TO")]
    SubstitutionSyntax(String),

    /// The substitution pattern was not a valid regular expression.
    #[error("invalid substitution pattern '{pattern}': {source}")]
    SubstitutionPattern {
        /// The pattern as given.
        pattern: String,

        /// Why the regex crate rejected it.
        source: regex::Error,
    },

    /// Reading hostlists from standard input failed.
    #[error("failed to read hostlists from standard input: {0}")]
    Stdin(#[from] io::Error),
}
