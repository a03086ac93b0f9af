#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Utilities for expanding and collapsing hostlist expressions, the compact bracket notation used
//! by cluster tools such as SLURM to name many machines at once.
//!
//! Example hostlist expression: `node[01-04,06],login[1-2]`
//!
//! # Format
//!
//! A hostlist expression is a comma-separated list of items. Each item is literal text with zero
//! or more bracket groups. A bracket group holds a comma-separated list of ranges, where each
//! range is either:
//!
//! * a single number (e.g. `7`), emitted exactly as written
//! * a range of numbers (e.g. `1-3`), where the width of the low bound as written sets the
//!   zero-padded width of every generated number (`08-10` is `08,09,10`)
//!
//! An item with several bracket groups denotes every combination of their values, so
//! `r[1-2]n[1-2]` is `r1n1,r1n2,r2n1,r2n2`.
//!
//! Range bounds are of size `u64` and a single range may span at most [`MAX_RANGE_SIZE`] values.
//! A whole expression may denote at most [`MAX_EXPANSION_SIZE`] hostnames. Expressions never
//! contain whitespace; a line holding several hostlists is split on whitespace by the caller.
//!
//! # Example
//!
//! Expanding and collapsing:
//!
//! ```
//! let hosts = hostlist::expand_hostlist("node[01-04,06],login1").unwrap();
//! assert_eq!(
//!     hosts,
//!     vec!["node01", "node02", "node03", "node04", "node06", "login1"]
//! );
//!
//! let sorted = hostlist::numerically_sorted(hosts);
//! println!("As hostlist: {}", hostlist::collapse_hostlist(&sorted, None).unwrap());
//! ```
//!
//! Combining several hostlists:
//!
//! ```
//! use hostlist::{HostSet, SetOperation};
//!
//! let sets = ["n[1-10]", "n[3-4]"]
//!     .into_iter()
//!     .map(|e| hostlist::expand_hostlist(e).map(|hosts| hosts.into_iter().collect::<HostSet>()))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let remaining = hostlist::numerically_sorted(SetOperation::Difference.apply(sets));
//!
//! assert_eq!(hostlist::collapse_hostlist(&remaining, None).unwrap(), "n[1-2,5-10]");
//! ```

mod collapse;
mod error;
mod expand;
mod order;
mod runs;
mod set_ops;
mod slurm;

pub use collapse::*;
pub use error::*;
pub use expand::*;
pub use order::*;
pub use runs::{Run, Runs, split_runs};
pub use set_ops::*;
pub use slurm::*;
