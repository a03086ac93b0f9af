use std::num::NonZero;

use foldhash::{HashMap, HashMapExt};
use itertools::Itertools;
use tracing::{debug, trace};

use crate::runs::split_last_number;
use crate::{Error, Result};

/// Collapses hostnames into a compact [hostlist expression][crate] that expands back to exactly
/// the same set of hostnames.
///
/// Hostnames that differ only in numeric runs are merged into bracketed ranges, one numeric run
/// at a time starting from the rightmost, so `r1n1,r1n2,r2n1,r2n2` becomes `r[1-2]n[1-2]`. Zero
/// padding is preserved: `n01,n02` becomes `n[01-02]` while `n1,n01` stays distinct.
///
/// Groups are emitted in the order their first member appears in `hosts`, so callers usually
/// sort with [`numerically_sorted()`][crate::numerically_sorted] first. Leading and trailing
/// whitespace is trimmed from each hostname, empty hostnames and duplicates are ignored.
///
/// If `chunk_size` is given, the (deduplicated) hosts are first cut into consecutive slices of at
/// most that many hosts and each slice is collapsed on its own. See [`collapse_chunks()`] to get
/// the slices separately.
///
/// # Errors
///
/// Returns [`Error::BadHostlist`] if a hostname contains whitespace, `[`, `]` or `,`, as such a
/// name cannot be represented in a hostlist expression.
///
/// # Example
///
/// ```
/// let collapsed = hostlist::collapse_hostlist(["n01", "n02", "n03", "n07", "login"], None).unwrap();
///
/// assert_eq!(collapsed, "n[01-03,07],login");
/// ```
pub fn collapse_hostlist<I>(hosts: I, chunk_size: Option<NonZero<usize>>) -> Result<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Ok(collapse_chunks(hosts, chunk_size)?.join(","))
}

/// Collapses hostnames like [`collapse_hostlist()`] but returns each chunk as a separate
/// expression, leaving the choice of separator to the caller.
///
/// Without a `chunk_size` there is at most one chunk. Empty input yields no chunks.
///
/// # Errors
///
/// Returns [`Error::BadHostlist`] if a hostname contains whitespace, `[`, `]` or `,`.
///
/// # Example
///
/// ```
/// use std::num::NonZero;
///
/// let chunks = hostlist::collapse_chunks(["a1", "a2", "a3", "a4"], NonZero::new(2)).unwrap();
///
/// assert_eq!(chunks, vec!["a[1-2]", "a[3-4]"]);
/// ```
pub fn collapse_chunks<I>(hosts: I, chunk_size: Option<NonZero<usize>>) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let hosts = validated_hosts(hosts)?;

    Ok(collapsed_chunks(&hosts, chunk_size)
        .into_iter()
        .map(|tokens| tokens.join(","))
        .collect())
}

/// Collapses hostnames like [`collapse_chunks()`] but returns every prefix/suffix group as its
/// own whitespace-free token, so the caller decides how groups and chunks are separated.
///
/// Tokens of the first chunk come first, then those of the next chunk and so on.
///
/// # Errors
///
/// Returns [`Error::BadHostlist`] if a hostname contains whitespace, `[`, `]` or `,`.
///
/// # Example
///
/// ```
/// let groups = hostlist::collapse_groups(["n1", "n2", "login"], None).unwrap();
///
/// assert_eq!(groups, vec!["n[1-2]", "login"]);
/// ```
pub fn collapse_groups<I>(hosts: I, chunk_size: Option<NonZero<usize>>) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let hosts = validated_hosts(hosts)?;

    Ok(collapsed_chunks(&hosts, chunk_size)
        .into_iter()
        .flatten()
        .collect())
}

fn collapsed_chunks(hosts: &[String], chunk_size: Option<NonZero<usize>>) -> Vec<Vec<String>> {
    if hosts.is_empty() {
        return Vec::new();
    }

    let chunk_size = chunk_size.map_or(hosts.len(), NonZero::get);

    let chunks: Vec<Vec<String>> = hosts.chunks(chunk_size).map(collapse_tokens).collect();

    debug!(
        host_count = hosts.len(),
        chunk_count = chunks.len(),
        "collapsed hostlist"
    );

    chunks
}

fn validated_hosts<I>(hosts: I) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut validated = Vec::new();

    for host in hosts {
        let host = host.as_ref().trim();

        if host.is_empty() {
            continue;
        }

        if host.contains(char::is_whitespace) {
            return Err(Error::bad_hostlist(host, "a hostname must not contain whitespace"));
        }

        if host.contains(['[', ']', ',']) {
            return Err(Error::bad_hostlist(
                host,
                "a hostname must not contain '[', ']' or ','",
            ));
        }

        validated.push(host.to_string());
    }

    Ok(validated.into_iter().unique().collect())
}

/// A partially collapsed hostname.
///
/// Numeric runs in `left` have not been considered yet. `right` is finished: it holds bracket
/// groups and numbers that earlier passes have already dealt with.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Token {
    left: String,
    right: String,
}

/// One member of a group: a numeric run that is about to move from `left` into a bracket.
#[derive(Debug)]
struct Member<'a> {
    value: u64,
    text: &'a str,
}

/// Hostnames that share everything except one numeric run.
#[derive(Debug)]
struct Group<'a> {
    prefix: &'a str,
    suffix: String,
    members: Vec<Member<'a>>,
}

/// A run of consecutive integers that all print the same way at `width`.
#[derive(Debug)]
struct Span<'a> {
    low_text: &'a str,
    high_text: &'a str,
    low: u64,
    high: u64,
    width: usize,
}

fn collapse_tokens(hosts: &[String]) -> Vec<String> {
    let mut tokens: Vec<Token> = hosts
        .iter()
        .map(|host| Token {
            left: host.clone(),
            right: String::new(),
        })
        .collect();

    let mut pass: usize = 0;

    loop {
        let (next, progressed) = collapse_pass(&tokens);
        tokens = next;
        pass = pass.saturating_add(1);

        trace!(pass, token_count = tokens.len(), "collapse pass finished");

        if !progressed {
            break;
        }
    }

    tokens
        .into_iter()
        .map(|token| token.left + &token.right)
        .collect()
}

/// Moves the rightmost numeric run of every token's `left` into its `right`, merging tokens
/// that then share the same `left` remainder and `right`.
///
/// Returns whether any token had a numeric run left to process.
fn collapse_pass(tokens: &[Token]) -> (Vec<Token>, bool) {
    enum Slot<'a> {
        Done(Token),
        Grouped(Group<'a>),
    }

    let mut slots: Vec<Slot<'_>> = Vec::new();
    let mut group_index: HashMap<(&str, String), usize> = HashMap::new();
    let mut progressed = false;

    for token in tokens {
        let Some((prefix, digits, suffix)) = split_last_number(&token.left) else {
            slots.push(Slot::Done(token.clone()));
            continue;
        };

        progressed = true;

        let Ok(value) = digits.parse::<u64>() else {
            // Too large to be part of a range, so it stays literal text.
            slots.push(Slot::Done(Token {
                left: String::new(),
                right: format!("{}{}", token.left, token.right),
            }));
            continue;
        };

        let suffix = format!("{suffix}{}", token.right);
        let member = Member {
            value,
            text: digits,
        };

        if let Some(&index) = group_index.get(&(prefix, suffix.clone())) {
            if let Some(Slot::Grouped(group)) = slots.get_mut(index) {
                group.members.push(member);
            }
        } else {
            group_index.insert((prefix, suffix.clone()), slots.len());
            slots.push(Slot::Grouped(Group {
                prefix,
                suffix,
                members: vec![member],
            }));
        }
    }

    let tokens = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Done(token) => token,
            Slot::Grouped(group) => group.into_token(),
        })
        .collect();

    (tokens, progressed)
}

impl Group<'_> {
    fn into_token(mut self) -> Token {
        if let [single] = self.members.as_slice() {
            return Token {
                left: self.prefix.to_string(),
                right: format!("{}{}", single.text, self.suffix),
            };
        }

        self.members
            .sort_by(|a, b| a.value.cmp(&b.value).then(a.text.len().cmp(&b.text.len())));

        let ranges = spans(&self.members)
            .iter()
            .map(Span::render)
            .join(",");

        Token {
            left: self.prefix.to_string(),
            right: format!("[{ranges}]{}", self.suffix),
        }
    }
}

/// Merges sorted members into spans of consecutive values.
///
/// A member only joins a span if printing its value at the span's width reproduces its text
/// exactly, which keeps `1` and `01` apart while still allowing `08,09,10` to become `08-10`.
fn spans<'a>(members: &[Member<'a>]) -> Vec<Span<'a>> {
    let mut spans: Vec<Span<'a>> = Vec::new();

    for member in members {
        let extendable = spans.iter_mut().rev().find(|span| {
            span.high.checked_add(1) == Some(member.value) && fits_width(member.text, span.width)
        });

        if let Some(span) = extendable {
            span.high = member.value;
            span.high_text = member.text;
        } else {
            spans.push(Span {
                low_text: member.text,
                high_text: member.text,
                low: member.value,
                high: member.value,
                width: member.text.len(),
            });
        }
    }

    spans.sort_by(|a, b| a.low.cmp(&b.low).then(a.width.cmp(&b.width)));
    spans
}

fn fits_width(text: &str, width: usize) -> bool {
    text.len() == width || (text.len() > width && !text.starts_with('0'))
}

impl Span<'_> {
    fn render(&self) -> String {
        if self.low == self.high {
            self.low_text.to_string()
        } else {
            format!("{}-{}", self.low_text, self.high_text)
        }
    }
}
