use std::fmt::Write;
use std::iter::FusedIterator;
use std::slice;
use std::str::FromStr;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{Error, Result};

/// The largest number of values a single `low-high` range may produce.
///
/// This guards against accidental expressions like `node[0-99999999]` exhausting memory.
pub const MAX_RANGE_SIZE: u64 = 100_000;

/// The largest number of hostnames a whole expression may produce.
///
/// Bracket groups multiply, so `n[1-1000][1-1000]` already denotes a million hostnames even though
/// each range is small.
pub const MAX_EXPANSION_SIZE: u64 = 1_000_000;

/// Expands a [hostlist expression][crate] into the hostnames it denotes.
///
/// Hostnames are returned in the order the expression produces them, with duplicates removed
/// (the first occurrence is kept). Use [`numerically_sorted()`][crate::numerically_sorted] if you
/// need them in numeric order.
///
/// An empty string is valid input and returns an empty result.
///
/// # Errors
///
/// Returns [`Error::BadHostlist`] if the expression does not follow the hostlist grammar, contains
/// whitespace or denotes more than [`MAX_EXPANSION_SIZE`] hostnames. There is no partial result:
/// either the whole expression expands or nothing does.
///
/// # Example
///
/// ```
/// let hosts = hostlist::expand_hostlist("n[01-03],login").unwrap();
///
/// assert_eq!(hosts, vec!["n01", "n02", "n03", "login"]);
/// ```
pub fn expand_hostlist(expression: &str) -> Result<Vec<String>> {
    let parsed = HostlistExpression::parse(expression)?;

    let hosts: Vec<String> = parsed.iter().unique().collect();

    debug!(expression, host_count = hosts.len(), "expanded hostlist");

    Ok(hosts)
}

/// A parsed and validated hostlist expression.
///
/// Parsing checks the whole grammar up front, after which the hostnames can be produced lazily
/// via [`iter()`][Self::iter] as many times as needed. Each iteration starts from the beginning.
///
/// Duplicates are not removed by iteration; `n[1-2],n2` yields `n2` twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostlistExpression {
    patterns: Vec<Pattern>,
}

impl HostlistExpression {
    /// Parses a hostlist expression, validating its syntax.
    ///
    /// An expression is a single whitespace-free token. Callers holding a line of
    /// whitespace-separated hostlists expand each token on its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadHostlist`] if the expression does not follow the hostlist grammar,
    /// contains whitespace or denotes more than [`MAX_EXPANSION_SIZE`] hostnames.
    pub fn parse(expression: &str) -> Result<Self> {
        if expression.contains(char::is_whitespace) {
            return Err(Error::bad_hostlist(
                expression,
                "whitespace is not allowed, expand each whitespace-separated hostlist on its own",
            ));
        }

        let patterns = split_top_level(expression)
            .into_iter()
            .filter(|item| !item.is_empty())
            .map(Pattern::parse)
            .collect::<Result<Vec<_>>>()?;

        let host_count = patterns.iter().try_fold(0_u64, |total, pattern| {
            pattern
                .host_count()
                .and_then(|count| total.checked_add(count))
        });

        if host_count.is_none_or(|count| count > MAX_EXPANSION_SIZE) {
            return Err(Error::bad_hostlist(
                expression,
                format!("expands to more than {MAX_EXPANSION_SIZE} hostnames"),
            ));
        }

        trace!(
            expression,
            pattern_count = patterns.len(),
            host_count,
            "parsed hostlist"
        );

        Ok(Self { patterns })
    }

    /// Lazily produces the hostnames denoted by the expression, in expression order.
    #[must_use]
    pub fn iter(&self) -> Hostnames<'_> {
        Hostnames {
            patterns: self.patterns.iter(),
            current: None,
        }
    }

    /// Whether the expression denotes no hostnames at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl FromStr for HostlistExpression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a HostlistExpression {
    type Item = String;
    type IntoIter = Hostnames<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the hostnames of a [`HostlistExpression`].
#[derive(Debug)]
pub struct Hostnames<'a> {
    patterns: slice::Iter<'a, Pattern>,
    current: Option<PatternHosts<'a>>,
}

impl Iterator for Hostnames<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(host) = self.current.as_mut().and_then(Iterator::next) {
                return Some(host);
            }

            self.current = Some(self.patterns.next()?.hosts());
        }
    }
}

impl FusedIterator for Hostnames<'_> {}

/// One comma-free item of an expression: literal text interleaved with bracket groups.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Pattern {
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Group(Vec<RangeItem>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum RangeItem {
    /// Emitted verbatim, as written.
    Single(String),

    /// Every integer in `low..=high`, zero-padded to `width`.
    Span { low: u64, high: u64, width: usize },
}

impl RangeItem {
    fn len(&self) -> u64 {
        match self {
            Self::Single(_) => 1,
            // Cannot overflow, parsing caps spans at MAX_RANGE_SIZE.
            Self::Span { low, high, .. } => high.wrapping_sub(*low).wrapping_add(1),
        }
    }

    fn write_value(&self, offset: u64, out: &mut String) {
        match self {
            Self::Single(text) => out.push_str(text),
            Self::Span { low, width, .. } => {
                let width = *width;
                let value = low.wrapping_add(offset);
                write!(out, "{value:0width$}").expect("writing to a String cannot fail");
            }
        }
    }
}

impl Pattern {
    fn parse(item: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = item;

        while let Some((literal, after_open)) = rest.split_once('[') {
            push_literal(&mut segments, literal, item)?;

            let (body, after_close) = after_open
                .split_once(']')
                .ok_or_else(|| Error::bad_hostlist(item, "unmatched '['"))?;

            if body.contains('[') {
                return Err(Error::bad_hostlist(item, "nested brackets are not allowed"));
            }

            segments.push(Segment::Group(parse_range_list(body, item)?));
            rest = after_close;
        }

        push_literal(&mut segments, rest, item)?;

        Ok(Self { segments })
    }

    /// Number of hostnames the pattern produces, or `None` if that does not fit in a `u64`.
    fn host_count(&self) -> Option<u64> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Group(items) => Some(items),
                Segment::Literal(_) => None,
            })
            .try_fold(1_u64, |product, items| {
                let group_len = items
                    .iter()
                    .try_fold(0_u64, |sum, item| sum.checked_add(item.len()))?;

                product.checked_mul(group_len)
            })
    }

    fn hosts(&self) -> PatternHosts<'_> {
        let groups: Vec<&[RangeItem]> = self
            .segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Group(items) => Some(items.as_slice()),
                Segment::Literal(_) => None,
            })
            .collect();

        PatternHosts {
            pattern: self,
            cursors: Some(vec![Cursor::default(); groups.len()]),
            groups,
        }
    }
}

fn push_literal(segments: &mut Vec<Segment>, literal: &str, item: &str) -> Result<()> {
    if literal.contains(']') {
        return Err(Error::bad_hostlist(item, "unmatched ']'"));
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal.to_string()));
    }

    Ok(())
}

fn parse_range_list(body: &str, item: &str) -> Result<Vec<RangeItem>> {
    if body.is_empty() {
        return Err(Error::bad_hostlist(item, "empty range list"));
    }

    body.split(',')
        .map(|range| parse_range(range, item))
        .collect()
}

fn parse_range(range: &str, item: &str) -> Result<RangeItem> {
    if range.is_empty() {
        return Err(Error::bad_hostlist(item, "empty item in range list"));
    }

    if is_digits(range) {
        return Ok(RangeItem::Single(range.to_string()));
    }

    let Some((low_text, high_text)) = range.split_once('-') else {
        return Err(Error::bad_hostlist(
            item,
            format!("'{range}' is neither a number nor a low-high range"),
        ));
    };

    if !is_digits(low_text) || !is_digits(high_text) {
        return Err(Error::bad_hostlist(
            item,
            format!("'{range}' is neither a number nor a low-high range"),
        ));
    }

    let low = parse_bound(low_text, item)?;
    let high = parse_bound(high_text, item)?;

    if high < low {
        return Err(Error::bad_hostlist(
            item,
            format!("range '{range}': high must be >= low"),
        ));
    }

    if high.wrapping_sub(low) >= MAX_RANGE_SIZE {
        return Err(Error::bad_hostlist(
            item,
            format!("range '{range}' is too large (more than {MAX_RANGE_SIZE} values)"),
        ));
    }

    Ok(RangeItem::Span {
        low,
        high,
        width: low_text.len(),
    })
}

fn parse_bound(text: &str, item: &str) -> Result<u64> {
    text.parse::<u64>().map_err(|inner| {
        Error::bad_hostlist(
            item,
            format!("range bound '{text}' does not fit in 64 bits: {inner}"),
        )
    })
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Splits on commas that are not inside brackets.
///
/// Bracket balance is not validated here, that is left to the pattern parser.
fn split_top_level(expression: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth: usize = 0;
    let mut rest = expression;
    let mut consumed = 0;

    for (index, c) in expression.char_indices() {
        match c {
            '[' => depth = depth.saturating_add(1),
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                let (item, tail) = rest.split_at(index.wrapping_sub(consumed));
                items.push(item);
                rest = tail.strip_prefix(',').unwrap_or(tail);
                consumed = index.wrapping_add(1);
            }
            _ => {}
        }
    }

    items.push(rest);
    items
}

#[derive(Clone, Copy, Debug, Default)]
struct Cursor {
    item: usize,
    offset: u64,
}

/// Odometer over the bracket groups of one pattern, rightmost group varying fastest.
#[derive(Debug)]
struct PatternHosts<'a> {
    pattern: &'a Pattern,
    groups: Vec<&'a [RangeItem]>,

    // None once every combination has been produced.
    cursors: Option<Vec<Cursor>>,
}

impl PatternHosts<'_> {
    fn current(&self, cursors: &[Cursor]) -> String {
        let mut host = String::new();
        let mut cursors = cursors.iter();

        for segment in &self.pattern.segments {
            match segment {
                Segment::Literal(text) => host.push_str(text),
                Segment::Group(items) => {
                    let cursor = cursors
                        .next()
                        .expect("there is one cursor per group by construction");
                    let item = items
                        .get(cursor.item)
                        .expect("cursor never points past the last range item");
                    item.write_value(cursor.offset, &mut host);
                }
            }
        }

        host
    }

    /// Advances the odometer, returning `false` once it wraps around completely.
    fn advance(&self, cursors: &mut [Cursor]) -> bool {
        for (cursor, items) in cursors.iter_mut().zip(&self.groups).rev() {
            let item_len = items.get(cursor.item).map_or(0, RangeItem::len);

            if cursor.offset.wrapping_add(1) < item_len {
                cursor.offset = cursor.offset.wrapping_add(1);
                return true;
            }

            if cursor.item.wrapping_add(1) < items.len() {
                cursor.item = cursor.item.wrapping_add(1);
                cursor.offset = 0;
                return true;
            }

            *cursor = Cursor::default();
        }

        false
    }
}

impl Iterator for PatternHosts<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let mut cursors = self.cursors.take()?;

        let host = self.current(&cursors);

        if self.advance(&mut cursors) {
            self.cursors = Some(cursors);
        }

        Some(host)
    }
}
