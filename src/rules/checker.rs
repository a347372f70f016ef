//! Compiled matchers.
//!
//! # Responsibilities
//! - Compile cleaned rule lines into the checker family for a mode
//! - Answer membership for one input string
//!
//! # Design Decisions
//! - Closed enum instead of trait objects: the family is fixed and small
//! - Regex matching is unanchored (substring search)
//! - Literal matching does no normalization at all

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use crate::rules::mode::MatchMode;
use crate::rules::network::NetworkMatcher;

/// An immutable matcher for one rule set's content.
#[derive(Debug)]
pub enum Checker {
    /// Exact string membership.
    Literal(LiteralSet),
    /// Any of an ordered list of patterns matches somewhere in the input.
    Regex(PatternList),
    /// Address or CIDR membership.
    Network(NetworkMatcher),
    /// Backing file does not exist; nothing matches.
    NoMatch,
}

impl Checker {
    /// Build the checker for `mode` from cleaned rule lines.
    pub fn compile<S: AsRef<str>>(mode: MatchMode, rules: &[S]) -> Self {
        match mode {
            MatchMode::Literal => Checker::Literal(LiteralSet::compile(rules)),
            MatchMode::RegexCaseInsensitive => Checker::Regex(PatternList::compile(rules, true)),
            MatchMode::RegexCaseSensitive => Checker::Regex(PatternList::compile(rules, false)),
            MatchMode::Network => Checker::Network(NetworkMatcher::compile(rules)),
        }
    }

    /// Returns true if `input` is matched by this rule set.
    pub fn matches(&self, input: &str) -> bool {
        match self {
            Checker::Literal(set) => set.matches(input),
            Checker::Regex(patterns) => patterns.matches(input),
            Checker::Network(nets) => nets.matches(input),
            Checker::NoMatch => false,
        }
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        match self {
            Checker::Literal(set) => set.len(),
            Checker::Regex(patterns) => patterns.len(),
            Checker::Network(nets) => nets.len(),
            Checker::NoMatch => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Set of exact strings.
#[derive(Debug, Default)]
pub struct LiteralSet {
    entries: HashSet<String>,
}

impl LiteralSet {
    pub fn compile<S: AsRef<str>>(rules: &[S]) -> Self {
        Self {
            entries: rules.iter().map(|r| r.as_ref().to_owned()).collect(),
        }
    }

    pub fn matches(&self, input: &str) -> bool {
        self.entries.contains(input)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Ordered list of compiled regular expressions sharing one case setting.
#[derive(Debug)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    /// Compile each rule as its own pattern, dropping those that fail to parse.
    pub fn compile<S: AsRef<str>>(rules: &[S], case_insensitive: bool) -> Self {
        let patterns = rules
            .iter()
            .filter_map(|raw| {
                let raw = raw.as_ref();
                match RegexBuilder::new(raw)
                    .case_insensitive(case_insensitive)
                    .build()
                {
                    Ok(re) => Some(re),
                    Err(e) => {
                        tracing::warn!(rule = %raw, error = %e, "Skipping invalid regex");
                        None
                    }
                }
            })
            .collect();

        Self { patterns }
    }

    pub fn matches(&self, input: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(input))
    }

    pub(crate) fn len(&self) -> usize {
        self.patterns.len()
    }
}
