//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;
use std::str::FromStr;

use derive_new::new;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

// Inclusive range of integers.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(new)]
#[derive(Deserialize, Serialize)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

// Set of integers stored as disjoint, non-adjacent inclusive ranges. Used for
// VLAN lists (`1-10,20`) and port/length matches.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct RangeSet {
    // Range start -> range end.
    ranges: BTreeMap<u32, u32>,
}

// Error returned when a range list cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RangeSetParseError {
    InvalidNumber(String),
    InvertedRange(u32, u32),
}

// ===== impl Range =====

impl Range {
    pub fn single(value: u32) -> Range {
        Range::new(value, value)
    }

    pub fn contains(&self, value: u32) -> bool {
        self.start <= value && value <= self.end
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

// ===== impl RangeSet =====

impl RangeSet {
    pub fn from_range(range: Range) -> RangeSet {
        let mut set = RangeSet::default();
        set.insert(range);
        set
    }

    // Adds a range to the set, merging it with overlapping or adjacent ones.
    pub fn insert(&mut self, range: Range) {
        let mut start = range.start;
        let mut end = range.end;

        // Collect every stored range that touches [start, end].
        let touching = self
            .ranges
            .range(..=end.saturating_add(1))
            .filter(|(_, r_end)| r_end.saturating_add(1) >= start)
            .map(|(r_start, r_end)| (*r_start, *r_end))
            .collect::<Vec<_>>();
        for (r_start, r_end) in touching {
            self.ranges.remove(&r_start);
            start = start.min(r_start);
            end = end.max(r_end);
        }
        self.ranges.insert(start, end);
    }

    pub fn union(&mut self, other: &RangeSet) {
        for range in other.ranges() {
            self.insert(range);
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.ranges
            .range(..=value)
            .next_back()
            .is_some_and(|(_, end)| value <= *end)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range> + '_ {
        self.ranges.iter().map(|(start, end)| Range::new(*start, *end))
    }

    // Iterates over every member of the set in ascending order.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|(start, end)| *start..=*end)
    }

    pub fn min(&self) -> Option<u32> {
        self.ranges.keys().next().copied()
    }

    pub fn max(&self) -> Option<u32> {
        self.ranges.values().next_back().copied()
    }
}

impl FromStr for RangeSet {
    type Err = RangeSetParseError;

    // Parses a comma-separated list of values and dash-separated ranges.
    fn from_str(s: &str) -> Result<RangeSet, RangeSetParseError> {
        let parse = |value: &str| {
            u32::from_str(value.trim()).map_err(|_| {
                RangeSetParseError::InvalidNumber(value.trim().to_owned())
            })
        };

        let mut set = RangeSet::default();
        for item in s.split(',') {
            let range = match item.split_once('-') {
                Some((start, end)) => {
                    let start = parse(start)?;
                    let end = parse(end)?;
                    if start > end {
                        return Err(RangeSetParseError::InvertedRange(
                            start, end,
                        ));
                    }
                    Range::new(start, end)
                }
                None => Range::single(parse(item)?),
            };
            set.insert(range);
        }
        Ok(set)
    }
}

impl std::fmt::Display for RangeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ranges().join(","))
    }
}

// ===== impl RangeSetParseError =====

impl std::fmt::Display for RangeSetParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeSetParseError::InvalidNumber(value) => {
                write!(f, "invalid number '{}'", value)
            }
            RangeSetParseError::InvertedRange(start, end) => {
                write!(f, "range start {} is greater than end {}", start, end)
            }
        }
    }
}

impl std::error::Error for RangeSetParseError {}
