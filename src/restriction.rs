//! A disjunction of [`Alternative`]s: any one passing satisfies the whole
//! restriction.

use std::fmt;
use std::str::FromStr;

use crate::alternative::{Alternative, Cond};
use crate::context::Context;
use crate::error::RuneError;

/// A non-empty ordered sequence of alternatives, interpreted as an OR: the
/// restriction is satisfied if any alternative passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    alternatives: Vec<Alternative>,
}

impl Restriction {
    /// Constructs a restriction from its alternatives. `alternatives` must
    /// not be empty.
    pub fn new(alternatives: Vec<Alternative>) -> Self {
        assert!(
            !alternatives.is_empty(),
            "a restriction must have at least one alternative"
        );
        Self { alternatives }
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Whether this is the conventional unique-id restriction: a single
    /// alternative with an empty field.
    pub fn is_unique_id(&self) -> bool {
        matches!(self.alternatives.as_slice(), [alt] if alt.field().is_empty())
    }

    /// The conventional unique-id restriction: a single `=` alternative on
    /// the empty field, carrying `unique_id` (and, if given, `-version`).
    ///
    /// Rejects a `unique_id` containing a literal `-`, since that would be
    /// ambiguous with the `<id>-<version>` convention.
    pub fn unique_id(unique_id: &str, version: Option<&str>) -> Result<Self, RuneError> {
        if unique_id.contains('-') {
            return Err(RuneError::HyphenInUniqueId);
        }
        let idstr = match version {
            Some(version) => format!("{unique_id}-{version}"),
            None => unique_id.to_owned(),
        };
        Ok(Self::new(vec![Alternative::new("", Cond::Equal, idstr)
            .expect("empty field is always valid")]))
    }

    /// Evaluates every alternative left to right; returns `None` on the
    /// first success, or `Some(" AND ".join(reasons))` if every alternative
    /// failed.
    pub fn test(&self, ctx: &dyn Context) -> Option<String> {
        let mut reasons = Vec::with_capacity(self.alternatives.len());
        for alt in &self.alternatives {
            match alt.test(ctx) {
                None => return None,
                Some(reason) => reasons.push(reason),
            }
        }
        Some(reasons.join(" AND "))
    }

    /// Encodes as alternatives joined by unescaped `|`.
    pub fn encode(&self) -> String {
        self.alternatives
            .iter()
            .map(Alternative::encode)
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Repeatedly decodes alternatives from `input` until an unescaped `&`
    /// (consumed) or end of input. Returns the restriction and whatever
    /// bytes remain (the start of the next restriction, if any).
    pub fn decode(input: &[u8]) -> Result<(Self, &[u8]), RuneError> {
        let mut alternatives = Vec::new();
        let mut rest = input;
        loop {
            if rest.is_empty() {
                break;
            }
            if rest[0] == b'&' {
                rest = &rest[1..];
                break;
            }
            let (alt, remainder) = Alternative::decode(rest)?;
            alternatives.push(alt);
            rest = remainder;
        }
        if alternatives.is_empty() {
            return Err(RuneError::Truncated("at least one alternative"));
        }
        Ok((Self { alternatives }, rest))
    }
}

impl FromStr for Restriction {
    type Err = RuneError;

    /// Parses a fully escaped restriction body (whitespace ignored),
    /// requiring the entire string to be consumed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (restriction, remainder) = Self::decode(stripped.as_bytes())?;
        if !remainder.is_empty() {
            return Err(RuneError::Truncated("end of restriction"));
        }
        Ok(restriction)
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
