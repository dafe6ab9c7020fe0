//! A single atomic `field cond value` condition, the leaf of the
//! restriction algebra.

use crate::context::{Context, ContextValue};
use crate::error::RuneError;

/// The operators an [`Alternative`] may use, per the grammar's `Cond` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
    /// `!`: passes iff the field is absent.
    Missing,
    /// `=`: string equality.
    Equal,
    /// `/`: string inequality.
    NotEqual,
    /// `^`: prefix.
    Prefix,
    /// `$`: suffix.
    Suffix,
    /// `~`: substring.
    Contains,
    /// `<`: integer less-than.
    LessThan,
    /// `>`: integer greater-than.
    GreaterThan,
    /// `{`: lexicographic before.
    LexBefore,
    /// `}`: lexicographic after.
    LexAfter,
    /// `#`: comment, always passes.
    Comment,
}

impl Cond {
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Missing => b'!',
            Self::Equal => b'=',
            Self::NotEqual => b'/',
            Self::Prefix => b'^',
            Self::Suffix => b'$',
            Self::Contains => b'~',
            Self::LessThan => b'<',
            Self::GreaterThan => b'>',
            Self::LexBefore => b'{',
            Self::LexAfter => b'}',
            Self::Comment => b'#',
        }
    }

    pub fn from_byte(byte: u8) -> Result<Self, RuneError> {
        Ok(match byte {
            b'!' => Self::Missing,
            b'=' => Self::Equal,
            b'/' => Self::NotEqual,
            b'^' => Self::Prefix,
            b'$' => Self::Suffix,
            b'~' => Self::Contains,
            b'<' => Self::LessThan,
            b'>' => Self::GreaterThan,
            b'{' => Self::LexBefore,
            b'}' => Self::LexAfter,
            b'#' => Self::Comment,
            other => return Err(RuneError::InvalidOperator(other)),
        })
    }
}

/// One `(field, cond, value)` condition.
///
/// `field` is restricted to non-punctuation bytes (the empty string is the
/// reserved unique-id convention, see [`crate::restriction::Restriction::unique_id`]).
/// `value` is an arbitrary string; `\`, `|`, and `&` are backslash-escaped
/// during encoding so a restriction or rune body round-trips unambiguously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    field: String,
    cond: Cond,
    value: String,
}

impl Alternative {
    /// Constructs an alternative, rejecting punctuation in `field`.
    pub fn new(
        field: impl Into<String>,
        cond: Cond,
        value: impl Into<String>,
    ) -> Result<Self, RuneError> {
        let field = field.into();
        if field.bytes().any(|b| b.is_ascii_punctuation()) {
            return Err(RuneError::PunctuationInField(field));
        }
        Ok(Self {
            field,
            cond,
            value: value.into(),
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn cond(&self) -> Cond {
        self.cond
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Evaluates this alternative against `ctx`. Returns `None` on success,
    /// `Some(reason)` on failure. Never raises: this is an evaluation
    /// failure, not a structural one.
    pub fn test(&self, ctx: &dyn Context) -> Option<String> {
        if self.cond == Cond::Comment {
            return None;
        }

        let entry = ctx.get(&self.field);
        let Some(entry) = entry else {
            // Missing-field policy: the unique-id convention is
            // special-cased, everything else fails unless cond is `!`.
            if self.field.is_empty() {
                return why(!self.value.contains('-'), "id", format!("unknown version {}", self.value));
            }
            return why(self.cond == Cond::Missing, &self.field, "is missing".to_owned());
        };

        let predicate = match entry {
            ContextValue::Predicate(f) => Some(f),
            ContextValue::Value(_) => None,
        };
        if let Some(predicate) = predicate {
            return predicate(self);
        }
        let ContextValue::Value(val) = entry else {
            unreachable!()
        };

        match self.cond {
            Cond::Missing => why(false, &self.field, "is present".to_owned()),
            Cond::Equal => why(val == &self.value, &self.field, format!("!= {}", self.value)),
            Cond::NotEqual => why(val != &self.value, &self.field, format!("= {}", self.value)),
            Cond::Prefix => why(
                val.starts_with(&self.value),
                &self.field,
                format!("does not start with {}", self.value),
            ),
            Cond::Suffix => why(
                val.ends_with(&self.value),
                &self.field,
                format!("does not end with {}", self.value),
            ),
            Cond::Contains => why(
                val.contains(&self.value),
                &self.field,
                format!("does not contain {}", self.value),
            ),
            Cond::LessThan => self.test_integer(val, |a, b| a < b, |b| format!(">= {b}")),
            Cond::GreaterThan => self.test_integer(val, |a, b| a > b, |b| format!("<= {b}")),
            Cond::LexBefore => why(
                val < &self.value,
                &self.field,
                format!("is the same or ordered after {}", self.value),
            ),
            Cond::LexAfter => why(
                val > &self.value,
                &self.field,
                format!("is the same or ordered before {}", self.value),
            ),
            Cond::Comment => unreachable!("handled above"),
        }
    }

    fn test_integer(
        &self,
        val: &str,
        passes: impl Fn(i64, i64) -> bool,
        fail_reason: impl Fn(i64) -> String,
    ) -> Option<String> {
        let Ok(actual) = val.parse::<i64>() else {
            return why(false, &self.field, "not an integer field".to_owned());
        };
        let Ok(wanted) = self.value.parse::<i64>() else {
            return why(false, &self.field, "not a valid integer".to_owned());
        };
        why(passes(actual, wanted), &self.field, fail_reason(wanted))
    }

    /// Encodes as `field || cond || escape(value)`.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.field.len() + 1 + self.value.len());
        out.push_str(&self.field);
        out.push(self.cond.as_byte() as char);
        for ch in self.value.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '|' => out.push_str("\\|"),
                '&' => out.push_str("\\&"),
                other => out.push(other),
            }
        }
        out
    }

    /// Pulls one alternative from the front of `input`, returning it along
    /// with whatever bytes remain. `input` is a restriction body (or
    /// suffix thereof); the remainder may still begin with an unconsumed
    /// `&` if this alternative was the last in its restriction.
    pub fn decode(input: &[u8]) -> Result<(Self, &[u8]), RuneError> {
        let field_len = input
            .iter()
            .take_while(|b| !b.is_ascii_punctuation())
            .count();
        let field =
            std::str::from_utf8(&input[..field_len]).map_err(|_| RuneError::InvalidUtf8)?;
        let rest = &input[field_len..];
        let (&cond_byte, mut rest) = rest
            .split_first()
            .ok_or(RuneError::Truncated("a condition operator"))?;
        let cond = Cond::from_byte(cond_byte)?;

        let mut value = Vec::new();
        loop {
            match rest.first() {
                None => break,
                Some(b'|') => {
                    rest = &rest[1..];
                    break;
                }
                Some(b'&') => break,
                Some(b'\\') if rest.len() > 1 => {
                    value.push(rest[1]);
                    rest = &rest[2..];
                }
                Some(&b) => {
                    value.push(b);
                    rest = &rest[1..];
                }
            }
        }
        let value = String::from_utf8(value).map_err(|_| RuneError::InvalidUtf8)?;

        Ok((
            Self {
                field: field.to_owned(),
                cond,
                value,
            },
            rest,
        ))
    }

    /// Constructs an alternative from a user-readable, unescaped string:
    /// whitespace is stripped, then the input is split at the first
    /// punctuation byte into `(field, cond, value)`. No escaping is
    /// honored, unlike [`Alternative::decode`]; this is for ergonomic
    /// construction, not for parsing a serialized rune.
    pub fn from_str_lenient(input: &str) -> Result<Self, RuneError> {
        let stripped: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let cond_pos = stripped
            .bytes()
            .position(|b| b.is_ascii_punctuation())
            .ok_or(RuneError::Truncated("a condition operator"))?;
        let field = &stripped[..cond_pos];
        let cond = Cond::from_byte(stripped.as_bytes()[cond_pos])?;
        let value = &stripped[cond_pos + 1..];
        Self::new(field, cond, value)
    }
}

impl std::str::FromStr for Alternative {
    type Err = RuneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_lenient(s)
    }
}

fn why(cond: bool, field: &str, explanation: String) -> Option<String> {
    if cond {
        None
    } else {
        Some(format!("{field}: {explanation}"))
    }
}
