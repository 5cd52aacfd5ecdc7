//! Position-bound pattern formatting and parsing.
//!
//! Patterns carry the six tokens `yyyy`, `MM`, `dd`, `hh`, `mm`, `ss`
//! between arbitrary non-alphanumeric separators. Formatting substitutes
//! field values into a template; parsing aligns a template's tokens with a
//! data string's numeric groups by position.

use crate::consts::{TOKEN_DAY, TOKEN_HOUR, TOKEN_MINUTE, TOKEN_MONTH, TOKEN_SECOND, TOKEN_YEAR};
use crate::{CivilDateTime, ParseError};
use std::str::FromStr;

/// Error type for pattern-driven parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern binds a token past the last numeric group of the input.
    #[error("No numeric group at position {index} for token '{token}' in {input:?}")]
    MissingGroup {
        token: &'static str,
        index: usize,
        input: String,
    },

    /// A numeric group does not fit the bound field's integer type.
    #[error("Group {value:?} bound to token '{token}' is not a usable number")]
    BadGroup { token: &'static str, value: String },

    /// The pattern binds no year, so no date can be built.
    #[error("Pattern {0:?} does not bind a year")]
    MissingYear(String),

    /// A bound field failed calendar validation.
    #[error(transparent)]
    Field(#[from] ParseError),
}

/// Renders `value` through `pattern`, substituting each recognized token's
/// **first occurrence only** with the zero-padded field value.
///
/// Substitution runs in one pass over the fixed token order `yyyy`, `MM`,
/// `dd`, `hh`, `mm`, `ss`. A repeated token stays literal after its first
/// occurrence; text that is no token is carried through untouched. The year
/// keeps its natural width (minimum four digits, never truncated); the other
/// fields render as two digits.
pub fn format_with_pattern(value: CivilDateTime, pattern: &str) -> String {
    let substitutions = [
        (TOKEN_YEAR, format!("{:04}", value.year())),
        (TOKEN_MONTH, format!("{:02}", value.month())),
        (TOKEN_DAY, format!("{:02}", value.day())),
        (TOKEN_HOUR, format!("{:02}", value.hour())),
        (TOKEN_MINUTE, format!("{:02}", value.minute())),
        (TOKEN_SECOND, format!("{:02}", value.second())),
    ];
    substitutions
        .iter()
        .fold(pattern.to_owned(), |rendered, (token, field)| {
            rendered.replacen(token, field, 1)
        })
}

/// Parses `input` against `pattern`, aligning numeric groups with pattern
/// tokens by position.
///
/// The pattern splits on every run of non-alphabetic characters into token
/// candidates; the input splits on every run of non-digit characters into
/// numeric groups. The token at position *i* binds the group at position
/// *i*. Tokens outside the recognized set consume their group without
/// binding it. Unbound fields default explicitly: month and day to 1, the
/// time fields to 0; a pattern that binds no year cannot name a date.
///
/// # Errors
/// Returns a `PatternError` when a bound token has no group to read, a
/// group does not parse as its field's integer type, no year is bound, or a
/// bound field is out of range.
pub fn parse_with_pattern(input: &str, pattern: &str) -> Result<CivilDateTime, PatternError> {
    let tokens: Vec<&str> = pattern
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|token| !token.is_empty())
        .collect();
    let groups: Vec<&str> = input
        .split(|c: char| !c.is_ascii_digit())
        .filter(|group| !group.is_empty())
        .collect();

    let mut year: Option<u16> = None;
    let mut month: u8 = 1;
    let mut day: u8 = 1;
    let mut hour: u8 = 0;
    let mut minute: u8 = 0;
    let mut second: u8 = 0;

    for (index, token) in tokens.into_iter().enumerate() {
        match token {
            TOKEN_YEAR => year = Some(bind(&groups, index, TOKEN_YEAR, input)?),
            TOKEN_MONTH => month = bind(&groups, index, TOKEN_MONTH, input)?,
            TOKEN_DAY => day = bind(&groups, index, TOKEN_DAY, input)?,
            TOKEN_HOUR => hour = bind(&groups, index, TOKEN_HOUR, input)?,
            TOKEN_MINUTE => minute = bind(&groups, index, TOKEN_MINUTE, input)?,
            TOKEN_SECOND => second = bind(&groups, index, TOKEN_SECOND, input)?,
            // Anything else consumes its position without binding a field.
            _ => {}
        }
    }

    let year = year.ok_or_else(|| PatternError::MissingYear(pattern.to_owned()))?;
    Ok(CivilDateTime::from_fields(
        year, month, day, hour, minute, second,
    )?)
}

fn bind<T: FromStr>(
    groups: &[&str],
    index: usize,
    token: &'static str,
    input: &str,
) -> Result<T, PatternError> {
    let group = groups.get(index).ok_or_else(|| PatternError::MissingGroup {
        token,
        index,
        input: input.to_owned(),
    })?;
    group.parse().map_err(|_| PatternError::BadGroup {
        token,
        value: (*group).to_owned(),
    })
}
