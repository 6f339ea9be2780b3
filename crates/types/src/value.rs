//! Loosely typed parameter values supplied by a workflow launcher.
//!
//! Launchers hand over parameters as a flat key/value map where each value may
//! be a JSON primitive, a collection, or one of the engine-specific quantity
//! kinds (durations and memory sizes). [`ParamValue`] models that finite set of
//! kinds explicitly so downstream code can match on it exhaustively.

use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};
use thiserror::Error;

/// Ordered parameter map keyed by parameter name.
pub type ParameterMap = IndexMap<String, ParamValue>;

const KIB: u64 = 1024;
const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

const MILLIS_PER_SECOND: u128 = 1_000;
const MILLIS_PER_MINUTE: u128 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u128 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u128 = 24 * MILLIS_PER_HOUR;

static DURATION_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\.(ms|millis|s|sec|second|seconds|min|mins|minute|minutes|m|h|hour|hours|d|day|days)$")
        .expect("duration literal regex should compile")
});

static SIZE_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+(?:\.\d+)?)\.(b|kb|mb|gb|tb|pb)$").expect("size literal regex should compile"));

/// Errors raised while parsing `NAME=VALUE` parameter assignments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamValueError {
    /// The assignment had no `=` separator.
    #[error("expected NAME=VALUE, got '{0}'")]
    MissingSeparator(String),
    /// The parameter name was empty after trimming leading hyphens.
    #[error("parameter name cannot be empty in '{0}'")]
    EmptyName(String),
}

/// A memory quantity measured in bytes, rendered with binary units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteSize(pub u64);

impl ByteSize {
    /// Builds a size from a quantity expressed in `unit` (`B`, `KB`, ... `PB`).
    pub fn from_unit(quantity: f64, unit: &str) -> Option<Self> {
        let exponent = SIZE_UNITS.iter().position(|candidate| candidate.eq_ignore_ascii_case(unit))?;
        let bytes = quantity * (KIB.pow(exponent as u32) as f64);
        if !bytes.is_finite() || bytes < 0.0 {
            return None;
        }
        Some(Self(bytes.round() as u64))
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "0 B");
        }
        let mut exponent = 0usize;
        while exponent + 1 < SIZE_UNITS.len() && self.0 >= KIB.pow(exponent as u32 + 1) {
            exponent += 1;
        }
        let scaled = self.0 as f64 / KIB.pow(exponent as u32) as f64;
        let rounded = (scaled * 10.0).round() / 10.0;
        if rounded.fract() == 0.0 {
            write!(f, "{} {}", rounded as u64, SIZE_UNITS[exponent])
        } else {
            write!(f, "{:.1} {}", rounded, SIZE_UNITS[exponent])
        }
    }
}

/// Renders a duration as space separated unit components (`1d 2h 30m`).
///
/// Durations below one second render in milliseconds (`500ms`); sub-second
/// remainders of longer durations are dropped.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < MILLIS_PER_SECOND {
        return format!("{}ms", millis);
    }

    let mut remaining = millis;
    let mut parts = Vec::new();
    for (unit_millis, suffix) in [
        (MILLIS_PER_DAY, "d"),
        (MILLIS_PER_HOUR, "h"),
        (MILLIS_PER_MINUTE, "m"),
        (MILLIS_PER_SECOND, "s"),
    ] {
        let count = remaining / unit_millis;
        remaining %= unit_millis;
        if count > 0 {
            parts.push(format!("{}{}", count, suffix));
        }
    }
    parts.join(" ")
}

/// A single parameter value.
///
/// `Null` stands for an explicitly absent value (for example `null` in a
/// params file).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
    Map(IndexMap<String, ParamValue>),
    Duration(Duration),
    Size(ByteSize),
}

impl ParamValue {
    /// Returns `true` for values a launcher treats as "not set": null, empty
    /// strings, `false`, numeric zero, empty collections and zero quantities.
    pub fn is_falsy(&self) -> bool {
        match self {
            ParamValue::Null => true,
            ParamValue::Bool(flag) => !flag,
            ParamValue::Integer(number) => *number == 0,
            ParamValue::Float(number) => *number == 0.0,
            ParamValue::String(text) => text.is_empty(),
            ParamValue::List(items) => items.is_empty(),
            ParamValue::Map(entries) => entries.is_empty(),
            ParamValue::Duration(duration) => duration.is_zero(),
            ParamValue::Size(size) => size.0 == 0,
        }
    }

    /// Compares two values, treating integers and floats as numbers.
    pub fn loosely_equals(&self, other: &ParamValue) -> bool {
        match (self, other) {
            (ParamValue::Integer(left), ParamValue::Float(right)) => (*left as f64) == *right,
            (ParamValue::Float(left), ParamValue::Integer(right)) => *left == (*right as f64),
            (ParamValue::List(left), ParamValue::List(right)) => {
                left.len() == right.len() && left.iter().zip(right).all(|(a, b)| a.loosely_equals(b))
            }
            _ => self == other,
        }
    }

    /// Converts into the JSON document shape consumed by schema validation.
    ///
    /// Quantities become their string renderings; non-finite floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            ParamValue::Null => JsonValue::Null,
            ParamValue::Bool(flag) => JsonValue::Bool(*flag),
            ParamValue::Integer(number) => JsonValue::Number(Number::from(*number)),
            ParamValue::Float(number) => Number::from_f64(*number).map_or(JsonValue::Null, JsonValue::Number),
            ParamValue::String(text) => JsonValue::String(text.clone()),
            ParamValue::List(items) => JsonValue::Array(items.iter().map(ParamValue::to_json).collect()),
            ParamValue::Map(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            ParamValue::Duration(duration) => JsonValue::String(format_duration(*duration)),
            ParamValue::Size(size) => JsonValue::String(size.to_string()),
        }
    }

    /// Parses a command-line literal into the most specific value kind.
    ///
    /// Recognises `true`/`false`, integers, floats, durations written as
    /// `<number>.<unit>` (`2.h`, `30.min`, `500.ms`) and sizes written the same
    /// way (`8.GB`). Anything else is kept as a string.
    ///
    /// # Example
    /// ```rust
    /// use paramcheck_types::{ByteSize, ParamValue};
    ///
    /// assert_eq!(ParamValue::parse_literal("true"), ParamValue::Bool(true));
    /// assert_eq!(ParamValue::parse_literal("16"), ParamValue::Integer(16));
    /// assert_eq!(ParamValue::parse_literal("8.GB"), ParamValue::Size(ByteSize(8 * 1024 * 1024 * 1024)));
    /// assert_eq!(ParamValue::parse_literal("./results"), ParamValue::String("./results".into()));
    /// ```
    pub fn parse_literal(raw: &str) -> ParamValue {
        let trimmed = raw.trim();
        match trimmed {
            "true" => return ParamValue::Bool(true),
            "false" => return ParamValue::Bool(false),
            _ => {}
        }
        if let Ok(number) = trimmed.parse::<i64>() {
            return ParamValue::Integer(number);
        }
        if let Ok(number) = trimmed.parse::<f64>()
            && number.is_finite()
        {
            return ParamValue::Float(number);
        }
        if let Some(size) = parse_size_literal(trimmed) {
            return ParamValue::Size(size);
        }
        if let Some(duration) = parse_duration_literal(trimmed) {
            return ParamValue::Duration(duration);
        }
        ParamValue::String(raw.to_string())
    }

    /// Parses a `NAME=VALUE` assignment. Leading hyphens on the name are
    /// stripped so `--outdir=./results` and `outdir=./results` are equivalent.
    pub fn parse_assignment(raw: &str) -> Result<(String, ParamValue), ParamValueError> {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| ParamValueError::MissingSeparator(raw.to_string()))?;
        let name = name.trim().trim_start_matches('-');
        if name.is_empty() {
            return Err(ParamValueError::EmptyName(raw.to_string()));
        }
        Ok((name.to_string(), ParamValue::parse_literal(value)))
    }
}

fn parse_duration_literal(text: &str) -> Option<Duration> {
    let captures = DURATION_LITERAL.captures(text)?;
    let quantity: f64 = captures.get(1)?.as_str().parse().ok()?;
    let unit_seconds = match captures.get(2)?.as_str() {
        "ms" | "millis" => 0.001,
        "s" | "sec" | "second" | "seconds" => 1.0,
        "m" | "min" | "mins" | "minute" | "minutes" => 60.0,
        "h" | "hour" | "hours" => 3_600.0,
        _ => 86_400.0,
    };
    Duration::try_from_secs_f64(quantity * unit_seconds).ok()
}

fn parse_size_literal(text: &str) -> Option<ByteSize> {
    let captures = SIZE_LITERAL.captures(text)?;
    let quantity: f64 = captures.get(1)?.as_str().parse().ok()?;
    ByteSize::from_unit(quantity, captures.get(2)?.as_str())
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => Ok(()),
            ParamValue::Bool(flag) => write!(f, "{}", flag),
            ParamValue::Integer(number) => write!(f, "{}", number),
            ParamValue::Float(number) => write!(f, "{}", number),
            ParamValue::String(text) => f.write_str(text),
            ParamValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            ParamValue::Map(_) => write!(f, "{}", self.to_json()),
            ParamValue::Duration(duration) => f.write_str(&format_duration(*duration)),
            ParamValue::Size(size) => write!(f, "{}", size),
        }
    }
}

impl From<JsonValue> for ParamValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => ParamValue::Null,
            JsonValue::Bool(flag) => ParamValue::Bool(flag),
            JsonValue::Number(number) => match number.as_i64() {
                Some(integer) => ParamValue::Integer(integer),
                None => ParamValue::Float(number.as_f64().unwrap_or_default()),
            },
            JsonValue::String(text) => ParamValue::String(text),
            JsonValue::Array(items) => ParamValue::List(items.into_iter().map(ParamValue::from).collect()),
            JsonValue::Object(entries) => ParamValue::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, ParamValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(ParamValue::from)
    }
}
