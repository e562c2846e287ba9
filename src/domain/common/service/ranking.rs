//! Stable ranking shared by every table.
//!
//! Rows are decorated with their input position and their sort key once, then
//! sorted with an explicit position tie-break. The result is stable whatever the
//! underlying sort does, and `Desc` reverses only the key comparison, so rows
//! with equal keys keep their input order in both directions.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn from_code<S: AsRef<str>>(code: S) -> Option<Self> {
        match code.as_ref().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[inline]
    fn apply(&self, ascending: Ordering) -> Ordering {
        match self {
            Self::Asc => ascending,
            Self::Desc => ascending.reverse(),
        }
    }
}

/// A field value as seen by the ranker. Absent values are `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    /// NaN has no natural position, so it is treated as absent.
    pub fn number(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else {
            Some(Self::Number(value))
        }
    }

    pub fn text<S: Into<String>>(value: S) -> Option<Self> {
        Some(Self::Text(value.into()))
    }

    /// Numbers compare numerically, text lexically, and numbers sort before text.
    fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

/// Ascending comparison: missing values are equal to each other and below
/// every present value.
pub fn compare_values(a: Option<&SortValue>, b: Option<&SortValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.natural_cmp(b),
    }
}

/// Rows that can be ranked by field name.
pub trait SortField {
    fn sort_value(&self, field: &str) -> Option<SortValue>;
}

/// One ranking criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub order_by: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new<S: Into<String>>(order_by: S, direction: SortDirection) -> Self {
        Self {
            order_by: order_by.into(),
            direction,
        }
    }
}

/// Ranks `rows` by the value `key` extracts, breaking ties by input position.
pub fn rank_by<R, F>(rows: Vec<R>, key: F, direction: SortDirection) -> Vec<R>
where
    F: Fn(&R) -> Option<SortValue>,
{
    let mut decorated: Vec<(usize, Option<SortValue>, R)> = rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| (idx, key(&row), row))
        .collect();

    decorated.sort_unstable_by(|a, b| {
        direction
            .apply(compare_values(a.1.as_ref(), b.1.as_ref()))
            .then(a.0.cmp(&b.0))
    });

    decorated.into_iter().map(|(_, _, row)| row).collect()
}

/// Ranks rows by a named field.
pub fn rank<R: SortField>(rows: Vec<R>, order_by: &str, direction: SortDirection) -> Vec<R> {
    rank_by(rows, |row| row.sort_value(order_by), direction)
}

/// Ranks rows by several keys in priority order, then by input position.
pub fn rank_multi<R: SortField>(rows: Vec<R>, keys: &[SortKey]) -> Vec<R> {
    let mut decorated: Vec<(usize, Vec<Option<SortValue>>, R)> = rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let values = keys.iter().map(|k| row.sort_value(&k.order_by)).collect();
            (idx, values, row)
        })
        .collect();

    decorated.sort_unstable_by(|a, b| {
        keys.iter()
            .enumerate()
            .map(|(i, k)| k.direction.apply(compare_values(a.1[i].as_ref(), b.1[i].as_ref())))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    decorated.into_iter().map(|(_, _, row)| row).collect()
}

/// Rows shown in a chart next to a table.
pub const CHART_ROW_LIMIT: usize = 15;

/// The first `limit` rows under `key`.
pub fn top_n<R: SortField>(rows: Vec<R>, key: &SortKey, limit: usize) -> Vec<R> {
    let mut ranked = rank(rows, &key.order_by, key.direction);
    ranked.truncate(limit);
    ranked
}

/// Resolves `a.b.c` inside a row's JSON form. Array segments are indices.
/// Absent paths, nulls, objects and arrays all yield `None`.
pub fn value_at_path<R: Serialize>(row: &R, path: &str) -> Option<SortValue> {
    let value = serde_json::to_value(row).ok()?;
    lookup_path(&value, path)
}

fn lookup_path(root: &Value, path: &str) -> Option<SortValue> {
    let mut current = root;

    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    match current {
        Value::Number(n) => SortValue::number(n.as_f64()?),
        Value::String(s) => SortValue::text(s.as_str()),
        Value::Bool(b) => SortValue::number(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
