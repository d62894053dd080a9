//! Downtime interval merging.

use json_tagged::Value;

/// `(start, end)` in epoch milliseconds.
pub type DowntimeLog = (i64, i64);

pub type DowntimeLogs = Vec<DowntimeLog>;

/// Merge several downtime logs into one sorted list of disjoint intervals.
///
/// Intervals that overlap or touch (`start <= previous end`) are joined.
pub fn merge(logs: &[DowntimeLogs]) -> DowntimeLogs {
    let mut sorted: DowntimeLogs = logs.iter().flatten().copied().collect();
    sorted.sort_unstable();

    let mut merged: DowntimeLogs = Vec::with_capacity(sorted.len());
    for (start, end) in sorted {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }
    merged
}

/// Logs as an array of `[Date, Date]` pairs.
pub fn to_value(logs: &[DowntimeLog]) -> Value {
    Value::Array(
        logs.iter()
            .map(|&(start, end)| Value::Array(vec![Value::Date(start), Value::Date(end)]))
            .collect(),
    )
}

/// Inverse of [`to_value`]; `None` unless every element is a `[Date, Date]`
/// pair.
pub fn from_value(value: &Value) -> Option<DowntimeLogs> {
    let Value::Array(items) = value else {
        return None;
    };
    items
        .iter()
        .map(|item| match item {
            Value::Array(pair) => match pair.as_slice() {
                [Value::Date(start), Value::Date(end)] => Some((*start, *end)),
                _ => None,
            },
            _ => None,
        })
        .collect()
}
