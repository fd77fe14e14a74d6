//! Native-result normalization into uniform row mappings.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::client::NativeRow;
use crate::value::Value;

/// A normalized row: column name to value.
pub type Row = HashMap<String, Value>;

/// Post-processing hook applied to string-typed columns, supplied by the
/// caller's configuration. Arguments are the raw string and the column
/// name; returning `Some` substitutes the decoded value. The usual case is
/// transparent deserialization of values that were JSON-encoded on write.
pub type StringHook = Arc<dyn Fn(&str, &str) -> Option<Value> + Send + Sync>;

/// Per-query execution options.
#[derive(Clone, Default)]
pub struct QueryOptions {
    /// Route through the client's prepared-statement path.
    pub execute_as_prepared: bool,
    /// Optional string-column hook; see [`StringHook`].
    pub string_hook: Option<StringHook>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepared(mut self, prepared: bool) -> Self {
        self.execute_as_prepared = prepared;
        self
    }

    pub fn string_hook(mut self, hook: StringHook) -> Self {
        self.string_hook = Some(hook);
        self
    }
}

impl fmt::Debug for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("execute_as_prepared", &self.execute_as_prepared)
            .field("string_hook", &self.string_hook.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Copy native rows into fresh name-keyed mappings.
///
/// Columns with an empty name are skipped, and falsy values are dropped:
/// callers cannot tell an absent column from null, zero, false, or the
/// empty string. String values run through the configured hook before
/// insertion. The output always holds exactly one mapping per input row.
pub fn normalize_rows(rows: Vec<NativeRow>, options: &QueryOptions) -> Vec<Row> {
    let mut results = Vec::with_capacity(rows.len());
    for mut row in rows {
        let mut result = Row::new();
        for column in &row.columns {
            if column.name.is_empty() {
                continue;
            }
            let Some(value) = row.values.remove(&column.name) else {
                continue;
            };
            if value.is_falsy() {
                continue;
            }
            let value = match value {
                Value::Text(raw) => {
                    let decoded = options
                        .string_hook
                        .as_ref()
                        .and_then(|hook| hook(&raw, &column.name));
                    decoded.unwrap_or(Value::Text(raw))
                }
                other => other,
            };
            result.insert(column.name.clone(), value);
        }
        results.push(result);
    }
    results
}
