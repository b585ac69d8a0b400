//! Parameter-bound SQL predicate fragments.
//!
//! # Responsibility
//! - Emit `IN`-membership and substring-match fragments with `?` placeholders.
//! - Combine fragments into parenthesised AND/OR groups.
//!
//! # Invariants
//! - Caller-supplied values only ever travel as bound parameters; fragment
//!   text is built from trusted column names and placeholders.
//! - Placeholders are positional and anonymous, so `params` order always
//!   matches placeholder order in `sql`, including after combination.
//! - An empty id set never produces a fragment. `id_in` returns `None` and
//!   callers must short-circuit to an empty result.

use rusqlite::types::Value;

const LIKE_ESCAPE: char = '\\';

/// SQL boolean expression plus its bound values, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    sql: String,
    params: Vec<Value>,
}

impl Predicate {
    /// `column IN (?, ?, ...)` over the given ids.
    ///
    /// Returns `None` for an empty id list.
    pub fn id_in(column: &'static str, ids: &[i64]) -> Option<Self> {
        if ids.is_empty() {
            return None;
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        Some(Self {
            sql: format!("{column} IN ({placeholders})"),
            params: ids.iter().copied().map(Value::Integer).collect(),
        })
    }

    /// Substring match: `column LIKE '%text%'` with `%`, `_` and `\` in
    /// `text` matched literally.
    ///
    /// Case sensitivity follows SQLite `LIKE` (ASCII case-insensitive).
    pub fn contains(column: &'static str, text: &str) -> Self {
        Self {
            sql: format!("{column} LIKE ? ESCAPE '{LIKE_ESCAPE}'"),
            params: vec![Value::Text(format!("%{}%", escape_like(text)))],
        }
    }

    /// AND-group of at least one fragment.
    pub fn all_of(first: Predicate, rest: impl IntoIterator<Item = Predicate>) -> Self {
        Self::group(" AND ", first, rest)
    }

    /// OR-group of at least one fragment.
    pub fn any_of(first: Predicate, rest: impl IntoIterator<Item = Predicate>) -> Self {
        Self::group(" OR ", first, rest)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Splits into SQL text and bound values.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    fn group(
        separator: &str,
        first: Predicate,
        rest: impl IntoIterator<Item = Predicate>,
    ) -> Self {
        let mut parts = vec![first.sql];
        let mut params = first.params;
        for predicate in rest {
            parts.push(predicate.sql);
            params.extend(predicate.params);
        }

        if parts.len() == 1 {
            return Self {
                sql: parts.remove(0),
                params,
            };
        }

        Self {
            sql: format!("({})", parts.join(separator)),
            params,
        }
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}
