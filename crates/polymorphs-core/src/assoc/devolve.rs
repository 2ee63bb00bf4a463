//! Narrowing of union view clauses to a single target type.

use super::Resolved;
use crate::schema::{Model, Table};

use std::{collections::HashSet, fmt};
use tracing::trace;

/// A filter, order or group clause split into the pieces that matter for
/// devolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    fragments: Vec<Fragment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Copied verbatim
    Text(String),

    /// A single-quoted string literal, quotes included
    Literal(String),

    /// A qualified column reference
    Column(ColumnRef),
}

/// `table.column`, either side optionally back-quoted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,

    /// Source text of the reference
    pub raw: String,
}

/// Rewrites every `table.column` reference in `clause` that belongs to a
/// participant other than `keep` to `NULL`.
///
/// The join model and the base types of `keep` and of the join model are
/// always preserved. `None` and empty clauses pass through unchanged.
///
/// Replacing a reference with `NULL` changes the meaning of negated
/// comparisons under SQL's three-valued logic: `NULL != 'Spot'` is never
/// true. Clauses meant to be narrowed should be written with that in mind.
pub fn devolve(cx: &Resolved<'_>, clause: Option<&str>, keep: &Model) -> Option<String> {
    let src = clause?;
    if src.is_empty() {
        return Some(String::new());
    }

    let candidates = candidates(cx, keep);
    let mut clause = Clause::parse(src);

    let replaced = clause.substitute("NULL", |column| {
        candidates.contains(&(column.table.as_str(), column.column.as_str()))
    });

    let ret = clause.to_string();
    if replaced > 0 {
        trace!(keep = %keep.name, from = src, to = %ret, "devolved clause");
    }

    Some(ret)
}

/// Qualified columns to neutralize.
///
/// References are matched whole, so a column never matches inside a longer
/// one and the set needs no ordering.
fn candidates<'a>(cx: &Resolved<'a>, keep: &'a Model) -> HashSet<(&'a str, &'a str)> {
    let schema = cx.schema;

    let mut participants = vec![cx.parent, cx.join];
    participants.extend(cx.targets.iter().map(|target| target.model));
    let bases: Vec<_> = participants.iter().map(|&model| schema.base_of(model)).collect();
    participants.extend(bases);

    let preserved = [keep, schema.base_of(keep), cx.join, schema.base_of(cx.join)];
    let preserved_tables: Vec<_> = preserved.iter().map(|model| model.table_name()).collect();

    let mut tables: Vec<&Table> = vec![];
    for model in participants {
        if preserved.iter().any(|kept| kept.name == model.name) {
            continue;
        }

        // Types sharing a table with a preserved type keep their columns
        if preserved_tables.contains(&model.table_name()) {
            continue;
        }

        if let Some(table) = schema.table_for(model) {
            if !tables.iter().any(|t| t.name == table.name) {
                tables.push(table);
            }
        }
    }

    tables
        .iter()
        .flat_map(|table| {
            table
                .columns
                .iter()
                .map(|column| (table.name.as_str(), column.name.as_str()))
        })
        .collect()
}

impl Clause {
    pub fn parse(src: &str) -> Clause {
        let chars: Vec<char> = src.chars().collect();
        let mut fragments = vec![];
        let mut text = String::new();
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];

            if ch == '\'' {
                let end = literal_end(&chars, i);
                flush(&mut text, &mut fragments);
                fragments.push(Fragment::Literal(chars[i..end].iter().collect()));
                i = end;
                continue;
            }

            if let Some((table, after_table)) = ident_part(&chars, i) {
                if chars.get(after_table) == Some(&'.') {
                    if let Some((column, end)) = ident_part(&chars, after_table + 1) {
                        flush(&mut text, &mut fragments);
                        fragments.push(Fragment::Column(ColumnRef {
                            table,
                            column,
                            raw: chars[i..end].iter().collect(),
                        }));
                        i = end;
                        continue;
                    }
                }

                text.extend(&chars[i..after_table]);
                i = after_table;
                continue;
            }

            // Consume whole words so a reference never starts mid-identifier
            if is_ident_char(ch) {
                while i < chars.len() && is_ident_char(chars[i]) {
                    text.push(chars[i]);
                    i += 1;
                }
                continue;
            }

            text.push(ch);
            i += 1;
        }

        flush(&mut text, &mut fragments);
        Clause { fragments }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn referenced_columns(&self) -> impl Iterator<Item = &ColumnRef> {
        self.fragments.iter().filter_map(|fragment| match fragment {
            Fragment::Column(column) => Some(column),
            _ => None,
        })
    }

    /// Replaces every column reference matching `f` with `replacement`,
    /// returning the number of replaced references.
    pub fn substitute(&mut self, replacement: &str, f: impl Fn(&ColumnRef) -> bool) -> usize {
        let mut count = 0;

        for fragment in &mut self.fragments {
            if let Fragment::Column(column) = fragment {
                if f(column) {
                    *fragment = Fragment::Text(replacement.to_string());
                    count += 1;
                }
            }
        }

        count
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            match fragment {
                Fragment::Text(text) | Fragment::Literal(text) => f.write_str(text)?,
                Fragment::Column(column) => f.write_str(&column.raw)?,
            }
        }
        Ok(())
    }
}

fn flush(text: &mut String, fragments: &mut Vec<Fragment>) {
    if !text.is_empty() {
        fragments.push(Fragment::Text(std::mem::take(text)));
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Parses a bare or back-quoted identifier starting at `i`, returning the
/// name and the index past it.
fn ident_part(chars: &[char], i: usize) -> Option<(String, usize)> {
    match chars.get(i)? {
        '`' => {
            let len = chars[i + 1..].iter().position(|ch| *ch == '`')?;
            if len == 0 {
                return None;
            }
            let end = i + 1 + len;
            Some((chars[i + 1..end].iter().collect(), end + 1))
        }
        ch if ch.is_alphabetic() || *ch == '_' => {
            let len = chars[i..].iter().take_while(|ch| is_ident_char(**ch)).count();
            Some((chars[i..i + len].iter().collect(), i + len))
        }
        _ => None,
    }
}

/// Index past the closing quote of the literal opening at `i`. Doubled
/// quotes are escapes.
fn literal_end(chars: &[char], i: usize) -> usize {
    let mut j = i + 1;
    while j < chars.len() {
        if chars[j] == '\'' {
            if chars.get(j + 1) == Some(&'\'') {
                j += 2;
                continue;
            }
            return j + 1;
        }
        j += 1;
    }
    chars.len()
}
