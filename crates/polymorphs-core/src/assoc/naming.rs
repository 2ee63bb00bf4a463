//! Identifier inflection used to derive relation, join and model names.
//!
//! Type identifiers are plural snake case, optionally namespaced with `/`
//! (`dogs`, `zoo/lions`). Only the last namespace segment is inflected.

use crate::{Error, Result};

use std_util::str;

/// Checks that `ident` is its own canonical plural.
///
/// Every derived name is computed from the singular form of an identifier, so
/// an identifier that does not re-pluralize to itself would produce relation
/// names that do not match the declaration.
pub fn verify_pluralization(ident: &str) -> Result<()> {
    let singular = singular(ident);
    let plural = plural(&singular);

    if plural == ident {
        Ok(())
    } else {
        Err(Error::naming(ident, singular, plural))
    }
}

/// `zoo/lions` becomes `zoo/lion`.
pub fn singular(ident: &str) -> String {
    inflect_last(ident, str::singularize)
}

/// `zoo/lion` becomes `zoo/lions`.
pub fn plural(ident: &str) -> String {
    inflect_last(ident, str::pluralize)
}

/// Name of the join relation between an association and the plural form of
/// its parent role: the two sorted and joined with `_`.
pub fn join_name(association: &str, parent_plural: &str) -> String {
    let mut tokens = [association, parent_plural];
    tokens.sort_unstable();
    tokens.join("_")
}

/// Flattens namespace separators: `zoo/lions` becomes `zoo_lions`.
pub fn demodulate(ident: &str) -> String {
    ident.replace('/', "_")
}

/// Places `ident` in `namespace`: `zoo` and `lions` become `zoo/lions`.
pub fn namespaced(namespace: &str, ident: &str) -> String {
    format!("{}/{ident}", namespace.trim_end_matches('/'))
}

fn inflect_last(ident: &str, f: impl Fn(&str) -> String) -> String {
    match ident.rsplit_once('/') {
        Some((namespace, last)) => format!("{namespace}/{}", f(last)),
        None => f(ident),
    }
}
