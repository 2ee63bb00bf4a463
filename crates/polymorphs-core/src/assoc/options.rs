use crate::{Error, Result};

use indexmap::IndexMap;
use serde::Deserialize;
use std::{fmt, sync::Arc};

/// A single declarative option value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<OptionValue>),
}

/// A behavior fragment attached to a generated relation.
///
/// Extensions are composed by concatenation. The same extension may appear
/// more than once in a list.
pub trait Extension: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
}

/// An extension referenced by name only, as happens when options are
/// deserialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedExtension(pub String);

impl Extension for NamedExtension {
    fn name(&self) -> &str {
        &self.0
    }
}

pub type Extensions = Vec<Arc<dyn Extension>>;

/// What happens to join rows when a related record goes away
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dependent {
    #[default]
    Cascade,
    Nullify,
    DeleteAll,
}

/// Raw, loosely typed options of a polymorphic relation declaration.
///
/// Keys keep their insertion order. Extension objects cannot be expressed as
/// plain values and are kept on the side, per key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "IndexMap<String, OptionValue>")]
pub struct Options {
    values: IndexMap<String, OptionValue>,
    extensions: IndexMap<String, Extensions>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Appends an extension object to the list stored under `key`
    pub fn extend_with(mut self, key: &str, extension: impl Extension + 'static) -> Self {
        self.push_extension(key, Arc::new(extension));
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<OptionValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn push_extension(&mut self, key: &str, extension: Arc<dyn Extension>) {
        self.extensions
            .entry(key.to_string())
            .or_default()
            .push(extension);
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key) || self.extensions.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.values.shift_remove(key)
    }

    /// Every key that carries a value or an extension, values first
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str).chain(
            self.extensions
                .keys()
                .filter(|key| !self.values.contains_key(*key))
                .map(String::as_str),
        )
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Fails with an unknown option error on the first key not accepted by
    /// `is_known`.
    pub(crate) fn verify_keys(&self, is_known: impl Fn(&str) -> bool) -> Result<()> {
        match self.keys().find(|key| !is_known(key)) {
            Some(key) => Err(Error::unknown_option(key)),
            None => Ok(()),
        }
    }

    pub(crate) fn ident(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(OptionValue::Str(value)) => Ok(Some(value.clone())),
            Some(other) => Err(unexpected(key, "an identifier", other)),
        }
    }

    pub(crate) fn flag(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(OptionValue::Bool(value)) => Ok(Some(*value)),
            Some(other) => Err(unexpected(key, "a boolean", other)),
        }
    }

    pub(crate) fn int(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            None => Ok(None),
            Some(OptionValue::Int(value)) => Ok(Some(*value)),
            Some(other) => Err(unexpected(key, "an integer", other)),
        }
    }

    /// A list of identifiers. A single identifier is read as a list of one.
    pub(crate) fn idents(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.get(key) {
            None => Ok(None),
            Some(OptionValue::Str(value)) => Ok(Some(vec![value.clone()])),
            Some(value @ OptionValue::List(_)) => value
                .as_idents()
                .map(Some)
                .ok_or_else(|| unexpected(key, "a list of identifiers", value)),
            Some(other) => Err(unexpected(key, "a list of identifiers", other)),
        }
    }

    /// An `ORDER BY` or `GROUP BY` clause. Lists are joined with commas.
    pub(crate) fn clause(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(OptionValue::Str(value)) => Ok(Some(value.clone())),
            Some(value @ OptionValue::List(_)) => value
                .as_idents()
                .map(|items| Some(items.join(", ")))
                .ok_or_else(|| unexpected(key, "a clause", value)),
            Some(other) => Err(unexpected(key, "a clause", other)),
        }
    }

    /// A `WHERE` clause. Lists are a template followed by bind values, with
    /// each `?` in the template replaced by the next quoted value.
    pub(crate) fn conditions(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(OptionValue::Str(value)) => Ok(Some(value.clone())),
            Some(OptionValue::List(items)) => sanitize(key, items).map(Some),
            Some(other) => Err(unexpected(key, "conditions", other)),
        }
    }

    pub(crate) fn dependent(&self, key: &str) -> Result<Option<Dependent>> {
        let Some(value) = self.ident(key)? else {
            return Ok(None);
        };

        match value.as_str() {
            "cascade" | "destroy" => Ok(Some(Dependent::Cascade)),
            "nullify" => Ok(Some(Dependent::Nullify)),
            "delete_all" => Ok(Some(Dependent::DeleteAll)),
            other => Err(Error::validation(format!(
                "`{key}` must be one of `cascade`, `nullify` or `delete_all`; got `{other}`"
            ))),
        }
    }

    /// Extensions stored under `key`: named ones from the value, followed by
    /// extension objects.
    pub(crate) fn extensions(&self, key: &str) -> Result<Extensions> {
        let mut ret: Extensions = vec![];

        if let Some(names) = self.idents(key)? {
            for name in names {
                ret.push(Arc::new(NamedExtension(name)));
            }
        }

        if let Some(objects) = self.extensions.get(key) {
            ret.extend(objects.iter().cloned());
        }

        Ok(ret)
    }

    pub(crate) fn set_extensions(&mut self, key: &str, extensions: Extensions) {
        self.values.shift_remove(key);
        self.extensions.insert(key.to_string(), extensions);
    }
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, OptionValue::List(_))
    }

    /// The list items when every item is an identifier
    pub fn as_idents(&self) -> Option<Vec<String>> {
        match self {
            OptionValue::List(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "a boolean",
            OptionValue::Int(_) => "an integer",
            OptionValue::Str(_) => "a string",
            OptionValue::List(_) => "a list",
        }
    }

    /// Renders the value as a SQL literal
    fn quote(&self) -> String {
        match self {
            OptionValue::Bool(true) => "TRUE".to_string(),
            OptionValue::Bool(false) => "FALSE".to_string(),
            OptionValue::Int(value) => value.to_string(),
            OptionValue::Str(value) => format!("'{}'", value.replace('\'', "''")),
            OptionValue::List(items) => {
                let items: Vec<_> = items.iter().map(OptionValue::quote).collect();
                items.join(", ")
            }
        }
    }
}

fn unexpected(key: &str, expected: &str, actual: &OptionValue) -> Error {
    Error::validation(format!(
        "`{key}` must be {expected}; got {}",
        actual.describe()
    ))
}

fn sanitize(key: &str, items: &[OptionValue]) -> Result<String> {
    let [OptionValue::Str(template), binds @ ..] = items else {
        return Err(Error::validation(format!(
            "`{key}` given as a list must start with a condition template"
        )));
    };

    let mut binds = binds.iter();
    let mut ret = String::with_capacity(template.len());

    for ch in template.chars() {
        if ch != '?' {
            ret.push(ch);
            continue;
        }

        let Some(bind) = binds.next() else {
            return Err(Error::validation(format!(
                "`{key}` has more placeholders than bind values"
            )));
        };
        ret.push_str(&bind.quote());
    }

    if binds.next().is_some() {
        return Err(Error::validation(format!(
            "`{key}` has more bind values than placeholders"
        )));
    }

    Ok(ret)
}

impl From<IndexMap<String, OptionValue>> for Options {
    fn from(values: IndexMap<String, OptionValue>) -> Self {
        Self {
            values,
            extensions: IndexMap::new(),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(value: Vec<T>) -> Self {
        OptionValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OptionValue>, const N: usize> From<[T; N]> for OptionValue {
    fn from(value: [T; N]) -> Self {
        OptionValue::List(value.into_iter().map(Into::into).collect())
    }
}
