use std_util::str;

/// A model (type) name such as `Petfood` or `Zoo::Lion`.
///
/// Stored as upper camel case segments. Namespaced identifiers are written
/// `zoo/lion` in snake case and `Zoo::Lion` as model names.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ModelName {
    pub parts: Vec<String>,
}

impl ModelName {
    /// Parses `Zoo::Lion`, `zoo/lion` or `zoo_keeper/lion`.
    pub fn new(src: &str) -> Self {
        let parts = src
            .split("::")
            .flat_map(|part| part.split('/'))
            .filter(|part| !part.is_empty())
            .map(str::upper_camel_case)
            .collect();
        Self { parts }
    }

    /// The model name for a plural type identifier: `zoo/lions` becomes
    /// `Zoo::Lion`.
    pub fn from_plural(ident: &str) -> Self {
        let (namespace, last) = match ident.rsplit_once('/') {
            Some((namespace, last)) => (Some(namespace), last),
            None => (None, ident),
        };

        let singular = str::singularize(last);
        match namespace {
            Some(namespace) => Self::new(&format!("{namespace}/{singular}")),
            None => Self::new(&singular),
        }
    }

    /// The last segment: `Zoo::Lion` becomes `Lion`.
    pub fn demodulize(&self) -> &str {
        self.parts.last().map(String::as_str).unwrap_or("")
    }

    /// `Zoo::Lion` becomes `zoo/lion`.
    pub fn underscore(&self) -> String {
        self.parts
            .iter()
            .map(|part| str::snake_case(part))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// `Zoo::Lion` becomes `zoo/lions`.
    pub fn tableize(&self) -> String {
        let underscored = self.underscore();
        match underscored.rsplit_once('/') {
            Some((namespace, last)) => format!("{namespace}/{}", str::pluralize(last)),
            None => str::pluralize(&underscored),
        }
    }
}

impl core::fmt::Display for ModelName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.parts.join("::"))
    }
}

impl From<&str> for ModelName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&ModelName> for ModelName {
    fn from(value: &ModelName) -> Self {
        value.clone()
    }
}
