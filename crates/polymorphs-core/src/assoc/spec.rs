use super::{naming, Dependent, Extensions, Options};
use crate::{schema::ModelName, Error, Result};

use std_util::{slice::SliceUtil, str};
use tracing::warn;

/// Option keys accepted by a polymorphic relation declaration
pub const KEYS: &[&str] = &[
    "from",
    "as",
    "through",
    "foreign_key",
    "foreign_type_key",
    "polymorphic_key",
    "association_foreign_key",
    "polymorphic_type_key",
    "dependent",
    "skip_duplicates",
    "ignore_duplicates",
    "is_double",
    "rename_individual_collections",
    "reverse_association_id",
    "singular_reverse_association_id",
    "conflicts",
    "extend",
    "join_class_name",
    "join_extend",
    "parent_extend",
    "select",
    "conditions",
    "order",
    "group",
    "limit",
    "offset",
    "parent_conditions",
    "parent_order",
    "parent_group",
    "parent_limit",
    "parent_offset",
    "namespace",
    "uniq",
];

/// Query clauses scoping a generated relation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clauses {
    pub conditions: Option<String>,
    pub order: Option<String>,
    pub group: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Canonical, fully defaulted description of one polymorphic relation.
#[derive(Debug, Clone)]
pub struct AssociationSpec {
    /// Plural name of the relation, `eaters`
    pub name: String,

    /// Model the relation is declared on
    pub parent: ModelName,

    /// Role the parent plays on the join model
    pub role: String,

    /// Plural identifiers of the target types, in declaration order
    pub from: Vec<String>,

    /// Name of the join relation on the parent
    pub through: String,

    /// The join relation's identifier as declared, namespaced but not yet
    /// suffixed or demodulated. Orders the join among alias participants.
    pub join_ident: String,

    /// Model backing the join relation
    pub join_model: ModelName,

    /// Join model column referencing the parent
    pub foreign_key: String,

    /// Join model column holding the parent's type, when the parent side is
    /// polymorphic as well
    pub foreign_type_key: Option<String>,

    /// Join model column referencing the target
    pub polymorphic_key: String,

    /// Join model column holding the target's type
    pub polymorphic_type_key: String,

    pub skip_duplicates: bool,

    pub dependent: Dependent,

    /// Prefix forward and reverse relation names with the association
    pub rename_individual_collections: bool,

    /// Declared as one side of a double polymorphic join
    pub is_double: bool,

    /// De-duplicate union view results
    pub uniq: bool,

    /// Replaces the generated projection
    pub select: Option<String>,

    /// Clauses scoping the union view and forward relations
    pub view: Clauses,

    /// Clauses scoping the reverse relations on the targets
    pub parent_scope: Clauses,

    /// Target identifiers that are also parents of the same join model
    pub conflicts: Vec<String>,

    pub extend: Extensions,
    pub join_extend: Extensions,
    pub parent_extend: Extensions,

    pub namespace: Option<String>,
}

impl AssociationSpec {
    /// Validates `options` and fills in every default.
    pub fn from_options(parent: &ModelName, name: &str, options: &Options) -> Result<Self> {
        options.verify_keys(|key| KEYS.contains(&key))?;

        naming::verify_pluralization(name)?;

        let mut from = match options.get("from") {
            Some(value) => value
                .as_idents()
                .filter(|from| !from.is_empty())
                .ok_or_else(|| {
                    Error::validation("`from` must be a non-empty list of plural type identifiers")
                })?,
            None => return Err(Error::validation("`from` is required")),
        };

        for ident in &from {
            naming::verify_pluralization(ident)?;
        }

        if let Some(duplicate) = from.duplicates().first() {
            return Err(Error::validation(format!(
                "`from` lists `{duplicate}` more than once"
            )));
        }

        let singular = naming::singular(name);

        let role = match options.ident("as")? {
            Some(role) => role,
            None => str::snake_case(parent.demodulize()),
        };

        let foreign_key = match options.ident("foreign_key")? {
            Some(key) => key,
            None => format!("{role}_id"),
        };

        let polymorphic_key = match options.ident("polymorphic_key")? {
            Some(key) => key,
            None => match options.ident("association_foreign_key")? {
                Some(key) => key,
                None => format!("{singular}_id"),
            },
        };

        let polymorphic_type_key = match options.ident("polymorphic_type_key")? {
            Some(key) => key,
            None => format!("{singular}_type"),
        };

        let ignore_duplicates = options.flag("ignore_duplicates")?;
        if ignore_duplicates.is_some() {
            warn!(
                parent = %parent,
                association = name,
                "`ignore_duplicates` is deprecated; use `skip_duplicates`"
            );
        }

        let skip_duplicates = options
            .flag("skip_duplicates")?
            .or(ignore_duplicates)
            .unwrap_or(true);

        let mut through = match options.ident("through")? {
            Some(through) => through,
            None => naming::join_name(name, &naming::plural(&role)),
        };

        let mut conflicts = options.idents("conflicts")?.unwrap_or_default();

        let namespace = options.ident("namespace")?;
        if let Some(namespace) = &namespace {
            for ident in from.iter_mut().chain(conflicts.iter_mut()) {
                *ident = naming::namespaced(namespace, ident);
            }
            through = naming::namespaced(namespace, &through);
        }

        let join_model = match options.ident("join_class_name")? {
            Some(join_model) => ModelName::new(&join_model),
            None => ModelName::from_plural(&through),
        };

        let join_ident = through.clone();

        if let Some(reverse) = options.ident("singular_reverse_association_id")? {
            through = format!("{through}_as_{reverse}");
        }

        Ok(Self {
            name: name.to_string(),
            parent: parent.clone(),
            role,
            from,
            through: naming::demodulate(&through),
            join_ident,
            join_model,
            foreign_key,
            foreign_type_key: options.ident("foreign_type_key")?,
            polymorphic_key,
            polymorphic_type_key,
            skip_duplicates,
            dependent: options.dependent("dependent")?.unwrap_or_default(),
            rename_individual_collections: options
                .flag("rename_individual_collections")?
                .unwrap_or(false),
            is_double: options.flag("is_double")?.unwrap_or(false),
            uniq: options.flag("uniq")?.unwrap_or(false),
            select: options.ident("select")?,
            view: Clauses::from_options(options, "")?,
            parent_scope: Clauses::from_options(options, "parent_")?,
            conflicts,
            extend: options.extensions("extend")?,
            join_extend: options.extensions("join_extend")?,
            parent_extend: options.extensions("parent_extend")?,
            namespace,
        })
    }

    /// Singular form of the association name, `eater`
    pub fn singular(&self) -> String {
        naming::singular(&self.name)
    }

    /// Plural form of the parent role, `petfoods`
    pub fn role_plural(&self) -> String {
        naming::plural(&self.role)
    }

    pub fn is_conflict(&self, ident: &str) -> bool {
        self.conflicts.iter().any(|conflict| conflict == ident)
    }
}

impl Clauses {
    fn from_options(options: &Options, prefix: &str) -> Result<Self> {
        let key = |name: &str| format!("{prefix}{name}");

        Ok(Self {
            conditions: options.conditions(&key("conditions"))?,
            order: options.clause(&key("order"))?,
            group: options.clause(&key("group"))?,
            limit: options.int(&key("limit"))?,
            offset: options.int(&key("offset"))?,
        })
    }
}
