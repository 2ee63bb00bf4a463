//! Double polymorphic joins: a join model whose both sides are polymorphic.

use super::{
    compile::compile_into, naming, Alias, Batch, Merged, OptionValue, Options, Registration,
    Relation,
};
use crate::{schema::ModelName, Error, Result, Schema};

use tracing::debug;

/// Option keys shared by both sides of a double join. Each may also be given
/// for one side only, prefixed with the collection name: `eaters_order`.
pub const RESERVED_KEYS: &[&str] = &[
    "conditions",
    "order",
    "limit",
    "offset",
    "extend",
    "skip_duplicates",
    "join_extend",
    "dependent",
    "rename_individual_collections",
    "namespace",
];

/// The two collections of a double polymorphic join, each with the options
/// that apply to it.
#[derive(Debug)]
pub struct DoubleJoinSpec {
    pub join_model: ModelName,

    /// In declaration order
    pub collections: [Collection; 2],
}

#[derive(Debug, Clone)]
pub struct Collection {
    /// Plural collection name, `eaters`
    pub name: String,

    /// Plural identifiers of the member types
    pub members: Vec<String>,

    /// General options merged with the ones given for this side
    pub options: Options,
}

impl DoubleJoinSpec {
    pub fn from_options(join_model: &ModelName, options: &Options) -> Result<Self> {
        let collections: Vec<_> = options
            .values()
            .filter(|(key, value)| value.is_list() && !is_reserved_suffix(key))
            .collect();

        if collections.len() != 2 {
            let names: Vec<_> = collections.iter().map(|(key, _)| key.to_string()).collect();
            return Err(Error::ambiguous_spec(&names));
        }

        let names = [collections[0].0, collections[1].0];

        for key in options.keys() {
            if names.contains(&key) || RESERVED_KEYS.contains(&key) {
                continue;
            }

            let side_specific = names.iter().any(|name| {
                key.strip_prefix(*name)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .is_some_and(|rest| RESERVED_KEYS.contains(&rest))
            });

            if !side_specific {
                return Err(Error::unknown_option(key));
            }
        }

        let collection = |(name, value): (&str, &OptionValue)| -> Result<Collection> {
            let members = value.as_idents().ok_or_else(|| {
                Error::validation(format!(
                    "collection `{name}` must be a list of plural type identifiers"
                ))
            })?;

            Ok(Collection {
                name: name.to_string(),
                members,
                options: side_options(options, name)?,
            })
        };

        Ok(DoubleJoinSpec {
            join_model: join_model.clone(),
            collections: [collection(collections[0])?, collection(collections[1])?],
        })
    }
}

/// Types that appear on both sides: `children` ∩ `parents`, in the order of
/// `children`.
pub fn conflicts(children: &[String], parents: &[String]) -> Vec<String> {
    children
        .iter()
        .filter(|child| parents.contains(child))
        .cloned()
        .collect()
}

/// Compiles both sides of the double polymorphic join on `join_model`.
///
/// Every member of one collection receives a polymorphic relation, named
/// after the other collection, to the members of the other collection.
pub fn compile_double(schema: &Schema, join_model: &ModelName, options: &Options) -> Result<Batch> {
    let double = DoubleJoinSpec::from_options(join_model, options)?;
    let join = schema.expect_model(join_model)?;
    let join_name = join_model.tableize();

    let mut batch = Batch::default();

    for (side, other) in [(0, 1), (1, 0)] {
        let side = &double.collections[side];
        let other = &double.collections[other];

        let reverse = naming::singular(&other.name);
        let singular = naming::singular(&side.name);

        let foreign_key = format!("{reverse}_id");
        if let Some(table) = schema.table_for(join) {
            if !table.has_column(&foreign_key) {
                return Err(Error::validation(format!(
                    "could not find the `{reverse}` reference column `{foreign_key}` in `{join_model}`"
                )));
            }
        }

        let conflicts = conflicts(&side.members, &other.members);

        debug!(
            join_model = %join_model,
            collection = %side.name,
            conflicts = ?conflicts,
            "compiling double polymorphic join side"
        );

        for parent in &other.members {
            let parent_model = ModelName::from_plural(parent);

            let mut options = side.options.clone();
            options.insert("is_double", true);
            options.insert("from", side.members.clone());
            options.insert("as", reverse.as_str());
            options.insert("through", join_name.as_str());
            options.insert("join_class_name", join_model.to_string());
            options.insert("foreign_key", foreign_key.as_str());
            options.insert("foreign_type_key", format!("{reverse}_type"));
            options.insert("singular_reverse_association_id", reverse.as_str());
            options.insert("conflicts", conflicts.clone());

            let reflection = compile_into(schema, &parent_model, &side.name, &options, &mut batch)?;

            let through = &reflection.spec.through;
            let join_relation = through
                .strip_suffix(&format!("_as_{reverse}"))
                .unwrap_or(through)
                .to_string();

            if conflicts.contains(parent) {
                // Unify the two sides of each conflicting type
                for conflict in &conflicts {
                    let name = naming::demodulate(conflict);
                    batch.push(
                        Registration::new(
                            &parent_model,
                            &name,
                            Relation::Merged(Merged::new(
                                format!("{reverse}_{name}"),
                                format!("{singular}_{name}"),
                            )),
                        )
                        .if_absent(),
                    );
                }

                batch.push(
                    Registration::new(
                        &parent_model,
                        &join_relation,
                        Relation::Merged(Merged::new(
                            format!("{join_relation}_as_{reverse}"),
                            format!("{join_relation}_as_{singular}"),
                        )),
                    )
                    .if_absent(),
                );
            } else {
                batch.push(
                    Registration::new(
                        &parent_model,
                        &join_relation,
                        Relation::Alias(Alias {
                            target: format!("{join_relation}_as_{reverse}"),
                        }),
                    )
                    .if_absent(),
                );
            }
        }
    }

    Ok(batch)
}

fn is_reserved_suffix(key: &str) -> bool {
    RESERVED_KEYS
        .iter()
        .any(|reserved| key == *reserved || key.ends_with(&format!("_{reserved}")))
}

/// Pushes the general options onto the side named `collection`.
fn side_options(options: &Options, collection: &str) -> Result<Options> {
    let mut ret = Options::new();

    for key in RESERVED_KEYS {
        let side_key = format!("{collection}_{key}");

        match *key {
            "conditions" => {
                let merged = match (options.conditions(&side_key)?, options.conditions(key)?) {
                    (Some(side), Some(general)) => Some(format!("({side}) AND ({general})")),
                    (side, general) => side.or(general),
                };
                if let Some(conditions) = merged {
                    ret.insert(key, conditions);
                }
            }
            "order" => {
                let merged = match (options.clause(&side_key)?, options.clause(key)?) {
                    (Some(side), Some(general)) => Some(format!("{side}, {general}")),
                    (side, general) => side.or(general),
                };
                if let Some(order) = merged {
                    ret.insert(key, order);
                }
            }
            "extend" | "join_extend" => {
                let mut extensions = options.extensions(&side_key)?;
                extensions.extend(options.extensions(key)?);
                if !extensions.is_empty() {
                    ret.set_extensions(key, extensions);
                }
            }
            _ => {
                if let Some(value) = options.get(&side_key).or_else(|| options.get(key)) {
                    ret.insert(key, value.clone());
                }
            }
        }
    }

    Ok(ret)
}
