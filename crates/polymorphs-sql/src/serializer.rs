#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited, Period};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

mod value;
use value::Literal;

// Fragment serializers
mod join;
mod projection;

use polymorphs_core::assoc::{JoinPlan, PolymorphicReflection, Projection};

/// Renders compiled polymorphic relations to SQL
#[derive(Debug)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    /// The select list of the union view
    pub fn serialize_projection(&self, projection: &Projection) -> String {
        self.render(&mut Vec::<String>::new(), |f| fmt!(f, projection))
    }

    /// Every join of the union view, separated by spaces
    pub fn serialize_joins(&self, plan: &JoinPlan) -> String {
        self.render(&mut Vec::<String>::new(), |f| {
            fmt!(f, Delimited(plan.joins.iter(), " "))
        })
    }

    /// The condition keeping rows where some target exists
    pub fn serialize_existence(&self, plan: &JoinPlan) -> Option<String> {
        if plan.existence.is_empty() {
            return None;
        }

        Some(self.render(&mut Vec::<String>::new(), |f| {
            fmt!(f, Delimited(plan.existence.iter().map(join::Exists), " OR "))
        }))
    }

    /// The query listing every record related to one owner through the
    /// union view. The owner's key is the only parameter.
    pub fn serialize_union(
        &self,
        reflection: &PolymorphicReflection,
        params: &mut impl Params,
    ) -> String {
        let plan = &reflection.plan;
        let view = &reflection.spec.view;

        let mut ret = self.render(params, |f| {
            let projection = &plan.projection;
            let owner_key = &plan.owner_key;
            let placeholder = f.params.push(&owner_key.column);

            fmt!(
                f,
                "SELECT " projection
                " FROM " Ident(&plan.source) " "
                Delimited(plan.joins.iter(), " ")
                " WHERE " owner_key " = " placeholder
            );

            if let Some((column, value)) = &plan.owner_type {
                fmt!(f, " AND " column " = " Literal(value));
            }

            if !plan.existence.is_empty() {
                fmt!(
                    f,
                    " AND (" Delimited(plan.existence.iter().map(join::Exists), " OR ") ")"
                );
            }

            if let Some(conditions) = &view.conditions {
                fmt!(f, " AND (" conditions.as_str() ")");
            }

            if let Some(group) = &view.group {
                fmt!(f, " GROUP BY " group.as_str());
            }

            if let Some(order) = &view.order {
                fmt!(f, " ORDER BY " order.as_str());
            }

            if let Some(limit) = view.limit {
                fmt!(f, " LIMIT " limit);
            }

            if let Some(offset) = view.offset {
                fmt!(f, " OFFSET " offset);
            }
        });

        ret.push(';');
        ret
    }

    fn render<T: Params>(&self, params: &mut T, f: impl FnOnce(&mut Formatter<'_, T>)) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        f(&mut fmt);
        ret
    }
}
