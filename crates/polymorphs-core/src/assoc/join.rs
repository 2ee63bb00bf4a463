use super::Resolved;

use std::fmt;

/// Alias of the parent table in the union view
pub const PARENT_ALIAS: &str = "polymorphic_parent";

/// Synthetic column carrying the parent's type name
pub const PARENT_CLASS_COLUMN: &str = "polymorphic_parent_class";

/// Synthetic column carrying the association name
pub const ASSOCIATION_ID_COLUMN: &str = "polymorphic_association_id";

/// The union view of a polymorphic relation: which columns to select from
/// which joined tables.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinPlan {
    pub projection: Projection,

    /// Join table the view selects from
    pub source: String,

    /// The parent join followed by one left join per target table
    pub joins: Vec<Join>,

    /// Join table column matched against the owning parent's key
    pub owner_key: ColumnPath,

    /// Join table column and value checking the owning parent's type, when
    /// the parent side is polymorphic as well
    pub owner_type: Option<(ColumnPath, String)>,

    /// Aliased primary key of each target type, ordered by type
    pub existence: Vec<SelectColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// The discriminator literals followed by every aliased column
    Columns {
        parent: String,
        association: String,
        columns: Vec<SelectColumn>,
    },

    /// Caller supplied select list, used verbatim
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectColumn {
    pub table: String,
    pub column: String,
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPath {
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub alias: Option<String>,
    pub on: Vec<JoinConstraint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinConstraint {
    /// Two columns are equal
    Columns(ColumnPath, ColumnPath),

    /// A column equals a string literal
    Value(ColumnPath, String),
}

impl JoinPlan {
    pub fn compile(cx: &Resolved<'_>) -> JoinPlan {
        let spec = cx.spec;
        let source = cx.join.table_name().to_string();

        let projection = match &spec.select {
            Some(select) => Projection::Custom(select.clone()),
            None => {
                let mut columns: Vec<_> = cx
                    .aliases
                    .iter()
                    .map(|(table, column, alias)| SelectColumn {
                        table: table.to_string(),
                        column: column.to_string(),
                        alias: alias.to_string(),
                    })
                    .collect();
                columns.sort_by(|a, b| a.alias.cmp(&b.alias));

                Projection::Columns {
                    parent: spec.parent.to_string(),
                    association: spec.name.clone(),
                    columns,
                }
            }
        };

        let mut joins = vec![Join {
            kind: JoinKind::Inner,
            table: cx.parent.table_name().to_string(),
            alias: Some(PARENT_ALIAS.to_string()),
            on: vec![JoinConstraint::Columns(
                ColumnPath::new(&source, &spec.foreign_key),
                ColumnPath::new(PARENT_ALIAS, &cx.parent.primary_key),
            )],
        }];

        for target in &cx.targets {
            let table = target.model.table_name();

            if joins
                .iter()
                .any(|join| join.kind == JoinKind::Left && join.table == table)
            {
                continue;
            }

            joins.push(Join {
                kind: JoinKind::Left,
                table: table.to_string(),
                alias: None,
                on: vec![
                    JoinConstraint::Columns(
                        ColumnPath::new(&source, &spec.polymorphic_key),
                        ColumnPath::new(table, &target.model.primary_key),
                    ),
                    JoinConstraint::Value(
                        ColumnPath::new(&source, &spec.polymorphic_type_key),
                        target.base.name.to_string(),
                    ),
                ],
            });
        }

        let mut existence: Vec<SelectColumn> = vec![];
        for target in cx.sorted_targets() {
            let table = target.model.table_name();
            let column = &target.model.primary_key;

            let Some(alias) = cx.aliases.get(table, column) else {
                continue;
            };

            if existence.iter().all(|existing| existing.alias != alias) {
                existence.push(SelectColumn {
                    table: table.to_string(),
                    column: column.clone(),
                    alias: alias.to_string(),
                });
            }
        }

        let owner_type = spec.foreign_type_key.as_ref().map(|key| {
            (
                ColumnPath::new(&source, key),
                cx.parent_base().name.to_string(),
            )
        });

        JoinPlan {
            projection,
            owner_key: ColumnPath::new(&source, &spec.foreign_key),
            owner_type,
            source,
            joins,
            existence,
        }
    }

    /// The condition keeping only rows where some target exists:
    /// `t1_r0 > 0 OR t2_r0 > 0`.
    pub fn existence_filter(&self) -> Option<String> {
        if self.existence.is_empty() {
            return None;
        }

        let terms: Vec<_> = self
            .existence
            .iter()
            .map(|column| format!("{} > 0", column.alias))
            .collect();
        Some(terms.join(" OR "))
    }
}

impl ColumnPath {
    pub fn new(table: &str, column: &str) -> ColumnPath {
        ColumnPath {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Custom(select) => f.write_str(select),
            Projection::Columns {
                parent,
                association,
                columns,
            } => {
                write!(
                    f,
                    "'{parent}' AS {PARENT_CLASS_COLUMN}, '{association}' AS {ASSOCIATION_ID_COLUMN}"
                )?;
                for column in columns {
                    write!(f, ", {}.{} AS {}", column.table, column.column, column.alias)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ColumnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

impl fmt::Display for JoinConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinConstraint::Columns(lhs, rhs) => write!(f, "{lhs} = {rhs}"),
            JoinConstraint::Value(lhs, value) => write!(f, "{lhs} = '{value}'"),
        }
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            JoinKind::Inner => write!(f, "INNER JOIN {}", self.table)?,
            JoinKind::Left => write!(f, "LEFT JOIN {}", self.table)?,
        }

        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }

        for (i, constraint) in self.on.iter().enumerate() {
            let keyword = if i == 0 { "ON" } else { "AND" };
            write!(f, " {keyword} {constraint}")?;
        }

        Ok(())
    }
}
