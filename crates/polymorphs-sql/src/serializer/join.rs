use super::{Ident, Literal, Params, Period, ToSql};

use polymorphs_core::assoc::{ColumnPath, Join, JoinConstraint, JoinKind, SelectColumn};

/// `table.column > 0` for a target's primary key
pub(super) struct Exists<'a>(pub(super) &'a SelectColumn);

impl ToSql for &Join {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let kind = match self.kind {
            JoinKind::Inner => "INNER JOIN ",
            JoinKind::Left => "LEFT JOIN ",
        };
        fmt!(f, kind Ident(&self.table));

        if let Some(alias) = &self.alias {
            fmt!(f, " AS " Ident(alias));
        }

        let mut keyword = " ON ";
        for constraint in &self.on {
            fmt!(f, keyword constraint);
            keyword = " AND ";
        }
    }
}

impl ToSql for &JoinConstraint {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            JoinConstraint::Columns(lhs, rhs) => fmt!(f, lhs " = " rhs),
            JoinConstraint::Value(lhs, value) => fmt!(f, lhs " = " Literal(value)),
        }
    }
}

impl ToSql for &ColumnPath {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, Period([Ident(&self.table), Ident(&self.column)]));
    }
}

impl ToSql for Exists<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column = Period([Ident(&self.0.table), Ident(&self.0.column)]);
        fmt!(f, column " > 0");
    }
}
