use super::{Comma, Ident, Literal, Params, Period, ToSql};

use polymorphs_core::assoc::{
    Projection, SelectColumn, ASSOCIATION_ID_COLUMN, PARENT_CLASS_COLUMN,
};

impl ToSql for &Projection {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Projection::Custom(select) => fmt!(f, select.as_str()),
            Projection::Columns {
                parent,
                association,
                columns,
            } => {
                fmt!(
                    f,
                    Literal(parent) " AS " Ident(PARENT_CLASS_COLUMN) ", "
                    Literal(association) " AS " Ident(ASSOCIATION_ID_COLUMN)
                );

                if !columns.is_empty() {
                    fmt!(f, ", " Comma(columns));
                }
            }
        }
    }
}

impl ToSql for &SelectColumn {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column = Period([Ident(&self.table), Ident(&self.column)]);
        fmt!(f, column " AS " Ident(&self.alias));
    }
}
