use super::{Flavor, Formatter, ToSql};

/// Collects the parameters of a query as they are referenced
pub trait Params {
    /// Records the parameter bound to `column`, returning its placeholder
    fn push(&mut self, column: &str) -> Placeholder;
}

pub struct Placeholder(pub usize);

impl Params for Vec<String> {
    fn push(&mut self, column: &str) -> Placeholder {
        self.push(column.to_string());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        let flavor = f.serializer.flavor;
        let _ = match flavor {
            Flavor::Postgresql => write!(f.dst, "${}", self.0),
            _ if flavor.numbered_placeholders() => write!(f.dst, "?{}", self.0),
            _ => f.dst.write_char('?'),
        };
    }
}
