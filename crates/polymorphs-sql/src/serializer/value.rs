use super::{Formatter, Params, ToSql};

/// A single-quoted string literal
pub(super) struct Literal<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Literal<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('\'');
        for ch in self.0.as_ref().chars() {
            if ch == '\'' {
                f.dst.push('\'');
            }
            f.dst.push(ch);
        }
        f.dst.push('\'');
    }
}
