use super::Serializer;

/// SQL dialect targeted by a serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
}

impl Flavor {
    /// Character delimiting quoted identifiers
    pub(super) fn identifier_quote(self) -> char {
        match self {
            Flavor::Mysql => '`',
            Flavor::Postgresql | Flavor::Sqlite => '"',
        }
    }

    /// Whether placeholders carry the parameter position
    pub(super) fn numbered_placeholders(self) -> bool {
        !matches!(self, Flavor::Mysql)
    }
}

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer::new(Flavor::Sqlite)
    }

    pub fn postgresql() -> Serializer {
        Serializer::new(Flavor::Postgresql)
    }

    pub fn mysql() -> Serializer {
        Serializer::new(Flavor::Mysql)
    }

    fn new(flavor: Flavor) -> Serializer {
        Serializer { flavor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialects() {
        assert_eq!(Serializer::mysql().flavor.identifier_quote(), '`');
        assert_eq!(Serializer::sqlite().flavor.identifier_quote(), '"');
        assert!(!Flavor::Mysql.numbered_placeholders());
        assert!(Flavor::Postgresql.numbered_placeholders());
    }
}
