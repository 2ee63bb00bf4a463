//! Word inflection and case conversion.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// Plural form of `word`. Words that are already plural are returned as-is.
pub fn pluralize(word: &str) -> String {
    pluralizer::pluralize(word, 2, false)
}

/// Singular form of `word`. Words that are already singular are returned
/// as-is.
pub fn singularize(word: &str) -> String {
    pluralizer::pluralize(word, 1, false)
}

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

pub fn upper_camel_case(src: &str) -> String {
    src.to_upper_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflect_regular_words() {
        assert_eq!(pluralize("dog"), "dogs");
        assert_eq!(pluralize("dogs"), "dogs");
        assert_eq!(singularize("cats"), "cat");
        assert_eq!(singularize("cat"), "cat");
    }

    #[test]
    fn case_conversion() {
        assert_eq!(snake_case("EatersPetfood"), "eaters_petfood");
        assert_eq!(upper_camel_case("eaters_petfood"), "EatersPetfood");
    }
}
