use polymorphs_core::assoc::{Hook, Relation};

use indexmap::IndexMap;

/// Relations and hooks installed on a single model
#[derive(Debug, Default)]
pub(super) struct ModelRelations {
    /// Relations by name, in declaration order
    pub(super) relations: IndexMap<String, Relation>,

    pub(super) hooks: Vec<Hook>,
}

impl ModelRelations {
    pub(super) fn contains(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    pub(super) fn insert(&mut self, name: String, relation: Relation) {
        self.relations.insert(name, relation);
    }

    /// Adds `hook` unless one with the same identity is installed.
    pub(super) fn install_hook(&mut self, hook: Hook) {
        if self
            .hooks
            .iter()
            .all(|existing| existing.identity() != hook.identity())
        {
            self.hooks.push(hook);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hooks_install_once() {
        let mut relations = ModelRelations::default();
        relations.install_hook(Hook::sti_class_rewrite("eater_type"));
        relations.install_hook(Hook::sti_class_rewrite("food_type"));
        relations.install_hook(Hook::sti_class_rewrite("eater_type"));

        assert_eq!(
            relations.hooks,
            [
                Hook::sti_class_rewrite("eater_type"),
                Hook::sti_class_rewrite("food_type"),
            ]
        );
    }
}
