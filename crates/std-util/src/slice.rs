use rand::{seq::SliceRandom, thread_rng};
use std::{collections::HashSet, hash::Hash};

pub trait SliceUtil<T> {
    /// Returns `true` if the slice only contains unique values
    fn is_unique(&self) -> bool
    where
        T: Eq + Hash;

    /// Elements that appear more than once, in order of their second
    /// occurrence
    fn duplicates(&self) -> Vec<&T>
    where
        T: Eq + Hash;

    /// Shuffle the slice in place
    fn shuffle(&mut self);
}

impl<T> SliceUtil<T> for [T] {
    fn is_unique(&self) -> bool
    where
        T: Eq + Hash,
    {
        is_unique(self)
    }

    fn duplicates(&self) -> Vec<&T>
    where
        T: Eq + Hash,
    {
        let mut seen = HashSet::new();
        self.iter().filter(|el| !seen.insert(*el)).collect()
    }

    fn shuffle(&mut self) {
        shuffle(self)
    }
}

pub fn is_unique<T: Eq + Hash>(slice: &[T]) -> bool {
    let mut s = HashSet::new();

    for el in slice {
        if !s.insert(el) {
            return false;
        }
    }

    true
}

pub fn shuffle<T>(slice: &mut [T]) {
    SliceRandom::shuffle(slice, &mut thread_rng());
}
