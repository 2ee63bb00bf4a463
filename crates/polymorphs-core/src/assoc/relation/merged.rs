/// Read-only concatenation of two relations registered on the same model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    pub parts: [String; 2],
}

impl Merged {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Merged {
        Merged {
            parts: [first.into(), second.into()],
        }
    }

    /// Concatenates the records of both parts. The result cannot grow.
    pub fn concat<T>(&self, first: Vec<T>, second: Vec<T>) -> Box<[T]> {
        let mut ret = first;
        ret.extend(second);
        ret.into_boxed_slice()
    }
}
