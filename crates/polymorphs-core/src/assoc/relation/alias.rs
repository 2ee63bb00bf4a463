/// Another name for a relation registered on the same model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub target: String,
}
