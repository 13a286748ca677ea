//! Typed directed edges, the builder's only input.

/// An edge `subject -> object` labelled with a relation.
///
/// For the hierarchy relation the subject is the child and the object is the
/// parent (`HP:0001250 is_a HP:0012638`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<T, R> {
    pub subject: T,
    pub object: T,
    pub relation: R,
}

impl<T, R> Edge<T, R> {
    /// Create a new edge
    pub fn new(subject: T, object: T, relation: R) -> Self {
        Self {
            subject,
            object,
            relation,
        }
    }
}

impl<T, R> From<(T, T, R)> for Edge<T, R> {
    fn from((subject, object, relation): (T, T, R)) -> Self {
        Self::new(subject, object, relation)
    }
}
