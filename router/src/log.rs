use super::segment::Segment;

/// A single call to [`Router::insert`](crate::Router::insert) that passed validation.
#[derive(Clone, Debug)]
pub(crate) struct Registration<T> {
    pub(crate) method: Box<str>,
    pub(crate) path: Box<str>,
    // parsed form of `path`, kept so replaying never has to validate again.
    pub(crate) segments: Vec<Segment>,
    pub(crate) value: T,
}

/// Append only record of registrations in insertion order.
///
/// Routing trees refer to values by their position in the log. Removal filters the log and the owner rebuilds
/// every tree from what is left.
#[derive(Clone, Debug)]
pub(crate) struct RegistrationLog<T> {
    entries: Vec<Registration<T>>,
}

impl<T> RegistrationLog<T> {
    pub(crate) const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append a registration and return its position.
    pub(crate) fn push(&mut self, registration: Registration<T>) -> usize {
        self.entries.push(registration);
        self.entries.len() - 1
    }

    pub(crate) fn get(&self, i: usize) -> Option<&Registration<T>> {
        self.entries.get(i)
    }

    /// Drop every registration of the exact `method` and `path` pair. Returns the number of dropped entries.
    pub(crate) fn remove(&mut self, method: &str, path: &str) -> usize {
        let len = self.entries.len();
        self.entries
            .retain(|r| !(&*r.method == method && &*r.path == path));
        len - self.entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> core::slice::Iter<'_, Registration<T>> {
        self.entries.iter()
    }
}

impl<T> IntoIterator for RegistrationLog<T> {
    type Item = Registration<T>;
    type IntoIter = std::vec::IntoIter<Registration<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
