use std::sync::Arc;

use smallvec::SmallVec;

/// A single URL parameter, consisting of a key and a value.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
struct Param<'v> {
    key: Arc<str>,
    value: &'v str,
}

impl<'v> Param<'v> {
    fn key_str(&self) -> &str {
        &self.key
    }

    fn value_str(&self) -> &'v str {
        self.value
    }
}

/// Parameters captured by a successful match.
///
/// One entry is present for every `:name` segment traversed, plus `*` for a catch-all capture. Pure literal
/// matches carry no parameter.
#[derive(Debug, Clone)]
pub struct Params<'v> {
    // two parameters are kept inline before spilling to heap.
    inner: SmallVec<[Param<'v>; 2]>,
}

impl<'v> Params<'v> {
    pub(crate) fn new() -> Self {
        Self { inner: SmallVec::new() }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no parameters in the list.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub(crate) fn truncate(&mut self, n: usize) {
        self.inner.truncate(n)
    }

    /// Returns the value bound to the given key.
    ///
    /// When a route names the same parameter more than once the last capture wins.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&'v str> {
        let key = key.as_ref();
        self.inner
            .iter()
            .rev()
            .find(|param| param.key_str() == key)
            .map(Param::value_str)
    }

    /// Returns an iterator over the parameters in the order they were captured.
    pub fn iter(&self) -> ParamsIter<'_, 'v> {
        ParamsIter {
            inner: self.inner.iter(),
        }
    }

    /// Inserts a key value parameter pair into the list.
    pub(crate) fn push(&mut self, key: Arc<str>, value: &'v str) {
        self.inner.push(Param { key, value });
    }
}

/// An iterator over the keys and values of [`Params`].
pub struct ParamsIter<'p, 'v> {
    inner: core::slice::Iter<'p, Param<'v>>,
}

impl<'p, 'v> Iterator for ParamsIter<'p, 'v> {
    type Item = (&'p str, &'v str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|param| (param.key_str(), param.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'v> IntoIterator for Params<'v> {
    type Item = (Arc<str>, &'v str);
    type IntoIter = ParamsIntoIter<'v>;

    fn into_iter(self) -> Self::IntoIter {
        ParamsIntoIter {
            inner: self.inner.into_iter(),
        }
    }
}

/// An owning iterator over the keys and values of [`Params`].
pub struct ParamsIntoIter<'v> {
    inner: smallvec::IntoIter<[Param<'v>; 2]>,
}

impl<'v> Iterator for ParamsIntoIter<'v> {
    type Item = (Arc<str>, &'v str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| (p.key, p.value))
    }
}
