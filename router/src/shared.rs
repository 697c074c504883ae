use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};

use super::{
    error::InsertError,
    router::{Match, Router},
};

/// A [`Router`] shared between request handling threads while it's still being modified.
///
/// Readers never block and never observe a partially modified router. Writers clone the published router, apply
/// their change to the copy and publish it with a single atomic swap. Concurrent writers are retried until their
/// change applies on top of the latest router so no update is lost.
pub struct SharedRouter<T> {
    inner: ArcSwap<Router<T>>,
}

impl<T> SharedRouter<T> {
    /// Publish the given router.
    pub fn new(router: Router<T>) -> Self {
        Self {
            inner: ArcSwap::from_pointee(router),
        }
    }

    /// Returns a cheap snapshot of the published router. The snapshot stays valid and unchanged while later updates
    /// are published.
    pub fn load(&self) -> Guard<Arc<Router<T>>> {
        self.inner.load()
    }

    /// Like [`SharedRouter::load`] but returns an owned snapshot that can be kept around.
    pub fn snapshot(&self) -> Arc<Router<T>> {
        self.inner.load_full()
    }

    /// Match against the published router and map the match with `f`.
    pub fn at<F, R>(&self, method: &str, path: &str, f: F) -> Option<R>
    where
        F: FnOnce(Match<'_, &T>) -> R,
    {
        self.inner.load().at(method, path).map(f)
    }

    /// Replace the published router.
    pub fn store(&self, router: Router<T>) {
        self.inner.store(Arc::new(router));
    }
}

impl<T> SharedRouter<T>
where
    T: Clone,
{
    /// Copy on write counterpart of [`Router::insert`].
    pub fn insert(&self, method: &str, path: &str, value: T) -> Result<(), InsertError> {
        let mut res = Ok(());

        self.inner.rcu(|current| {
            let mut router = Router::clone(current);
            res = router.insert(method, path, value.clone());
            if res.is_ok() {
                Arc::new(router)
            } else {
                Arc::clone(current)
            }
        });

        res
    }

    /// Copy on write counterpart of [`Router::remove`].
    pub fn remove(&self, method: &str, path: &str) {
        self.inner.rcu(|current| {
            let mut router = Router::clone(current);
            router.remove(method, path);
            router
        });
    }
}

impl<T> Default for SharedRouter<T> {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

impl<T> From<Router<T>> for SharedRouter<T> {
    fn from(router: Router<T>) -> Self {
        Self::new(router)
    }
}
