use core::mem;

use tracing::{debug, warn};

use super::{
    error::{InsertError, MergeError},
    log::{Registration, RegistrationLog},
    params::Params,
    segment,
    tree::Node,
};

/// A URL router keyed by HTTP method.
///
/// See [the crate documentation](crate) for details.
#[derive(Clone, Debug)]
pub struct Router<T> {
    // One tree per method. Values stored in the trees are positions in `log`.
    roots: Vec<(Box<str>, Node<usize>)>,
    log: RegistrationLog<T>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Construct a new router.
    pub const fn new() -> Self {
        Self {
            roots: Vec::new(),
            log: RegistrationLog::new(),
        }
    }

    /// Insert a route for the given method.
    ///
    /// Inserting the same method and path again replaces the value matched for it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trie_router::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert("GET", "/home", "Welcome!")?;
    /// router.insert("GET", "/users/:id", "A User")?;
    /// router.insert("GET", "/users/:id", "Another User")?;
    ///
    /// assert_eq!(*router.at("GET", "/users/1").unwrap().value, "Another User");
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, method: impl Into<String>, path: impl Into<String>, value: T) -> Result<(), InsertError> {
        let path = path.into();
        let segments = segment::parse(&path)?;

        self.register(Registration {
            method: method.into().into_boxed_str(),
            path: path.into_boxed_str(),
            segments,
            value,
        })
    }

    fn register(&mut self, registration: Registration<T>) -> Result<(), InsertError> {
        if let Some(root) = self.root(&registration.method) {
            if let Some(with) = root.conflict(&registration.segments) {
                return Err(InsertError::Conflict { with });
            }
        }

        let i = self.log.len();
        root_mut(&mut self.roots, &registration.method).insert(&registration.segments, i);

        debug!("route registered: {} {}", registration.method, registration.path);

        self.log.push(registration);

        Ok(())
    }

    /// Tries to find a value in the router matching the given method and path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trie_router::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert("GET", "/home", "Welcome!")?;
    ///
    /// let matched = router.at("GET", "/home").unwrap();
    /// assert_eq!(*matched.value, "Welcome!");
    /// assert!(matched.params.is_empty());
    ///
    /// assert!(router.at("POST", "/home").is_none());
    /// # Ok(())
    /// # }
    /// ```
    pub fn at<'p>(&self, method: &str, path: &'p str) -> Option<Match<'p, &T>> {
        let root = self.root(method)?;

        let mut params = Params::new();
        let i = *root.at(path, &mut params)?;

        self.log.get(i).map(|registration| Match {
            value: &registration.value,
            params,
        })
    }

    /// Remove every registration of the exact method and path pair.
    ///
    /// Routes are not removed from the trees in place. The registrations that remain are replayed in their
    /// original order into fresh trees which then replace the current ones. Removing a route that was never
    /// registered is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trie_router::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert("GET", "/users/:id", "A User")?;
    /// router.insert("GET", "/users/:id/posts", "Posts")?;
    ///
    /// router.remove("GET", "/users/:id");
    ///
    /// assert!(router.at("GET", "/users/1").is_none());
    /// assert!(router.at("GET", "/users/1/posts").is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn remove(&mut self, method: &str, path: &str) {
        let mut log = mem::replace(&mut self.log, RegistrationLog::new());

        let removed = log.remove(method, path);
        if removed == 0 {
            self.log = log;
            return;
        }

        let mut fresh = Router::new();
        for registration in log {
            let i = fresh.log.len();
            root_mut(&mut fresh.roots, &registration.method).insert(&registration.segments, i);
            fresh.log.push(registration);
        }

        debug!(
            "removed {removed} registration(s) of {method} {path}, rebuilt router with {} registration(s)",
            fresh.log.len()
        );

        *self = fresh;
    }

    /// Move every registration of `other` into this router, in the order they were registered in `other`.
    ///
    /// Registrations conflicting with routes of this router are skipped and reported together in the returned
    /// error. All other registrations are kept.
    pub fn merge(&mut self, other: Router<T>) -> Result<(), MergeError> {
        let mut errors = Vec::new();

        for registration in other.log {
            let (method, path) = (registration.method.clone(), registration.path.clone());
            if let Err(e) = self.register(registration) {
                warn!("skipped merging route {method} {path}: {e}");
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(MergeError(errors))
        }
    }

    /// Returns an iterator over every registration as `(method, path, value)` in insertion order.
    ///
    /// Registrations of the same method and path that were later replaced are included.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str, &T)> {
        self.log
            .iter()
            .map(|registration| (&*registration.method, &*registration.path, &registration.value))
    }

    /// Returns an iterator over the methods that have at least one route registered.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.roots.iter().map(|(method, _)| &**method)
    }

    /// Returns the number of registrations.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Returns `true` when no route has been registered.
    pub fn is_empty(&self) -> bool {
        self.log.len() == 0
    }

    /// Returns the number of nodes in the routing tree of the given method.
    #[cfg(any(test, feature = "test_helpers"))]
    pub fn node_count(&self, method: &str) -> usize {
        self.root(method).map(Node::count).unwrap_or(0)
    }

    fn root(&self, method: &str) -> Option<&Node<usize>> {
        self.roots.iter().find(|(m, _)| &**m == method).map(|(_, root)| root)
    }
}

fn root_mut<'r>(roots: &'r mut Vec<(Box<str>, Node<usize>)>, method: &str) -> &'r mut Node<usize> {
    let i = match roots.iter().position(|(m, _)| &**m == method) {
        Some(i) => i,
        None => {
            roots.push((method.into(), Node::new()));
            roots.len() - 1
        }
    };
    &mut roots[i].1
}

/// A successful match consisting of the registered value
/// and URL parameters, returned by [`Router::at`](Router::at).
#[derive(Debug)]
pub struct Match<'p, V> {
    /// The value stored under the matched route.
    pub value: V,
    /// The route parameters. See [parameters](crate#parameters) for more details.
    pub params: Params<'p>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_insert_leaves_router_untouched() {
        let mut router = Router::new();
        router.insert("GET", "/foo/:name/bar", 1).unwrap();
        let nodes = router.node_count("GET");

        assert_eq!(
            router.insert("GET", "/foo/:other", 2),
            Err(InsertError::Conflict { with: "/foo/:name".into() })
        );
        assert_eq!(router.insert("GET", "foo", 3), Err(InsertError::MissingLeadingSlash));

        assert_eq!(router.len(), 1);
        assert_eq!(router.node_count("GET"), nodes);
    }

    #[test]
    fn same_name_on_other_method_does_not_conflict() {
        let mut router = Router::new();
        router.insert("GET", "/foo/:name", 1).unwrap();
        router.insert("POST", "/foo/:other", 2).unwrap();

        assert_eq!(router.at("POST", "/foo/x").unwrap().params.get("other"), Some("x"));
        assert_eq!(router.methods().collect::<Vec<_>>(), ["GET", "POST"]);
    }

    #[test]
    fn repeated_insert_keeps_node_count() {
        let mut router = Router::new();
        router.insert("GET", "/id/:id/name/:name", "A").unwrap();
        router.insert("GET", "/rest/*", "W").unwrap();
        let nodes = router.node_count("GET");

        router.insert("GET", "/id/:id/name/:name", "B").unwrap();
        router.insert("GET", "/rest/*", "X").unwrap();

        assert_eq!(router.node_count("GET"), nodes);
        assert_eq!(*router.at("GET", "/id/1/name/2").unwrap().value, "B");
        assert_eq!(*router.at("GET", "/rest/").unwrap().value, "X");
    }

    #[test]
    fn remove_rebuilds_positions() {
        let mut router = Router::new();
        router.insert("GET", "/a", "a").unwrap();
        router.insert("GET", "/b/:id", "b").unwrap();
        router.insert("POST", "/c", "c").unwrap();

        router.remove("GET", "/a");

        assert_eq!(router.len(), 2);
        assert!(router.at("GET", "/a").is_none());
        assert_eq!(*router.at("GET", "/b/1").unwrap().value, "b");
        assert_eq!(*router.at("POST", "/c").unwrap().value, "c");
        assert_eq!(
            router.routes().collect::<Vec<_>>(),
            [("GET", "/b/:id", &"b"), ("POST", "/c", &"c")]
        );
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut router = Router::new();
        router.insert("GET", "/a", 1).unwrap();

        router.remove("GET", "/b");
        router.remove("DELETE", "/a");
        router.remove("GET", "/a/");

        assert_eq!(router.len(), 1);
        assert_eq!(*router.at("GET", "/a").unwrap().value, 1);
    }

    #[test]
    fn empty() {
        let router = Router::<()>::default();
        assert!(router.is_empty());
        assert_eq!(router.node_count("GET"), 0);
        assert!(router.at("GET", "/").is_none());
    }
}
