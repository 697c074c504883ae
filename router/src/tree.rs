use core::{fmt, mem};

use std::{collections::HashMap, sync::Arc};

use super::{
    params::Params,
    segment::{Segment, CATCH_ALL_KEY},
};

/// Key selecting one of a node's children.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Discriminator {
    /// A static child, keyed by the first byte of its prefix.
    Static(u8),
    /// The named parameter child, e.g. `/:id`.
    Param,
    /// The trailing catch-all child, e.g. `/*`.
    CatchAll,
}

/// A compressed radix tree node used for URL path matching.
#[derive(Clone)]
pub(crate) struct Node<T> {
    // The literal bytes this node consumes before branching.
    //
    // Only static children carry a prefix. Parameter and catch-all nodes are always empty.
    pub(crate) prefix: Vec<u8>,

    // Discriminators of the children, index aligned with `children`.
    //
    // Static children come first, followed by the parameter child and the catch-all child.
    indices: Vec<Discriminator>,

    // The children of this node.
    children: Vec<Node<T>>,

    // Complete literal tails of routes ending right after this node.
    //
    // Routes without any dynamic segment are stored in the root's table as a whole.
    statics: HashMap<String, T>,

    // The value stored at this node.
    value: Option<T>,

    // The name bound by a parameter or catch-all node.
    param: Option<Arc<str>>,
}

impl<T> Node<T> {
    pub(crate) fn new() -> Self {
        Self {
            prefix: Vec::new(),
            indices: Vec::new(),
            children: Vec::new(),
            statics: HashMap::new(),
            value: None,
            param: None,
        }
    }

    fn with_prefix(prefix: &[u8]) -> Self {
        Self {
            prefix: prefix.to_vec(),
            ..Self::new()
        }
    }

    fn child(&self, key: Discriminator) -> Option<&Node<T>> {
        self.indices
            .iter()
            .position(|k| *k == key)
            .map(|i| &self.children[i])
    }

    fn child_index(&self, key: Discriminator) -> Option<usize> {
        self.indices.iter().position(|k| *k == key)
    }

    // Adds a child to this node, keeping the parameter and catch-all children at the end.
    fn add_child(&mut self, key: Discriminator, child: Node<T>) -> usize {
        let i = match key {
            Discriminator::Static(_) => self
                .indices
                .iter()
                .position(|k| !matches!(k, Discriminator::Static(_)))
                .unwrap_or(self.indices.len()),
            Discriminator::Param => self
                .indices
                .iter()
                .position(|k| *k == Discriminator::CatchAll)
                .unwrap_or(self.indices.len()),
            Discriminator::CatchAll => self.indices.len(),
        };

        self.indices.insert(i, key);
        self.children.insert(i, child);
        i
    }

    /// Insert a parsed route into the tree.
    ///
    /// Callers must have checked the route with [`Node::conflict`] beforehand. Inserting an identical route again
    /// overwrites the previous value.
    pub(crate) fn insert(&mut self, segments: &[Segment], value: T) {
        let mut node = self;

        for (i, segment) in segments.iter().enumerate() {
            let last = i + 1 == segments.len();

            match segment {
                // A terminal literal does not need its own chain of nodes.
                Segment::Static(literal) if last => {
                    node.statics.insert(literal.clone(), value);
                    return;
                }
                Segment::Static(literal) => node = node.insert_static(literal.as_bytes()),
                Segment::Param(name) => node = node.param_child(name),
                Segment::CatchAll => {
                    node.catch_all_child().value = Some(value);
                    return;
                }
            }
        }

        node.value = Some(value);
    }

    // Walk the static children along `literal`, splitting any node whose prefix diverges part way.
    //
    // Returns the node whose prefix ends exactly where `literal` ends.
    fn insert_static(&mut self, mut literal: &[u8]) -> &mut Node<T> {
        let mut node = self;

        loop {
            let key = Discriminator::Static(literal[0]);

            let Some(i) = node.child_index(key) else {
                let i = node.add_child(key, Node::with_prefix(literal));
                return &mut node.children[i];
            };

            let child = &mut node.children[i];
            let common = common_prefix(&child.prefix, literal);

            // The child owns more than the shared part. Demote the remainder into a new child.
            if common < child.prefix.len() {
                child.split(common);
            }

            if common == literal.len() {
                return child;
            }

            literal = &literal[common..];
            node = child;
        }
    }

    // Truncate this node's prefix to `at` bytes, moving the rest of the prefix together with all children, static
    // tails and value into a single new child.
    fn split(&mut self, at: usize) {
        let suffix = self.prefix.split_off(at);

        let child = Node {
            indices: mem::take(&mut self.indices),
            children: mem::take(&mut self.children),
            statics: mem::take(&mut self.statics),
            value: self.value.take(),
            param: None,
            prefix: suffix,
        };

        self.indices = vec![Discriminator::Static(child.prefix[0])];
        self.children = vec![child];
    }

    fn param_child(&mut self, name: &Arc<str>) -> &mut Node<T> {
        let i = match self.child_index(Discriminator::Param) {
            Some(i) => i,
            None => self.add_child(
                Discriminator::Param,
                Node {
                    param: Some(name.clone()),
                    ..Node::new()
                },
            ),
        };
        &mut self.children[i]
    }

    fn catch_all_child(&mut self) -> &mut Node<T> {
        let i = match self.child_index(Discriminator::CatchAll) {
            Some(i) => i,
            None => self.add_child(
                Discriminator::CatchAll,
                Node {
                    param: Some(Arc::from(CATCH_ALL_KEY)),
                    ..Node::new()
                },
            ),
        };
        &mut self.children[i]
    }

    /// Returns the conflicting route when `segments` would bind a parameter under a different name than the one
    /// already registered at the same position.
    pub(crate) fn conflict(&self, segments: &[Segment]) -> Option<String> {
        let mut node = self;
        let mut route = String::new();

        for segment in segments {
            match segment {
                Segment::Static(literal) => {
                    route.push_str(literal);
                    // a diverging literal leads to a fresh branch where nothing can conflict.
                    node = node.find_static(literal.as_bytes())?;
                }
                Segment::Param(name) => {
                    let child = node.child(Discriminator::Param)?;
                    let existing = child.param.as_ref()?;

                    route.push(':');
                    route.push_str(existing);

                    if existing != name {
                        return Some(route);
                    }

                    node = child;
                }
                Segment::CatchAll => return None,
            }
        }

        None
    }

    // Read only counterpart of `insert_static`.
    fn find_static(&self, mut literal: &[u8]) -> Option<&Node<T>> {
        let mut node = self;

        loop {
            let child = node.child(Discriminator::Static(*literal.first()?))?;
            let rest = literal.strip_prefix(child.prefix.as_slice())?;

            if rest.is_empty() {
                return Some(child);
            }

            literal = rest;
            node = child;
        }
    }
}

impl<T> Node<T> {
    /// Returns the value matching the given path, pushing every captured parameter to `params`.
    #[inline]
    pub(crate) fn at<'p>(&self, path: &'p str, params: &mut Params<'p>) -> Option<&T> {
        self.find(path, 0, params)
    }

    // Match `path[depth..]` against this node.
    //
    // Precedence at every node is: exact static tail, static child, parameter child, catch-all child, then the
    // node's own value. A static child that fails deeper in the tree falls back to the parameter and catch-all
    // children of this node.
    fn find<'p>(&self, path: &'p str, depth: usize, params: &mut Params<'p>) -> Option<&T> {
        let bytes = path.as_bytes();

        if !bytes.get(depth..)?.starts_with(&self.prefix) {
            return None;
        }

        let depth = depth + self.prefix.len();

        if !self.statics.is_empty() {
            if let Some(value) = path.get(depth..).and_then(|tail| self.statics.get(tail)) {
                return Some(value);
            }
        }

        if let Some(&next) = bytes.get(depth) {
            let len = params.len();

            if let Some(child) = self.child(Discriminator::Static(next)) {
                if let Some(value) = child.find(path, depth, params) {
                    return Some(value);
                }
                params.truncate(len);
            }

            if let Some(child) = self.child(Discriminator::Param) {
                let end = bytes[depth..]
                    .iter()
                    .position(|&b| b == b'/')
                    .map(|i| depth + i)
                    .unwrap_or(bytes.len());

                // empty parameter, e.g. `//`, never matches.
                if end > depth {
                    if let (Some(name), Some(value)) = (child.param.as_ref(), path.get(depth..end)) {
                        params.push(name.clone(), value);
                        if let Some(value) = child.find(path, end, params) {
                            return Some(value);
                        }
                        params.truncate(len);
                    }
                }
            }
        }

        if let Some(child) = self.child(Discriminator::CatchAll) {
            let capture = (child.value.as_ref(), child.param.as_ref(), path.get(depth..));
            if let (Some(value), Some(name), Some(rest)) = capture {
                params.push(name.clone(), rest);
                return Some(value);
            }
        }

        if depth == bytes.len() {
            return self.value.as_ref();
        }

        None
    }

    #[cfg(any(test, feature = "test_helpers"))]
    pub(crate) fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}

fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(a, b)| a == b).count()
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("Node");
        f.field("prefix", &String::from_utf8_lossy(&self.prefix))
            .field("value", &self.value.as_ref())
            .field("statics", &self.statics);

        if let Some(ref param) = self.param {
            f.field("param", param);
        }

        f.field("indices", &self.indices).field("children", &self.children);

        f.finish()
    }
}
