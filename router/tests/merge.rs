use trie_router::{InsertError, Router};

#[test]
fn merge_ok() {
    let mut root = Router::new();
    assert!(root.insert("GET", "/foo", "foo").is_ok());
    assert!(root.insert("GET", "/bar/:id", "bar").is_ok());

    let mut child = Router::new();
    assert!(child.insert("GET", "/baz", "baz").is_ok());
    assert!(child.insert("GET", "/xyz/:id", "xyz").is_ok());
    assert!(child.insert("POST", "/foo", "post").is_ok());

    assert!(root.merge(child).is_ok());

    assert_eq!(root.at("GET", "/foo").map(|m| *m.value), Some("foo"));
    assert_eq!(root.at("GET", "/bar/1").map(|m| *m.value), Some("bar"));
    assert_eq!(root.at("GET", "/baz").map(|m| *m.value), Some("baz"));
    assert_eq!(root.at("GET", "/xyz/2").map(|m| *m.value), Some("xyz"));
    assert_eq!(root.at("POST", "/foo").map(|m| *m.value), Some("post"));
    assert_eq!(root.len(), 5);
}

#[test]
fn merge_conflict() {
    let mut root = Router::new();
    assert!(root.insert("GET", "/foo/:id", "foo").is_ok());
    assert!(root.insert("GET", "/bar/:id/baz", "bar").is_ok());

    let mut child = Router::new();
    assert!(child.insert("GET", "/foo/:name", "changed").is_ok());
    assert!(child.insert("GET", "/bar/:key", "changed").is_ok());
    assert!(child.insert("GET", "/baz", "baz").is_ok());

    let errors = root.merge(child).unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.first(), Some(&InsertError::Conflict { with: "/foo/:id".into() }));
    assert_eq!(errors.get(1), Some(&InsertError::Conflict { with: "/bar/:id".into() }));

    assert_eq!(root.at("GET", "/foo/1").map(|m| *m.value), Some("foo"));
    assert_eq!(root.at("GET", "/foo/1").and_then(|m| m.params.get("id")), Some("1"));
    assert_eq!(root.at("GET", "/bar/1/baz").map(|m| *m.value), Some("bar"));
    assert!(root.at("GET", "/bar/1").is_none());
    assert_eq!(root.at("GET", "/baz").map(|m| *m.value), Some("baz"));

    let errors = errors.into_errors();
    assert_eq!(errors.len(), 2);
}

#[test]
fn merge_replaces_duplicates() {
    let mut root = Router::new();
    assert!(root.insert("GET", "/foo", "foo").is_ok());
    assert!(root.insert("GET", "/user/:id", "user").is_ok());

    let mut child = Router::new();
    assert!(child.insert("GET", "/foo", "changed").is_ok());
    assert!(child.insert("GET", "/user/:id", "changed").is_ok());

    assert!(root.merge(child).is_ok());

    assert_eq!(root.at("GET", "/foo").map(|m| *m.value), Some("changed"));
    assert_eq!(root.at("GET", "/user/1").map(|m| *m.value), Some("changed"));
}

#[test]
fn merge_nested() {
    let mut root = Router::new();
    assert!(root.insert("GET", "/foo", "foo").is_ok());

    let mut child = Router::new();
    assert!(child.insert("GET", "/foo/bar", "bar").is_ok());

    let mut grandchild = Router::new();
    assert!(grandchild.insert("GET", "/foo/bar/baz", "baz").is_ok());
    assert!(grandchild.insert("GET", "/foo/:x/*", "rest").is_ok());

    assert!(child.merge(grandchild).is_ok());
    assert!(root.merge(child).is_ok());

    assert_eq!(root.at("GET", "/foo").map(|m| *m.value), Some("foo"));
    assert_eq!(root.at("GET", "/foo/bar").map(|m| *m.value), Some("bar"));
    assert_eq!(root.at("GET", "/foo/bar/baz").map(|m| *m.value), Some("baz"));
    assert_eq!(root.at("GET", "/foo/bar/qux").map(|m| *m.value), Some("rest"));
    assert_eq!(
        root.routes().map(|(_, path, _)| path).collect::<Vec<_>>(),
        ["/foo", "/foo/bar", "/foo/bar/baz", "/foo/:x/*"]
    );
}

#[test]
fn merge_error_display() {
    let mut root = Router::new();
    assert!(root.insert("GET", "/a/:x", ()).is_ok());

    let mut child = Router::new();
    assert!(child.insert("GET", "/a/:y", ()).is_ok());

    let errors = root.merge(child).unwrap_err();
    assert_eq!(
        errors.to_string(),
        "insertion failed due to conflict with previously registered route: /a/:x\n"
    );
}
