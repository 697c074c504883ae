//! A per-method radix tree router mapping an HTTP method and a URL path to a registered value.
//!
//!```rust
//!use trie_router::Router;
//!
//!fn main() -> Result<(), Box<dyn std::error::Error>> {
//!    let mut router = Router::new();
//!    router.insert("GET", "/home", "Welcome!")?;
//!    router.insert("GET", "/users/:id", "A User")?;
//!
//!    let matched = router.at("GET", "/users/978").unwrap();
//!    assert_eq!(matched.params.get("id"), Some("978"));
//!    assert_eq!(*matched.value, "A User");
//!
//!    // every method owns an independent tree.
//!    assert!(router.at("POST", "/users/978").is_none());
//!
//!    Ok(())
//!}
//!```
//!
//!# Parameters
//!
//!The router supports dynamic route segments. These can either be named or catch-all parameters.
//!
//!Named parameters like `/:id` match a single, non-empty path segment, up to the next `/` or the end of the path.
//!
//!```rust
//!# use trie_router::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::new();
//!router.insert("GET", "/users/:id", 42)?;
//!
//!let matched = router.at("GET", "/users/1").unwrap();
//!assert_eq!(matched.params.get("id"), Some("1"));
//!
//!assert!(router.at("GET", "/users").is_none());
//!assert!(router.at("GET", "/users/").is_none());
//!assert!(router.at("GET", "/users/1/posts").is_none());
//!# Ok(())
//!# }
//!```
//!
//!A catch-all parameter is a single `*` segment. It must be the last segment of the route and captures the rest of
//!the path, `/` included and possibly empty, under the key `*`.
//!
//!```rust
//!# use trie_router::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::new();
//!router.insert("GET", "/rest/*", true)?;
//!router.insert("GET", "/*", true)?;
//!
//!let matched = router.at("GET", "/rest/a/b/c").unwrap();
//!assert_eq!(matched.params.get("*"), Some("a/b/c"));
//!
//!let matched = router.at("GET", "/").unwrap();
//!assert_eq!(matched.params.get("*"), Some(""));
//!# Ok(())
//!# }
//!```
//!
//!A trailing `/` is part of the route: `/abc` and `/abc/` are distinct registrations.
//!
//!# Priority
//!
//!Static and dynamic routes are allowed to overlap. At any position a route made of the remaining literal path wins
//!over a longer static prefix, which wins over a named parameter, which wins over a catch-all:
//!
//!```rust
//!# use trie_router::Router;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!let mut router = Router::new();
//!router.insert("GET", "/id/:id/name/:name", "dynamic")?;
//!router.insert("GET", "/id/:id/name/a", "static")?;
//!
//!let matched = router.at("GET", "/id/1/name/a").unwrap();
//!assert_eq!(*matched.value, "static");
//!assert_eq!(matched.params.get("name"), None);
//!
//!let matched = router.at("GET", "/id/1/name/ame").unwrap();
//!assert_eq!(*matched.value, "dynamic");
//!assert_eq!(matched.params.get("name"), Some("ame"));
//!# Ok(())
//!# }
//!```
//!
//!Registering two parameters of different names at the same position is ambiguous and rejected with
//![`InsertError::Conflict`].
//!
//!# Removal and sharing
//!
//![`Router::remove`] rebuilds the router from its registration log without the removed route. [`SharedRouter`] keeps
//!a router readable from many threads while routes are added or removed, publishing every change atomically.

#![forbid(unsafe_code)]

mod error;
mod log;
mod router;
mod segment;
mod shared;
mod tree;

pub mod params;

pub use error::{InsertError, MergeError};
pub use router::{Match, Router};
pub use shared::SharedRouter;
