use core::mem;

use std::sync::Arc;

use super::error::InsertError;

/// Parameter key a catch-all capture is bound to.
pub(crate) const CATCH_ALL_KEY: &str = "*";

/// A unit of a registered route.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Segment {
    /// Literal text including its `/` separators, e.g. `/users/`.
    Static(String),
    /// A named parameter, e.g. `:id`, matching a single non-empty path component.
    Param(Arc<str>),
    /// A trailing `*`, matching the remaining path.
    CatchAll,
}

/// Split a route into segments.
///
/// Literal components are concatenated together with their separators until a `:name` or `*` component is met.
/// Empty components are dropped and a trailing `/` is kept only when the route itself ends with one.
pub(crate) fn parse(route: &str) -> Result<Vec<Segment>, InsertError> {
    if !route.starts_with('/') {
        return Err(InsertError::MissingLeadingSlash);
    }

    let mut segments = Vec::new();
    let mut literal = String::from("/");

    let mut components = route.split('/').filter(|c| !c.is_empty()).peekable();

    while let Some(component) = components.next() {
        if let Some(name) = component.strip_prefix(':') {
            if name.is_empty() {
                return Err(InsertError::UnnamedParam);
            }
            segments.push(Segment::Static(mem::replace(&mut literal, String::from("/"))));
            segments.push(Segment::Param(Arc::from(name)));
        } else if component.starts_with('*') {
            if component != "*" || components.peek().is_some() {
                return Err(InsertError::InvalidCatchAll);
            }
            segments.push(Segment::Static(mem::take(&mut literal)));
            segments.push(Segment::CatchAll);
        } else {
            literal.push_str(component);
            literal.push('/');
        }
    }

    // separator appended after the last literal component is not part of the route.
    if !route.ends_with('/') && literal.ends_with('/') {
        literal.pop();
    }

    segments.push(Segment::Static(literal));
    segments.retain(|s| !matches!(s, Segment::Static(s) if s.is_empty()));

    Ok(segments)
}
