//! Handler capabilities.

use std::fmt;
use std::sync::Arc;

use crate::chain::next::Next;

/// Identity of a handler, used to deduplicate pre-handlers and to name
/// handler chains in diagnostics.
pub trait Identify {
    /// Comparable identity key.
    type Id: Eq + fmt::Debug;

    fn id(&self) -> Self::Id;

    /// Human-readable name. Defaults to the collapsed type name.
    fn display_name(&self) -> String {
        collapse_type_name(std::any::type_name::<Self>())
    }
}

/// A handler that only produces a value.
pub trait Handler<I, O>: Sized {
    fn handle(&self, next: &mut Next<'_, Self>, input: I) -> O;
}

/// A handler that may fail.
pub trait FallibleHandler<I, O, E>: Sized {
    fn handle(&self, next: &mut Next<'_, Self>, input: I) -> Result<O, E>;
}

type HandlerFn<I, O> = dyn Fn(&mut Next<'_, FnHandler<I, O>>, I) -> O + Send + Sync;

/// A named closure handler.
///
/// The name is both the identity and the display name. `FnHandler<I, Result<O, E>>`
/// also works as a [`FallibleHandler`].
pub struct FnHandler<I, O> {
    name: Arc<str>,
    f: Arc<HandlerFn<I, O>>,
}

impl<I, O> FnHandler<I, O> {
    pub fn new<F>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&mut Next<'_, FnHandler<I, O>>, I) -> O + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<I, O> Clone for FnHandler<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            f: self.f.clone(),
        }
    }
}

impl<I, O> fmt::Debug for FnHandler<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnHandler").field(&self.name).finish()
    }
}

impl<I, O> Identify for FnHandler<I, O> {
    type Id = Arc<str>;

    fn id(&self) -> Self::Id {
        self.name.clone()
    }

    fn display_name(&self) -> String {
        self.name.to_string()
    }
}

impl<I, O> Handler<I, O> for FnHandler<I, O> {
    fn handle(&self, next: &mut Next<'_, Self>, input: I) -> O {
        (self.f)(next, input)
    }
}

impl<I, O, E> FallibleHandler<I, O, E> for FnHandler<I, Result<O, E>> {
    fn handle(&self, next: &mut Next<'_, Self>, input: I) -> Result<O, E> {
        (self.f)(next, input)
    }
}

/// Shorten every module segment of a type path to its first character.
///
/// `my_app::auth::Session` becomes `m::a::Session`. Generic arguments are
/// kept as they are.
pub fn collapse_type_name(name: &str) -> String {
    let split_at = name.find('<').unwrap_or(name.len());
    let (path, generics) = name.split_at(split_at);

    let segments: Vec<&str> = path.split("::").collect();
    let last = segments.len().saturating_sub(1);
    let mut collapsed = String::with_capacity(name.len());
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            collapsed.push_str("::");
        }
        if i < last {
            collapsed.extend(segment.chars().next());
        } else {
            collapsed.push_str(segment);
        }
    }
    collapsed.push_str(generics);
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Audit;

    impl Identify for Audit {
        type Id = &'static str;

        fn id(&self) -> Self::Id {
            "audit"
        }
    }

    #[test]
    fn test_collapse_type_name() {
        assert_eq!(collapse_type_name("my_app::auth::Session"), "m::a::Session");
        assert_eq!(collapse_type_name("Session"), "Session");
        assert_eq!(
            collapse_type_name("my_app::Wrap<alloc::string::String>"),
            "m::Wrap<alloc::string::String>"
        );
    }

    #[test]
    fn test_default_display_name_is_collapsed() {
        let name = Audit.display_name();
        assert!(name.ends_with("::Audit"), "{name}");
        assert!(name.starts_with("t::"), "{name}");
    }

    #[test]
    fn test_fn_handler_identity() {
        let a: FnHandler<(), ()> = FnHandler::new("auth", |_, _| ());
        let b: FnHandler<(), ()> = FnHandler::new("auth", |_, _| ());
        let c: FnHandler<(), ()> = FnHandler::new("log", |_, _| ());
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_eq!(a.display_name(), "auth");
    }
}
