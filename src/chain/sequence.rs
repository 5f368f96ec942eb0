//! Ordered handler sequences.

use crate::chain::handler::Identify;
use crate::chain::next::Next;

/// The ordered handlers of one endpoint.
///
/// A node is an endpoint exactly when its chain is non-empty.
#[derive(Debug, Clone)]
pub struct HandlerChain<H> {
    handlers: Vec<H>,
}

impl<H> Default for HandlerChain<H> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<H> HandlerChain<H> {
    pub fn new(handlers: Vec<H>) -> Self {
        Self { handlers }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, H> {
        self.handlers.iter()
    }

    pub fn as_slice(&self) -> &[H] {
        &self.handlers
    }

    /// Head of the chain.
    pub fn first(&self) -> Option<&H> {
        self.handlers.first()
    }

    /// A fresh cursor positioned at the head of the chain.
    pub fn start(&self) -> Next<'_, H> {
        Next::new(&self.handlers)
    }
}

impl<H: Identify> HandlerChain<H> {
    /// Returns true if a handler with the same identity is in the chain.
    pub fn contains(&self, handler: &H) -> bool {
        let id = handler.id();
        self.handlers.iter().any(|h| h.id() == id)
    }

    /// Display names joined with `", "`.
    pub fn names(&self) -> String {
        self.handlers
            .iter()
            .map(Identify::display_name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<H: Identify + Clone> HandlerChain<H> {
    /// Prepend `handlers`, skipping any already present in the chain.
    ///
    /// The inserted handlers keep their relative order. Returns how many were
    /// inserted.
    pub fn insert_pre_handlers(&mut self, handlers: &[H]) -> usize {
        let mut merged: Vec<H> = handlers
            .iter()
            .filter(|h| !self.contains(h))
            .cloned()
            .collect();
        let inserted = merged.len();
        if inserted == 0 {
            return 0;
        }
        merged.append(&mut self.handlers);
        self.handlers = merged;
        inserted
    }
}

impl<H> From<Vec<H>> for HandlerChain<H> {
    fn from(handlers: Vec<H>) -> Self {
        Self::new(handlers)
    }
}

impl<H> FromIterator<H> for HandlerChain<H> {
    fn from_iter<T: IntoIterator<Item = H>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, H> IntoIterator for &'a HandlerChain<H> {
    type Item = &'a H;
    type IntoIter = std::slice::Iter<'a, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.handlers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag(&'static str);

    impl Identify for Tag {
        type Id = &'static str;

        fn id(&self) -> Self::Id {
            self.0
        }

        fn display_name(&self) -> String {
            self.0.to_string()
        }
    }

    fn tags(chain: &HandlerChain<Tag>) -> Vec<&'static str> {
        chain.iter().map(|t| t.0).collect()
    }

    #[test]
    fn test_insert_pre_handlers_prepends_in_order() {
        let mut chain = HandlerChain::new(vec![Tag("c"), Tag("d")]);
        let inserted = chain.insert_pre_handlers(&[Tag("a"), Tag("b")]);
        assert_eq!(inserted, 2);
        assert_eq!(tags(&chain), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_insert_pre_handlers_skips_present() {
        let mut chain = HandlerChain::new(vec![Tag("auth"), Tag("get")]);
        let inserted = chain.insert_pre_handlers(&[Tag("log"), Tag("auth")]);
        assert_eq!(inserted, 1);
        assert_eq!(tags(&chain), vec!["log", "auth", "get"]);

        assert_eq!(chain.insert_pre_handlers(&[Tag("get")]), 0);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_names() {
        let chain = HandlerChain::new(vec![Tag("auth"), Tag("get")]);
        assert_eq!(chain.names(), "auth, get");
        assert_eq!(HandlerChain::<Tag>::default().names(), "");
    }
}
