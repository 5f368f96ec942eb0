//! The per-call chain cursor.

use thiserror::Error;

use crate::chain::handler::{FallibleHandler, Handler};

/// The fallible chain ran past its last handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not implemented: handler chain exhausted")]
pub struct NotImplemented;

/// Position of the next handler to run in one call's chain.
///
/// A dispatch loop creates one `Next` per call (see
/// [`Endpoint::chain`](crate::tree::Endpoint::chain)) and hands it to the
/// first handler; each handler receives the same cursor and may call
/// [`run`](Self::run) or [`try_run`](Self::try_run) to continue. The cursor is
/// advanced before a handler is invoked, so a handler only ever sees
/// positions further down the chain.
#[derive(Debug)]
pub struct Next<'c, H> {
    remaining: &'c [H],
}

impl<'c, H> Next<'c, H> {
    /// Install the cursor at the first of `handlers`.
    pub fn new(handlers: &'c [H]) -> Self {
        Self {
            remaining: handlers,
        }
    }

    /// Number of handlers not yet invoked.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    /// The handler the next call would invoke.
    pub fn peek(&self) -> Option<&'c H> {
        self.remaining.first()
    }

    fn advance(&mut self) -> Option<&'c H> {
        let (head, rest) = self.remaining.split_first()?;
        self.remaining = rest;
        Some(head)
    }

    /// Invoke the next handler.
    ///
    /// # Panics
    ///
    /// Panics if the chain is exhausted; a value-only chain has no way to
    /// report that the dispatch loop advanced too far.
    pub fn run<I, O>(&mut self, input: I) -> O
    where
        H: Handler<I, O>,
    {
        match self.advance() {
            Some(handler) => handler.handle(self, input),
            None => panic!("handler chain exhausted"),
        }
    }

    /// Invoke the next fallible handler, or fail with [`NotImplemented`] if
    /// none is left.
    pub fn try_run<I, O, E>(&mut self, input: I) -> Result<O, E>
    where
        H: FallibleHandler<I, O, E>,
        E: From<NotImplemented>,
    {
        let handler = self.advance().ok_or(NotImplemented)?;
        handler.handle(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::handler::FnHandler;

    type Step = FnHandler<Vec<&'static str>, Vec<&'static str>>;

    fn step(name: &'static str) -> Step {
        FnHandler::new(name, move |next, mut seen: Vec<&'static str>| {
            seen.push(name);
            if next.is_exhausted() {
                seen
            } else {
                next.run(seen)
            }
        })
    }

    #[test]
    fn test_run_visits_in_order() {
        let chain = vec![step("a"), step("b"), step("c")];
        let mut next = Next::new(&chain);
        assert_eq!(next.remaining(), 3);

        let seen = next.run(Vec::new());
        assert_eq!(seen, vec!["a", "b", "c"]);
        assert!(next.is_exhausted());
    }

    #[test]
    fn test_cursor_advances_before_invoke() {
        let probe: FnHandler<(), usize> = FnHandler::new("probe", |next, ()| next.remaining());
        let chain = vec![probe.clone(), probe];
        let mut next = Next::new(&chain);
        assert_eq!(next.run(()), 1);
        assert_eq!(next.run(()), 0);
    }

    #[test]
    #[should_panic(expected = "handler chain exhausted")]
    fn test_run_past_end_panics() {
        let chain: Vec<Step> = vec![step("only")];
        let mut next = Next::new(&chain);
        next.run(Vec::new());
        next.run(Vec::new());
    }

    #[derive(Debug, PartialEq)]
    enum Failure {
        Missing,
        Denied,
    }

    impl From<NotImplemented> for Failure {
        fn from(_: NotImplemented) -> Self {
            Failure::Missing
        }
    }

    #[test]
    fn test_try_run_reports_exhaustion() {
        let pass: FnHandler<u32, Result<u32, Failure>> =
            FnHandler::new("pass", |next, n| next.try_run(n + 1));
        let chain = vec![pass.clone(), pass];
        let mut next = Next::new(&chain);
        assert_eq!(next.try_run(0), Err(Failure::Missing));
    }

    #[test]
    fn test_try_run_stops_on_error() {
        let deny: FnHandler<u32, Result<u32, Failure>> =
            FnHandler::new("deny", |_, _| Err(Failure::Denied));
        let done: FnHandler<u32, Result<u32, Failure>> = FnHandler::new("done", |_, n| Ok(n));
        let chain = vec![deny, done];
        let mut next = Next::new(&chain);
        assert_eq!(next.try_run(7), Err(Failure::Denied));
        assert_eq!(next.remaining(), 1);
    }
}
