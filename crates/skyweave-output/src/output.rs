//! The [`Output`] value and its combinators

use crate::error::{OutputError, Result};
use crate::node::{Node, Resolver};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A value that becomes available once the engine answers
///
/// Cloning an `Output` is cheap and yields a handle to the same node.
/// Transformations create new nodes that resolve strictly after their
/// source, and secrecy flows from sources to everything derived from them.
pub struct Output<T: Clone + Send + Sync + 'static> {
    node: Arc<Node<T>>,
}

impl<T: Clone + Send + Sync + 'static> Clone for Output<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Output<T> {
    /// An already-resolved output.
    pub fn new(value: T) -> Self {
        Self {
            node: Node::settled(Ok(value), false),
        }
    }

    /// An already-resolved secret output.
    pub fn secret(value: T) -> Self {
        Self {
            node: Node::settled(Ok(value), true),
        }
    }

    /// An already-failed output.
    pub fn failed(error: OutputError) -> Self {
        Self {
            node: Node::settled(Err(error), false),
        }
    }

    /// A pending output together with the resolver that settles it.
    pub fn pending() -> (Self, Resolver<T>) {
        Self::pending_with_secret(false)
    }

    pub(crate) fn pending_with_secret(secret: bool) -> (Self, Resolver<T>) {
        let node = Node::pending(secret);
        let resolver = Resolver::new(Arc::clone(&node));
        (Self { node }, resolver)
    }

    pub fn is_secret(&self) -> bool {
        self.node.is_secret()
    }

    pub fn is_resolved(&self) -> bool {
        self.node.peek().is_some()
    }

    /// The settled result, if the output has settled.
    pub fn peek(&self) -> Option<Result<T>> {
        self.node.peek()
    }

    /// Derive a new output by applying `f` once this one resolves.
    pub fn apply<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.try_apply(move |value| Ok::<U, std::convert::Infallible>(f(value)))
    }

    /// Like [`apply`](Self::apply), but `f` may fail.
    ///
    /// A failure settles the derived output with [`OutputError::Failed`],
    /// and every output derived from it fails the same way.
    pub fn try_apply<U, E, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        E: fmt::Display,
        F: FnOnce(T) -> std::result::Result<U, E> + Send + 'static,
    {
        let (derived, resolver) = Output::pending_with_secret(self.is_secret());
        self.node.subscribe(Box::new(move |settled, secret| {
            if secret {
                resolver.mark_secret();
            }
            match settled {
                Ok(value) => match f(value.clone()) {
                    Ok(mapped) => resolver.resolve(mapped),
                    Err(e) => resolver.reject(OutputError::failed(e.to_string())),
                },
                Err(e) => resolver.reject(e.clone()),
            }
        }));
        derived
    }

    /// Derive a new output from a function that itself returns an output.
    ///
    /// The result is secret if either this output or the returned one is.
    pub fn apply_output<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Output<U> + Send + 'static,
    {
        let (derived, resolver) = Output::pending_with_secret(self.is_secret());
        self.node.subscribe(Box::new(move |settled, outer_secret| match settled {
            Ok(value) => {
                let inner = f(value.clone());
                inner.node.subscribe(Box::new(move |settled, inner_secret| {
                    if outer_secret || inner_secret {
                        resolver.mark_secret();
                    }
                    resolver.settle(settled.clone());
                }));
            }
            Err(e) => {
                if outer_secret {
                    resolver.mark_secret();
                }
                resolver.reject(e.clone());
            }
        }));
        derived
    }

    /// An equivalent output flagged secret.
    pub fn as_secret(&self) -> Output<T> {
        let derived = self.apply(|value| value);
        derived.node.mark_secret();
        derived
    }

    pub fn into_secret(self) -> Output<T> {
        self.as_secret()
    }

    /// Combine with another output into a pair.
    pub fn zip<U>(&self, other: &Output<U>) -> Output<(T, U)>
    where
        U: Clone + Send + Sync + 'static,
    {
        let other = other.clone();
        self.apply_output(move |left| other.apply(move |right| (left, right)))
    }

    /// Combine a list of outputs into one output of a list.
    ///
    /// Resolves once every input has resolved, keeping input order. Fails
    /// with the first failure observed.
    pub fn all(outputs: Vec<Output<T>>) -> Output<Vec<T>> {
        if outputs.is_empty() {
            return Output::new(Vec::new());
        }

        let secret = outputs.iter().any(Output::is_secret);
        let (combined, resolver) = Output::pending_with_secret(secret);
        let gather = Arc::new(Mutex::new(Gather {
            slots: vec![None; outputs.len()],
            remaining: outputs.len(),
            resolver: Some(resolver),
        }));

        for (index, output) in outputs.iter().enumerate() {
            let gather = Arc::clone(&gather);
            output.node.subscribe(Box::new(move |settled, secret| {
                let finished = {
                    let mut gather = gather.lock().unwrap_or_else(|p| p.into_inner());
                    gather.accept(index, settled, secret)
                };
                if let Some((resolver, result)) = finished {
                    resolver.settle(result);
                }
            }));
        }
        combined
    }

    /// Wait until this output settles.
    pub async fn await_resolved(&self) -> Result<T> {
        self.node.wait().await
    }

    /// Wait until this output settles, failing with
    /// [`OutputError::Timeout`] after `timeout`.
    pub async fn await_resolved_within(&self, timeout: Duration) -> Result<T> {
        tokio::time::timeout(timeout, self.node.wait())
            .await
            .map_err(|_| OutputError::Timeout(timeout))?
    }
}

struct Gather<T: Clone + Send + Sync + 'static> {
    slots: Vec<Option<T>>,
    remaining: usize,
    resolver: Option<Resolver<Vec<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Gather<T> {
    /// Record one input; returns the resolver once the combined output
    /// can settle.
    fn accept(
        &mut self,
        index: usize,
        settled: &Result<T>,
        secret: bool,
    ) -> Option<(Resolver<Vec<T>>, Result<Vec<T>>)> {
        let resolver = self.resolver.as_ref()?;
        if secret {
            resolver.mark_secret();
        }
        match settled {
            Err(e) => {
                let resolver = self.resolver.take()?;
                Some((resolver, Err(e.clone())))
            }
            Ok(value) => {
                self.slots[index] = Some(value.clone());
                self.remaining -= 1;
                if self.remaining > 0 {
                    return None;
                }
                let resolver = self.resolver.take()?;
                let values = self.slots.drain(..).flatten().collect();
                Some((resolver, Ok(values)))
            }
        }
    }
}

impl<T: Clone + Send + Sync + fmt::Debug + 'static> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_secret() {
            return f.write_str("Output([secret])");
        }
        match self.peek() {
            None => f.write_str("Output(<pending>)"),
            Some(Ok(value)) => write!(f, "Output({:?})", value),
            Some(Err(e)) => write!(f, "Output(<failed: {}>)", e),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> From<T> for Output<T> {
    fn from(value: T) -> Self {
        Output::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_on_resolved_source() {
        let out = Output::new(20).apply(|v| v + 1);
        assert_eq!(out.await_resolved().await.unwrap(), 21);
    }

    #[tokio::test]
    async fn test_apply_composes() {
        let (source, resolver) = Output::<i64>::pending();
        let f = |v: i64| v * 3;
        let g = |v: i64| format!("value={}", v);

        let chained = source.apply(f).apply(g);
        assert!(!chained.is_resolved());

        resolver.resolve(7);
        assert_eq!(chained.await_resolved().await.unwrap(), g(f(7)));
    }

    #[tokio::test]
    async fn test_derived_resolves_after_source() {
        let (source, resolver) = Output::<u32>::pending();
        let observed = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&observed);
        let first = source.apply(move |v| {
            log.lock().unwrap().push("first");
            v
        });
        let log = Arc::clone(&observed);
        let second = first.apply(move |v| {
            log.lock().unwrap().push("second");
            v
        });

        assert!(observed.lock().unwrap().is_empty());
        resolver.resolve(1);
        second.await_resolved().await.unwrap();
        assert_eq!(*observed.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_callback_runs_at_most_once() {
        let (source, resolver) = Output::<u32>::pending();
        let calls = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&calls);
        let derived = source.apply(move |v| {
            *counter.lock().unwrap() += 1;
            v
        });
        resolver.resolve(5);

        for _ in 0..3 {
            assert_eq!(derived.await_resolved().await.unwrap(), 5);
        }
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failure_propagates_to_descendants() {
        let failing = Output::new("abc".to_string()).try_apply(|s| s.parse::<i32>());
        let downstream = failing.apply(|v| v * 2);

        let err = downstream.await_resolved().await.unwrap_err();
        assert!(matches!(err, OutputError::Failed(_)));
        assert_eq!(failing.await_resolved().await.unwrap_err(), err);
    }

    #[test]
    fn test_secret_is_monotonic() {
        let secret = Output::new(1).as_secret();
        assert!(secret.is_secret());
        assert!(secret.apply(|v| v + 1).is_secret());
        assert!(secret.apply(|v| v + 1).apply(|v| v * 2).is_secret());
        assert!(!Output::new(1).apply(|v| v + 1).is_secret());
    }

    #[test]
    fn test_as_secret_does_not_touch_source() {
        let plain = Output::new("key".to_string());
        let hidden = plain.as_secret();
        assert!(hidden.is_secret());
        assert!(!plain.is_secret());
    }

    #[tokio::test]
    async fn test_apply_output_joins_inner_secrecy() {
        let flattened = Output::new("valueKeyStorage".to_string()).apply_output(Output::secret);
        assert_eq!(flattened.await_resolved().await.unwrap(), "valueKeyStorage");
        assert!(flattened.is_secret());
        assert!(flattened.apply(|s| s.len()).is_secret());
    }

    #[tokio::test]
    async fn test_zip_and_all() {
        let (late, resolver) = Output::<i32>::pending();
        let pair = Output::new("a").zip(&late);
        let list = Output::all(vec![Output::new(1), late.clone(), Output::secret(3)]);

        resolver.resolve(2);
        assert_eq!(pair.await_resolved().await.unwrap(), ("a", 2));
        assert_eq!(list.await_resolved().await.unwrap(), vec![1, 2, 3]);
        assert!(list.is_secret());
        assert!(!pair.is_secret());
    }

    #[tokio::test]
    async fn test_all_fails_with_first_failure() {
        let list = Output::all(vec![
            Output::new(1),
            Output::failed(OutputError::failed("boom")),
        ]);
        assert_eq!(
            list.await_resolved().await.unwrap_err(),
            OutputError::failed("boom")
        );
        assert!(Output::<i32>::all(Vec::new()).peek().unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_resolver_abandons() {
        let (out, resolver) = Output::<i32>::pending();
        let derived = out.apply(|v| v + 1);
        drop(resolver);
        assert_eq!(
            derived.await_resolved().await.unwrap_err(),
            OutputError::Abandoned
        );
    }

    #[tokio::test]
    async fn test_await_times_out() {
        let (out, _resolver) = Output::<i32>::pending();
        let err = out
            .await_resolved_within(Duration::from_millis(10))
            .await
            .unwrap_err();
        assert_eq!(err, OutputError::Timeout(Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn test_resolution_from_another_task() {
        let (out, resolver) = Output::<String>::pending();
        let derived = out.apply(|s| s.to_uppercase());
        tokio::spawn(async move {
            resolver.resolve("sa".to_string());
        });
        assert_eq!(derived.await_resolved().await.unwrap(), "SA");
    }

    #[test]
    fn test_debug_hides_secret() {
        assert_eq!(format!("{:?}", Output::secret(42)), "Output([secret])");
        assert_eq!(format!("{:?}", Output::new(42)), "Output(42)");
    }

    #[test]
    fn test_block_on_resolved() {
        let out = Output::new(vec![1, 2]).apply(|v| v.len());
        assert_eq!(tokio_test::block_on(out.await_resolved()).unwrap(), 2);
    }
}
