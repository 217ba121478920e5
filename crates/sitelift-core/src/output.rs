// ── Deferred values ──
//
// Output<T> is a handle to a value that becomes known when the engine
// resolves the deployment graph. Handles are cheap to clone and carry the
// URNs of the resources they derive from, so dependency hints propagate
// automatically when an output is fed into another resource's inputs.

use std::collections::HashMap;
use std::fmt;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::resource::Urn;

// ── OutputError ─────────────────────────────────────────────────────

/// Failure of a deferred value. Clone-able so every handle to the same
/// value observes the same error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OutputError {
    /// The deployment failed before this value resolved.
    #[error("deployment failed before this value resolved: {message}")]
    Failed { message: String },

    /// The resolver was dropped without supplying a value.
    #[error("value was dropped without being resolved")]
    Dropped,
}

type SharedResult<T> = Shared<BoxFuture<'static, Result<T, OutputError>>>;

// ── Output ──────────────────────────────────────────────────────────

/// A deferred value in the deployment graph.
///
/// Cloning is cheap: all clones await the same underlying resolution.
/// `apply` derives new deferred values without awaiting; `get` awaits.
#[derive(Clone)]
pub struct Output<T: Clone> {
    future: SharedResult<T>,
    deps: Vec<Urn>,
}

impl<T: Clone> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

impl<T> Output<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// An already-resolved value.
    pub fn from_value(value: T) -> Self {
        Self {
            future: futures_util::future::ready(Ok(value)).boxed().shared(),
            deps: Vec::new(),
        }
    }

    /// A pending value plus the resolver that will settle it.
    pub fn pending() -> (OutputResolver<T>, Self) {
        let (tx, rx) = oneshot::channel::<Result<T, OutputError>>();
        let future = rx
            .map(|received| match received {
                Ok(result) => result,
                Err(_) => Err(OutputError::Dropped),
            })
            .boxed()
            .shared();
        (
            OutputResolver { tx },
            Self {
                future,
                deps: Vec::new(),
            },
        )
    }

    /// Record that this value derives from the given resource.
    pub(crate) fn with_dependency(mut self, urn: Urn) -> Self {
        self.deps.push(urn);
        self
    }

    /// URNs of the resources this value derives from.
    pub fn dependencies(&self) -> &[Urn] {
        &self.deps
    }

    /// Await the resolved value.
    pub async fn get(&self) -> Result<T, OutputError> {
        self.future.clone().await
    }

    /// Derive a new deferred value. The closure runs once the source
    /// resolves; dependencies carry over. Errors propagate unchanged.
    pub fn apply<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Output {
            future: self.future.clone().map(|result| result.map(f)).boxed().shared(),
            deps: self.deps.clone(),
        }
    }

    /// Join a homogeneous collection of deferred values into one.
    /// Dependencies are the union of the inputs' dependencies.
    pub fn all(outputs: Vec<Output<T>>) -> Output<Vec<T>> {
        let deps: Vec<Urn> = outputs
            .iter()
            .flat_map(|o| o.deps.iter().cloned())
            .collect();
        let futures: Vec<_> = outputs.into_iter().map(|o| o.future).collect();
        let future = futures_util::future::join_all(futures)
            .map(|results| results.into_iter().collect::<Result<Vec<T>, OutputError>>())
            .boxed()
            .shared();
        Output { future, deps }
    }
}

// ── Collection accessors ────────────────────────────────────────────

impl<T> Output<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    /// Deferred positional accessor with `Vec::get` semantics: a valid
    /// index yields the element unchanged, out-of-range yields `None`.
    pub fn index(&self, index: usize) -> Output<Option<T>> {
        self.apply(move |items| items.get(index).cloned())
    }
}

impl<T> Output<HashMap<String, T>>
where
    T: Clone + Send + Sync + 'static,
{
    /// Deferred keyed accessor with `HashMap::get` semantics: a present
    /// key yields the element unchanged, an absent key yields `None`.
    pub fn key(&self, key: impl Into<String>) -> Output<Option<T>> {
        let key = key.into();
        self.apply(move |items| items.get(&key).cloned())
    }
}

// ── OutputResolver ──────────────────────────────────────────────────

/// Settles a pending [`Output`] exactly once.
pub struct OutputResolver<T> {
    tx: oneshot::Sender<Result<T, OutputError>>,
}

impl<T> OutputResolver<T> {
    pub fn resolve(self, value: T) {
        let _ = self.tx.send(Ok(value));
    }

    pub fn fail(self, error: OutputError) {
        let _ = self.tx.send(Err(error));
    }
}

// ── Input ───────────────────────────────────────────────────────────

/// A resource input: either a literal value or another resource's
/// deferred output. The engine resolves deferred inputs before the
/// provider plugin sees them; this type resolves them at marshal time.
#[derive(Debug, Clone)]
pub enum Input<T: Clone> {
    Value(T),
    Deferred(Output<T>),
}

impl<T> Input<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Await the concrete value.
    pub async fn resolve(&self) -> Result<T, OutputError> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Deferred(output) => output.get().await,
        }
    }

    /// URNs this input depends on (empty for literals).
    pub fn dependencies(&self) -> &[Urn] {
        match self {
            Self::Value(_) => &[],
            Self::Deferred(output) => output.dependencies(),
        }
    }

    /// The literal value, if this input is not deferred.
    pub fn literal(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }
}

impl<T: Clone> From<T> for Input<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Clone> From<Output<T>> for Input<T> {
    fn from(output: Output<T>) -> Self {
        Self::Deferred(output)
    }
}

impl From<&str> for Input<String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn urn(name: &str) -> Urn {
        Urn::new(format!("urn:sitelift:dev::main::t::{name}"))
    }

    #[tokio::test]
    async fn resolved_value_is_returned_to_every_clone() {
        let output = Output::from_value(7_u32);
        let clone = output.clone();
        assert_eq!(output.get().await.unwrap(), 7);
        assert_eq!(clone.get().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn pending_resolves_after_the_fact() {
        let (resolver, output) = Output::pending();
        let waiter = tokio::spawn({
            let output = output.clone();
            async move { output.get().await }
        });
        resolver.resolve("ready".to_owned());
        assert_eq!(waiter.await.unwrap().unwrap(), "ready");
        assert_eq!(output.get().await.unwrap(), "ready");
    }

    #[tokio::test]
    async fn dropped_resolver_surfaces_error() {
        let (resolver, output) = Output::<String>::pending();
        drop(resolver);
        assert_eq!(output.get().await.unwrap_err(), OutputError::Dropped);
    }

    #[tokio::test]
    async fn apply_derives_and_keeps_dependencies() {
        let output = Output::from_value(3_u32).with_dependency(urn("a"));
        let doubled = output.apply(|n| n * 2);
        assert_eq!(doubled.get().await.unwrap(), 6);
        assert_eq!(doubled.dependencies(), output.dependencies());
    }

    #[tokio::test]
    async fn apply_propagates_failure_unchanged() {
        let (resolver, output) = Output::<u32>::pending();
        resolver.fail(OutputError::Failed {
            message: "boom".into(),
        });
        let derived = output.apply(|n| n + 1);
        assert_eq!(
            derived.get().await.unwrap_err(),
            OutputError::Failed {
                message: "boom".into()
            }
        );
    }

    #[tokio::test]
    async fn all_joins_values_and_merges_dependencies() {
        let a = Output::from_value(1_u32).with_dependency(urn("a"));
        let b = Output::from_value(2_u32).with_dependency(urn("b"));
        let joined = Output::all(vec![a, b]);
        assert_eq!(joined.get().await.unwrap(), vec![1, 2]);
        assert_eq!(joined.dependencies(), &[urn("a"), urn("b")]);
    }

    #[tokio::test]
    async fn index_matches_vec_get_semantics() {
        let list = Output::from_value(vec!["x".to_owned(), "y".to_owned()]);
        assert_eq!(list.index(1).get().await.unwrap(), Some("y".to_owned()));
        assert_eq!(list.index(2).get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn key_matches_hashmap_get_semantics() {
        let mut entries = HashMap::new();
        entries.insert("main".to_owned(), 10_u32);
        let map = Output::from_value(entries);
        assert_eq!(map.key("main").get().await.unwrap(), Some(10));
        assert_eq!(map.key("absent").get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn input_resolves_literals_and_deferred_values() {
        let literal: Input<String> = "plain".into();
        assert_eq!(literal.resolve().await.unwrap(), "plain");
        assert!(literal.dependencies().is_empty());

        let deferred: Input<String> =
            Output::from_value("from-resource".to_owned())
                .with_dependency(urn("site"))
                .into();
        assert_eq!(deferred.resolve().await.unwrap(), "from-resource");
        assert_eq!(deferred.dependencies(), &[urn("site")]);
        assert!(deferred.literal().is_none());
    }
}
