pub mod hooks;
pub mod options;
pub mod provider;
pub mod stats;

pub use hooks::{Consumer, ContextCombiner, PathCombiner};
pub use options::{Hook, OPTION_KEYS};
pub use provider::{provider, unique_variants, Provider};
pub use stats::ExpansionStats;

use crate::error::{ConfigurationError, ExpanderError};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, debug_span, trace};

/// The types a single expansion works over.
///
/// Names must be totally ordered: siblings are always visited in ascending
/// name order. The payload is forked with `Clone` whenever a level still has
/// a provider to run, so a `Clone` that shares state (`Rc<RefCell<_>>` and
/// friends) breaks subtree isolation. `Copy` scalars and `Arc`-shared
/// immutable data are fine.
pub trait Expansion: 'static {
    type Path;
    type Context;
    type Payload: Clone;
    type Name: Ord;
    type Value;
    type Error: From<ConfigurationError>;
}

/// The variants one provider yields for the next level, keyed and ordered by name.
pub type Variants<X> = BTreeMap<<X as Expansion>::Name, <X as Expansion>::Value>;

/// Expansion with `Vec` accumulators: the path collects names, the context
/// collects values.
pub struct Sequences<N, V, D>(PhantomData<fn() -> (N, V, D)>);

impl<N, V, D> Expansion for Sequences<N, V, D>
where
    N: Ord + Clone + 'static,
    V: Clone + 'static,
    D: Clone + 'static,
{
    type Path = Vec<N>;
    type Context = Vec<V>;
    type Payload = D;
    type Name = N;
    type Value = V;
    type Error = ExpanderError;
}

/// Walks a sequence of providers depth first and hands every leaf of the
/// resulting combination tree to the consumer.
pub struct Expander<X: Expansion> {
    consumer: Consumer<X>,
    combine_path: PathCombiner<X>,
    combine_context: ContextCombiner<X>,
}

impl<X> Expander<X>
where
    X: Expansion,
    X::Path: Clone + Extend<X::Name>,
    X::Name: Clone,
    X::Context: Clone + Extend<X::Value>,
    X::Value: Clone,
{
    /// Sequence-appending combiners and a consumer that fails until replaced.
    pub fn new() -> Self {
        Self::with_combiners(hooks::append_name::<X>(), hooks::append_value::<X>())
    }

    /// Builds an expander from named hooks on top of the defaults.
    ///
    /// Recognised keys are listed in [`OPTION_KEYS`].
    pub fn from_options<I, K>(options: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, Hook<X>)>,
        K: Into<String>,
    {
        Self::new().apply_options(options)
    }
}

impl<X> Default for Expander<X>
where
    X: Expansion,
    X::Path: Clone + Extend<X::Name>,
    X::Name: Clone,
    X::Context: Clone + Extend<X::Value>,
    X::Value: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Expansion> Expander<X> {
    /// For accumulators that are not sequences. The consumer still has to be set.
    pub fn with_combiners(combine_path: PathCombiner<X>, combine_context: ContextCombiner<X>) -> Self {
        Self {
            consumer: hooks::missing_consumer::<X>(),
            combine_path,
            combine_context,
        }
    }

    /// Replaces the consumer.
    ///
    /// Hooks are held as `Arc<dyn Fn + Send + Sync>` so an `Expander` can be
    /// cloned and shared across threads; a consumer that records leaves keeps
    /// its state behind something like `Arc<Mutex<_>>`.
    pub fn with_consumer<F>(mut self, consumer: F) -> Self
    where
        F: Fn(&X::Path, &X::Context, &X::Payload) -> Result<(), X::Error> + Send + Sync + 'static,
    {
        self.consumer = Arc::new(consumer);
        self
    }

    pub fn with_combine_path<F>(mut self, combine_path: F) -> Self
    where
        F: Fn(&X::Path, &X::Name) -> Result<X::Path, X::Error> + Send + Sync + 'static,
    {
        self.combine_path = Arc::new(combine_path);
        self
    }

    pub fn with_combine_context<F>(mut self, combine_context: F) -> Self
    where
        F: Fn(&X::Context, &X::Value) -> Result<X::Context, X::Error> + Send + Sync + 'static,
    {
        self.combine_context = Arc::new(combine_context);
        self
    }

    /// Applies named hooks on top of the current ones.
    ///
    /// This is [`Expander::from_options`] for expansions built with
    /// [`Expander::with_combiners`]. Recognised keys are listed in [`OPTION_KEYS`].
    pub fn apply_options<I, K>(self, options: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, Hook<X>)>,
        K: Into<String>,
    {
        options::apply_options(self, options)
    }

    pub fn consumer(&self) -> &Consumer<X> {
        &self.consumer
    }

    pub fn combine_path(&self) -> &PathCombiner<X> {
        &self.combine_path
    }

    pub fn combine_context(&self) -> &ContextCombiner<X> {
        &self.combine_context
    }

    /// Expands `providers` from the given seeds, calling the consumer once per leaf.
    ///
    /// A provider returning no variants prunes its subtree: neither the
    /// remaining providers nor the consumer run for it. The first error from
    /// any provider or hook stops the traversal and is returned as is.
    pub fn expand(
        &self,
        providers: &[&dyn Provider<X>],
        path: &X::Path,
        context: &X::Context,
        payload: &X::Payload,
    ) -> Result<(), X::Error> {
        self.expand_with_stats(providers, path, context, payload)
            .map(|_| ())
    }

    /// Like [`Expander::expand`], also counting what the traversal did.
    pub fn expand_with_stats(
        &self,
        providers: &[&dyn Provider<X>],
        path: &X::Path,
        context: &X::Context,
        payload: &X::Payload,
    ) -> Result<ExpansionStats, X::Error> {
        let span = debug_span!("expand", providers = providers.len());
        let _guard = span.enter();

        let mut stats = ExpansionStats::default();
        self.descend(providers, path, context, payload, 0, &mut stats)?;

        debug!(
            provider_calls = stats.provider_calls,
            leaves = stats.leaves,
            pruned = stats.pruned,
            "expansion complete"
        );
        Ok(stats)
    }

    fn descend(
        &self,
        providers: &[&dyn Provider<X>],
        path: &X::Path,
        context: &X::Context,
        payload: &X::Payload,
        depth: usize,
        stats: &mut ExpansionStats,
    ) -> Result<(), X::Error> {
        stats.enter(depth);

        let Some((head, tail)) = providers.split_first() else {
            trace!(depth, "leaf reached");
            stats.leaves += 1;
            return (self.consumer)(path, context, payload);
        };

        // Each level works on its own copy; siblings below start from it and fork again.
        let mut forked = payload.clone();
        stats.provider_calls += 1;
        let variants = head.provide(path, context, &mut forked)?;

        if variants.is_empty() {
            debug!(depth, remaining = tail.len(), "provider yielded no variants, pruning");
            stats.pruned += 1;
            return Ok(());
        }
        trace!(depth, variants = variants.len(), "descending");

        for (name, value) in &variants {
            let next_path = (self.combine_path)(path, name)?;
            let next_context = (self.combine_context)(context, value)?;
            self.descend(tail, &next_path, &next_context, &forked, depth + 1, stats)?;
        }
        Ok(())
    }
}

impl<X: Expansion> Clone for Expander<X> {
    fn clone(&self) -> Self {
        Self {
            consumer: Arc::clone(&self.consumer),
            combine_path: Arc::clone(&self.combine_path),
            combine_context: Arc::clone(&self.combine_context),
        }
    }
}

impl<X: Expansion> fmt::Debug for Expander<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expander").finish_non_exhaustive()
    }
}
