/// Hook handles and their defaults

use super::Expansion;
use crate::error::ConfigurationError;
use std::iter;
use std::sync::Arc;

/// Called once per leaf with the final path, context and payload.
pub type Consumer<X> = Arc<
    dyn Fn(
            &<X as Expansion>::Path,
            &<X as Expansion>::Context,
            &<X as Expansion>::Payload,
        ) -> Result<(), <X as Expansion>::Error>
        + Send
        + Sync,
>;

/// Extends a path by the name chosen at one level.
pub type PathCombiner<X> = Arc<
    dyn Fn(&<X as Expansion>::Path, &<X as Expansion>::Name) -> Result<<X as Expansion>::Path, <X as Expansion>::Error>
        + Send
        + Sync,
>;

/// Extends a context by the value chosen at one level.
pub type ContextCombiner<X> = Arc<
    dyn Fn(&<X as Expansion>::Context, &<X as Expansion>::Value) -> Result<<X as Expansion>::Context, <X as Expansion>::Error>
        + Send
        + Sync,
>;

/// Default consumer: every leaf fails until a real one is configured.
pub fn missing_consumer<X: Expansion>() -> Consumer<X> {
    Arc::new(
        |_: &X::Path, _: &X::Context, _: &X::Payload| -> Result<(), X::Error> {
            Err(ConfigurationError::MissingConsumer.into())
        },
    )
}

/// Default path combiner: a copy of the path with the name appended.
pub fn append_name<X>() -> PathCombiner<X>
where
    X: Expansion,
    X::Path: Clone + Extend<X::Name>,
    X::Name: Clone,
{
    Arc::new(|path: &X::Path, name: &X::Name| -> Result<X::Path, X::Error> {
        let mut next = path.clone();
        next.extend(iter::once(name.clone()));
        Ok(next)
    })
}

/// Default context combiner: a copy of the context with the value appended.
pub fn append_value<X>() -> ContextCombiner<X>
where
    X: Expansion,
    X::Context: Clone + Extend<X::Value>,
    X::Value: Clone,
{
    Arc::new(|context: &X::Context, value: &X::Value| -> Result<X::Context, X::Error> {
        let mut next = context.clone();
        next.extend(iter::once(value.clone()));
        Ok(next)
    })
}
