/// Providers: one tree level each

use super::{Expansion, Variants};
use crate::error::ConfigurationError;
use std::collections::btree_map::Entry;
use std::fmt::Debug;

/// Produces the named variants for the next tree level.
///
/// The payload handed to a provider is the copy owned by the current level,
/// so any mutation is seen by this subtree only.
pub trait Provider<X: Expansion> {
    fn provide(
        &self,
        path: &X::Path,
        context: &X::Context,
        payload: &mut X::Payload,
    ) -> Result<Variants<X>, X::Error>;
}

impl<X, F> Provider<X> for F
where
    X: Expansion,
    F: Fn(&X::Path, &X::Context, &mut X::Payload) -> Result<Variants<X>, X::Error>,
{
    fn provide(
        &self,
        path: &X::Path,
        context: &X::Context,
        payload: &mut X::Payload,
    ) -> Result<Variants<X>, X::Error> {
        self(path, context, payload)
    }
}

/// Pins a closure to the provider signature of `X` so its argument types
/// can be inferred.
pub fn provider<X, F>(f: F) -> F
where
    X: Expansion,
    F: Fn(&X::Path, &X::Context, &mut X::Payload) -> Result<Variants<X>, X::Error>,
{
    f
}

/// Builds a variant set, rejecting repeated names instead of overwriting.
pub fn unique_variants<X, I>(entries: I) -> Result<Variants<X>, ConfigurationError>
where
    X: Expansion,
    X::Name: Debug,
    I: IntoIterator<Item = (X::Name, X::Value)>,
{
    let mut variants = Variants::<X>::new();
    for (name, value) in entries {
        match variants.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(slot) => {
                return Err(ConfigurationError::DuplicateVariant(format!("{:?}", slot.key())));
            }
        }
    }
    Ok(variants)
}
