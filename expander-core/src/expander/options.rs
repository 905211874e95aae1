/// Construction from named hooks

use super::hooks::{Consumer, ContextCombiner, PathCombiner};
use super::{Expander, Expansion};
use crate::error::ConfigurationError;
use std::sync::Arc;

pub const CONSUMER: &str = "consumer";
pub const COMBINE_PATH: &str = "combine_path";
pub const COMBINE_CONTEXT: &str = "combine_context";

/// Every key `Expander::from_options` recognises.
pub const OPTION_KEYS: &[&str] = &[CONSUMER, COMBINE_PATH, COMBINE_CONTEXT];

/// A hook value supplied under a named option.
pub enum Hook<X: Expansion> {
    Consumer(Consumer<X>),
    CombinePath(PathCombiner<X>),
    CombineContext(ContextCombiner<X>),
}

impl<X: Expansion> Hook<X> {
    pub fn consumer<F>(f: F) -> Self
    where
        F: Fn(&X::Path, &X::Context, &X::Payload) -> Result<(), X::Error> + Send + Sync + 'static,
    {
        Hook::Consumer(Arc::new(f))
    }

    pub fn combine_path<F>(f: F) -> Self
    where
        F: Fn(&X::Path, &X::Name) -> Result<X::Path, X::Error> + Send + Sync + 'static,
    {
        Hook::CombinePath(Arc::new(f))
    }

    pub fn combine_context<F>(f: F) -> Self
    where
        F: Fn(&X::Context, &X::Value) -> Result<X::Context, X::Error> + Send + Sync + 'static,
    {
        Hook::CombineContext(Arc::new(f))
    }

    fn kind(&self) -> &'static str {
        match self {
            Hook::Consumer(_) => CONSUMER,
            Hook::CombinePath(_) => COMBINE_PATH,
            Hook::CombineContext(_) => COMBINE_CONTEXT,
        }
    }
}

fn known_key(key: &str) -> Option<&'static str> {
    OPTION_KEYS.iter().copied().find(|known| *known == key)
}

/// Applies named hooks on top of `expander`.
///
/// Every option is checked before failing. Unknown keys are reported first,
/// all of them in the order given; otherwise the first key carrying the wrong
/// hook kind is reported.
pub(super) fn apply_options<X, I, K>(
    mut expander: Expander<X>,
    options: I,
) -> Result<Expander<X>, ConfigurationError>
where
    X: Expansion,
    I: IntoIterator<Item = (K, Hook<X>)>,
    K: Into<String>,
{
    let mut unknown = Vec::new();
    let mut mismatch = None;

    for (key, hook) in options {
        let key = key.into();
        let Some(expected) = known_key(&key) else {
            unknown.push(key);
            continue;
        };
        let found = hook.kind();
        if found != expected {
            if mismatch.is_none() {
                mismatch = Some(ConfigurationError::HookMismatch { key, expected, found });
            }
            continue;
        }
        match hook {
            Hook::Consumer(consumer) => expander.consumer = consumer,
            Hook::CombinePath(combine) => expander.combine_path = combine,
            Hook::CombineContext(combine) => expander.combine_context = combine,
        }
    }

    if !unknown.is_empty() {
        return Err(ConfigurationError::UnknownOptions(unknown));
    }
    match mismatch {
        Some(err) => Err(err),
        None => Ok(expander),
    }
}
