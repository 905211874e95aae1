pub mod expander;
pub mod error;
pub mod settings;
pub mod observability;

pub use expander::{provider, Expander, Expansion, Hook, Provider, Sequences, Variants};
pub use error::{ConfigurationError, ExpanderError, Result};
pub use settings::ExpanderSettings;
