//! Configuration types (nouns)
//!
//! Timezone, operator vocabularies, granularity defaults, palette and
//! rounding policy. Loaded from YAML by [`crate::parser`].

mod settings;
mod vocabulary;

pub use settings::{QueryConfig, RoundingPolicy, DEFAULT_PALETTE};
pub use vocabulary::{Operator, OperatorVocabulary};
