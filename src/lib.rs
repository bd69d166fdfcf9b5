/// Themedex - Theme-driven Pokémon team recommender
///
/// Core library providing keyword interpretation, candidate filtering,
/// relevance scoring, and diversity-aware team selection over a static
/// Pokémon catalog.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
