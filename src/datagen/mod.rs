mod core;

pub use self::core::{Rng, synthetic_log_column};

#[cfg(test)]
mod tests;
