mod core;

pub use self::core::{ColumnError, StringColumn};

#[cfg(test)]
mod tests;
