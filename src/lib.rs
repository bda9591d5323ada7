// Allow pre-existing clippy lints across the codebase
#![allow(
    clippy::collapsible_if,
    clippy::manual_div_ceil,
    clippy::needless_range_loop,
    clippy::too_many_arguments
)]

/// Use mimalloc as the global allocator.
/// 2-3x faster than glibc malloc for small allocations,
/// better thread-local caching, and reduced fragmentation.
/// Matters for column construction, which does many small pushes.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod column;
pub mod common;
pub mod datagen;
pub mod extract;
