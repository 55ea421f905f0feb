//! Shared types for the cart workspace.

mod types;

pub use types::ProductId;
