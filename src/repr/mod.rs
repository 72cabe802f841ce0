//! Policy tree representations.
//!
//! - [`Node`] / [`PolicyTree`]: the owned in-memory tree the search
//!   returns, with prediction.
//! - The flat numeric matrix encoding ([`PolicyTree::to_flat`] /
//!   [`PolicyTree::from_flat`]) used to carry a tree across a language
//!   boundary, with validated decoding.

mod flat;
mod node;

pub use flat::{DecodeError, FLAT_COLUMNS};
pub use node::{Node, PolicyTree};
