//! Van Emde Boas tree: node recursion and the public set API.

mod node;
mod set;

pub use set::{VebError, VebSet};
