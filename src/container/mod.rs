//! Container entity, its cache slots, and the accessors that fill them.

pub mod entity;
pub mod navigation;

pub use entity::{Container, ParentCache};
