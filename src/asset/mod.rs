//! Asset entity and its lazy parent lookup.

pub mod entity;
pub mod navigation;

pub use entity::Asset;
