//! Entities produced by the builder.
//!
//! A [`Source`] is the root. Below it, every [`Collection`] exclusively owns
//! its ordered children, each either a [`Component`] or another collection.

mod collection;
mod component;
mod node;
mod source;

pub use collection::Collection;
pub use component::{Component, ComponentFiles};
pub use node::{Node, order_items};
pub use source::{Source, SourceRef, SourceSettings};
