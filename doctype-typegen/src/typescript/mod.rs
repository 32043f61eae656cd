//! TypeScript declaration generation.
//!
//! [`compose`] turns a [`DocType`](crate::doctype::DocType) into a
//! [`GeneratedInterface`], delegating table references to a
//! [`ReferenceResolver`].

pub mod composer;
pub mod enums;
pub mod interface;
pub mod mapper;
pub mod resolver;

pub use composer::compose;
pub use interface::GeneratedInterface;
pub use resolver::{ReferenceResolver, Resolution, TableResolver};
