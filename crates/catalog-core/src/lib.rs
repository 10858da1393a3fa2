//! Orchestration for the catalog mapper.
//!
//! A [`Session`] is built explicitly and owns everything one mapping run
//! needs: the schema, the loaded dataset, the mapping store and the variant
//! manager. Store changes arrive as channel events and are folded into the
//! preview by [`Session::process_events`].

#![deny(unsafe_code)]

mod error;
mod session;

pub use error::SessionError;
pub use session::{Session, ValidationReport};
