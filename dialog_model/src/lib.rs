//! # Dialog Model
//!
//! The declarative description of a dialog: the interaction units a user
//! works with, and the scopes that group them. This crate holds no runtime
//! state; see `dialog_core` for the engine that tracks statements and
//! activation.
//!
//! ## Core Components
//!
//! - **qname**: Qualified names identifying interaction units
//! - **interaction**: The interaction-unit tree
//! - **scopes**: Scope records, the scope tree and scope assignment
//! - **activation**: Default activation policies
//! - **dialog**: Dialog descriptions and their TOML/JSON loading

pub mod activation;
pub mod dialog;
pub mod error;
pub mod interaction;
pub mod qname;
pub mod scopes;

pub use activation::*;
pub use dialog::*;
pub use error::*;
pub use interaction::*;
pub use qname::*;
pub use scopes::*;
