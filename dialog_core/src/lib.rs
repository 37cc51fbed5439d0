//! # Dialog Core
//!
//! The runtime side of a dialog. This crate takes a `dialog_model::Dialog`
//! and tracks what the user has selected: statements such as "the selected
//! profile", visible to nested scopes, and which unit is active in each
//! demarcating scope.
//!
//! ## Core Components
//!
//! - **context**: Statement contexts and the per-scope delegating context
//! - **state**: `DialogState`, the registry of contexts and active units
//! - **address**: Address templates resolved against a statement context
//!
//! ## Design Philosophy
//!
//! - **Scoped**: The innermost scope wins; the application's root context is the last fallback
//! - **Lazy**: A scope's context is created the first time one of its units is asked for
//! - **Trusting**: Units outside the dialog model are a caller bug and panic

pub mod address;
pub mod context;
pub mod error;
pub mod state;

pub use address::*;
pub use context::*;
pub use error::*;
pub use state::*;
