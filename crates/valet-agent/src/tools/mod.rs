//! Tools the model can call mid-conversation.
//!
//! A [`Tool`] is a named, schema-described callable owned by the caller;
//! the [`ToolRegistry`] indexes tools by name and mediates every
//! invocation the model requests.

mod registry;

pub use registry::{Tool, ToolRegistry};
