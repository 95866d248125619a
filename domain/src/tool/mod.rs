//! Tool domain module
//!
//! Tools themselves (screenshot, mouse/keyboard, bash, editor) run inside the
//! external agent engine; this crate only models their **outcomes**. A
//! [`ToolResult`] is the structured report of one tool invocation as the
//! engine hands it back: text output, error text, an optional screenshot
//! payload, and an optional system note for the model.

pub mod value_objects;

pub use value_objects::ToolResult;
