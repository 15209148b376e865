//! Core of the data-alchemist tool: delimited-text parsing, entity
//! projection, validation, free-text rule extraction, and export assembly.
//!
//! Presentation concerns (grids, file pickers, toasts) live with the caller;
//! this crate takes already-decoded text and hands back typed records,
//! diagnostics, or rule objects.

pub mod entity;
pub mod export;
pub mod rule;
pub mod store;
pub mod table;
pub mod validate;

pub type Result<T> = anyhow::Result<T>;
