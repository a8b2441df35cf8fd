//! # Quill Shared
//!
//! View models and submitted form shapes, shared between the server and any
//! client that renders them.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldMessage, FormResponse};
