//! Resume document editing, request validation and the resume CRUD surface.

pub mod editor;
pub mod handlers;
pub mod input;
pub mod schema;
pub mod sections;
pub mod validation;
