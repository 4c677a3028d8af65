//! Identity: bearer tokens, password hashing, sign up and log in.

pub mod extractor;
pub mod handlers;
pub mod jwt;
pub mod password;

pub use extractor::AuthOwner;
pub use jwt::TokenIssuer;
