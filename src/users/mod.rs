//! User records: wire model, REST client, form draft, and the async
//! commands the screens run against the backend.

pub mod client;
pub mod command;
pub mod draft;
pub mod message;
pub mod model;

pub use client::UserApi;
pub use draft::{FormField, UserDraft, UserPayload};
pub use model::{Gender, User, UserId};
