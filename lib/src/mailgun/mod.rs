pub mod api;
mod client;
mod types;

pub use client::{HttpTransport, Transport};
pub use types::{Attachments, Field, FieldMap, ProviderResponse};
