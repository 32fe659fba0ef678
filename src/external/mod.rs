//! Outbound HTTP integrations: the shared client, user agent rotation and
//! the job board adapters.

pub mod boards;
pub mod client;
pub mod user_agent;
