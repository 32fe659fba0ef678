//! Route handlers, grouped by resource.

pub mod analytics;
pub mod auth;
pub mod automation;
pub mod blacklist;
pub mod cover_letters;
pub mod criteria;
pub mod health;
pub mod jobs;
pub mod notifications;
pub mod profile;
pub mod resume;
pub mod sync;
pub mod websites;
