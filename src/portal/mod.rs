//! Portal navigation: authenticated session, course enumeration,
//! and per-course checklist scraping.

pub mod auth;
pub mod checklist;
pub mod client;
pub mod courses;
