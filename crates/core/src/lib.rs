//! Lingo Core
//!
//! Client-side logic for a language-study helper that talks to a hosted
//! assistant service: one long-lived assistant, one conversation thread, and
//! a request/poll/parse cycle for study suggestions and related vocabulary.

pub mod backend;
pub mod openai;
pub mod prompts;
pub mod reply;
pub mod session;
