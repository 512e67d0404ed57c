//! Infrastructure adapters.

pub mod http_text_generator;
