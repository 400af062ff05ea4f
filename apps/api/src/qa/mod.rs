pub mod engine;
pub mod extractors;
pub mod handlers;
pub mod intent;
pub mod search;
