pub mod handlers;
pub mod processing;
pub mod repository;
pub mod storage;
