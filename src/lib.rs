pub mod adapters;
pub mod cmd;
pub mod domain;
pub mod engine;
