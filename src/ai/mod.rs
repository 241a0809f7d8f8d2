pub mod adapter;
pub mod prompt;
pub mod provider;
