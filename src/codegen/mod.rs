pub mod emitter;
pub mod options;
pub mod playwright;
pub mod selenium;
pub mod writer;
