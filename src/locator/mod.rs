pub mod locator_model;
pub mod render;
pub mod resolver;
