pub mod name_resolver;
