pub mod collocations;
pub mod engine;
pub mod merger;
pub mod model;
pub mod resolver;
pub mod rows;
pub mod scan;
pub mod types;
