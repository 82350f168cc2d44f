pub mod project;
pub mod property;
pub mod property_block;
