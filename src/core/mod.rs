pub mod policy;
pub mod snapshot_generator;
pub mod template;
