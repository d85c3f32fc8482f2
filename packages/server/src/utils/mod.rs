pub mod filename;
pub mod naming;
