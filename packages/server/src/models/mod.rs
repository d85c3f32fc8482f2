pub mod asset;
pub mod instance;
