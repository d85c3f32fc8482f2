pub mod assets;
pub mod instance;
