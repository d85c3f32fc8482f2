mod assets;
mod instance;
