pub mod fibonacci;
pub mod settings;
