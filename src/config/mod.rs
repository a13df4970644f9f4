pub mod defaults;
pub mod loader;
pub mod types;

pub use defaults::default_locations;
pub use loader::ConfigLoader;
pub use types::*;
