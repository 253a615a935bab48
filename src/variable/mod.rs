pub mod config;
pub mod context;
pub mod resolver;

pub use config::{ConfigError, ConfigLoader, Environment, VariableConfig};
pub use context::VariableContext;
pub use resolver::VariableResolver;
