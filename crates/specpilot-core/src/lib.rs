pub mod config;
pub mod context;
pub mod defaults;
pub mod detect;
pub mod error;
pub mod generator;
pub mod io;
pub mod migrator;
pub mod paths;
pub mod registry;
pub mod rules;
pub mod specify;
pub mod template;
pub mod templates;
pub mod types;
pub mod validator;

pub use error::{Result, SpecError};
