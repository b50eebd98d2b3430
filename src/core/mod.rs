pub mod services;
pub mod wizard;
