pub mod connection_resolver;
pub mod key_vault;
pub mod secret_provider;
