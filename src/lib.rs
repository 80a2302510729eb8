pub mod client;
pub mod config;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod logger;
pub mod providers;
pub mod sofascore;
pub mod tennis_abstract;
