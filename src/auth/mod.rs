pub mod cookies;
pub mod extractors;
pub mod oauth;
pub mod services;
pub mod token;
