pub mod agent;
pub mod errors;
pub mod headlines;
pub mod models;
pub mod newsapi;
pub mod providers;
pub mod token_counter;
pub mod truncate;
