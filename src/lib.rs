//! Signup flow of the Cursus e-learning platform: the registration form
//! controller and the HTTP backend it talks to.

pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod form;
pub mod middleware;
pub mod route;
