pub mod amount;
pub mod atm;
pub mod auth;
pub mod config;
pub mod console;
pub mod menu;
pub mod model;
pub mod session;
pub mod statement;
