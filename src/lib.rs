pub mod db;
pub mod graphql;
pub mod server;
pub mod web;
