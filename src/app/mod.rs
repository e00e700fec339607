pub mod api_server;
pub mod config;
pub mod resource_explorer;
