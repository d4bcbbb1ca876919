// po-agent - Product Owner assistant
// Library exports

pub mod agent;
pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod providers;
pub mod relay;
pub mod views;
