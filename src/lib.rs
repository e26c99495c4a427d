pub mod common;
pub mod data_loader;
pub mod fetch;
pub mod generate_commands;
pub mod page;
pub mod plan;
pub mod plan_execution;
pub mod project;
pub mod render;
