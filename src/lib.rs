pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod data_models;
pub mod error;
pub mod highlight;
pub mod pagination;
pub mod provider;
pub mod render;
pub mod views;
