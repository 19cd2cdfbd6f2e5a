//! Resume parameter scoring: quantitative, boolean and textual strategies over a
//! hosted language model, plus the HTTP service that exposes them.

pub mod config;
pub mod errors;
pub mod llm_client;
pub mod routes;
pub mod scoring;
pub mod state;
