//! Stepwise turns "how to" answers from a language model into checklists.
//!
//! A question goes to the model through a [`gateway::Gateway`]; the free-form
//! answer is read by [`parser::parse_response`] into ordered [`models::Task`]s
//! with checkable [`models::Subtask`]s. The [`api`] module serves that state to
//! a UI, and [`render`] draws it for the terminal.

pub mod api;
pub mod config;
pub mod gateway;
pub mod models;
pub mod parser;
pub mod render;
pub mod service;
pub mod store;
