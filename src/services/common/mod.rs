//! Common utilities and abstractions for services

// Service macros
#[macro_use]
mod macros;
