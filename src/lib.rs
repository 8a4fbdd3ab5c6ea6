//! lang-portal - Backend for a vocabulary-learning portal
//!
//! This library provides study activities and study sessions over a SQLite
//! database, exposed as a JSON HTTP API.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
