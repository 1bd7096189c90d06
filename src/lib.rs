//! HR leave management: leave types, yearly allocations and leave requests
//! behind a validated command/query layer.

pub mod api;
pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod dispatcher;
pub mod docs;
pub mod dto;
pub mod error;
pub mod features;
pub mod mapping;
pub mod model;
pub mod models;
pub mod notification;
pub mod repository;
pub mod routes;
pub mod store;
pub mod validation;
