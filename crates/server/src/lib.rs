//! Vendstock Server - GraphQL API for vendor/inventory management.
//!
//! # Architecture
//!
//! - Axum transport serving a single `/graphql` endpoint (async-graphql)
//! - JWT bearer authentication resolved once per request into the GraphQL
//!   context; resolvers enforce authorization, not the transport layer
//! - A [`store::Store`] trait as the persistence gateway port, with an
//!   in-memory document store as the in-tree implementation
//! - Services (catalog, client registry, order workflow) holding the
//!   business rules: ownership scoping, email uniqueness, stock reservation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod state;
pub mod store;
