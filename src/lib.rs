//! Imagemap: Batch Image Sitemap Generation
//!
//! Walks a graph of typed content entities to collect embedded media
//! references and serializes the result into an image sitemap file.

pub mod batch;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod metafields;
pub mod schema;
pub mod sitemap;
pub mod store;
pub mod traverse;
