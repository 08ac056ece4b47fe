//! Integration tests for the image sitemap pipeline

mod pipeline;
mod sitemap_file;
mod support;
