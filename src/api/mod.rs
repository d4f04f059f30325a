//! HTTP surface

pub mod rest;

pub use rest::RestApi;
