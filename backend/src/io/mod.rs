//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain. Currently only the REST
//! API in [`rest`].

pub mod rest;
