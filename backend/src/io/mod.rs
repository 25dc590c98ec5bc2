//! # IO Module
//!
//! Everything that talks to the outside world. Currently that is the REST
//! surface; the domain layer never imports from here.

pub mod rest;
