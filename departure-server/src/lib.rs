//! Departure server.
//!
//! A small JSON API over Danish public transit data: stops near a position,
//! stop search by name, and departure boards. Answers come from the
//! Rejseplanen XML interface and are reshaped into typed stations and
//! departures.

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod library;
pub mod provider;
pub mod web;
