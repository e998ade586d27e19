//! # JPL Horizons remote queries
//!
//! This module talks to the JPL Horizons API over HTTP. One independent
//! query is issued per body; the response is a JSON envelope around a
//! semi-structured text payload whose data block sits between the literal
//! `$$SOE` / `$$EOE` markers.
//!
//! The acquisition policy (timeout racing, fallback) lives one level up in
//! [`crate::ephemeris`]; this module only knows how to fetch and parse a
//! single body's osculating elements.

pub mod elements_query;
