//! Integration tests for the bid recommendation engine.

mod helpers;
mod properties;
mod scenarios;
