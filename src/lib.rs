//! Weather Watch - current conditions dashboard for the terminal
//!
//! The binary wires these modules into a tui-dispatch runtime; the library
//! exposes them for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod reducer;
pub mod state;
