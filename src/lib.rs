//! pixstyle: a terminal gallery of photo style presets with account
//! registration.
//!
//! The framework-independent pieces (catalog, pagination, grid selection,
//! registration state machine, navigation) are plain modules usable without
//! a terminal; [`tui`] wires them into a tui-realm application.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod gallery;
pub mod listing;
pub mod logging;
pub mod navigation;
pub mod pagination;
pub mod registration;
pub mod theme;
pub mod tui;
