//! Report record types.

use std::fmt;

use serde::Serialize;

/// One reported interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceRecord {
    /// Interface name as reported by the OS.
    pub name: String,
    /// Link state.
    pub link_up: bool,
    /// Addresses in `address/prefix` form; empty when none.
    pub addresses: Vec<String>,
}

impl InterfaceRecord {
    /// Create a new record.
    pub fn new(name: impl Into<String>, link_up: bool, addresses: Vec<String>) -> Self {
        Self {
            name: name.into(),
            link_up,
            addresses,
        }
    }

    /// Get the link state as a displayable value.
    pub fn link_state(&self) -> LinkState {
        LinkState(self.link_up)
    }
}

/// Displays a link state as `up` or `down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkState(pub bool);

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "up" } else { "down" })
    }
}
