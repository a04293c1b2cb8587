//! Yew components for the hub shell.

pub(crate) mod nav_button;
pub(crate) mod search_input;
