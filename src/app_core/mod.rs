//! Shared application core: state and the event reducer.

pub mod reducer;
pub mod state;
