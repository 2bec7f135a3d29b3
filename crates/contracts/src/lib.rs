//! Shared DTOs between the dashboard (frontend) and the instance API (backend).

pub mod api;
pub mod instance;
pub mod shared;
pub mod system;
