// Module exports for models

pub mod event;
pub mod hour_slot;
pub mod settings;
pub mod user;
