// Service module exports

pub mod day_grid;
pub mod day_loader;
pub mod event_form;
pub mod events_api;
pub mod placement;
pub mod refresh;
pub mod settings;
