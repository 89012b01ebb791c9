use std::io::Write;
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate};

use super::EventFields;
use crate::models::hour_slot::HourSlot;
use crate::models::settings::Settings;
use crate::services::day_grid::{render_text, DayGrid};
use crate::services::day_loader::DayLoader;
use crate::services::event_form::EventForm;
use crate::services::events_api::{EventRepository, RepositoryError};
use crate::services::placement::PlacementConfig;
use crate::services::refresh::RefreshSchedule;
use crate::utils::date::parse_local_datetime;

pub fn run_day(
    repository: Arc<dyn EventRepository>,
    settings: &Settings,
    date: NaiveDate,
    from_now: bool,
    now: DateTime<Local>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut loader = DayLoader::new(repository);
    loader.request(date);
    render_loaded_day(&mut loader, settings, date, from_now, now, out)
}

pub(super) fn watch_day(
    repository: Arc<dyn EventRepository>,
    settings: &Settings,
    date: NaiveDate,
    from_now: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let mut loader = DayLoader::new(repository);
    let mut schedule = RefreshSchedule::from_secs(settings.grid.refresh_interval_secs);

    loop {
        let now = Local::now();
        if schedule.tick_at(now) {
            loader.request(date);
            if let Err(err) = render_loaded_day(&mut loader, settings, date, from_now, now, out) {
                // Keep watching through transient failures.
                log::warn!("Refresh failed: {:#}", err);
                writeln!(out, "refresh failed: {:#}", err)?;
            }
            out.flush()?;
        }
        thread::sleep(schedule.next_due_in(Local::now()));
    }
}

fn render_loaded_day(
    loader: &mut DayLoader,
    settings: &Settings,
    date: NaiveDate,
    from_now: bool,
    now: DateTime<Local>,
    out: &mut dyn Write,
) -> Result<()> {
    let load = loader
        .wait()
        .ok_or_else(|| anyhow!("no fetch outstanding for {}", date))?;
    let events = load
        .result
        .with_context(|| format!("failed to load events for {}", date))?;

    let grid = DayGrid::build(&events, date, now, PlacementConfig::from(&settings.grid));
    let first = from_now.then(|| HourSlot::containing(&now));
    write!(out, "{}", render_text(&grid, first))?;
    Ok(())
}

/// Apply command-line overrides on top of a form.
pub fn apply_fields(form: &mut EventForm, fields: &EventFields) -> Result<()> {
    if let Some(name) = &fields.name {
        form.name = name.clone();
    }
    if let Some(start) = &fields.start {
        let start = parse_local_datetime(start).map_err(|e| anyhow!(e))?;
        // Moving the start keeps the duration unless an end is given too.
        let duration = form.end - form.start;
        form.start = start;
        form.end = start + duration;
    }
    if let Some(end) = &fields.end {
        form.end = parse_local_datetime(end).map_err(|e| anyhow!(e))?;
    }
    if let Some(location) = &fields.location {
        form.location = location.clone();
    }
    if let Some(description) = &fields.description {
        form.description = description.clone();
    }
    if let Some(color) = &fields.color {
        form.color = color.clone();
    }
    if let Some(recurrence) = &fields.recurrence {
        form.recurrence = recurrence.clone();
    }
    Ok(())
}

pub fn run_create(
    repository: &dyn EventRepository,
    settings: &Settings,
    fields: &EventFields,
    now: DateTime<Local>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut form = EventForm::new_at(now, settings.api.user_id);
    apply_fields(&mut form, fields)?;

    let event = form
        .submit_create(repository)
        .context("failed to create event")?;
    writeln!(
        out,
        "Created event {} '{}' ({} - {})",
        event.id.unwrap_or_default(),
        event.name,
        event.start.format("%Y-%m-%d %H:%M"),
        event.end.format("%H:%M")
    )?;
    Ok(())
}

pub fn run_edit(
    repository: &dyn EventRepository,
    settings: &Settings,
    id: i64,
    date: NaiveDate,
    fields: &EventFields,
    out: &mut dyn Write,
) -> Result<()> {
    let events = repository
        .list_by_date(date)
        .with_context(|| format!("failed to load events for {}", date))?;
    let existing = events
        .iter()
        .find(|event| event.id == Some(id))
        .ok_or_else(|| RepositoryError::NotFound(format!("event {} on {}", id, date)))?;

    let mut form = EventForm::from_event(existing, settings.api.user_id);
    apply_fields(&mut form, fields)?;

    let event = form
        .submit_update(repository, id)
        .with_context(|| format!("failed to update event {}", id))?;
    writeln!(out, "Updated event {} '{}'", id, event.name)?;
    Ok(())
}

pub fn run_delete(repository: &dyn EventRepository, id: i64, out: &mut dyn Write) -> Result<()> {
    repository
        .delete(id)
        .with_context(|| format!("failed to delete event {}", id))?;
    writeln!(out, "Deleted event {}", id)?;
    Ok(())
}

pub fn run_whoami(
    repository: &dyn EventRepository,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<()> {
    let user = repository
        .get_user(settings.api.user_id)
        .context("failed to fetch user")?;
    writeln!(out, "{} <{}> (id {})", user.display_name(), user.email, user.id)?;
    Ok(())
}
