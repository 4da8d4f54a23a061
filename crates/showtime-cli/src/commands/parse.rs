use crate::output::Output;
use chrono::{Local, NaiveDateTime};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;
use showtime_core::resolve_showtime;
use showtime_models::ShowtimeRecord;

/// Returns whether the text could be read.
pub fn run_parse(text: &str, as_datetime: bool, now: Option<NaiveDateTime>, output: &Output) -> Result<bool> {
    let now = now.unwrap_or_else(|| Local::now().naive_local());

    let record = if as_datetime {
        ShowtimeRecord {
            raw_datetime: Some(text.to_string()),
            ..Default::default()
        }
    } else {
        ShowtimeRecord {
            raw_display_text: Some(text.to_string()),
            ..Default::default()
        }
    };

    let Some(resolution) = resolve_showtime(&record, now) else {
        output.error(format!("Could not read a date or time from {:?}", text));
        return Ok(false);
    };
    let fields = resolution.fields(now);

    if output.is_human() {
        if output.is_quiet() {
            return Ok(true);
        }
        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("Input").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(text),
        ]);
        table.add_row(vec![Cell::new("Strategy"), Cell::new(resolution.strategy.to_string())]);
        table.add_row(vec![Cell::new("normalized_datetime"), Cell::new(&fields.datetime)]);
        table.add_row(vec![Cell::new("normalized_date"), Cell::new(&fields.date)]);
        table.add_row(vec![Cell::new("normalized_time"), Cell::new(&fields.time)]);
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        println!("{}", table);
    } else {
        output.json(&json!({
            "input": text,
            "strategy": resolution.strategy.to_string(),
            "normalized_datetime": fields.datetime,
            "normalized_date": fields.date,
            "normalized_time": fields.time,
        }));
    }

    Ok(true)
}
