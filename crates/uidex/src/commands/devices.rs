//! Device command handlers.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;
use tabled::builder::Builder;
use tabled::settings::Style;
use uidex_core::{
    Catalog, DeviceDetail, DeviceRecord, EmptyState, FilteredView, GRID_THUMBNAIL_SIZE, HeroImage,
    QueryState, ViewMode, placeholder_glyph,
};

use crate::cli::{DevicesArgs, DevicesCommand, ListArgs, OutputFormat};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

/// Cards per row in grid layout.
const GRID_COLUMNS: usize = 3;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Product Line")]
    line: String,
}

impl From<&Arc<DeviceRecord>> for DeviceRow {
    fn from(d: &Arc<DeviceRecord>) -> Self {
        Self {
            id: d.id().unwrap_or("-").to_owned(),
            name: d.product_name().to_owned(),
            line: d.line_name().to_owned(),
        }
    }
}

fn card(d: &DeviceRecord) -> String {
    [
        format!("[{}] {}", placeholder_glyph(d), d.product_name()),
        d.card_caption().to_owned(),
        d.line_name().to_owned(),
        d.id().unwrap_or("-").to_owned(),
    ]
    .join("\n")
}

fn render_grid(devices: &[Arc<DeviceRecord>]) -> String {
    let mut builder = Builder::default();
    for chunk in devices.chunks(GRID_COLUMNS) {
        let mut record: Vec<String> = chunk.iter().map(|d| card(d)).collect();
        record.resize(GRID_COLUMNS, String::new());
        builder.push_record(record);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// The human-readable message for an empty result, if any.
pub fn empty_message(view: &FilteredView) -> Option<&'static str> {
    view.empty_state().map(EmptyState::message)
}

// ── Detail ──────────────────────────────────────────────────────────

/// Structured detail output: the projection plus the untouched record.
#[derive(Serialize)]
struct DetailOutput<'a> {
    #[serde(flatten)]
    detail: &'a DeviceDetail,
    record: &'a Value,
}

fn detail_text(d: &DetailOutput<'_>, color: bool) -> String {
    let detail = d.detail;
    let mut lines = vec![
        output::accent(&detail.product_name, color),
        detail.line_name.clone(),
        String::new(),
    ];
    let image = match &detail.hero {
        HeroImage::Url(url) => output::link(url, color),
        HeroImage::Placeholder(glyph) => format!("[{glyph}]"),
    };
    lines.push(format!("{:<17}{image}", "Image:"));
    for row in &detail.specs {
        let label = format!("{}:", row.label);
        lines.push(format!("{label:<17}{}", row.value));
    }
    lines.join("\n")
}

/// Structured thumbnail output.
#[derive(Serialize)]
struct ThumbnailOutput<'a> {
    id: &'a str,
    size: u32,
    url: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(catalog: &Catalog, args: DevicesArgs, settings: &Settings) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List(list) => list_devices(catalog, list, settings),

        DevicesCommand::Get { id, raw } => {
            let device = catalog.get(&id)?;
            let detail = DeviceDetail::new(
                device,
                &settings.catalog.images,
                settings.catalog.hero_image_size,
            );

            if raw {
                output::print_output(&detail.raw_json, settings.quiet);
                return Ok(());
            }

            let color = output::should_color(settings.color);
            let out = output::render_single(
                settings.output,
                &DetailOutput {
                    detail: &detail,
                    record: device.raw(),
                },
                |d| detail_text(d, color),
                |_| id.clone(),
            )?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        DevicesCommand::Thumbnail {
            id,
            size,
            hero,
            grid,
        } => {
            let device = catalog.get(&id)?;
            let size = match (size, hero, grid) {
                (Some(size), ..) => size,
                (None, true, _) => settings.catalog.hero_image_size,
                (None, false, true) => GRID_THUMBNAIL_SIZE,
                (None, false, false) => settings.catalog.thumbnail_size,
            };
            if size == 0 {
                return Err(CliError::Validation {
                    field: "size".into(),
                    reason: "must be at least 1".into(),
                });
            }

            let url = settings
                .catalog
                .images
                .thumbnail_url(device, size)
                .ok_or_else(|| CliError::NoImage {
                    identifier: id.clone(),
                    glyph: placeholder_glyph(device),
                })?;

            let out = output::render_single(
                settings.output,
                &ThumbnailOutput {
                    id: &id,
                    size,
                    url,
                },
                |t| t.url.clone(),
                |t| t.url.clone(),
            )?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }
    }
}

fn list_devices(catalog: &Catalog, list: ListArgs, settings: &Settings) -> Result<(), CliError> {
    let state = QueryState::new()
        .with_search(list.search.unwrap_or_default())
        .with_lines(list.lines)
        .with_view(list.view.map_or(settings.view, ViewMode::from));

    for line in state.lines.iter() {
        if !catalog.line_options().iter().any(|o| o.id == line) {
            tracing::warn!(line, "unknown product line id; run `uidex lines` to list them");
        }
    }

    let view = catalog.filter(&state);
    tracing::debug!(
        search = %state.search,
        matched = view.filtered_count(),
        total = view.total_count,
        "filtered devices"
    );

    if settings.output != OutputFormat::Table {
        let out = output::render_list(
            settings.output,
            &view.devices,
            |d| DeviceRow::from(d),
            |d| d.id().unwrap_or("-").to_owned(),
        )?;
        output::print_output(&out, settings.quiet);
        return Ok(());
    }

    let color = output::should_color(settings.color);
    let body = if let Some(message) = empty_message(&view) {
        output::notice(message, color)
    } else if state.view == ViewMode::Grid {
        render_grid(&view.devices)
    } else {
        let rows: Vec<DeviceRow> = view.devices.iter().map(DeviceRow::from).collect();
        output::render_table(&rows)
    };

    let out = format!("{}\n{body}", output::accent(&view.count_label(), color));
    output::print_output(&out, settings.quiet);
    Ok(())
}
