use console::style;
use docx_client_core::{AppViewModel, MetadataField, ResultsView, Tab};
use docx_client_engine::prepare_preview;

use super::constants::*;

/// Display state produced by effects rather than by the core model.
#[derive(Debug, Default)]
pub struct RenderCache {
    /// Highlighted copy of the current markup; replaced on every presentation.
    pub highlighted_markup: Option<String>,
    /// Results were just presented and should be brought into view.
    pub reveal: bool,
    /// Raw markup exposed for manual copying; shown once.
    pub selection: Option<String>,
}

/// Maps the view model to screen lines. Pure; re-run on every state change.
pub fn render(view: &AppViewModel, cache: &RenderCache) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(style(TITLE).bold().to_string());
    lines.push(rule());
    render_drop_zone(view, &mut lines);
    lines.push(render_convert_control(view));

    // The notice sits right after the upload area.
    if let Some(notice) = &view.notice {
        lines.push(style(format!("✖ {notice}")).red().bold().to_string());
    }

    if let Some(results) = &view.results {
        lines.push(String::new());
        render_results(results, view, cache, &mut lines);
    }

    if let Some(markup) = &cache.selection {
        lines.push(String::new());
        lines.push(SELECTION_BEGIN.to_string());
        lines.extend(markup.lines().map(str::to_owned));
        lines.push(SELECTION_END.to_string());
    }

    lines
}

fn render_drop_zone(view: &AppViewModel, lines: &mut Vec<String>) {
    let zone = &view.drop_zone;
    let marker = if zone.hover {
        style("▶").cyan().bold().to_string()
    } else {
        " ".to_string()
    };

    match &zone.file {
        Some(file) => {
            lines.push(format!("{marker} 📄 {}", style(&file.name).bold()));
            lines.push(format!("    {} • {}", file.size_label, file.type_label));
        }
        None if zone.hover => lines.push(format!("{marker} {}", style(DROP_HOVER).cyan())),
        None => lines.push(format!("{marker} {}", style(DROP_HINT).dim())),
    }
}

fn render_convert_control(view: &AppViewModel) -> String {
    if view.busy {
        format!("  [{}]", style(BUSY_LABEL).yellow())
    } else if view.convert_enabled {
        format!("  [{}]", style(CONVERT_LABEL).green().bold())
    } else {
        format!("  [{}]", style(CONVERT_LABEL).dim())
    }
}

fn render_results(
    results: &ResultsView,
    view: &AppViewModel,
    cache: &RenderCache,
    lines: &mut Vec<String>,
) {
    let tabs: Vec<String> = results
        .tabs
        .iter()
        .map(|tab| {
            if tab.active {
                style(format!("[{}]", tab.label)).reverse().to_string()
            } else {
                format!(" {} ", tab.label)
            }
        })
        .collect();
    lines.push(format!("{}    {}", tabs.join(" "), view.copy_label.text()));
    lines.push(rule());

    match results.active_tab {
        Tab::Markup => {
            let body = cache
                .highlighted_markup
                .as_deref()
                .unwrap_or(&results.markup);
            lines.extend(body.lines().map(str::to_owned));
        }
        Tab::Preview => {
            lines.extend(prepare_preview(&results.preview_html).lines().map(str::to_owned));
        }
        Tab::Metadata => {
            let metadata = &results.metadata;
            lines.push(style("Content Information").bold().to_string());
            push_fields(&metadata.content, lines);
            lines.push(style("SEO Information").bold().to_string());
            push_fields(&metadata.seo, lines);
            if metadata.has_manual_actions() {
                lines.push(String::new());
                lines.push(style("⚠️ Manual Actions Required").yellow().bold().to_string());
                for warning in &metadata.warnings {
                    lines.push(format!("  • {warning}"));
                }
            }
        }
    }
    lines.push(rule());
}

fn push_fields(fields: &[MetadataField], lines: &mut Vec<String>) {
    for field in fields {
        lines.push(format!("  {}: {}", style(field.label).bold(), field.value));
    }
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}
