use crate::{format_file_size, AppState, ConversionResult, CopyLabel, DocumentMetadata, Tab};

pub const NOT_SPECIFIED: &str = "Not specified";
const DEFAULT_TYPE_LABEL: &str = "DOCX document";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub drop_zone: DropZoneView,
    pub convert_enabled: bool,
    pub busy: bool,
    pub notice: Option<String>,
    pub results: Option<ResultsView>,
    pub copy_label: CopyLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropZoneView {
    pub hover: bool,
    pub file: Option<FileSummaryView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummaryView {
    pub name: String,
    pub size_label: String,
    pub type_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub tabs: Vec<TabView>,
    pub active_tab: Tab,
    pub markup: String,
    pub preview_html: String,
    pub metadata: MetadataView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub tab: Tab,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataView {
    pub content: Vec<MetadataField>,
    pub seo: Vec<MetadataField>,
    /// Rendered as a "manual actions required" block only when non-empty.
    pub warnings: Vec<String>,
}

impl MetadataView {
    pub fn has_manual_actions(&self) -> bool {
        !self.warnings.is_empty()
    }
}

pub(crate) fn build(state: &AppState) -> AppViewModel {
    let file = state.selected_file().map(|file| FileSummaryView {
        name: file.name().to_string(),
        size_label: format_file_size(file.size()),
        type_label: file
            .content_type()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_TYPE_LABEL)
            .to_string(),
    });

    AppViewModel {
        drop_zone: DropZoneView {
            hover: state.drop_hover(),
            file,
        },
        convert_enabled: state.can_convert(),
        busy: state.request_state() == crate::RequestState::InFlight,
        notice: state.notice().map(|notice| notice.message.clone()),
        results: state
            .result()
            .map(|result| build_results(result, state.active_tab())),
        copy_label: state.copy_label(),
    }
}

fn build_results(result: &ConversionResult, active_tab: Tab) -> ResultsView {
    let tabs = Tab::ALL
        .iter()
        .map(|&tab| TabView {
            tab,
            label: tab.label(),
            active: tab == active_tab,
        })
        .collect();

    ResultsView {
        tabs,
        active_tab,
        markup: result.markup.clone(),
        preview_html: result.markup.clone(),
        metadata: build_metadata(&result.metadata, &result.warnings),
    }
}

fn build_metadata(metadata: &DocumentMetadata, warnings: &[String]) -> MetadataView {
    MetadataView {
        content: vec![
            field("Title", &metadata.title),
            field("Type", &metadata.content_type),
            field("Description", &metadata.description),
        ],
        seo: vec![
            field("SEO Title", &metadata.seo_title),
            field("SEO Description", &metadata.seo_description),
        ],
        warnings: warnings.to_vec(),
    }
}

fn field(label: &'static str, value: &Option<String>) -> MetadataField {
    let value = value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_SPECIFIED)
        .to_string();
    MetadataField { label, value }
}
