use std::sync::Once;

use docx_client_core::{
    update, AppState, ConversionResult, DocumentMetadata, Effect, FileCandidate, Msg,
    RequestState, Tab, Timer, NOT_SPECIFIED,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn with_selection() -> AppState {
    let candidate = FileCandidate::new("lesson.docx", 4096, "/tmp/lesson.docx");
    let (state, _) = update(AppState::new(), Msg::FilePicked(Some(candidate)));
    state
}

fn sample_result() -> ConversionResult {
    ConversionResult {
        markup: "<p>Hi</p>".to_string(),
        metadata: DocumentMetadata {
            content_type: Some("article".to_string()),
            ..DocumentMetadata::default()
        },
        warnings: vec!["Fix alt text".to_string()],
    }
}

#[test]
fn convert_without_selection_is_noop() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::ConvertClicked);
    assert!(effects.is_empty());
    assert_eq!(state.request_state(), RequestState::Idle);
    assert!(!state.consume_dirty());
}

#[test]
fn convert_emits_single_upload_and_goes_busy() {
    init_logging();
    let (state, effects) = update(with_selection(), Msg::ConvertClicked);
    let view = state.view();

    assert_eq!(state.request_state(), RequestState::InFlight);
    assert!(view.busy);
    assert!(!view.convert_enabled);
    match effects.as_slice() {
        [Effect::UploadForConversion { file }] => assert_eq!(file.name(), "lesson.docx"),
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn repeated_triggers_never_start_a_second_request() {
    init_logging();
    let (mut state, first) = update(with_selection(), Msg::ConvertClicked);
    assert_eq!(first.len(), 1);

    for _ in 0..10 {
        let (next, effects) = update(state, Msg::ConvertClicked);
        assert!(effects.is_empty());
        assert_eq!(next.request_state(), RequestState::InFlight);
        state = next;
    }
}

#[test]
fn selection_during_flight_keeps_trigger_disabled() {
    init_logging();
    let (state, _) = update(with_selection(), Msg::ConvertClicked);
    let other = FileCandidate::new("other.docx", 1, "/tmp/other.docx");
    let (state, _) = update(state, Msg::FilePicked(Some(other)));

    assert_eq!(state.selected_file().map(|f| f.name()), Some("other.docx"));
    assert!(!state.view().convert_enabled);
}

#[test]
fn success_presents_all_views_and_returns_to_idle() {
    init_logging();
    let (state, _) = update(with_selection(), Msg::ConvertClicked);
    let (state, _) = update(state, Msg::TabSelected(Tab::Metadata));
    let (state, effects) = update(state, Msg::ConversionFinished(Ok(sample_result())));
    let view = state.view();

    assert_eq!(state.request_state(), RequestState::Idle);
    assert!(view.convert_enabled);
    assert!(!view.busy);
    assert_eq!(
        effects,
        vec![
            Effect::RevealResults,
            Effect::HighlightMarkup {
                markup: "<p>Hi</p>".to_string()
            },
        ]
    );

    let results = view.results.expect("results visible");
    assert_eq!(results.markup, "<p>Hi</p>");
    assert_eq!(results.preview_html, "<p>Hi</p>");
    assert_eq!(results.active_tab, Tab::Markup);
    let active: Vec<_> = results.tabs.iter().filter(|t| t.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].tab, Tab::Markup);

    let metadata = results.metadata;
    let values: Vec<_> = metadata
        .content
        .iter()
        .map(|f| (f.label, f.value.as_str()))
        .collect();
    assert_eq!(
        values,
        vec![
            ("Title", NOT_SPECIFIED),
            ("Type", "article"),
            ("Description", NOT_SPECIFIED),
        ]
    );
    assert!(metadata.seo.iter().all(|f| f.value == NOT_SPECIFIED));
    assert!(metadata.has_manual_actions());
    assert_eq!(metadata.warnings, vec!["Fix alt text".to_string()]);
}

#[test]
fn empty_strings_count_as_not_specified() {
    init_logging();
    let (state, _) = update(with_selection(), Msg::ConvertClicked);
    let result = ConversionResult {
        markup: "<p/>".to_string(),
        metadata: DocumentMetadata {
            title: Some(String::new()),
            content_type: Some("article".to_string()),
            description: Some("Short".to_string()),
            seo_title: Some(String::new()),
            seo_description: None,
        },
        warnings: Vec::new(),
    };
    let (state, _) = update(state, Msg::ConversionFinished(Ok(result)));
    let metadata = state.view().results.expect("results").metadata;

    assert_eq!(metadata.content[0].value, NOT_SPECIFIED);
    assert_eq!(metadata.content[2].value, "Short");
    assert_eq!(metadata.seo[0].value, NOT_SPECIFIED);
    assert!(!metadata.has_manual_actions());
}

#[test]
fn warnings_keep_service_order() {
    init_logging();
    let (state, _) = update(with_selection(), Msg::ConvertClicked);
    let warnings: Vec<String> = ["Upload image 3", "Add quiz", "Check links"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let result = ConversionResult {
        warnings: warnings.clone(),
        ..sample_result()
    };
    let (state, _) = update(state, Msg::ConversionFinished(Ok(result)));
    assert_eq!(state.view().results.expect("results").metadata.warnings, warnings);
}

#[test]
fn failure_shows_prefixed_notice_and_returns_to_idle() {
    init_logging();
    let (state, _) = update(with_selection(), Msg::ConvertClicked);
    let (state, effects) = update(
        state,
        Msg::ConversionFinished(Err("Unsupported format".to_string())),
    );
    let view = state.view();

    assert_eq!(state.request_state(), RequestState::Idle);
    assert!(view.convert_enabled);
    assert!(view.results.is_none());
    assert_eq!(
        view.notice.as_deref(),
        Some("Conversion failed: Unsupported format")
    );

    let timer = match effects.as_slice() {
        [Effect::ScheduleTimer { timer, .. }] => *timer,
        other => panic!("unexpected effects: {other:?}"),
    };
    let (state, _) = update(state, Msg::TimerElapsed(timer));
    assert!(state.view().notice.is_none());
}

#[test]
fn failure_keeps_previous_result_and_selection() {
    init_logging();
    let (state, _) = update(with_selection(), Msg::ConvertClicked);
    let (state, _) = update(state, Msg::ConversionFinished(Ok(sample_result())));
    let (state, _) = update(state, Msg::ConvertClicked);
    let (state, _) = update(state, Msg::ConversionFinished(Err("boom".to_string())));

    assert_eq!(state.result(), Some(&sample_result()));
    assert_eq!(state.selected_file().map(|f| f.name()), Some("lesson.docx"));
    assert!(state.view().convert_enabled);
}

#[test]
fn new_success_replaces_result_wholesale() {
    init_logging();
    let (state, _) = update(with_selection(), Msg::ConvertClicked);
    let (state, _) = update(state, Msg::ConversionFinished(Ok(sample_result())));
    let (state, _) = update(state, Msg::ConvertClicked);
    let second = ConversionResult {
        markup: "<h2>Two</h2>".to_string(),
        ..ConversionResult::default()
    };
    let (state, _) = update(state, Msg::ConversionFinished(Ok(second.clone())));

    assert_eq!(state.result(), Some(&second));
    assert!(!state.view().results.expect("results").metadata.has_manual_actions());
}

#[test]
fn stray_outcome_while_idle_is_ignored() {
    init_logging();
    let state = with_selection();
    let (next, effects) = update(state.clone(), Msg::ConversionFinished(Ok(sample_result())));
    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn tab_switch_only_moves_active_marker() {
    init_logging();
    let (state, _) = update(with_selection(), Msg::ConvertClicked);
    let (state, _) = update(state, Msg::ConversionFinished(Ok(sample_result())));

    for tab in [Tab::Preview, Tab::Metadata, Tab::Markup] {
        let (next, effects) = update(state.clone(), Msg::TabSelected(tab));
        assert!(effects.is_empty());
        assert_eq!(next.result(), state.result());
        let results = next.view().results.expect("results");
        assert_eq!(results.active_tab, tab);
        assert_eq!(results.tabs.iter().filter(|t| t.active).count(), 1);
    }
}

#[test]
fn tab_names_parse_with_aliases() {
    assert_eq!("html".parse::<Tab>(), Ok(Tab::Markup));
    assert_eq!("Preview".parse::<Tab>(), Ok(Tab::Preview));
    assert_eq!(" meta ".parse::<Tab>(), Ok(Tab::Metadata));
    assert!("source".parse::<Tab>().is_err());
}

#[test]
fn failure_notice_schedules_five_second_expiry() {
    init_logging();
    let (state, _) = update(with_selection(), Msg::ConvertClicked);
    let (_state, effects) = update(state, Msg::ConversionFinished(Err("x".to_string())));
    assert!(matches!(
        effects.as_slice(),
        [Effect::ScheduleTimer { timer: Timer::NoticeExpiry(_), after }]
            if after.as_secs() == 5
    ));
}
