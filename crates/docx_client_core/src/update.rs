use client_logging::{client_debug, client_warn};

use crate::{
    AppState, ClientError, ConversionResult, CopyLabel, Effect, FileCandidate, Msg, RequestState,
    SelectedFile,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilePicked(candidate) => match candidate {
            Some(candidate) => select_candidate(&mut state, candidate),
            None => Vec::new(),
        },
        Msg::DragEntered => {
            state.set_drop_hover(true);
            Vec::new()
        }
        Msg::DragLeft => {
            state.set_drop_hover(false);
            Vec::new()
        }
        Msg::FilesDropped(files) => {
            state.set_drop_hover(false);
            match files.into_iter().next() {
                Some(candidate) => select_candidate(&mut state, candidate),
                None => Vec::new(),
            }
        }
        Msg::ConvertClicked => match state.begin_conversion() {
            Some(file) => vec![Effect::UploadForConversion { file }],
            None => {
                client_debug!("Convert ignored: trigger disabled");
                Vec::new()
            }
        },
        Msg::ConversionFinished(outcome) => {
            if state.request_state() != RequestState::InFlight {
                client_warn!("Dropping conversion outcome with no request in flight");
                return (state, Vec::new());
            }
            // The result is fully presented before the request returns to Idle.
            let effects = match outcome {
                Ok(result) => present(&mut state, result),
                Err(reason) => vec![state.show_error(ClientError::Conversion { reason })],
            };
            state.finish_conversion();
            effects
        }
        Msg::TabSelected(tab) => {
            state.switch_tab(tab);
            Vec::new()
        }
        Msg::CopyClicked => match state.result() {
            Some(result) if !result.markup.is_empty() => vec![Effect::WriteClipboard {
                text: result.markup.clone(),
            }],
            _ => Vec::new(),
        },
        Msg::ClipboardWriteFinished(Ok(())) => vec![state.set_copy_feedback(CopyLabel::Copied)],
        Msg::ClipboardWriteFinished(Err(reason)) => {
            client_warn!("Failed to copy to clipboard: {}", ClientError::Clipboard(reason));
            let markup = state
                .result()
                .map(|result| result.markup.clone())
                .unwrap_or_default();
            vec![
                Effect::SelectMarkupText { markup },
                state.set_copy_feedback(CopyLabel::TextSelected),
            ]
        }
        Msg::TimerElapsed(timer) => {
            state.expire(timer);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn select_candidate(state: &mut AppState, candidate: FileCandidate) -> Vec<Effect> {
    match SelectedFile::validate(candidate) {
        Ok(file) => {
            state.select(file);
            Vec::new()
        }
        Err(err) => vec![state.show_error(err)],
    }
}

fn present(state: &mut AppState, result: ConversionResult) -> Vec<Effect> {
    let markup = result.markup.clone();
    state.present(result);
    vec![Effect::RevealResults, Effect::HighlightMarkup { markup }]
}
