//! Input binding layer: turns typed commands into core messages.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use docx_client_core::{
    AppViewModel, FileCandidate, Msg, Tab, ACCEPTED_EXTENSION, DOCX_CONTENT_TYPE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pick(PathBuf),
    Drag,
    Leave,
    Drop(Vec<PathBuf>),
    Convert,
    Tab(Tab),
    Copy,
    Help,
    Quit,
}

/// Outcome of binding a command against the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Dispatch(Msg),
    /// Dispatches, then shows a hint about input that could not be used.
    DispatchWithHint(Msg, String),
    /// The control is not available; nothing is dispatched.
    Rejected(String),
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let args = split_args(line)?;
    let Some((head, rest)) = args.split_first() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "pick" | "open" => match rest {
            [path] => Command::Pick(PathBuf::from(path)),
            _ => return Err("usage: pick <path>".to_string()),
        },
        "drag" => Command::Drag,
        "leave" => Command::Leave,
        "drop" => Command::Drop(rest.iter().map(PathBuf::from).collect()),
        "convert" => Command::Convert,
        "tab" => match rest {
            [name] => Command::Tab(name.parse()?),
            _ => return Err("usage: tab markup|preview|metadata".to_string()),
        },
        "copy" => Command::Copy,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (type 'help')")),
    };
    Ok(Some(command))
}

pub fn bind(command: Command, view: &AppViewModel) -> Binding {
    match command {
        Command::Pick(path) => match candidate_from_path(&path) {
            Ok(candidate) => Binding::Dispatch(Msg::FilePicked(Some(candidate))),
            Err(err) => Binding::Rejected(cannot_open(&path, &err)),
        },
        Command::Drag => Binding::Dispatch(Msg::DragEntered),
        Command::Leave => Binding::Dispatch(Msg::DragLeft),
        Command::Drop(paths) => {
            let mut candidates = Vec::new();
            let mut first_error = None;
            for path in &paths {
                match candidate_from_path(path) {
                    Ok(candidate) => candidates.push(candidate),
                    Err(err) => {
                        first_error.get_or_insert_with(|| cannot_open(path, &err));
                    }
                }
            }
            let hint = if candidates.is_empty() {
                first_error
            } else {
                None
            };
            // The drop is dispatched even when nothing was usable so the hover ends.
            let msg = Msg::FilesDropped(candidates);
            match hint {
                Some(hint) => Binding::DispatchWithHint(msg, hint),
                None => Binding::Dispatch(msg),
            }
        }
        Command::Convert if view.busy => {
            Binding::Rejected("A conversion is already running.".to_string())
        }
        Command::Convert if !view.convert_enabled => {
            Binding::Rejected("Select a DOCX file first.".to_string())
        }
        Command::Convert => Binding::Dispatch(Msg::ConvertClicked),
        Command::Tab(tab) => Binding::Dispatch(Msg::TabSelected(tab)),
        Command::Copy => Binding::Dispatch(Msg::CopyClicked),
        Command::Help => Binding::Help,
        Command::Quit => Binding::Quit,
    }
}

fn cannot_open(path: &Path, err: &io::Error) -> String {
    format!("Cannot open {}: {err}", path.display())
}

/// Builds a file handle from filesystem metadata.
pub fn candidate_from_path(path: &Path) -> io::Result<FileCandidate> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a file"));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let candidate = FileCandidate::new(name.clone(), metadata.len(), path);
    if name.to_lowercase().ends_with(ACCEPTED_EXTENSION) {
        Ok(candidate.with_content_type(DOCX_CONTENT_TYPE))
    } else {
        Ok(candidate)
    }
}

/// Whitespace-separated arguments; double quotes group words containing spaces.
fn split_args(line: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use docx_client_core::{update, AppState};

    use super::*;

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("convert"), Ok(Some(Command::Convert)));
        assert_eq!(parse_command("TAB html"), Ok(Some(Command::Tab(Tab::Markup))));
        assert_eq!(parse_command("tab meta"), Ok(Some(Command::Tab(Tab::Metadata))));
        assert_eq!(parse_command("exit"), Ok(Some(Command::Quit)));
        assert_eq!(
            parse_command(r#"pick "my lessons/intro.docx""#),
            Ok(Some(Command::Pick(PathBuf::from("my lessons/intro.docx"))))
        );
        assert_eq!(
            parse_command("drop a.docx b.docx"),
            Ok(Some(Command::Drop(vec![
                PathBuf::from("a.docx"),
                PathBuf::from("b.docx")
            ])))
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_command("tab source").is_err());
        assert!(parse_command("tab").is_err());
        assert!(parse_command("pick").is_err());
        assert!(parse_command("pick \"open").is_err());
        assert!(parse_command("upload x").is_err());
    }

    #[test]
    fn convert_is_rejected_while_disabled() {
        let view = AppState::new().view();
        assert!(matches!(bind(Command::Convert, &view), Binding::Rejected(_)));
    }

    #[test]
    fn convert_is_rejected_while_busy() {
        let mut file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        file.write_all(b"PK").unwrap();
        let candidate = candidate_from_path(file.path()).unwrap();
        let (state, _) = update(AppState::new(), Msg::FilePicked(Some(candidate)));
        assert_eq!(
            bind(Command::Convert, &state.view()),
            Binding::Dispatch(Msg::ConvertClicked)
        );

        let (state, _) = update(state, Msg::ConvertClicked);
        assert_eq!(
            bind(Command::Convert, &state.view()),
            Binding::Rejected("A conversion is already running.".to_string())
        );
    }

    #[test]
    fn candidate_reads_size_and_type_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".DOCX").tempfile().unwrap();
        file.write_all(&[0u8; 1536]).unwrap();
        file.flush().unwrap();

        let candidate = candidate_from_path(file.path()).unwrap();
        assert_eq!(candidate.size, 1536);
        assert_eq!(candidate.content_type.as_deref(), Some(DOCX_CONTENT_TYPE));
        assert!(candidate.name.ends_with(".DOCX"));
    }

    #[test]
    fn other_files_carry_no_content_type() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let candidate = candidate_from_path(file.path()).unwrap();
        assert_eq!(candidate.content_type, None);
    }

    #[test]
    fn missing_path_is_rejected_before_dispatch() {
        let view = AppState::new().view();
        let binding = bind(Command::Pick(PathBuf::from("/no/such/file.docx")), &view);
        assert!(matches!(binding, Binding::Rejected(msg) if msg.starts_with("Cannot open")));
    }

    #[test]
    fn drop_skips_unreadable_paths() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let view = AppState::new().view();
        let binding = bind(
            Command::Drop(vec![PathBuf::from("/no/such.docx"), file.path().to_path_buf()]),
            &view,
        );
        match binding {
            Binding::Dispatch(Msg::FilesDropped(candidates)) => assert_eq!(candidates.len(), 1),
            other => panic!("unexpected binding: {other:?}"),
        }
    }

    #[test]
    fn drop_with_no_readable_path_explains_why() {
        let view = AppState::new().view();
        let binding = bind(
            Command::Drop(vec![
                PathBuf::from("/no/such.docx"),
                PathBuf::from("/no/other.docx"),
            ]),
            &view,
        );
        match binding {
            Binding::DispatchWithHint(Msg::FilesDropped(candidates), hint) => {
                assert!(candidates.is_empty());
                assert!(hint.starts_with("Cannot open /no/such.docx"));
            }
            other => panic!("unexpected binding: {other:?}"),
        }
    }

    #[test]
    fn empty_drop_needs_no_hint() {
        let view = AppState::new().view();
        assert_eq!(
            bind(Command::Drop(Vec::new()), &view),
            Binding::Dispatch(Msg::FilesDropped(Vec::new()))
        );
    }
}
