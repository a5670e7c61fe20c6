use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};
use thiserror::Error;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const RESET: &str = "\x1b[0m";
/// Lines longer than this are passed through undecorated.
const MAX_LINE_LENGTH: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    #[error("unknown highlight theme '{0}'")]
    UnknownTheme(String),
}

pub trait Highlighter: Send + Sync {
    fn highlight(&self, markup: &str) -> String;
}

/// Leaves markup untouched; used when colour output is off.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, markup: &str) -> String {
        markup.to_string()
    }
}

/// HTML highlighting to 24-bit terminal escapes.
#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    theme: String,
}

impl SyntectHighlighter {
    pub const DEFAULT_THEME: &'static str = "base16-ocean.dark";

    pub fn new(theme: &str) -> Result<Self, HighlightError> {
        if !THEME_SET.themes.contains_key(theme) {
            return Err(HighlightError::UnknownTheme(theme.to_string()));
        }
        Ok(Self {
            theme: theme.to_string(),
        })
    }

    pub fn available_themes() -> Vec<String> {
        THEME_SET.themes.keys().cloned().collect()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, markup: &str) -> String {
        let Some(theme) = THEME_SET.themes.get(&self.theme) else {
            return markup.to_string();
        };
        let syntax = SYNTAX_SET
            .find_syntax_by_extension("html")
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut out = String::with_capacity(markup.len() * 2);
        for line in LinesWithEndings::from(markup) {
            if line.len() > MAX_LINE_LENGTH {
                out.push_str(line);
                continue;
            }
            match highlighter.highlight_line(line, &SYNTAX_SET) {
                Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges[..], false)),
                Err(_) => out.push_str(line),
            }
        }
        out.push_str(RESET);
        out
    }
}
