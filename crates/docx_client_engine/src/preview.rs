const TRUNCATED_MARKER: &str = "\n.[truncated]";
pub const MAX_PREVIEW_CONTENT: usize = 40_960;

/// Renders converted markup as readable terminal text.
pub fn prepare_preview(html: &str) -> String {
    let rendered = html2md::parse_html(html);
    let rendered = rendered.trim();
    if rendered.len() <= MAX_PREVIEW_CONTENT {
        rendered.to_string()
    } else {
        let mut end = MAX_PREVIEW_CONTENT;
        while end > 0 && !rendered.is_char_boundary(end) {
            end -= 1;
        }
        let truncated = &rendered[..end];
        format!("{truncated}{TRUNCATED_MARKER}")
    }
}
