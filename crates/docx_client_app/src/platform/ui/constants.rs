pub const TITLE: &str = "DOCX → HTML Converter";
pub const DROP_HINT: &str = "Drop a DOCX file here (drop <path>) or pick one (pick <path>)";
pub const DROP_HOVER: &str = "Release to drop the file";
pub const CONVERT_LABEL: &str = "Convert to HTML";
pub const BUSY_LABEL: &str = "⏳ Converting...";
pub const SELECTION_BEGIN: &str = "----- BEGIN HTML (select and copy) -----";
pub const SELECTION_END: &str = "----- END HTML -----";
pub const RULE_WIDTH: usize = 60;

pub const HELP: &str = "\
Commands:
  pick <path>            select a DOCX file
  drag | leave           highlight / un-highlight the drop target
  drop <path> [...]      drop files on the target (first one is used)
  convert                send the selected file to the conversion service
  tab <markup|preview|metadata>
                         switch result view
  copy                   copy the HTML to the clipboard
  help                   show this text
  quit                   leave";
