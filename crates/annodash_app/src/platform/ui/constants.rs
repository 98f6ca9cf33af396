pub const CMD_RELOAD: &str = "reload";
pub const CMD_UPDATE: &str = "update";
pub const CMD_DELETE: &str = "delete";
pub const CMD_CONFIRM: &str = "yes";
pub const CMD_CANCEL: &str = "no";
pub const CMD_NEXT: &str = "next";
pub const CMD_PREV: &str = "prev";
pub const CMD_SEARCH: &str = "search";
pub const CMD_ABSTRACTS: &str = "abstracts";
pub const CMD_DISMISS: &str = "dismiss";
pub const CMD_HELP: &str = "help";
pub const CMD_QUIT: &str = "quit";

pub const TASK_COLUMNS: [&str; 9] = [
    "#",
    "Project",
    "Date",
    "Submitted by",
    "Description",
    "Task ID",
    "Upload name",
    "Status",
    "Actions",
];

/// Cells wider than this are cut with an ellipsis.
pub const MAX_CELL_WIDTH: usize = 28;
pub const PROMPT: &str = "annodash> ";
