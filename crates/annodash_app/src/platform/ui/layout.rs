use annodash_core::DashboardSettings;

use super::constants::*;

/// Static text shown at startup and on `help`.
pub fn help_lines(settings: &DashboardSettings) -> Vec<String> {
    let mut lines = vec![
        "Annotation upload dashboard".to_string(),
        String::new(),
        format!("  {CMD_RELOAD:<18} reload the task list"),
        format!("  {:<18} refresh the status of a running task", format!("{CMD_UPDATE} <row>")),
    ];
    if settings.delete_enabled {
        lines.push(format!(
            "  {:<18} delete a finished task (asks to confirm)",
            format!("{CMD_DELETE} <row>")
        ));
        lines.push(format!(
            "  {:<18} confirm or cancel a pending delete",
            format!("{CMD_CONFIRM} / {CMD_CANCEL}")
        ));
    }
    lines.extend([
        format!(
            "  {:<18} page through the task table ({} rows per page)",
            format!("{CMD_NEXT} / {CMD_PREV}"),
            settings.page_length
        ),
        format!("  {:<18} look up an abstract by identifier", format!("{CMD_SEARCH} <text>")),
        format!("  {CMD_ABSTRACTS:<18} list all known abstracts"),
        format!("  {CMD_DISMISS:<18} close the message banner"),
        format!("  {CMD_HELP:<18} show this help"),
        format!("  {CMD_QUIT:<18} exit"),
    ]);
    lines
}
