pub const ELLIPSIS: &str = "...";

/// Width budget for one article entry in the dropdown menu.
pub const MENU_LABEL_WIDTH: usize = 75;

/// Truncate `text` to at most `max_chars` characters, ending with `...` when cut.
///
/// Counts `char`s, not bytes, so emoji and non-ASCII titles never split mid-character.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let ellipsis_len = ELLIPSIS.chars().count();
    if max_chars <= ellipsis_len {
        return ELLIPSIS.chars().take(max_chars).collect();
    }

    let mut out: String = text.chars().take(max_chars - ellipsis_len).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Menu-bar title for the top article: `"{icon} [{score}] {title}"`, at most `max_len` chars.
pub fn format_bar_title(icon: &str, score: u32, title: &str, max_len: usize) -> String {
    truncate_with_ellipsis(&format!("{icon} [{score}] {title}"), max_len)
}

/// Dropdown label for the article at `rank` (1-based).
///
/// The budget shrinks with the score's digit count so high scores don't push
/// the title off the menu.
pub fn format_menu_label(rank: usize, score: u32, title: &str) -> String {
    let budget = MENU_LABEL_WIDTH.saturating_sub(score.to_string().len() + 4);
    truncate_with_ellipsis(&format!("{rank}. [{score}] {title}"), budget)
}
