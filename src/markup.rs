//! Markup-aware content measurement and span construction
//!
//! Item and master labels may carry inline caret markup: `^r`/`^g`/`^b`/
//! `^y`/`^m`/`^c`/`^w`/`^k` pick a foreground color, `^+` bold, `^-` dim,
//! `^_` underline, `^:` resets to the base style, and `^^` is a literal
//! caret. Widths are always measured on the visible text only, so markup
//! never skews label fitting or column math.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Rendered display width of a content string.
///
/// With `has_markup` set, caret codes are excluded from the measurement;
/// otherwise the string is measured verbatim. Unicode display width rules
/// apply either way, so wide glyphs count for two columns.
pub fn content_width(content: &str, has_markup: bool) -> u16 {
    content_line(content, has_markup, Style::default()).width() as u16
}

/// Build the styled line used to render a content string.
///
/// Without markup the whole string becomes a single span in the base
/// style. Malformed markup never fails: an unknown code after `^` passes
/// through literally, as does a trailing caret.
pub fn content_line(content: &str, has_markup: bool, base: Style) -> Line<'static> {
    if !has_markup {
        return Line::from(Span::styled(content.to_string(), base));
    }

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut current = base;
    let mut chars = content.chars();

    while let Some(c) = chars.next() {
        if c != '^' {
            run.push(c);
            continue;
        }
        match chars.next() {
            None => run.push('^'),
            Some('^') => run.push('^'),
            Some(code) => match apply_code(code, base, current) {
                Some(style) => {
                    if !run.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut run), current));
                    }
                    current = style;
                }
                None => {
                    run.push('^');
                    run.push(code);
                }
            },
        }
    }

    if !run.is_empty() || spans.is_empty() {
        spans.push(Span::styled(run, current));
    }

    Line::from(spans)
}

/// Style produced by one caret code, or `None` when the code is unknown
fn apply_code(code: char, base: Style, current: Style) -> Option<Style> {
    let style = match code {
        'r' => current.fg(Color::Red),
        'g' => current.fg(Color::Green),
        'b' => current.fg(Color::Blue),
        'y' => current.fg(Color::Yellow),
        'm' => current.fg(Color::Magenta),
        'c' => current.fg(Color::Cyan),
        'w' => current.fg(Color::White),
        'k' => current.fg(Color::Black),
        '+' => current.add_modifier(Modifier::BOLD),
        '-' => current.add_modifier(Modifier::DIM),
        '_' => current.add_modifier(Modifier::UNDERLINED),
        ':' => base,
        _ => return None,
    };
    Some(style)
}
