use crate::app::App;
use crate::feed::Article;
use crate::theme::color_for;
use crate::util::{format_date, strip_control_chars, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Build one list row: category badge, title, author, date.
pub(super) fn article_line(article: &Article, width: usize) -> Line<'static> {
    let category = strip_control_chars(article.category()).into_owned();
    let badge = format!(" {} ", category);
    let badge_style = color_for(article.category()).badge_style();

    // ratatui does not expand tabs
    let date = format!("  {}", format_date(article.published_at()).replace('\t', " "));

    let byline = article
        .author()
        .map(|a| format!(" - {}", strip_control_chars(a)))
        .unwrap_or_default();

    let fixed = badge.width() + 1 + date.width();
    let text_budget = width.saturating_sub(fixed);
    let text = format!("{}{}", strip_control_chars(article.title()), byline);
    let text = truncate_to_width(&text, text_budget).into_owned();

    Line::from(vec![
        Span::styled(badge, badge_style),
        Span::raw(" "),
        Span::styled(text, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(date, Style::default().fg(Color::DarkGray)),
    ])
}

/// One tab-separated line for `--plain` output.
pub fn plain_line(article: &Article) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        strip_control_chars(article.category()),
        strip_control_chars(article.title()),
        strip_control_chars(article.author().unwrap_or("")),
        format_date(article.published_at()),
        article.url()
    )
}

/// Render the article list panel
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!("Art news ({})", app.articles.len()));

    if app.articles.is_empty() {
        let placeholder = Paragraph::new(app.placeholder()).block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .articles
        .iter()
        .map(|article| ListItem::new(article_line(article, inner_width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}
