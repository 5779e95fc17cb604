use crate::ui::{panel_block, text_alignment, ACCENT};
use forensic_dash::adapter::CameraView;
use forensic_dash::i18n::Language;
use forensic_dash::layout::Panel;
use forensic_dash::sequence::Cadence;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem};
use ratatui::Frame;
use std::time::Duration;

pub fn render_cctv(
    f: &mut Frame<'_>,
    area: Rect,
    cameras: &[CameraView],
    search_radius: &str,
    elapsed: Duration,
    lang: Language,
) {
    let active = Cadence::CAMERAS.visible(cameras.len(), elapsed);

    let mut footer = format!(
        " {} {} ",
        cameras.len(),
        lang.pick("كاميرات متصلة", "cameras connected")
    );
    if !search_radius.is_empty() {
        footer.push_str(&format!("· {search_radius} "));
    }
    let block = panel_block(Panel::CctvNetwork.title(lang), Color::Cyan)
        .title_top(
            Line::from(Span::styled(
                format!(" ● {} ", lang.pick("مباشر", "LIVE")),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        )
        .title_bottom(Line::from(footer));

    let items: Vec<ListItem<'_>> = cameras
        .iter()
        .enumerate()
        .map(|(index, camera)| {
            let live = index < active;
            let (dot, style) = if live {
                ("●", Style::default().fg(Color::Cyan))
            } else {
                ("○", Style::default().fg(Color::DarkGray))
            };
            let mut spans = vec![
                Span::styled(format!("{dot} #{} ", camera.rank), style),
                Span::styled(
                    camera.name.as_str(),
                    if live {
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                    } else {
                        style
                    },
                ),
                Span::styled(format!("  {}", camera.distance), style),
            ];
            if live {
                spans.push(Span::styled(
                    format!("  {}", lang.pick("نشط", "Active")),
                    Style::default().fg(ACCENT),
                ));
            }
            ListItem::new(Line::from(spans).alignment(text_alignment(lang)))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
