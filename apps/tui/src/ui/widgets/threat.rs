use crate::ui::{panel_block, text_alignment, ACCENT};
use forensic_dash::adapter::{DetectionView, ImageFrame, ThreatView};
use forensic_dash::domain::CornerBox;
use forensic_dash::i18n::Language;
use forensic_dash::layout::Panel;
use forensic_dash::map::ContainTransform;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Rectangle};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

fn level_color(code: &str) -> Color {
    match code {
        "HIGH" | "CRITICAL" => Color::Red,
        "MEDIUM" => Color::Yellow,
        _ => ACCENT,
    }
}

pub fn render_threat(
    f: &mut Frame<'_>,
    area: Rect,
    threat: &ThreatView,
    image: &ImageFrame,
    lang: Language,
) {
    let color = level_color(&threat.level_code);
    let block = panel_block(Panel::ThreatDetection.title(lang), Color::Red).title_top(
        Line::from(Span::styled(
            format!(" {} ", threat.level),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ))
        .right_aligned(),
    );
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);
    let (list_area, image_area) = if lang.is_rtl() {
        (columns[1], columns[0])
    } else {
        (columns[0], columns[1])
    };

    render_lists(f, list_area, threat, lang);
    render_image_frame(f, image_area, image, lang);
}

fn detection_line(detection: &DetectionView, color: Color, lang: Language) -> Line<'static> {
    Line::from(vec![
        Span::styled("■ ", Style::default().fg(color)),
        Span::styled(
            detection.label.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}% {}", detection.confidence, lang.pick("دقة", "confidence")),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn render_lists(f: &mut Frame<'_>, area: Rect, threat: &ThreatView, lang: Language) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", threat.total(), lang.pick("عناصر مكتشفة", "objects detected")),
            Style::default().fg(Color::White),
        )),
        Line::from(vec![
            Span::styled(format!("{} ", lang.pick("المجموع", "Total")), dim),
            Span::raw(threat.total().to_string()),
            Span::styled(format!("  {} ", lang.pick("تهديدات", "Threats")), dim),
            Span::styled(threat.threat_count().to_string(), Style::default().fg(Color::Red)),
            Span::styled(format!("  {} ", lang.pick("عادي", "Normal")), dim),
            Span::styled(threat.normal_count().to_string(), Style::default().fg(ACCENT)),
        ]),
        Line::from(""),
    ];

    if !threat.threats.is_empty() {
        lines.push(Line::from(Span::styled(
            lang.pick("عناصر مشبوهة", "Suspicious Objects"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.extend(
            threat
                .threats
                .iter()
                .map(|detection| detection_line(detection, Color::Red, lang)),
        );
        lines.push(Line::from(""));
    }
    if !threat.normal.is_empty() {
        lines.push(Line::from(Span::styled(
            lang.pick("عناصر عادية", "Standard Objects"),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
        lines.extend(
            threat
                .normal
                .iter()
                .map(|detection| detection_line(detection, ACCENT, lang)),
        );
    }

    f.render_widget(
        Paragraph::new(lines)
            .alignment(text_alignment(lang))
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Image-space box as a canvas rectangle. The canvas y axis points up.
fn to_rect(transform: &ContainTransform, bbox: CornerBox, height: f64, color: Color) -> Rectangle {
    let (x1, y1) = transform.point(bbox.x1, bbox.y1);
    let (x2, y2) = transform.point(bbox.x2, bbox.y2);
    Rectangle {
        x: x1.min(x2),
        y: height - y1.max(y2),
        width: (x2 - x1).abs(),
        height: (y2 - y1).abs(),
        color,
    }
}

fn label_box(ctx: &mut Context<'_>, rect: &Rectangle, text: String, color: Color) {
    ctx.print(
        rect.x,
        rect.y + rect.height,
        Span::styled(text, Style::default().fg(color)),
    );
}

fn render_image_frame(f: &mut Frame<'_>, area: Rect, image: &ImageFrame, lang: Language) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title_bottom(Line::from(lang.pick(" الصورة المحللة ", " Analyzed Image ")).centered());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = f64::from(inner.width);
    let height = f64::from(inner.height) * 2.0;
    let transform = image
        .size
        .and_then(|size| ContainTransform::new(size, (width, height)).map(|t| (size, t)));

    let Some((size, transform)) = transform else {
        f.render_widget(
            Paragraph::new(lang.pick("أبعاد الصورة غير معروفة", "Image size unknown"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    };

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                let (x, y, w, h) = transform.frame(size);
                ctx.draw(&Rectangle {
                    x,
                    y: height - y - h,
                    width: w,
                    height: h,
                    color: Color::DarkGray,
                });
                ctx.layer();

                for detection in &image.objects {
                    let color = if detection.threat { Color::Red } else { ACCENT };
                    let rect = to_rect(&transform, detection.bbox, height, color);
                    ctx.draw(&rect);
                    label_box(
                        ctx,
                        &rect,
                        format!("{} {}%", detection.label, detection.confidence),
                        color,
                    );
                }
                for face in &image.faces {
                    let rect = to_rect(&transform, *face, height, Color::Yellow);
                    ctx.draw(&rect);
                    label_box(ctx, &rect, lang.pick("وجه", "face").to_string(), Color::Yellow);
                }
            })
            .x_bounds([0.0, width])
            .y_bounds([0.0, height]),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxes_flip_into_canvas_space() {
        let transform = ContainTransform::new((100.0, 50.0), (100.0, 50.0)).expect("transform");
        let rect = to_rect(
            &transform,
            CornerBox { x1: 10.0, y1: 5.0, x2: 30.0, y2: 20.0 },
            50.0,
            Color::Red,
        );
        assert!((rect.x - 10.0).abs() < 1e-9);
        assert!((rect.y - 30.0).abs() < 1e-9);
        assert!((rect.width - 20.0).abs() < 1e-9);
        assert!((rect.height - 15.0).abs() < 1e-9);
    }

    #[test]
    fn level_colors_follow_severity() {
        assert_eq!(level_color("HIGH"), Color::Red);
        assert_eq!(level_color("MEDIUM"), Color::Yellow);
        assert_eq!(level_color("LOW"), ACCENT);
    }
}
