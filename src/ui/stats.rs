use egui::{Align2, Color32, FontId, Painter, Pos2, Rect};

/// Per-frame diagnostics drawn to help the developer.
///
/// Too many objects per frame may require changes to the decay or cutoff;
/// the highest note can suggest how the radial scaling needs tweaking.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub objects_drawn: usize,
    pub highest_note: u8,
}

/// Paint the diagnostics bars in the top-left corner of the viewport.
pub fn paint_stats(painter: &Painter, viewport: Rect, text_size: f32, stats: &FrameStats) {
    draw_stat(
        painter,
        viewport,
        text_size,
        0,
        "objectsDrawn",
        stats.objects_drawn as f32,
        800.0,
    );
    draw_stat(
        painter,
        viewport,
        text_size,
        1,
        "highestNote",
        stats.highest_note as f32,
        127.0,
    );
}

fn draw_stat(
    painter: &Painter,
    viewport: Rect,
    text_size: f32,
    slot: usize,
    name: &str,
    value: f32,
    max_value: f32,
) {
    const BAR_WIDTH: f32 = 15.0;
    const TEXT_MARGIN: f32 = 5.0;

    let fraction = (value / max_value).clamp(0.0, 1.0);
    let top = viewport.top() + viewport.height() * (1.0 - fraction);
    let x = viewport.left() + slot as f32 * (BAR_WIDTH + TEXT_MARGIN);

    let bar = Rect::from_min_max(Pos2::new(x, top), Pos2::new(x + BAR_WIDTH, viewport.bottom()));
    painter.rect_filled(bar, egui::CornerRadius::ZERO, Color32::from_gray(128));

    painter.text(
        Pos2::new(x + BAR_WIDTH + TEXT_MARGIN, top),
        Align2::LEFT_TOP,
        format!("{name}: {value:.0}"),
        FontId::proportional(text_size),
        Color32::GRAY,
    );
}
