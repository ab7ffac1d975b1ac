use egui::{Color32, Painter, Pos2, Shape, Stroke};

use super::color::{hsb, note_hue};
use crate::config::VizConfig;
use crate::core::history::HistoryBuffer;
use crate::core::notes::{NoteStatus, NoteStore};

/// One stroke of the trail, fully resolved except for the frame rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSpec {
    pub note: u8,
    /// Frames-ago this stroke represents; 0 is the live pen.
    pub offset: u64,
    pub radius: f32,
    /// Angular position before rotation, in degrees.
    pub start_deg: f32,
    pub color: Color32,
    pub weight: f32,
}

/// Resolve everything the frame will draw. Oldest history first and the live
/// store last: the returned order is the paint order, which is what
/// guarantees newer strokes visually occlude older ones.
pub fn plan_frame(
    cfg: &VizConfig,
    history: &HistoryBuffer,
    live: &NoteStore,
    frame: u64,
) -> Vec<ArcSpec> {
    let mut arcs = Vec::new();

    for offset in (1..history.len() as u64).rev() {
        let Some(snapshot) = history.read(frame, offset) else {
            continue;
        };
        let fade = 100.0 * (1.0 - offset as f32 / history.len() as f32);
        for (&note, &status) in snapshot {
            arcs.extend(trail_arc(cfg, note, status, offset, fade));
        }
    }

    // The live store is offset zero; it becomes the pen, always on top.
    for (note, status) in live.iter() {
        arcs.extend(pen_arc(cfg, note, status));
    }

    arcs
}

fn trail_arc(
    cfg: &VizConfig,
    note: u8,
    status: NoteStatus,
    offset: u64,
    fade: f32,
) -> Option<ArcSpec> {
    let weight = (cfg.trail_count_multiplier * status.count as f32)
        .clamp(cfg.trail_weight_min, cfg.trail_weight_max);

    Some(ArcSpec {
        note,
        offset,
        radius: note_radius(cfg, note)?,
        start_deg: offset as f32 * cfg.arc_step_deg,
        color: hsb(note_hue(note), saturation(status.volume), fade),
        weight,
    })
}

fn pen_arc(cfg: &VizConfig, note: u8, status: NoteStatus) -> Option<ArcSpec> {
    Some(ArcSpec {
        note,
        offset: 0,
        radius: note_radius(cfg, note)?,
        start_deg: 0.0,
        color: hsb(note_hue(note), saturation(status.volume), 100.0),
        weight: cfg.pen_weight,
    })
}

/// More saturated for louder sounds.
fn saturation(volume: f32) -> f32 {
    volume.clamp(35.0, 100.0)
}

/// Radial position encodes pitch. Notes at or below the bass note have no
/// radial meaning and are skipped.
fn note_radius(cfg: &VizConfig, note: u8) -> Option<f32> {
    if note <= cfg.bass_note {
        return None;
    }
    // The configured span is a diameter the way a canvas arc call treats it.
    Some(0.5 * (note - cfg.bass_note) as f32 * cfg.radius_multiplier)
}

/// Stroke the planned arcs around `center`, rotated by the accumulated
/// per-frame rotation. The rotation angle grows without modulo reduction;
/// the trigonometry wraps it naturally.
pub fn paint_frame(
    painter: &Painter,
    center: Pos2,
    cfg: &VizConfig,
    arcs: &[ArcSpec],
    frame: u64,
) {
    const ARC_SEGMENTS: usize = 6;

    let rotation_deg = frame as f32 * cfg.rotation_factor;

    for arc in arcs {
        let mut points = Vec::with_capacity(ARC_SEGMENTS + 1);
        for i in 0..=ARC_SEGMENTS {
            let t = i as f32 / ARC_SEGMENTS as f32;
            let angle = (rotation_deg + arc.start_deg + t * cfg.pen_arc_deg).to_radians();
            points.push(Pos2::new(
                center.x + arc.radius * angle.cos(),
                center.y + arc.radius * angle.sin(),
            ));
        }
        painter.add(Shape::line(points, Stroke::new(arc.weight, arc.color)));
    }
}
