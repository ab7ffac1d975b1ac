/// Fixed parameters of the trail visualization.
///
/// These are the knobs that matter for how the radar reads: trail length,
/// decay behavior, and the mapping from notes onto the circle.
#[derive(Debug, Clone)]
pub struct VizConfig {
    /// Number of past frames kept for trail rendering. Tracking too many
    /// notes introduces lag.
    pub history_size: usize,
    /// Lowest note given a radial position. 88-key keyboard: low A = 21.
    pub bass_note: u8,
    /// Degrees the trail advances per history step.
    pub arc_step_deg: f32,
    /// Arc span of a single stroke, in degrees.
    pub pen_arc_deg: f32,
    /// Whole-scene rotation per frame, in degrees; accumulates indefinitely.
    pub rotation_factor: f32,
    /// Radial room given to each semitone above the bass note.
    pub radius_multiplier: f32,
    /// Held notes decay with time. Makes it easier to tell if the same note
    /// is being played in succession.
    pub volume_decay_per_frame: f32,
    /// Don't bother drawing extremely faint trails.
    pub draw_volume_cutoff: f32,
    /// Pen fatter than the trails to see where we are in time.
    pub pen_weight: f32,
    /// Extra stroke weight per concurrent hold of the same note.
    pub trail_count_multiplier: f32,
    /// Thinner trail to show fewer instruments on the same note.
    pub trail_weight_min: f32,
    /// Rare to see more than five instruments on the same note.
    pub trail_weight_max: f32,
}

impl Default for VizConfig {
    fn default() -> Self {
        let history_size = 90;
        Self {
            history_size,
            bass_note: 21,
            arc_step_deg: 0.9 * 360.0 / history_size as f32,
            pen_arc_deg: 3.0,
            rotation_factor: 0.85,
            radius_multiplier: 12.0,
            volume_decay_per_frame: 0.95,
            draw_volume_cutoff: 35.0,
            pen_weight: 6.0,
            trail_count_multiplier: 3.0,
            trail_weight_min: 2.0,
            trail_weight_max: 8.0,
        }
    }
}

/// Display-level parameters.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Anything less than 30 fps seems too laggy.
    pub frame_rate: f32,
    pub stats_text_size: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            stats_text_size: 16.0,
        }
    }
}
