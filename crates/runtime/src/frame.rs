use foundation::time::Time;

/// Metadata for one rendered frame.
///
/// Frames are produced by the host render loop; everything that runs "once
/// per frame" (tooltip placement, flood animation) receives one of these.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Wall-clock time at which the frame finished rendering.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, time: Time) -> Self {
        Self { index, time }
    }

    pub fn next(self, dt_s: f64) -> Self {
        Self::new(self.index + 1, self.time.after(dt_s))
    }
}
