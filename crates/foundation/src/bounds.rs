/// Axis-aligned bounding box in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb3 {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Aabb3 { min, max }
    }

    /// Tight box around `points`, `None` when empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut out = Aabb3::new(first, first);
        for p in iter {
            for axis in 0..3 {
                out.min[axis] = out.min[axis].min(p[axis]);
                out.max[axis] = out.max[axis].max(p[axis]);
            }
        }
        Some(out)
    }

    /// Grows the box by `margin` on every side.
    pub fn padded(self, margin: f64) -> Self {
        Aabb3::new(
            [self.min[0] - margin, self.min[1] - margin, self.min[2] - margin],
            [self.max[0] + margin, self.max[1] + margin, self.max[2] + margin],
        )
    }

    pub fn contains(&self, p: [f64; 3]) -> bool {
        (0..3).all(|axis| p[axis] >= self.min[axis] && p[axis] <= self.max[axis])
    }
}
