use nalgebra_glm::Vec2;

/// Regular lattice of evaluation points, `min` inclusive, stepping by
/// `step` while staying within `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub min: Vec2,
    pub max: Vec2,
    pub step: f32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            min: Vec2::new(-1.9, -1.4),
            max: Vec2::new(1.9, 1.4),
            step: 0.3,
        }
    }
}

impl GridSpec {
    pub fn cols(&self) -> usize {
        Self::steps(self.min.x, self.max.x, self.step)
    }

    pub fn rows(&self) -> usize {
        Self::steps(self.min.y, self.max.y, self.step)
    }

    fn steps(min: f32, max: f32, step: f32) -> usize {
        if !(step > 0.0) || max < min {
            return 0;
        }

        // slack so that an exactly reachable upper bound is kept
        ((max - min) / step + 1e-4).floor() as usize + 1
    }

    /// Row-major, `y` outer.
    pub fn points(&self) -> Vec<Vec2> {
        let rows = self.rows();
        let cols = self.cols();

        let mut points = Vec::with_capacity(rows * cols);

        for r in 0..rows {
            let y = self.min.y + r as f32 * self.step;
            for c in 0..cols {
                let x = self.min.x + c as f32 * self.step;
                points.push(Vec2::new(x, y));
            }
        }

        points
    }
}
