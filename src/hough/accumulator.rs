//! (rho, theta) vote accumulator with a precomputed trig table.

/// Dense vote table of `num_angles x num_rho` cells.
pub(crate) struct Accumulator {
    num_angles: usize,
    num_rho: usize,
    /// Per angle: `(cos, sin)` pre-divided by the rho resolution.
    trig: Vec<(f32, f32)>,
    votes: Vec<i32>,
}

impl Accumulator {
    pub(crate) fn new(width: usize, height: usize, rho: f32, theta: f32) -> Self {
        let num_angles = ((std::f32::consts::PI / theta).round() as usize).max(1);
        let num_rho = ((((width + height) * 2 + 1) as f32 / rho).round() as usize).max(1);
        let inv_rho = 1.0 / rho;
        let trig = (0..num_angles)
            .map(|n| {
                let angle = n as f32 * theta;
                (angle.cos() * inv_rho, angle.sin() * inv_rho)
            })
            .collect();
        Self {
            num_angles,
            num_rho,
            trig,
            votes: vec![0; num_angles * num_rho],
        }
    }

    /// Scaled `(cos, sin)` of angle bin `n`.
    pub(crate) fn trig(&self, n: usize) -> (f32, f32) {
        self.trig[n]
    }

    #[inline]
    fn cell(&self, n: usize, x: usize, y: usize) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as isize + (self.num_rho as isize - 1) / 2;
        let r = r.clamp(0, self.num_rho as isize - 1) as usize;
        n * self.num_rho + r
    }

    /// Add the votes of pixel `(x, y)` and return `(best_votes, best_angle)`.
    pub(crate) fn vote(&mut self, x: usize, y: usize) -> (i32, usize) {
        let mut best = (i32::MIN, 0usize);
        for n in 0..self.num_angles {
            let idx = self.cell(n, x, y);
            self.votes[idx] += 1;
            if self.votes[idx] > best.0 {
                best = (self.votes[idx], n);
            }
        }
        best
    }

    /// Retract the votes previously cast by pixel `(x, y)`.
    pub(crate) fn retract(&mut self, x: usize, y: usize) {
        for n in 0..self.num_angles {
            let idx = self.cell(n, x, y);
            self.votes[idx] -= 1;
        }
    }
}
