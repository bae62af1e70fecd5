use super::accumulator::Accumulator;
use super::options::HoughOptions;
use crate::types::Segment;
use image::GrayImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EMPTY: u8 = 0;
const PENDING: u8 = 1;
const VOTED: u8 = 2;

/// Output of [`super::hough_segments`].
#[derive(Clone, Debug, Default)]
pub struct HoughResult {
    pub segments: Vec<Segment>,
    pub elapsed_ms: f64,
}

/// One run of the progressive probabilistic Hough transform.
pub(crate) struct HoughExtractor {
    width: usize,
    height: usize,
    options: HoughOptions,
    /// Per pixel: `EMPTY`, `PENDING` (edge, not yet voted) or `VOTED`.
    state: Vec<u8>,
    points: Vec<(usize, usize)>,
    accumulator: Accumulator,
    rng: StdRng,
    segments: Vec<Segment>,
}

impl HoughExtractor {
    pub(crate) fn new(edges: &GrayImage, options: HoughOptions) -> Self {
        let options = options.sanitized();
        let width = edges.width() as usize;
        let height = edges.height() as usize;
        let mut state = vec![EMPTY; width * height];
        let mut points = Vec::new();
        for (x, y, p) in edges.enumerate_pixels() {
            if p[0] != 0 {
                let (x, y) = (x as usize, y as usize);
                state[y * width + x] = PENDING;
                points.push((x, y));
            }
        }
        Self {
            width,
            height,
            accumulator: Accumulator::new(width, height, options.rho, options.theta_rad()),
            options,
            state,
            points,
            rng: StdRng::seed_from_u64(options.seed),
            segments: Vec::new(),
        }
    }

    pub(crate) fn extract(mut self) -> Vec<Segment> {
        let mut remaining = self.points.len();
        while remaining > 0 {
            let pick = self.rng.gen_range(0..remaining);
            let (x, y) = self.points[pick];
            self.points.swap(pick, remaining - 1);
            remaining -= 1;
            self.process_point(x, y);
        }
        self.segments
    }

    fn process_point(&mut self, x: usize, y: usize) {
        let idx = y * self.width + x;
        // Already consumed by an earlier segment.
        if self.state[idx] != PENDING {
            return;
        }
        self.state[idx] = VOTED;
        let (votes, angle) = self.accumulator.vote(x, y);
        if votes < self.options.threshold as i32 {
            return;
        }

        let stepper = LineStepper::new(self.accumulator.trig(angle), x, y);
        let ends = [self.walk(&stepper, false), self.walk(&stepper, true)];
        let min_len = self.options.min_line_length as i64;
        let good = (ends[1].0 as i64 - ends[0].0 as i64).abs() >= min_len
            || (ends[1].1 as i64 - ends[0].1 as i64).abs() >= min_len;

        self.consume(&stepper, false, ends[0], good);
        self.consume(&stepper, true, ends[1], good);

        if good {
            self.segments.push(Segment::from_pixels([
                ends[0].0 as i32,
                ends[0].1 as i32,
                ends[1].0 as i32,
                ends[1].1 as i32,
            ]));
        }
    }

    /// Follow the line from the seed until the gap budget is exhausted and
    /// return the last edge pixel seen.
    fn walk(&self, stepper: &LineStepper, backward: bool) -> (usize, usize) {
        let mut end = stepper.seed;
        let mut gap = 0u32;
        for (px, py) in stepper.iter(backward, self.width, self.height) {
            if self.state[py * self.width + px] != EMPTY {
                gap = 0;
                end = (px, py);
            } else {
                gap += 1;
                if gap > self.options.max_line_gap {
                    break;
                }
            }
        }
        end
    }

    /// Clear the pixels between the seed and `end`, retracting their votes
    /// when the segment is kept.
    fn consume(&mut self, stepper: &LineStepper, backward: bool, end: (usize, usize), good: bool) {
        for (px, py) in stepper.iter(backward, self.width, self.height) {
            let idx = py * self.width + px;
            if self.state[idx] != EMPTY {
                if good && self.state[idx] == VOTED {
                    self.accumulator.retract(px, py);
                }
                self.state[idx] = EMPTY;
            }
            if (px, py) == end {
                break;
            }
        }
    }
}

/// Unit-major stepping along the line direction through a seed pixel.
struct LineStepper {
    seed: (usize, usize),
    step: [f32; 2],
}

impl LineStepper {
    fn new((cos, sin): (f32, f32), x: usize, y: usize) -> Self {
        // Line direction is perpendicular to the accumulator normal.
        let a = -sin;
        let b = cos;
        let step = if a.abs() > b.abs() {
            [a.signum(), b / a.abs()]
        } else {
            [a / b.abs(), if b > 0.0 { 1.0 } else { -1.0 }]
        };
        Self { seed: (x, y), step }
    }

    /// Pixels along the line starting at the seed itself.
    fn iter(&self, backward: bool, width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
        let sign = if backward { -1.0 } else { 1.0 };
        let (dx, dy) = (self.step[0] * sign, self.step[1] * sign);
        let (x0, y0) = (self.seed.0 as f32, self.seed.1 as f32);
        (0i64..)
            .map(move |k| {
                let k = k as f32;
                ((x0 + k * dx + 0.5).floor(), (y0 + k * dy + 0.5).floor())
            })
            .take_while(move |&(x, y)| x >= 0.0 && y >= 0.0 && x < width as f32 && y < height as f32)
            .map(|(x, y)| (x as usize, y as usize))
    }
}
