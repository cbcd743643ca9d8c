use super::HoughParams;
use crate::image::{GrayImageU8, ImageView};
use crate::types::LineSegment;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Fixed-point precision used while stepping along a traced line.
const SHIFT: u32 = 16;

/// (θ, ρ) vote table with precomputed `cos θ / ρ_res`, `sin θ / ρ_res`.
struct Accumulator {
    num_rho: usize,
    rho_offset: i64,
    trig: Vec<(f64, f64)>,
    votes: Vec<i32>,
}

impl Accumulator {
    fn new(width: usize, height: usize, params: &HoughParams) -> Self {
        let num_angle = ((std::f64::consts::PI / params.theta).round() as usize).max(1);
        let num_rho =
            ((((width + height) * 2 + 1) as f64 / params.rho).round() as usize).max(1);
        let irho = 1.0 / params.rho;
        let trig = (0..num_angle)
            .map(|n| {
                let angle = n as f64 * params.theta;
                (angle.cos() * irho, angle.sin() * irho)
            })
            .collect();
        Self {
            num_rho,
            rho_offset: ((num_rho - 1) / 2) as i64,
            trig,
            votes: vec![0; num_angle * num_rho],
        }
    }

    #[inline]
    fn cell(&self, n: usize, x: usize, y: usize) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f64 * c + y as f64 * s).round() as i64 + self.rho_offset;
        n * self.num_rho + r.clamp(0, self.num_rho as i64 - 1) as usize
    }

    /// Add the votes of (x, y); returns the strongest angle bin and its count.
    fn vote(&mut self, x: usize, y: usize) -> (usize, i32) {
        let mut best = (0usize, 0i32);
        for n in 0..self.trig.len() {
            let cell = self.cell(n, x, y);
            self.votes[cell] += 1;
            if self.votes[cell] > best.1 {
                best = (n, self.votes[cell]);
            }
        }
        best
    }

    fn unvote(&mut self, x: usize, y: usize) {
        for n in 0..self.trig.len() {
            let cell = self.cell(n, x, y);
            self.votes[cell] -= 1;
        }
    }
}

/// Fixed-point walker along the line through a seed pixel. One coordinate
/// advances by ±1 per step, the other by a 16.16 fraction.
#[derive(Clone, Copy)]
struct LineWalk {
    x_major: bool,
    start: (i64, i64),
    step: (i64, i64),
}

impl LineWalk {
    fn new(x: usize, y: usize, dir_x: f64, dir_y: f64) -> Self {
        let one = (1i64 << SHIFT) as f64;
        let half = 1i64 << (SHIFT - 1);
        if dir_x.abs() > dir_y.abs() {
            Self {
                x_major: true,
                start: (x as i64, ((y as i64) << SHIFT) + half),
                step: (
                    if dir_x > 0.0 { 1 } else { -1 },
                    (dir_y * one / dir_x.abs()).round() as i64,
                ),
            }
        } else {
            Self {
                x_major: false,
                start: (((x as i64) << SHIFT) + half, y as i64),
                step: (
                    (dir_x * one / dir_y.abs()).round() as i64,
                    if dir_y > 0.0 { 1 } else { -1 },
                ),
            }
        }
    }

    #[inline]
    fn pixel(&self, p: (i64, i64)) -> (i64, i64) {
        if self.x_major {
            (p.0, p.1 >> SHIFT)
        } else {
            (p.0 >> SHIFT, p.1)
        }
    }

    #[inline]
    fn step(&self, backward: bool) -> (i64, i64) {
        if backward {
            (-self.step.0, -self.step.1)
        } else {
            self.step
        }
    }
}

/// Progressive probabilistic Hough transform over the non-zero pixels of
/// `edges`. Invalid parameters yield no segments.
pub fn hough_lines_probabilistic(edges: &GrayImageU8, params: &HoughParams) -> Vec<LineSegment> {
    let (w, h) = (edges.width(), edges.height());
    if w == 0 || h == 0 || params.validate().is_err() {
        return Vec::new();
    }

    let mut acc = Accumulator::new(w, h, params);
    let mut pending = vec![false; w * h];
    let mut points = Vec::new();
    for y in 0..h {
        for (x, &v) in edges.row(y).iter().enumerate() {
            if v != 0 {
                pending[y * w + x] = true;
                points.push((x, y));
            }
        }
    }
    let mut rng = StdRng::seed_from_u64(params.seed);
    points.shuffle(&mut rng);

    let in_bounds = |(x, y): (i64, i64)| x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h;
    let threshold = params.threshold as i32;
    let max_gap = params.max_line_gap as i64;
    let min_len = params.min_line_length as i64;
    let mut segments = Vec::new();

    for &(x, y) in &points {
        if !pending[y * w + x] {
            continue;
        }
        let (best_n, best_votes) = acc.vote(x, y);
        if best_votes < threshold {
            continue;
        }

        // Direction along the line is perpendicular to the (cos θ, sin θ) normal.
        let (c, s) = acc.trig[best_n];
        let walk = LineWalk::new(x, y, -s, c);

        let mut ends = [(x as i64, y as i64); 2];
        for (k, end) in ends.iter_mut().enumerate() {
            let step = walk.step(k == 1);
            let mut p = walk.start;
            let mut gap = 0i64;
            loop {
                let px = walk.pixel(p);
                if !in_bounds(px) {
                    break;
                }
                if pending[px.1 as usize * w + px.0 as usize] {
                    gap = 0;
                    *end = px;
                } else {
                    gap += 1;
                    if gap > max_gap {
                        break;
                    }
                }
                p = (p.0 + step.0, p.1 + step.1);
            }
        }

        let accepted = (ends[1].0 - ends[0].0).abs() >= min_len
            || (ends[1].1 - ends[0].1).abs() >= min_len;

        for (k, &end) in ends.iter().enumerate() {
            let step = walk.step(k == 1);
            let mut p = walk.start;
            loop {
                let px = walk.pixel(p);
                if !in_bounds(px) {
                    break;
                }
                let idx = px.1 as usize * w + px.0 as usize;
                if pending[idx] {
                    if accepted {
                        acc.unvote(px.0 as usize, px.1 as usize);
                    }
                    pending[idx] = false;
                }
                if px == end {
                    break;
                }
                p = (p.0 + step.0, p.1 + step.1);
            }
        }

        if accepted {
            segments.push(LineSegment::new(
                ends[0].0 as f64,
                ends[0].1 as f64,
                ends[1].0 as f64,
                ends[1].1 as f64,
            ));
        }
    }

    debug!(
        "hough: {} edge pixels -> {} segments",
        points.len(),
        segments.len()
    );
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fine_params() -> HoughParams {
        HoughParams {
            rho: 1.0,
            threshold: 30,
            min_line_length: 100,
            max_line_gap: 5,
            ..HoughParams::default()
        }
    }

    fn diagonal(gap: Option<std::ops::Range<usize>>) -> GrayImageU8 {
        let mut img = GrayImageU8::new(200, 200);
        for x in 10..=130 {
            if gap.as_ref().is_some_and(|g| g.contains(&x)) {
                continue;
            }
            img.set(x, x + 20, 255);
        }
        img
    }

    fn endpoints(seg: &LineSegment) -> [(i64, i64); 2] {
        let mut pts = [
            (seg.x1 as i64, seg.y1 as i64),
            (seg.x2 as i64, seg.y2 as i64),
        ];
        pts.sort();
        pts
    }

    #[test]
    fn empty_map_has_no_segments() {
        let img = GrayImageU8::new(64, 48);
        assert!(hough_lines_probabilistic(&img, &HoughParams::default()).is_empty());
    }

    #[test]
    fn diagonal_line_is_recovered_end_to_end() {
        let segs = hough_lines_probabilistic(&diagonal(None), &fine_params());
        assert_eq!(segs.len(), 1, "{segs:?}");
        assert_eq!(endpoints(&segs[0]), [(10, 30), (130, 150)]);
    }

    #[test]
    fn small_gap_is_bridged() {
        let segs = hough_lines_probabilistic(&diagonal(Some(60..63)), &fine_params());
        assert_eq!(segs.len(), 1, "{segs:?}");
        assert_eq!(endpoints(&segs[0]), [(10, 30), (130, 150)]);
    }

    #[test]
    fn short_line_is_rejected() {
        let mut img = GrayImageU8::new(100, 100);
        for x in 10..60 {
            img.set(x, x + 5, 255);
        }
        assert!(hough_lines_probabilistic(&img, &fine_params()).is_empty());
    }

    #[test]
    fn output_is_deterministic_for_a_seed() {
        let img = diagonal(Some(40..44));
        let a = hough_lines_probabilistic(&img, &HoughParams::default());
        let b = hough_lines_probabilistic(&img, &HoughParams::default());
        assert_eq!(a, b);
    }
}
