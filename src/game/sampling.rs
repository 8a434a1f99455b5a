//! Poisson-disc sampling of spawn positions.
//!
//! Implements Bridson's algorithm over a rectangle centred on a point, so that
//! no two sampled positions are closer than `radius`.

use super::state::Position;
use rand::Rng;

/// Candidate attempts around each active sample before it is retired.
const ATTEMPTS_PER_SAMPLE: usize = 30;

/// Samples up to `count` positions inside a `width` × `depth` rectangle
/// centred on `center`, each at least `radius` apart.
///
/// Returns fewer than `count` positions when the area cannot fit them.
pub fn sample_positions<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    radius: f32,
    width: f32,
    depth: f32,
    center: Position,
) -> Vec<Position> {
    if count == 0 || width <= 0.0 || depth <= 0.0 {
        return Vec::new();
    }
    if radius <= 0.0 {
        return (0..count)
            .map(|_| random_point(rng, width, depth, center))
            .collect();
    }

    let cell = radius / std::f32::consts::SQRT_2;
    let cols = (width / cell).ceil() as usize;
    let rows = (depth / cell).ceil() as usize;
    let mut grid: Vec<Option<usize>> = vec![None; cols * rows];

    // Samples are kept in local coordinates: [0, width) × [0, depth).
    let mut samples: Vec<(f32, f32)> = Vec::with_capacity(count.min(cols * rows));
    let mut active: Vec<usize> = Vec::new();

    let first = (rng.gen_range(0.0..width), rng.gen_range(0.0..depth));
    insert(&mut grid, cols, cell, &mut samples, &mut active, first);

    while samples.len() < count && !active.is_empty() {
        let slot = rng.gen_range(0..active.len());
        let (ax, az) = samples[active[slot]];

        let mut found = false;
        for _ in 0..ATTEMPTS_PER_SAMPLE {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let distance = rng.gen_range(radius..2.0 * radius);
            let candidate = (ax + distance * angle.cos(), az + distance * angle.sin());

            if candidate.0 < 0.0 || candidate.0 >= width || candidate.1 < 0.0 || candidate.1 >= depth
            {
                continue;
            }
            if is_far_enough(&grid, cols, rows, cell, &samples, candidate, radius) {
                insert(&mut grid, cols, cell, &mut samples, &mut active, candidate);
                found = true;
                break;
            }
        }

        if !found {
            active.swap_remove(slot);
        }
    }

    samples
        .into_iter()
        .map(|(x, z)| Position::new(center.x - width / 2.0 + x, center.z - depth / 2.0 + z))
        .collect()
}

fn random_point<R: Rng + ?Sized>(rng: &mut R, width: f32, depth: f32, center: Position) -> Position {
    Position::new(
        center.x + rng.gen_range(-width / 2.0..width / 2.0),
        center.z + rng.gen_range(-depth / 2.0..depth / 2.0),
    )
}

fn insert(
    grid: &mut [Option<usize>],
    cols: usize,
    cell: f32,
    samples: &mut Vec<(f32, f32)>,
    active: &mut Vec<usize>,
    point: (f32, f32),
) {
    let index = samples.len();
    let rows = grid.len() / cols;
    let cx = ((point.0 / cell) as usize).min(cols - 1);
    let cz = ((point.1 / cell) as usize).min(rows - 1);
    grid[cz * cols + cx] = Some(index);
    samples.push(point);
    active.push(index);
}

fn is_far_enough(
    grid: &[Option<usize>],
    cols: usize,
    rows: usize,
    cell: f32,
    samples: &[(f32, f32)],
    point: (f32, f32),
    radius: f32,
) -> bool {
    let cx = ((point.0 / cell) as usize).min(cols - 1);
    let cz = ((point.1 / cell) as usize).min(rows - 1);
    let x_range = cx.saturating_sub(2)..=(cx + 2).min(cols - 1);
    let z_range = cz.saturating_sub(2)..=(cz + 2).min(rows - 1);

    for z in z_range {
        for x in x_range.clone() {
            if let Some(i) = grid[z * cols + x] {
                let (sx, sz) = samples[i];
                let (dx, dz) = (sx - point.0, sz - point.1);
                if dx * dx + dz * dz < radius * radius {
                    return false;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_requested_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = sample_positions(&mut rng, 10, 1.5, 15.0, 15.0, Position::new(0.0, 0.0));
        assert_eq!(points.len(), 10);
    }

    #[test]
    fn test_samples_respect_radius_and_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let center = Position::new(100.0, -20.0);
        let points = sample_positions(&mut rng, 25, 1.5, 15.0, 15.0, center);

        for (i, a) in points.iter().enumerate() {
            assert!((a.x - center.x).abs() <= 7.5);
            assert!((a.z - center.z).abs() <= 7.5);
            for b in &points[i + 1..] {
                assert!(a.distance(b) >= 1.5 - 1e-4);
            }
        }
    }

    #[test]
    fn test_samples_saturate_small_area() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = sample_positions(&mut rng, 500, 1.5, 3.0, 3.0, Position::default());
        assert!(!points.is_empty());
        assert!(points.len() < 500);
    }

    #[test]
    fn test_huge_count_is_bounded_by_area() {
        let mut rng = StdRng::seed_from_u64(3);
        let requested = i32::MAX as usize;
        let points = sample_positions(&mut rng, requested, 1.5, 15.0, 15.0, Position::default());
        assert!(!points.is_empty());
        // One sample per grid cell at most.
        assert!(points.len() <= 15 * 15);
    }

    #[test]
    fn test_zero_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_positions(&mut rng, 0, 1.5, 15.0, 15.0, Position::default()).is_empty());
    }
}
