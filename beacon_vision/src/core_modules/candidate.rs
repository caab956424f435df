// THEORY:
// The candidate selector decides which component, if any, is the light source.
//
// A light seen through a lens is a round spot; glints off a window frame or a
// wet road are long streaks. Size alone cannot tell them apart, shape can. For
// each component the selector turns the raw sums into:
// 1.  **Centroid**: cx = Σx/N, cy = Σy/N.
// 2.  **Central Second Moments**: mu_xx = Σx² − cx·Σx, mu_yy = Σy² − cy·Σy,
//     mu_xy = Σxy − cx·Σy. These are N times the coordinate covariance.
// 3.  **Eigenvalues** of that covariance via trace and discriminant:
//     A = mu_xx + mu_yy, B = sqrt((mu_xx − mu_yy)² + 4·mu_xy²),
//     λmax = (A + B)/2, λmin = (A − B)/2.
// 4.  **Circularity**: sqrt(λmin/λmax). A disk or a square scores 1, a one-pixel
//     line scores 0, and a degenerate single point (λmax = 0) scores 0.
//
// A component must be at least `min_pixels` large to be evaluated at all, and at
// least `min_circularity` round to be accepted. Among accepted components the
// largest wins; ties go to the lowest canonical label, i.e. the one whose first
// pixel comes earliest in raster order.

use crate::core_modules::blob_stats::BlobStats;
use crate::core_modules::union_find::Label;

/// Shape descriptors derived from a component's sums.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobShape {
    pub centroid: (f64, f64),
    pub mu_xx: f64,
    pub mu_yy: f64,
    pub mu_xy: f64,
    pub lambda_max: f64,
    pub lambda_min: f64,
    /// sqrt(λmin/λmax), in [0, 1].
    pub circularity: f64,
}

impl BlobShape {
    /// Returns `None` for an empty record.
    pub fn from_stats(stats: &BlobStats) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }

        let n = stats.count as f64;
        let sum_x = stats.sum_x as f64;
        let sum_y = stats.sum_y as f64;
        let cx = sum_x / n;
        let cy = sum_y / n;

        let mu_xx = stats.sum_xx as f64 - cx * sum_x;
        let mu_yy = stats.sum_yy as f64 - cy * sum_y;
        let mu_xy = stats.sum_xy as f64 - cx * sum_y;

        let a = mu_xx + mu_yy;
        let b = ((mu_xx - mu_yy).powi(2) + 4.0 * mu_xy * mu_xy).sqrt();
        let lambda_max = (a + b) / 2.0;
        // Rounding can push a zero eigenvalue a hair below zero.
        let lambda_min = ((a - b) / 2.0).max(0.0);

        let circularity = if lambda_max > 0.0 {
            (lambda_min / lambda_max).sqrt().min(1.0)
        } else {
            0.0
        };

        Some(Self {
            centroid: (cx, cy),
            mu_xx,
            mu_yy,
            mu_xy,
            lambda_max,
            lambda_min,
            circularity,
        })
    }
}

/// Filter thresholds for candidate selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionCriteria {
    pub min_pixels: u64,
    pub min_circularity: f64,
}

/// One evaluated component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Canonical label of the component.
    pub label: Label,
    pub stats: BlobStats,
    pub shape: BlobShape,
    /// Whether the component passed the circularity filter.
    pub accepted: bool,
}

/// Evaluates every component large enough to be considered, in ascending label order.
pub fn evaluate_candidates(
    table: &[Option<BlobStats>],
    criteria: &SelectionCriteria,
) -> Vec<Candidate> {
    table
        .iter()
        .enumerate()
        .filter_map(|(label, slot)| {
            let stats = (*slot)?;
            if stats.count < criteria.min_pixels {
                return None;
            }
            let shape = BlobShape::from_stats(&stats)?;
            Some(Candidate {
                label: label as Label,
                stats,
                shape,
                accepted: shape.circularity >= criteria.min_circularity,
            })
        })
        .collect()
}

/// Largest accepted candidate; the earliest one wins a tie.
pub fn select_winner(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates.iter().filter(|c| c.accepted) {
        match best {
            Some(current) if current.stats.count >= candidate.stats.count => {}
            _ => best = Some(candidate),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_of(points: impl IntoIterator<Item = (u64, u64)>) -> BlobStats {
        let mut stats = BlobStats::default();
        for (x, y) in points {
            stats.add(x, y);
        }
        stats
    }

    fn block(x0: u64, y0: u64, w: u64, h: u64) -> BlobStats {
        stats_of((y0..y0 + h).flat_map(|y| (x0..x0 + w).map(move |x| (x, y))))
    }

    const DEFAULT_CRITERIA: SelectionCriteria = SelectionCriteria {
        min_pixels: 3,
        min_circularity: 0.5,
    };

    #[test]
    fn square_block_is_perfectly_circular() {
        let shape = BlobShape::from_stats(&block(8, 8, 4, 4)).unwrap();
        assert_eq!(shape.centroid, (9.5, 9.5));
        assert!((shape.circularity - 1.0).abs() < 1e-9);
        assert!(shape.mu_xy.abs() < 1e-9);
    }

    #[test]
    fn straight_line_has_zero_circularity() {
        let horizontal = BlobShape::from_stats(&block(0, 3, 10, 1)).unwrap();
        assert!(horizontal.circularity < 1e-6);

        let vertical = BlobShape::from_stats(&block(3, 0, 1, 10)).unwrap();
        assert!(vertical.circularity < 1e-6);
    }

    #[test]
    fn diagonal_streak_is_elongated() {
        // A 2-wide diagonal staircase.
        let streak = stats_of((0..10).flat_map(|i| [(i, i), (i + 1, i)]));
        let shape = BlobShape::from_stats(&streak).unwrap();
        assert!(shape.mu_xy > 0.0);
        assert!(shape.circularity < 0.5, "circularity {}", shape.circularity);
    }

    #[test]
    fn single_point_is_never_circular() {
        let shape = BlobShape::from_stats(&block(5, 5, 1, 1)).unwrap();
        assert_eq!(shape.lambda_max, 0.0);
        assert_eq!(shape.circularity, 0.0);
        assert!(BlobShape::from_stats(&BlobStats::default()).is_none());
    }

    #[test]
    fn eigenvalues_match_axis_aligned_rectangle() {
        // 4x2 rectangle: per-axis sums of squared deviations are 2*5 = 10 and 4*0.5 = 2.
        let shape = BlobShape::from_stats(&block(0, 0, 4, 2)).unwrap();
        assert!((shape.lambda_max - 10.0).abs() < 1e-9);
        assert!((shape.lambda_min - 2.0).abs() < 1e-9);
        assert!((shape.circularity - (0.2f64).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn small_components_are_not_evaluated() {
        let table = vec![None, Some(block(0, 0, 1, 2)), Some(block(5, 5, 2, 2))];
        let candidates = evaluate_candidates(&table, &DEFAULT_CRITERIA);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].label, 2);
    }

    #[test]
    fn largest_accepted_candidate_wins() {
        let table = vec![
            None,
            Some(block(0, 0, 3, 3)),
            Some(block(10, 0, 20, 1)), // larger but a line
            Some(block(0, 10, 4, 4)),
        ];
        let candidates = evaluate_candidates(&table, &DEFAULT_CRITERIA);
        assert_eq!(candidates.len(), 3);
        assert!(!candidates[1].accepted);

        let winner = select_winner(&candidates).unwrap();
        assert_eq!(winner.label, 3);
        assert_eq!(winner.stats.count, 16);
    }

    #[test]
    fn ties_go_to_the_lowest_label() {
        let table = vec![None, None, Some(block(0, 0, 3, 3)), Some(block(10, 10, 3, 3))];
        let candidates = evaluate_candidates(&table, &DEFAULT_CRITERIA);
        assert_eq!(select_winner(&candidates).unwrap().label, 2);
    }

    #[test]
    fn nothing_accepted_means_no_winner() {
        let table = vec![None, Some(block(0, 0, 10, 1))];
        let candidates = evaluate_candidates(&table, &DEFAULT_CRITERIA);
        assert_eq!(candidates.len(), 1);
        assert!(select_winner(&candidates).is_none());
        assert!(select_winner(&[]).is_none());
    }
}
