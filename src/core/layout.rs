//! Cosmetic layout math: label wrapping and point-overlay placement.

use rand::Rng;

/// Greedy word wrap at `width` characters. A word longer than a whole line
/// first fills whatever room is left on the current line, then breaks into
/// full-width pieces. Returns at least one (possibly empty) line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let sep = usize::from(!current.is_empty());
        let used = current.chars().count() + sep;

        if used + word_len <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if word_len <= width {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            continue;
        }

        let chars: Vec<char> = word.chars().collect();
        let mut pos = 0;
        while pos < chars.len() {
            let used = current.chars().count() + usize::from(!current.is_empty());
            if used >= width {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            if !current.is_empty() {
                current.push(' ');
            }
            let end = (pos + width - used).min(chars.len());
            current.extend(&chars[pos..end]);
            pos = end;
            if pos < chars.len() {
                lines.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrapped axis tick label with the group's row count appended to the final
/// line, e.g. `["General", "Hospital (12)"]`.
pub fn tick_label(label: &str, wrap_width: usize, count: usize) -> Vec<String> {
    let mut lines = wrap_text(label, wrap_width);
    let last = lines.last_mut().expect("wrap_text returns a line");
    *last = format!("{} ({})", last, count);
    lines
}

/// Beeswarm x offsets (pixels) for points with the given y pixel positions
/// and marker diameter. Each point takes the smallest-magnitude offset that
/// keeps it at least one diameter from every already-placed neighbor.
pub fn beeswarm_offsets(y_px: &[f64], diameter: f64) -> Vec<f64> {
    let d = diameter.max(1.0);
    let mut order: Vec<usize> = (0..y_px.len()).collect();
    order.sort_by(|&a, &b| y_px[a].total_cmp(&y_px[b]));

    let mut offsets = vec![0.0f64; y_px.len()];
    let mut placed: Vec<(f64, f64)> = Vec::new();

    for &idx in &order {
        let y = y_px[idx];
        let neighbors: Vec<(f64, f64)> = placed
            .iter()
            .copied()
            .filter(|&(_, py)| (py - y).abs() < d)
            .collect();

        let mut candidates = vec![0.0f64];
        for &(px, py) in &neighbors {
            let dy = py - y;
            let need = (d * d - dy * dy).sqrt();
            candidates.push(px + need);
            candidates.push(px - need);
        }
        candidates.sort_by(|a, b| a.abs().total_cmp(&b.abs()));

        let fits = |x: f64| {
            neighbors.iter().all(|&(px, py)| {
                let dx = px - x;
                let dy = py - y;
                // Tolerance for touching neighbors produced by the sqrt above.
                dx * dx + dy * dy >= d * d - 1e-6
            })
        };
        let x = candidates.into_iter().find(|&x| fits(x)).unwrap_or(0.0);
        offsets[idx] = x;
        placed.push((x, y));
    }
    offsets
}

/// Uniform strip-plot jitter in `[-amplitude, amplitude]` data units.
pub fn jitter_offsets<R: Rng>(n: usize, amplitude: f64, rng: &mut R) -> Vec<f64> {
    if amplitude <= 0.0 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|_| rng.random_range(-amplitude..=amplitude))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(
            wrap_text("General Hospital East", 10),
            vec!["General", "Hospital", "East"]
        );
        assert_eq!(wrap_text("short", 10), vec!["short"]);
    }

    #[test]
    fn splits_overlong_words() {
        assert_eq!(
            wrap_text("supercalifragilistic", 8),
            vec!["supercal", "ifragili", "stic"]
        );
    }

    #[test]
    fn long_word_fills_the_current_line_first() {
        assert_eq!(wrap_text("aa bbbbbbbbbb", 8), vec!["aa bbbbb", "bbbbb"]);
        assert_eq!(
            wrap_text("General Hospital Northeastern", 10),
            vec!["General", "Hospital N", "ortheaster", "n"]
        );
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn tick_label_appends_count_to_last_line() {
        assert_eq!(
            tick_label("General Hospital", 10, 12),
            vec!["General", "Hospital (12)"]
        );
        assert_eq!(tick_label("vumc", 10, 3), vec!["vumc (3)"]);
    }

    #[test]
    fn beeswarm_keeps_points_apart() {
        let y = vec![10.0, 10.5, 10.2, 40.0, 10.1];
        let d = 6.0;
        let x = beeswarm_offsets(&y, d);
        for i in 0..y.len() {
            for j in (i + 1)..y.len() {
                let dx = x[i] - x[j];
                let dy = y[i] - y[j];
                assert!(
                    dx * dx + dy * dy >= d * d - 1e-3,
                    "points {} and {} overlap",
                    i,
                    j
                );
            }
        }
        // The isolated point stays on the spine.
        assert_eq!(x[3], 0.0);
    }

    #[test]
    fn jitter_is_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let offsets = jitter_offsets(100, 0.08, &mut rng);
        assert_eq!(offsets.len(), 100);
        assert!(offsets.iter().all(|v| v.abs() <= 0.08));
        assert!(offsets.iter().any(|v| *v != 0.0));
    }

    #[test]
    fn zero_jitter_is_all_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(jitter_offsets(3, 0.0, &mut rng), vec![0.0, 0.0, 0.0]);
    }
}
