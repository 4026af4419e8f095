//! Confusion-matrix validation, normalization and heatmap scaling.

use crate::error::ShapeMismatch;

/// How cell intensities are scaled in the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizeMode {
    /// Each row divided by its true-class total; percent is per row
    #[default]
    Row,
    /// Intensity relative to the largest cell; percent of all samples
    Global,
}

impl NormalizeMode {
    pub fn toggled(self) -> Self {
        match self {
            NormalizeMode::Row => NormalizeMode::Global,
            NormalizeMode::Global => NormalizeMode::Row,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NormalizeMode::Row => "Normalized by true class",
            NormalizeMode::Global => "Absolute counts",
        }
    }
}

/// Check that `matrix` is square, non-empty and matches `labels`.
pub fn validate_matrix(matrix: &[Vec<u64>], labels: &[String]) -> Result<(), ShapeMismatch> {
    if labels.is_empty() {
        return Err(ShapeMismatch::EmptyLabels);
    }
    if matrix.is_empty() {
        return Err(ShapeMismatch::EmptyMatrix);
    }
    if matrix.len() != labels.len() {
        return Err(ShapeMismatch::DimensionMismatch {
            rows: matrix.len(),
            labels: labels.len(),
        });
    }
    for (row, cells) in matrix.iter().enumerate() {
        if cells.len() != labels.len() {
            return Err(ShapeMismatch::RaggedRow {
                row,
                len: cells.len(),
                expected: labels.len(),
            });
        }
    }
    Ok(())
}

pub fn is_drawable(matrix: &[Vec<u64>], labels: &[String]) -> bool {
    validate_matrix(matrix, labels).is_ok()
}

/// A confusion matrix with derived sums and both display scalings.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatrix {
    pub mode: NormalizeMode,
    pub counts: Vec<Vec<u64>>,
    /// Cell intensity in [0, 1] under `mode`
    pub norm: Vec<Vec<f64>>,
    /// Cell percentage under `mode`
    pub percent: Vec<Vec<f64>>,
    pub row_sums: Vec<u64>,
    pub col_sums: Vec<u64>,
    pub total: u64,
    pub max_cell: u64,
    /// Diagonal over total, 0 when the matrix is all zeros
    pub accuracy: f64,
}

/// Normalize a count matrix. Rows are true classes, columns predictions.
///
/// Ragged input is tolerated (missing cells count as zero) so callers that
/// skip validation still get a result instead of a panic.
pub fn normalize(matrix: &[Vec<u64>], mode: NormalizeMode) -> NormalizedMatrix {
    let width = matrix.iter().map(Vec::len).max().unwrap_or(0);
    let row_sums: Vec<u64> = matrix.iter().map(|row| row.iter().sum()).collect();
    let mut col_sums = vec![0u64; width];
    for row in matrix {
        for (j, v) in row.iter().enumerate() {
            col_sums[j] += v;
        }
    }
    let total: u64 = row_sums.iter().sum();
    let max_cell = matrix.iter().flatten().copied().max().unwrap_or(0);
    let diagonal: u64 = matrix
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.get(i))
        .sum();
    let accuracy = if total == 0 {
        0.0
    } else {
        diagonal as f64 / total as f64
    };

    let norm: Vec<Vec<f64>> = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let denom = match mode {
                NormalizeMode::Row => row_sums[i].max(1),
                NormalizeMode::Global => max_cell.max(1),
            };
            let denom = denom as f64;
            row.iter().map(|&v| v as f64 / denom).collect()
        })
        .collect();

    let percent: Vec<Vec<f64>> = match mode {
        NormalizeMode::Row => norm
            .iter()
            .map(|row| row.iter().map(|v| v * 100.0).collect())
            .collect(),
        NormalizeMode::Global => {
            let denom = total.max(1) as f64;
            matrix
                .iter()
                .map(|row| row.iter().map(|&v| v as f64 / denom * 100.0).collect())
                .collect()
        }
    };

    NormalizedMatrix {
        mode,
        counts: matrix.to_vec(),
        norm,
        percent,
        row_sums,
        col_sums,
        total,
        max_cell,
        accuracy,
    }
}

/// Validate against `labels`, then normalize.
pub fn analyze(
    matrix: &[Vec<u64>],
    labels: &[String],
    mode: NormalizeMode,
) -> Result<NormalizedMatrix, ShapeMismatch> {
    validate_matrix(matrix, labels)?;
    Ok(normalize(matrix, mode))
}

/// Heatmap colour for an intensity in [0, 1]: green for low, red for high.
pub fn heat_color(t: f64) -> String {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let r = (255.0 * t).floor() as u8;
    let g = (255.0 * (1.0 - t)).floor() as u8;
    format!("rgba({},{},120,0.85)", r, g)
}

/// One drawable heatmap cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub row: usize,
    pub col: usize,
    pub count: u64,
    pub percent: f64,
    pub color: String,
    pub tooltip: String,
}

impl NormalizedMatrix {
    /// Cells in row-major order, labelled with `labels`.
    pub fn cells(&self, labels: &[String]) -> Vec<HeatCell> {
        let mut cells = Vec::new();
        for (i, row) in self.counts.iter().enumerate() {
            for (j, &count) in row.iter().enumerate() {
                let percent = self.percent[i][j];
                let truth = labels.get(i).map(String::as_str).unwrap_or("?");
                let predicted = labels.get(j).map(String::as_str).unwrap_or("?");
                cells.push(HeatCell {
                    row: i,
                    col: j,
                    count,
                    percent,
                    color: heat_color(self.norm[i][j]),
                    tooltip: format!(
                        "Pred: {} | True: {} \u{2022} Count: {} ({:.1}%)",
                        predicted, truth, count, percent
                    ),
                });
            }
        }
        cells
    }

    pub fn dimension(&self) -> usize {
        self.counts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("c{}", i)).collect()
    }

    fn sample() -> Vec<Vec<u64>> {
        vec![vec![5, 0, 0], vec![1, 4, 0], vec![0, 2, 3]]
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {} to equal {}", a, b);
    }

    #[test]
    fn test_validate_accepts_square_matrix_matching_labels() {
        assert!(validate_matrix(&sample(), &labels(3)).is_ok());
        assert!(is_drawable(&[vec![7]], &labels(1)));
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        assert_eq!(
            validate_matrix(&sample(), &[]),
            Err(ShapeMismatch::EmptyLabels)
        );
        assert_eq!(
            validate_matrix(&[], &labels(2)),
            Err(ShapeMismatch::EmptyMatrix)
        );
        assert_eq!(
            validate_matrix(&sample(), &labels(2)),
            Err(ShapeMismatch::DimensionMismatch { rows: 3, labels: 2 })
        );
        let ragged = vec![vec![1, 2, 3], vec![4, 5], vec![6, 7, 8]];
        assert_eq!(
            validate_matrix(&ragged, &labels(3)),
            Err(ShapeMismatch::RaggedRow {
                row: 1,
                len: 2,
                expected: 3
            })
        );
        let wide = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert!(!is_drawable(&wide, &labels(2)));
    }

    #[test]
    fn test_row_normalization_sample() {
        let m = normalize(&sample(), NormalizeMode::Row);
        assert_eq!(m.total, 15);
        assert_close(m.accuracy, 0.8);
        assert_eq!(m.norm[0], vec![1.0, 0.0, 0.0]);
        assert_close(m.norm[1][0], 0.2);
        assert_close(m.norm[1][1], 0.8);
        assert_close(m.norm[1][2], 0.0);
        assert_close(m.percent[1][1], 80.0);
        assert_eq!(m.row_sums, vec![5, 5, 5]);
        assert_eq!(m.col_sums, vec![6, 6, 3]);
    }

    #[test]
    fn test_row_normalized_rows_sum_to_one_or_zero() {
        let matrix = vec![vec![3, 1, 0, 2], vec![0, 0, 0, 0], vec![9, 9, 9, 1], vec![0, 0, 0, 4]];
        let m = normalize(&matrix, NormalizeMode::Row);
        for (i, row) in m.norm.iter().enumerate() {
            let sum: f64 = row.iter().sum();
            if m.row_sums[i] == 0 {
                assert_close(sum, 0.0);
            } else {
                assert_close(sum, 1.0);
            }
        }
        let diagonal = (3 + 0 + 9 + 4) as f64;
        assert_close(m.accuracy, diagonal / m.total as f64);
    }

    #[test]
    fn test_global_normalization_uses_max_cell_and_total() {
        let m = normalize(&sample(), NormalizeMode::Global);
        assert_eq!(m.max_cell, 5);
        assert_close(m.norm[0][0], 1.0);
        assert_close(m.norm[2][1], 0.4);
        assert_close(m.percent[0][0], 5.0 / 15.0 * 100.0);
        assert_close(m.percent[1][0], 1.0 / 15.0 * 100.0);
    }

    #[test]
    fn test_all_zero_matrix_has_zero_accuracy() {
        let m = normalize(&[vec![0, 0], vec![0, 0]], NormalizeMode::Global);
        assert_eq!(m.total, 0);
        assert_close(m.accuracy, 0.0);
        assert!(m.norm.iter().flatten().all(|v| *v == 0.0));
        assert!(m.percent.iter().flatten().all(|v| *v == 0.0));
    }

    #[test]
    fn test_toggle_recomputes_from_same_counts() {
        let row = analyze(&sample(), &labels(3), NormalizeMode::Row).unwrap();
        let global = analyze(&row.counts, &labels(3), row.mode.toggled()).unwrap();
        assert_eq!(global.mode, NormalizeMode::Global);
        assert_eq!(global.counts, row.counts);
        assert_close(global.accuracy, row.accuracy);
    }

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(0.0), "rgba(0,255,120,0.85)");
        assert_eq!(heat_color(1.0), "rgba(255,0,120,0.85)");
        assert_eq!(heat_color(f64::NAN), "rgba(0,255,120,0.85)");
        assert_eq!(heat_color(3.0), "rgba(255,0,120,0.85)");
    }

    #[test]
    fn test_cells_carry_labels_in_tooltip() {
        let names = vec!["cat".to_string(), "dog".to_string()];
        let m = analyze(&[vec![2, 1], vec![0, 3]], &names, NormalizeMode::Row).unwrap();
        let cells = m.cells(&names);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1].row, 0);
        assert_eq!(cells[1].col, 1);
        assert!(cells[1].tooltip.starts_with("Pred: dog | True: cat"), "{}", cells[1].tooltip);
    }
}
