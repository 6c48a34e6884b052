//! Signal smoothing filters

/// Savitzky-Golay smoothing.
///
/// Interior samples use the centred least-squares fit. The first and last
/// `window_len / 2` samples are evaluated from a single fit over the first or
/// last full window, so edges are not padded or mirrored.
///
/// `window_len` must be odd, greater than `polyorder` and no longer than the
/// input; otherwise the input is returned unchanged.
pub fn savgol_filter(data: &[f64], window_len: usize, polyorder: usize) -> Vec<f64> {
    let n = data.len();
    if window_len % 2 == 0 || window_len <= polyorder || window_len > n {
        return data.to_vec();
    }

    let half = window_len / 2;
    let centre = fit_weights(window_len, polyorder, 0.0);
    let mut output = Vec::with_capacity(n);

    for i in 0..n {
        let value = if i < half {
            let weights = fit_weights(window_len, polyorder, i as f64 - half as f64);
            dot(&weights, &data[..window_len])
        } else if i + half >= n {
            let start = n - window_len;
            let weights = fit_weights(window_len, polyorder, (i - start) as f64 - half as f64);
            dot(&weights, &data[start..])
        } else {
            dot(&centre, &data[i - half..=i + half])
        };
        output.push(value);
    }

    output
}

/// Largest odd length not exceeding `len`, capped at `max`
pub fn odd_window_len(len: usize, max: usize) -> usize {
    let odd = if len % 2 == 1 { len } else { len.saturating_sub(1) };
    odd.min(max)
}

/// Weights that evaluate the least-squares polynomial fit over a window at
/// offset `t` from the window centre.
fn fit_weights(window_len: usize, polyorder: usize, t: f64) -> Vec<f64> {
    let half = (window_len / 2) as f64;
    let order = polyorder + 1;
    let xs: Vec<f64> = (0..window_len).map(|j| j as f64 - half).collect();

    let mut normal = vec![vec![0.0f64; order]; order];
    for &x in &xs {
        for (r, row) in normal.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell += x.powi((r + c) as i32);
            }
        }
    }

    let target: Vec<f64> = (0..order).map(|k| t.powi(k as i32)).collect();
    let z = solve_linear(normal, target);

    xs.iter()
        .map(|&x| z.iter().enumerate().map(|(k, zk)| zk * x.powi(k as i32)).sum())
        .collect()
}

/// Gaussian elimination with partial pivoting for small dense systems
fn solve_linear(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Vec<f64> {
    let n = b.len();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        let pivot = a[col][col];
        if pivot.abs() < f64::MIN_POSITIVE {
            continue;
        }

        for row in col + 1..n {
            let factor = a[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0f64; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = if a[row][row].abs() < f64::MIN_POSITIVE {
            0.0
        } else {
            (b[row] - tail) / a[row][row]
        };
    }
    x
}

fn dot(weights: &[f64], values: &[f64]) -> f64 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}
