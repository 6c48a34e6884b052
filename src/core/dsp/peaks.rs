//! Local maxima detection

/// Indices of local maxima whose height is at least `min_height`.
///
/// A peak must rise above its left neighbour and fall below on the right.
/// Flat tops resolve to the middle sample (rounded down). The first and last
/// samples are never reported.
pub fn find_peaks(data: &[f64], min_height: f64) -> Vec<usize> {
    let mut peaks = Vec::new();
    if data.len() < 3 {
        return peaks;
    }

    let last = data.len() - 1;
    let mut i = 1;

    while i < last {
        if data[i - 1] < data[i] {
            let mut ahead = i + 1;
            while ahead < last && data[ahead] == data[i] {
                ahead += 1;
            }

            if data[ahead] < data[i] {
                let midpoint = (i + ahead - 1) / 2;
                if data[midpoint] >= min_height {
                    peaks.push(midpoint);
                }
                i = ahead;
            }
        }
        i += 1;
    }

    peaks
}
