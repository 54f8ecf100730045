//! Per-frame gain and summing used by the graph's summing stages.

/// Multiply a signal by a per-sample gain curve (in-place).
#[inline]
pub fn multiply_in_place(signal: &mut [f32], modulator: &[f32]) {
    debug_assert_eq!(signal.len(), modulator.len());

    for (s, &m) in signal.iter_mut().zip(modulator.iter()) {
        *s *= m;
    }
}

/// Sum `input` into `out`. Several sources feeding one stage mix this way.
#[inline]
pub fn accumulate(out: &mut [f32], input: &[f32]) {
    debug_assert_eq!(out.len(), input.len());

    for (o, &i) in out.iter_mut().zip(input.iter()) {
        *o += i;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_in_place() {
        let mut signal = [1.0, 0.5, -0.5, -1.0];
        let curve = [0.0, 1.0, 0.5, 0.5];
        multiply_in_place(&mut signal, &curve);
        assert_eq!(signal, [0.0, 0.5, -0.25, -0.5]);
    }

    #[test]
    fn test_accumulate_sums_sources() {
        let mut out = [0.0; 3];
        accumulate(&mut out, &[0.25, -0.5, 1.0]);
        accumulate(&mut out, &[0.25, 0.5, -1.0]);
        assert_eq!(out, [0.5, 0.0, 0.0]);
    }
}
