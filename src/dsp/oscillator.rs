/*
Square Oscillator
=================

A square wave sits at +1 for the first half of each cycle and at -1 for the
second half. It carries only odd harmonics (f, 3f, 5f, ...) falling off as
1/n, which gives the hollow, woody tone of early home computers.

  +1 ┤ ┌───┐   ┌───┐   ┌───┐
     │ │   │   │   │   │   │
  -1 ┤─┘   └───┘   └───┘   └──
       |<--->|
        1/f seconds

Phase is a cycle fraction in [0, 1). Each sample advances it by
frequency / sample_rate and wraps. Phase is kept in f64 so long notes do not
drift audibly.

This is the naive (non band-limited) square. Harmonics above Nyquist fold
back, which is audible on the top octaves but matches the plain square the
instrument set is modelled on.
*/

#[derive(Debug, Clone, Default)]
pub struct SquareOscillator {
    phase: f64,
}

impl SquareOscillator {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Produce one sample and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f64, sample_rate: f64) -> f32 {
        let sample = if self.phase < 0.5 { 1.0 } else { -1.0 };
        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(osc: &mut SquareOscillator, count: usize, frequency: f64, sample_rate: f64) -> Vec<f32> {
        (0..count)
            .map(|_| osc.next_sample(frequency, sample_rate))
            .collect()
    }

    #[test]
    fn half_cycle_high_half_cycle_low() {
        // 16 samples per cycle
        let mut osc = SquareOscillator::new();
        let buffer = samples(&mut osc, 16, 3_000.0, 48_000.0);

        assert!(buffer[..8].iter().all(|&s| s == 1.0));
        assert!(buffer[8..].iter().all(|&s| s == -1.0));
    }

    #[test]
    fn phase_wraps_into_unit_interval() {
        let mut osc = SquareOscillator::new();
        samples(&mut osc, 10_000, 440.0, 48_000.0);

        assert!((0.0..1.0).contains(&osc.phase));
    }

    #[test]
    fn output_is_bipolar_unit_amplitude() {
        let mut osc = SquareOscillator::new();
        let buffer = samples(&mut osc, 512, 261.63, 44_100.0);

        assert!(buffer.iter().all(|s| s.abs() == 1.0));
        assert!(buffer.iter().any(|&s| s < 0.0));
    }
}
