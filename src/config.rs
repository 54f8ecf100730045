#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    DEFAULT_PORT_COUNT, VOICE_PEAK_GAIN,
};

/// How note-on velocity maps to voice gain.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VelocityResponse {
    /// `peak * velocity / 127`
    #[default]
    Linear,
    /// Ignores velocity and plays every note at `peak * 127 / 128`.
    ///
    /// Matches the early instrument set, which overrode velocity before
    /// dividing by 128. Only useful for reproducing old renders.
    Fixed,
}

/// Construction parameters for a [`PortBank`](crate::PortBank).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    pub port_count: usize,
    /// Display names are `"{name_prefix} {id}"`.
    pub name_prefix: String,
    pub voice_peak_gain: f64,
    /// Fixed attenuation of each port's output stage.
    pub port_gain: f64,
    pub velocity_response: VelocityResponse,
}

impl SynthConfig {
    pub fn with_port_count(mut self, port_count: usize) -> Self {
        self.port_count = port_count;
        self
    }

    pub fn with_velocity_response(mut self, response: VelocityResponse) -> Self {
        self.velocity_response = response;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=99).contains(&self.port_count) {
            return Err(Error::InvalidPortCount(self.port_count));
        }
        check_gain("voice_peak_gain", self.voice_peak_gain)?;
        check_gain("port_gain", self.port_gain)
    }
}

fn check_gain(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidGain { name, value })
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            port_count: DEFAULT_PORT_COUNT,
            name_prefix: "Simple".to_string(),
            voice_peak_gain: VOICE_PEAK_GAIN,
            port_gain: 1.0,
            velocity_response: VelocityResponse::Linear,
        }
    }
}
