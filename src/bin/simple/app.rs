//! Playback harness: a software graph rendered by cpal, scheduled by a bank

use std::{thread, time::Duration};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use simple_instruments::{
    engine::{Clock, SystemClock},
    graph::{SharedGraph, SoftwareGraph},
    io::midi::ALL_SOUND_OFF,
    PortBank, MAX_BLOCK_SIZE,
};

/// Time before the first cue so scheduling finishes ahead of playback.
const LEAD_IN_MS: f64 = 100.0;

/// One message for one port, `at_ms` after playback starts.
#[derive(Debug, Clone, Copy)]
pub struct Cue {
    pub port: usize,
    pub at_ms: f64,
    pub message: [u8; 3],
}

impl Cue {
    pub fn note(port: usize, note: u8, start_ms: f64, length_ms: f64) -> [Cue; 2] {
        [
            Cue {
                port,
                at_ms: start_ms,
                message: [0x90, note, 100],
            },
            Cue {
                port,
                at_ms: start_ms + length_ms,
                message: [0x80, note, 0],
            },
        ]
    }
}

/// Schedule `cues` up front, play for `length_ms`, then silence every port.
pub fn play(cues: &[Cue], length_ms: f64) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f64;
    let channels = config.channels() as usize;
    tracing::info!(sample_rate, channels, "audio output");

    let graph = SharedGraph::new(SoftwareGraph::new(sample_rate));
    let render = graph.clone();
    let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            let mut graph = render.lock();
            for block in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                let frames = block.len() / channels;
                let mono = &mut mono[..frames];
                graph.render(mono);

                // Mono to all channels
                for (frame, &sample) in block.chunks_mut(channels).zip(mono.iter()) {
                    frame.fill(sample);
                }
            }
        },
        |err| tracing::error!("audio error: {err}"),
        None,
    )?;
    stream.play()?;

    let mut bank = PortBank::with_defaults(graph, SystemClock::new())
        .wrap_err("failed to build port bank")?;

    let start = bank.clock().now_ms() + LEAD_IN_MS;
    for cue in cues {
        bank.send(cue.port, &cue.message, Some(start + cue.at_ms))?;
    }
    tracing::info!(cues = cues.len(), length_ms, "phrase scheduled");

    thread::sleep(Duration::from_secs_f64((LEAD_IN_MS + length_ms) / 1000.0));

    for index in 0..bank.ports().len() {
        bank.send(index, &[0xB0, ALL_SOUND_OFF, 0], None)?;
    }
    // Let the stop reach the device before the stream is dropped
    thread::sleep(Duration::from_millis(100));

    Ok(())
}
