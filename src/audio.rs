/// Sound output: synthesised effects and a looping background tune.
///
/// Nothing is loaded from disk.  Every sound is rendered to a sample buffer
/// with fundsp and played through a rodio output stream.  Without an audio
/// device, effects fall back to the terminal bell and music stays off.

use std::io::Write;

use crossterm::{style::Print, QueueableCommand};
use fundsp::hacker32 as dsp;
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink, Source};

use crate::config::Config;

pub const SAMPLE_RATE: u32 = 44_100;

const SHOOT_DURATION: f32 = 0.18;
const MUSIC_VOLUME: f32 = 0.5;

// One bar of a pentatonic tune, looped for the whole game.
const TUNE: [f32; 8] = [392.0, 440.0, 523.25, 440.0, 587.33, 523.25, 440.0, 329.63];
const TUNE_NOTE_LEN: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    /// Arrow loosed.
    Shoot,
}

impl Sound {
    pub fn samples(&self, sample_rate: u32) -> Vec<f32> {
        match self {
            Sound::Shoot => shoot_samples(sample_rate),
        }
    }
}

// ── Synthesis ─────────────────────────────────────────────────────────────────

/// Bowstring twang (falling triangle pluck) over a short air whoosh.
pub fn shoot_samples(sample_rate: u32) -> Vec<f32> {
    let mut twang = (dsp::lfo(|t: f32| dsp::xerp(320.0, 110.0, (t / 0.06).min(1.0)))
        >> dsp::triangle())
        * dsp::lfo(|t: f32| dsp::xerp(0.2, 0.001, (t / SHOOT_DURATION).min(1.0)));
    let mut whoosh = (dsp::noise() >> dsp::bandpass_hz(1800.0, 0.6) >> dsp::mul(0.1))
        * dsp::lfo(|t: f32| dsp::xerp(0.4, 0.001, (t / 0.12).min(1.0)));

    let mut samples = render_mono(&mut twang, sample_rate, SHOOT_DURATION);
    let air = render_mono(&mut whoosh, sample_rate, SHOOT_DURATION);
    for (s, a) in samples.iter_mut().zip(air) {
        *s += a;
    }
    samples
}

/// One loop of the background tune: soft sine notes with a decaying envelope.
pub fn music_samples(sample_rate: u32) -> Vec<f32> {
    let note_samples = (sample_rate as f32 * TUNE_NOTE_LEN) as usize;
    let mut samples = Vec::with_capacity(note_samples * TUNE.len());
    for freq in TUNE {
        let mut node = dsp::sine_hz(freq)
            * dsp::lfo(|t: f32| dsp::xerp(0.08, 0.002, (t / TUNE_NOTE_LEN).min(1.0)));
        let mut note = render_mono(&mut node, sample_rate, TUNE_NOTE_LEN);
        note.resize(note_samples, 0.0);
        samples.extend(note);
    }
    samples
}

fn render_mono(node: &mut dyn dsp::AudioUnit, sample_rate: u32, duration: f32) -> Vec<f32> {
    node.set_sample_rate(sample_rate as f64);
    node.reset();

    let sample_count = (sample_rate as f32 * duration) as usize;
    (0..sample_count).map(|_| node.get_mono()).collect()
}

// ── Playback ──────────────────────────────────────────────────────────────────

struct Output {
    // Dropping the stream silences every sink opened on it.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

pub struct Audio {
    output: Option<Output>,
    music: Option<Sink>,
    effects: bool,
    music_enabled: bool,
}

impl Audio {
    /// Open the default output device when any sound is enabled.
    pub fn new(config: &Config) -> Self {
        let output = if config.sound_effects || config.music {
            match OutputStream::try_default() {
                Ok((stream, handle)) => Some(Output {
                    _stream: stream,
                    handle,
                }),
                Err(e) => {
                    log::warn!("no audio device ({e}); using the terminal bell");
                    None
                }
            }
        } else {
            None
        };
        Self {
            output,
            ..Self::headless(config)
        }
    }

    /// No output device: effects ring the bell, music never starts.
    pub fn headless(config: &Config) -> Self {
        Self {
            output: None,
            music: None,
            effects: config.sound_effects,
            music_enabled: config.music,
        }
    }

    pub fn has_device(&self) -> bool {
        self.output.is_some()
    }

    /// Play `sound` on a detached sink.  The bell fallback is queued on
    /// `out` and sounds when the frame is flushed.
    pub fn play_effect<W: Write>(&self, out: &mut W, sound: Sound) -> std::io::Result<()> {
        if !self.effects {
            return Ok(());
        }
        match &self.output {
            Some(output) => match Sink::try_new(&output.handle) {
                Ok(sink) => {
                    sink.append(SamplesBuffer::new(1, SAMPLE_RATE, sound.samples(SAMPLE_RATE)));
                    sink.detach();
                }
                Err(e) => log::warn!("cannot open effect sink: {e}"),
            },
            None => {
                out.queue(Print('\x07'))?;
            }
        }
        Ok(())
    }

    /// Start looping the background tune, if enabled and a device exists.
    pub fn play_music(&mut self) {
        if !self.music_enabled || self.music.is_some() {
            return;
        }
        let Some(output) = &self.output else {
            return;
        };
        match Sink::try_new(&output.handle) {
            Ok(sink) => {
                sink.set_volume(MUSIC_VOLUME);
                let tune = SamplesBuffer::new(1, SAMPLE_RATE, music_samples(SAMPLE_RATE));
                sink.append(tune.repeat_infinite());
                log::info!("background music started");
                self.music = Some(sink);
            }
            Err(e) => log::warn!("cannot open music sink: {e}"),
        }
    }

    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
            log::info!("background music stopped");
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music.is_some()
    }
}

impl std::fmt::Debug for Audio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Audio")
            .field("device", &self.has_device())
            .field("effects", &self.effects)
            .field("music_enabled", &self.music_enabled)
            .field("music_playing", &self.music_playing())
            .finish()
    }
}
