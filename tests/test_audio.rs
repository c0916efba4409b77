use archery::audio::*;
use archery::config::Config;

#[test]
fn headless_effect_rings_the_bell() {
    let audio = Audio::headless(&Config::default());
    assert!(!audio.has_device());

    let mut out: Vec<u8> = Vec::new();
    audio.play_effect(&mut out, Sound::Shoot).unwrap();
    assert_eq!(out, b"\x07");
}

#[test]
fn disabled_effects_stay_silent() {
    let quiet = Config { sound_effects: false, ..Config::default() };
    let mut out: Vec<u8> = Vec::new();
    Audio::headless(&quiet).play_effect(&mut out, Sound::Shoot).unwrap();
    assert!(out.is_empty());
}

#[test]
fn music_needs_a_device() {
    let mut audio = Audio::headless(&Config::default());
    audio.play_music();
    assert!(!audio.music_playing());
    audio.stop_music();
    assert!(!audio.music_playing());
}

// ── Synthesis ─────────────────────────────────────────────────────────────────

#[test]
fn shoot_effect_is_short_and_audible() {
    let samples = shoot_samples(SAMPLE_RATE);
    assert_eq!(samples.len(), (SAMPLE_RATE as f32 * 0.18) as usize);
    assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
    assert!(samples.iter().any(|s| s.abs() > 0.01));
    assert_eq!(Sound::Shoot.samples(SAMPLE_RATE).len(), samples.len());
}

#[test]
fn tune_is_eight_even_notes() {
    let samples = music_samples(SAMPLE_RATE);
    let note = (SAMPLE_RATE as f32 * 0.25) as usize;
    assert_eq!(samples.len(), 8 * note);
    assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
    // Each note starts from its own attack rather than running silent.
    for n in 0..8 {
        let head = &samples[n * note..n * note + note / 4];
        assert!(head.iter().any(|s| s.abs() > 0.001), "note {n} is silent");
    }
}
