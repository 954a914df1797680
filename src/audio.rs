//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use anyhow::anyhow;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::SoundEffect;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.8,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) -> anyhow::Result<()> {
        if self.muted {
            return Ok(());
        }
        let ctx = self
            .ctx
            .as_ref()
            .ok_or_else(|| anyhow!("no audio context"))?;

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let vol = self.volume;
        match effect {
            SoundEffect::Theme => self.play_theme(ctx, vol),
            SoundEffect::Collision => self.play_meow(ctx, vol),
            SoundEffect::Pickup => self.play_burp(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> anyhow::Result<(OscillatorNode, GainNode)> {
        let js = |e: wasm_bindgen::JsValue| anyhow!("web audio: {e:?}");
        let osc = ctx.create_oscillator().map_err(js)?;
        let gain = ctx.create_gain().map_err(js)?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).map_err(js)?;
        gain.connect_with_audio_node(&ctx.destination()).map_err(js)?;

        Ok((osc, gain))
    }

    /// Start jingle - rising arpeggio
    fn play_theme(&self, ctx: &AudioContext, vol: f32) -> anyhow::Result<()> {
        for (i, freq) in [392.0, 523.0, 659.0, 784.0].iter().enumerate() {
            let (osc, gain) = self.create_osc(ctx, *freq, OscillatorType::Triangle)?;
            let t = ctx.current_time() + i as f64 * 0.12;
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.25).ok();
        }
        Ok(())
    }

    /// Enemy contact - meow glide up then down
    fn play_meow(&self, ctx: &AudioContext, vol: f32) -> anyhow::Result<()> {
        let (osc, gain) = self.create_osc(ctx, 500.0, OscillatorType::Sine)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();
        osc.frequency().set_value_at_time(500.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.1)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(400.0, t + 0.35)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
        Ok(())
    }

    /// Bonus pickup - low burp
    fn play_burp(&self, ctx: &AudioContext, vol: f32) -> anyhow::Result<()> {
        let (osc, gain) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
        Ok(())
    }

    /// Game over - sad descending tones
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) -> anyhow::Result<()> {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let (osc, gain) = self.create_osc(ctx, *freq, OscillatorType::Sine)?;
            let t = ctx.current_time() + i as f64 * 0.2;
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.4).ok();
        }
        Ok(())
    }
}
