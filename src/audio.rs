use crate::assets::fetch_bytes;
use crate::constants::{AMBIENT_VOLUME, GLITCH_VOLUME};
use crate::core::sound::{AmbientGate, AudioCommand};
use crate::core::FractureError;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, FractureError> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            _ = g.connect_with_audio_node(&audio_ctx.destination());
            Ok(g)
        }
        Err(e) => Err(FractureError::AudioUnavailable(format!("{} GainNode: {:?}", label, e))),
    }
}

/// Ambient loop and glitch one-shot on top of a WebAudio context.
pub struct AudioEngine {
    ctx: web::AudioContext,
    ambient_gain: web::GainNode,
    glitch_gain: web::GainNode,
    ambient_buffer: Option<web::AudioBuffer>,
    glitch_buffer: Option<web::AudioBuffer>,
    ambient_source: Option<web::AudioBufferSourceNode>,
    gate: AmbientGate,
}

impl AudioEngine {
    pub fn new() -> Result<Self, FractureError> {
        let ctx = web::AudioContext::new()
            .map_err(|e| FractureError::AudioUnavailable(format!("{:?}", e)))?;
        let ambient_gain = create_gain(&ctx, AMBIENT_VOLUME, "ambient")?;
        let glitch_gain = create_gain(&ctx, GLITCH_VOLUME, "glitch")?;
        Ok(Self {
            ctx,
            ambient_gain,
            glitch_gain,
            ambient_buffer: None,
            glitch_buffer: None,
            ambient_source: None,
            gate: AmbientGate::default(),
        })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }

    pub fn set_ambient_buffer(&mut self, buffer: web::AudioBuffer) {
        self.ambient_buffer = Some(buffer);
        if self.gate.buffer_ready() {
            self.start_ambient();
        }
    }

    pub fn set_glitch_buffer(&mut self, buffer: web::AudioBuffer) {
        self.glitch_buffer = Some(buffer);
    }

    pub fn execute(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::StartAmbient => self.start_ambient(),
            AudioCommand::SetAmbientMuted(muted) => {
                self.gate.set_muted(muted);
                self.ambient_gain
                    .gain()
                    .set_value(self.gate.level(AMBIENT_VOLUME));
            }
            AudioCommand::PlayGlitch => self.play_glitch(),
            // storage is the caller's business
            AudioCommand::Persist(_) => {}
        }
    }

    pub fn resume(&self) {
        _ = self.ctx.resume();
    }

    pub fn suspend(&self) {
        _ = self.ctx.suspend();
    }

    fn start_ambient(&mut self) {
        if self.ambient_source.is_some() {
            return;
        }
        if !self.gate.request_start(self.ambient_buffer.is_some()) {
            return;
        }
        let Some(buffer) = &self.ambient_buffer else {
            return;
        };
        self.resume();
        match self.ctx.create_buffer_source() {
            Ok(src) => {
                src.set_buffer(Some(buffer));
                src.set_loop(true);
                _ = src.connect_with_audio_node(&self.ambient_gain);
                if let Err(e) = src.start() {
                    log::error!("[audio] ambient start failed: {:?}", e);
                    return;
                }
                self.ambient_gain
                    .gain()
                    .set_value(self.gate.level(AMBIENT_VOLUME));
                log::info!("[audio] ambient loop started");
                self.ambient_source = Some(src);
            }
            Err(e) => log::error!("[audio] ambient source error: {:?}", e),
        }
    }

    // New source per trigger, so rapid clicks overlap instead of queueing.
    fn play_glitch(&self) {
        let Some(buffer) = &self.glitch_buffer else {
            return;
        };
        if let Ok(src) = self.ctx.create_buffer_source() {
            src.set_buffer(Some(buffer));
            _ = src.connect_with_audio_node(&self.glitch_gain);
            _ = src.start();
        }
    }
}

/// Fetch and decode an audio file with the given context.
pub async fn decode(ctx: &web::AudioContext, path: &str) -> Result<web::AudioBuffer, FractureError> {
    let bytes = fetch_bytes(path).await?;
    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let promise = ctx
        .decode_audio_data(&array.buffer())
        .map_err(|e| FractureError::decode(path, format!("{:?}", e)))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| FractureError::decode(path, format!("{:?}", e)))?;
    Ok(web::AudioBuffer::from(value))
}
