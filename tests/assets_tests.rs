// Host-side tests for load progress, texture decoding and the asset manifest.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code, unused_imports)]
mod core {
    pub mod assets {
        include!("../src/core/assets.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod error {
        include!("../src/core/error.rs");
    }
    pub mod geometry {
        include!("../src/core/geometry.rs");
    }
    pub mod input {
        include!("../src/core/input.rs");
    }
    pub mod material {
        include!("../src/core/material.rs");
    }
    pub mod model {
        include!("../src/core/model.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod sound {
        include!("../src/core/sound.rs");
    }
    pub mod state {
        include!("../src/core/state.rs");
    }
    pub mod update {
        include!("../src/core/update.rs");
    }
}

use crate::core::assets::*;
use crate::core::error::FractureError;
use std::io::Cursor;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

#[test]
fn manifest_tracks_visual_assets_only() {
    assert_eq!(ASSET_MANIFEST.len(), 6);
    assert_eq!(tracked_asset_count(), 4);
    for entry in ASSET_MANIFEST.iter() {
        assert_eq!(entry.tracked, entry.kind != AssetKind::Audio, "{}", entry.path);
    }
    assert!(ASSET_MANIFEST.iter().any(|a| a.path == BUILDING_MODEL_PATH && a.kind == AssetKind::Model));
}

#[test]
fn progress_reports_percent_per_item() {
    let mut p = LoadProgress::default();
    p.register_many(4);
    assert_eq!(p.percent(), 0);
    assert_eq!(p.item_loaded(), ProgressEvent { percent: 25, complete: false });
    assert_eq!(p.item_loaded(), ProgressEvent { percent: 50, complete: false });
    assert_eq!(p.item_loaded(), ProgressEvent { percent: 75, complete: false });
    assert_eq!(p.item_loaded(), ProgressEvent { percent: 100, complete: true });
    assert!(p.is_complete());
}

#[test]
fn completion_fires_exactly_once() {
    let mut p = LoadProgress::default();
    p.register();
    assert!(p.item_loaded().complete);
    // a straggler after completion must not fire again
    assert!(!p.item_loaded().complete);
}

#[test]
fn failures_count_as_settled() {
    let mut p = LoadProgress::default();
    p.register_many(2);
    p.item_failed(FractureError::load("a.png", "404"));
    let ev = p.item_loaded();
    assert!(ev.complete);
    assert_eq!(ev.percent, 100);
    assert_eq!(p.settled(), 2);
    assert_eq!(p.failures().len(), 1);
    assert_eq!(p.failures()[0].asset_path(), Some("a.png"));
}

#[test]
fn empty_progress_is_full_but_never_completes() {
    let p = LoadProgress::default();
    assert_eq!(p.percent(), 100);
    assert!(!p.is_complete());
}

#[test]
fn percent_rounds_to_nearest() {
    let mut p = LoadProgress::default();
    p.register_many(3);
    assert_eq!(p.item_loaded().percent, 33);
    assert_eq!(p.item_loaded().percent, 67);
}

#[test]
fn decode_png_to_rgba() {
    let bytes = png_bytes(2, 3, [10, 20, 30, 128]);
    let tex = decode_texture("t.png", &bytes).expect("decode");
    assert_eq!((tex.width, tex.height), (2, 3));
    assert_eq!(tex.rgba.len(), 2 * 3 * 4);
    assert_eq!(&tex.rgba[..4], &[10, 20, 30, 128]);
    assert_eq!(tex.wrap, TextureWrap::Clamp);
}

#[test]
fn decode_garbage_is_decode_error() {
    let err = decode_texture("bad.png", b"not an image").unwrap_err();
    assert!(matches!(err, FractureError::AssetDecode { ref path, .. } if path == "bad.png"));
    assert!(!err.is_fatal());
}

#[test]
fn repeating_switches_wrap_mode() {
    let tex = TextureData::solid([1, 2, 3, 4]);
    assert_eq!(tex.wrap, TextureWrap::Clamp);
    assert_eq!(tex.repeating().wrap, TextureWrap::Repeat);
}

#[test]
fn texture_store_hands_out_unique_handles() {
    let mut store = TextureStore::default();
    let a = store.insert(TextureData::solid([0; 4]));
    let b = store.insert(TextureData::solid([255; 4]));
    assert_ne!(a, b);
    let drained = store.drain_pending();
    assert_eq!(drained.iter().map(|(h, _)| *h).collect::<Vec<_>>(), vec![a, b]);
    assert!(store.drain_pending().is_empty());
    let c = store.insert(TextureData::solid([0; 4]));
    assert!(c != a && c != b);
}

#[test]
fn cancel_token_is_shared_between_clones() {
    let token = CancelToken::new();
    let task_side = token.clone();
    assert!(!task_side.is_cancelled());
    token.cancel();
    assert!(task_side.is_cancelled());
}

#[test]
fn only_a_missing_canvas_is_fatal() {
    assert!(FractureError::missing("fractureCanvas", true).is_fatal());
    assert!(!FractureError::missing("ui-overlay", false).is_fatal());
    assert!(!FractureError::AudioUnavailable("no ctx".into()).is_fatal());
    assert_eq!(
        FractureError::missing("soundToggle", false).to_string(),
        "missing DOM element #soundToggle"
    );
}
