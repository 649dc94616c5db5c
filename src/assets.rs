use crate::core::assets::{
    decode_texture, tracked_asset_count, CancelToken, ProgressEvent, TextureData,
    BUILDING_MODEL_PATH, GLITCH_TEXTURE_PATH, RED_OVERLAY_TEXTURE_PATH, TEXT_TEXTURE_PATH,
};
use crate::core::model::{external_buffer_uris, resolve_uri, ModelScene};
use crate::core::scene::{build_building, build_fallback_building, build_text_plane, SceneKey};
use crate::core::material::ShaderMaterial;
use crate::core::{AppState, FractureError};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// GET `path` and return the body bytes.
pub async fn fetch_bytes(path: &str) -> Result<Vec<u8>, FractureError> {
    let window = web::window().ok_or_else(|| FractureError::load(path, "no window"))?;
    let resp_val = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| FractureError::load(path, format!("{:?}", e)))?;
    let resp: web::Response = resp_val
        .dyn_into()
        .map_err(|e| FractureError::load(path, format!("{:?}", e)))?;
    if !resp.ok() {
        return Err(FractureError::load(path, format!("HTTP {}", resp.status())));
    }
    let buf_promise = resp
        .array_buffer()
        .map_err(|e| FractureError::load(path, format!("{:?}", e)))?;
    let buf = JsFuture::from(buf_promise)
        .await
        .map_err(|e| FractureError::load(path, format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

pub async fn load_texture(path: &str) -> Result<TextureData, FractureError> {
    let bytes = fetch_bytes(path).await?;
    decode_texture(path, &bytes)
}

/// Fetch a glTF/GLB model plus any buffers it references.
pub async fn load_model(path: &str) -> Result<ModelScene, FractureError> {
    let bytes = fetch_bytes(path).await?;
    let doc = ModelScene::parse(path, &bytes)?;
    let mut buffers = Vec::new();
    for uri in external_buffer_uris(&doc) {
        match uri {
            Some(uri) => buffers.push(fetch_bytes(&resolve_uri(path, &uri)).await?),
            None => buffers.push(Vec::new()),
        }
    }
    ModelScene::from_gltf(path, &doc, &buffers)
}

/// Shared bits every loader task needs.
#[derive(Clone)]
pub struct LoaderContext {
    pub state: Rc<RefCell<AppState>>,
    pub document: web::Document,
    pub cancel: CancelToken,
    /// Runs once, after every tracked load has settled.
    pub on_complete: Rc<dyn Fn()>,
}

impl LoaderContext {
    fn settle(&self, result: Result<(), FractureError>) {
        let event: ProgressEvent = {
            let mut st = self.state.borrow_mut();
            match result {
                Ok(()) => st.progress.item_loaded(),
                Err(e) => {
                    log::warn!("[assets] {}", e);
                    st.progress.item_failed(e)
                }
            }
        };
        overlay::set_progress(&self.document, event.percent);
        if event.complete {
            let failed: Vec<String> = self
                .state
                .borrow()
                .progress
                .failures()
                .iter()
                .filter_map(|e| e.asset_path().map(str::to_owned))
                .collect();
            if failed.is_empty() {
                log::info!("[assets] all assets settled");
            } else {
                log::info!("[assets] all assets settled, degraded: {}", failed.join(", "));
            }
            (self.on_complete)();
        }
    }
}

/// Kick off every tracked load. Each task merges its result into the shared
/// state; the frame loop picks up new objects and textures on its next tick.
pub fn spawn_loads(ctx: LoaderContext, building_template: ShaderMaterial) {
    ctx.state
        .borrow_mut()
        .progress
        .register_many(tracked_asset_count() as u32);

    let c = ctx.clone();
    spawn_local(async move {
        let result = load_texture(GLITCH_TEXTURE_PATH).await;
        if c.cancel.is_cancelled() {
            return;
        }
        let result = result.map(|tex| {
            let mut st = c.state.borrow_mut();
            let handle = st.textures.insert(tex.repeating());
            st.glitch_texture = Some(handle);
        });
        c.settle(result);
    });

    let c = ctx.clone();
    spawn_local(async move {
        let result = load_texture(RED_OVERLAY_TEXTURE_PATH).await;
        if c.cancel.is_cancelled() {
            return;
        }
        let result = result.map(|tex| {
            let mut st = c.state.borrow_mut();
            let handle = st.textures.insert(tex);
            st.red_overlay_texture = Some(handle);
        });
        c.settle(result);
    });

    let c = ctx.clone();
    spawn_local(async move {
        let result = load_texture(TEXT_TEXTURE_PATH).await;
        if c.cancel.is_cancelled() {
            return;
        }
        let result = result.map(|tex| {
            let mut st = c.state.borrow_mut();
            let handle = st.textures.insert(tex);
            st.scene.merge(SceneKey::UtopianText, build_text_plane(handle));
        });
        c.settle(result);
    });

    let c = ctx;
    spawn_local(async move {
        let result = load_model(BUILDING_MODEL_PATH).await;
        if c.cancel.is_cancelled() {
            return;
        }
        let (object, result) = match result {
            Ok(model) => (build_building(model, &building_template), Ok(())),
            Err(e) => {
                log::warn!("[assets] using fallback building geometry");
                (build_fallback_building(&building_template), Err(e))
            }
        };
        c.state.borrow_mut().scene.merge(SceneKey::Building, object);
        c.settle(result);
    });
}
