use tatter::{ClothConfig, ClothEngine, PointerState, Vec2};
use wasm_bindgen::prelude::*;

/// Converts a `tatter` error into a JS exception value.
fn to_js(err: tatter::ClothError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ---- Cloth Cut Demo ----

/// Full-screen cuttable wireframe. The page maps pointer events into the
/// `[-1.2, 1.2]` simulation square and uploads `vertex_buffer()` as a
/// `LINES` position attribute every frame.
#[wasm_bindgen]
pub struct ClothCutDemo {
    engine: ClothEngine<f32>,
}

#[wasm_bindgen]
impl ClothCutDemo {
    /// `width` and `height` are the viewport size in CSS pixels.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<ClothCutDemo, JsValue> {
        let cols = ClothConfig::<f32>::columns_for_viewport(width);
        let engine = ClothEngine::new(cols, width / height, ClothConfig::new()).map_err(to_js)?;
        Ok(ClothCutDemo { engine })
    }

    /// Advance by `elapsed` seconds of wall time with the current pointer.
    /// Returns the number of fixed steps run.
    pub fn frame(&mut self, elapsed: f32, x: f32, y: f32, down: bool) -> usize {
        let pointer = PointerState { position: Vec2::new(x, y), is_down: down };
        self.engine.frame(elapsed, pointer)
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.engine.press(Vec2::new(x, y));
    }

    pub fn drag_to(&mut self, x: f32, y: f32) {
        self.engine.drag_to(Vec2::new(x, y));
    }

    pub fn release(&mut self) {
        self.engine.release();
    }

    /// Rebuild for a new viewport. Cuts are discarded.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        let cols = ClothConfig::<f32>::columns_for_viewport(width);
        self.engine.rebuild(cols, width / height).map_err(to_js)
    }

    /// Returns flat [x1, y1, z1, x2, y2, z2, ...] per constraint slot
    pub fn vertex_buffer(&self) -> Vec<f32> {
        self.engine.vertex_buffer().to_vec()
    }

    pub fn constraint_count(&self) -> usize {
        self.engine.constraint_count()
    }

    pub fn active_constraint_count(&self) -> usize {
        self.engine.active_constraint_count()
    }

    pub fn particle_count(&self) -> usize {
        self.engine.particle_count()
    }
}
