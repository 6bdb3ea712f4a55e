//! Display toggles set from the UI, read once per rendered frame

use wasm_bindgen::prelude::*;
use std::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Flip horizontally, selfie-camera style
    pub mirror: bool,
    pub show_skeleton: bool,
    pub show_arrows: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mirror: false,
            show_skeleton: true,
            show_arrows: true,
        }
    }
}

thread_local! {
    static OPTIONS: Cell<RenderOptions> = Cell::new(RenderOptions::default());
}

pub(crate) fn current() -> RenderOptions {
    OPTIONS.with(|o| o.get())
}

fn edit(f: impl FnOnce(&mut RenderOptions)) {
    OPTIONS.with(|o| {
        let mut options = o.get();
        f(&mut options);
        o.set(options);
    });
}

#[wasm_bindgen]
pub fn set_mirror(mirror: bool) {
    edit(|o| o.mirror = mirror);
}

#[wasm_bindgen]
pub fn set_show_skeleton(show: bool) {
    edit(|o| o.show_skeleton = show);
}

#[wasm_bindgen]
pub fn set_show_arrows(show: bool) {
    edit(|o| o.show_arrows = show);
}
