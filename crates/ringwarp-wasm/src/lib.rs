//! ringwarp WASM - WebAssembly bindings for ringwarp
//!
//! This crate exposes the ringwarp-core circular warp to JavaScript/TypeScript
//! applications. It holds no image processing of its own.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper type for raster data
//! - `warp` - Circular warp and horizontal shift bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { circular_warp, JsRasterImage } from '@ringwarp/wasm';
//!
//! await init();
//!
//! const src = ctx.getImageData(0, 0, w, h);
//! const map = new JsRasterImage(w, h, 4, new Uint8Array(src.data.buffer));
//! const disc = circular_warp(map, 0, 256, 90, true, true);
//! ```

use wasm_bindgen::prelude::*;

mod types;
mod warp;

pub use types::JsRasterImage;
pub use warp::{circular_warp, circular_warp_with_options, horizontal_shift};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
