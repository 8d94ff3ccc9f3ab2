// Trunk entrypoint for the scoreboard overlay. In the browser the wasm
// `start` hook mounts it; a host binary has no page and mounts nothing.

fn main() {
    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    scoreboard_web::start();
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    scoreboard_web::start();
}
