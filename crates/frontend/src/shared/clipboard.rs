use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Writes `text` to the system clipboard and reports whether it succeeded
pub fn copy_to_clipboard(text: &str, on_done: impl FnOnce(bool) + 'static) {
    let text = text.to_owned();
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            on_done(false);
            return;
        };
        let result = JsFuture::from(window.navigator().clipboard().write_text(&text)).await;
        if let Err(e) = &result {
            log::warn!("clipboard write failed: {:?}", e);
        }
        on_done(result.is_ok());
    });
}
