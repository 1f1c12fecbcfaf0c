use crate::{adapter_features, Bootstrap};
use js_sys::{Array, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen(js_name = Bootstrap)]
pub struct WebBootstrap {
    inner: Bootstrap,
}

#[wasm_bindgen(js_class = Bootstrap)]
impl WebBootstrap {
    /// Feature identifiers of the adapter, as numbers.
    pub fn features(&self) -> Array {
        adapter_features(self.inner.backend_ref(), self.inner.adapter())
            .into_iter()
            .map(|feature| JsValue::from(feature.0))
            .collect()
    }

    pub fn report(&self) -> Result<String, JsValue> {
        self.inner
            .report()
            .map(|report| report.to_string())
            .map_err(|err| err.to_string().into())
    }

    pub fn surface_format(&self) -> Result<String, JsValue> {
        self.inner
            .surface_format()
            .map(|format| format!("{:?}", format))
            .map_err(|err| err.to_string().into())
    }
}

#[wasm_bindgen]
pub fn setup(canvas: HtmlCanvasElement) -> Promise {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    future_to_promise(async move {
        match Bootstrap::new(canvas).await {
            Ok(inner) => Ok(WebBootstrap { inner }.into()),
            Err(err) => Err(err.to_string().into()),
        }
    })
}
