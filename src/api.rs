//! Browser glue for the training service: the gateway, file reading and
//! client-side downloads.

use js_sys::{Array, ArrayBuffer, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use trainboard_core::config::ApiConfig;
use trainboard_core::model::UploadFile;
use trainboard_core::{Artifact, ArtifactSink, GatewayError, HttpGateway};

/// Gateway for the service served from the page's own origin.
pub fn browser_gateway(api: &ApiConfig) -> Result<HttpGateway, GatewayError> {
    let origin = web_sys::window()
        .ok_or_else(|| GatewayError::Address("no window".into()))?
        .location()
        .origin()
        .map_err(|e| GatewayError::Address(js_message(&e)))?;
    HttpGateway::from_origin(&origin, api)
}

/// Saves artifacts as browser downloads.
pub struct BrowserDownload;

impl ArtifactSink for BrowserDownload {
    fn save(&self, artifact: &Artifact) -> Result<(), GatewayError> {
        save_bytes(&artifact.file_name, &artifact.content_type, &artifact.bytes)
            .map_err(|e| GatewayError::Artifact(js_message(&e)))
    }
}

/// Offer `bytes` to the user as a file download.
pub fn save_bytes(file_name: &str, content_type: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    web_sys::Url::revoke_object_url(&url)
}

/// Read a picked or dropped file into memory.
pub async fn read_upload(file: web_sys::File) -> Result<UploadFile, String> {
    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {}", js_message(&e)))?
        .dyn_into()
        .map_err(|_| "Failed to convert to ArrayBuffer".to_string())?;

    Ok(UploadFile {
        name: file.name(),
        bytes: Uint8Array::new(&array_buffer).to_vec(),
    })
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
