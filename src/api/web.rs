//! Browser `fetch` transport

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

use super::{ApiError, HttpRequest, HttpResponse, Transport};

#[derive(Debug, Clone, Copy, Default)]
pub struct WebTransport;

fn js_error(err: JsValue) -> ApiError {
    ApiError::Network(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl Transport for WebTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let headers = Headers::new().map_err(js_error)?;
        for (name, value) in &request.headers {
            headers.set(name, value).map_err(js_error)?;
        }

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_headers(&headers);
        init.set_credentials(RequestCredentials::SameOrigin);
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let js_request = Request::new_with_str_and_init(&request.url, &init).map_err(js_error)?;
        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;

        let value = JsFuture::from(window.fetch_with_request(&js_request)).await.map_err(js_error)?;
        let response: Response = value.dyn_into().map_err(js_error)?;
        let text = JsFuture::from(response.text().map_err(js_error)?).await.map_err(js_error)?;

        Ok(HttpResponse { status: response.status(), body: text.as_string().unwrap_or_default() })
    }
}
