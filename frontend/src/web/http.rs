//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 提供简洁的 HTTP 客户端接口。
//! API 客户端只依赖 [`HttpTransport`]，测试时替换为 `MockTransport`。

use async_trait::async_trait;
use rxlens_shared::protocol::HttpMethod;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, Response};

use super::blob::SelectedFile;
use crate::error::HttpError;

/// 请求体
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(String),
    /// multipart/form-data，只含一个文件字段
    File { field: String, file: SelectedFile },
}

/// HTTP 请求
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// 添加请求头
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置 JSON 请求体
    pub fn json(self, body: String) -> Self {
        let mut req = self.header("Content-Type", "application/json");
        req.body = RequestBody::Json(body);
        req
    }

    /// 设置 multipart 请求体
    ///
    /// Content-Type（含 boundary）由浏览器生成。
    pub fn multipart(mut self, field: &str, file: SelectedFile) -> Self {
        self.body = RequestBody::File {
            field: field.to_string(),
            file,
        };
        self
    }

    /// 按名称查找请求头（不区分大小写）
    #[cfg(test)]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP 响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输层抽象
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// 基于 `window.fetch` 的传输实现
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    fn build_request(request: &HttpRequest) -> Result<Request, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("create Headers: {:?}", e)))?;

        for (key, value) in &request.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("set header: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());
        opts.set_headers(&headers.into());

        match &request.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
            RequestBody::File { field, file } => {
                let handle = file.handle().ok_or_else(|| {
                    HttpError::RequestBuildFailed("file is no longer available".to_string())
                })?;
                let form = FormData::new()
                    .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;
                form.append_with_blob_and_filename(field, handle, file.name())
                    .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;
                opts.set_body(&form.into());
            }
        }

        Request::new_with_str_and_init(&request.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))
    }
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let js_request = Self::build_request(&request)?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("window is not available".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::ResponseReadFailed(format!("not a Response: {:?}", e)))?;

        let headers = response.headers();
        let content_type = headers.get("content-type").ok().flatten();
        let content_disposition = headers.get("content-disposition").ok().flatten();

        let promise = response
            .array_buffer()
            .map_err(|e| HttpError::ResponseReadFailed(format!("{:?}", e)))?;
        let buffer = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseReadFailed(format!("{:?}", e)))?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok(HttpResponse {
            status: response.status(),
            content_type,
            content_disposition,
            body,
        })
    }
}

// ============================================================================
// 测试替身
// ============================================================================

#[cfg(test)]
pub use mock::MockTransport;

#[cfg(test)]
mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct MockState {
        responses: VecDeque<Result<HttpResponse, HttpError>>,
        requests: Vec<HttpRequest>,
    }

    /// 按顺序返回预设响应，并记录收到的请求
    #[derive(Clone, Default)]
    pub struct MockTransport {
        state: Rc<RefCell<MockState>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, response: HttpResponse) -> &Self {
            self.state.borrow_mut().responses.push_back(Ok(response));
            self
        }

        pub fn respond_json(&self, status: u16, body: &str) -> &Self {
            self.respond(HttpResponse {
                status,
                content_type: Some("application/json".to_string()),
                content_disposition: None,
                body: body.as_bytes().to_vec(),
            })
        }

        pub fn fail(&self, err: HttpError) -> &Self {
            self.state.borrow_mut().responses.push_back(Err(err));
            self
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.state.borrow().requests.clone()
        }

        pub fn request_count(&self) -> usize {
            self.state.borrow().requests.len()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            let mut state = self.state.borrow_mut();
            state.requests.push(request);
            state
                .responses
                .pop_front()
                .unwrap_or_else(|| Err(HttpError::NetworkError("no mock response".to_string())))
        }
    }
}
