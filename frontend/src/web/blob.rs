//! 文件与 Object URL 封装
//!
//! - `SelectedFile`: 用户选择的文件（拖放或文件选择器）
//! - `ObjectUrl`: `URL.createObjectURL` 的 RAII 包装，drop 时自动 revoke
//! - `save_bytes`: 触发浏览器下载

use rxlens_shared::upload::{UploadSource, is_previewable};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// 用户选择的文件
#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    mime_type: String,
    size: f64,
    handle: Option<web_sys::File>,
}

impl SelectedFile {
    pub fn from_file(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            mime_type: file.type_(),
            size: file.size(),
            handle: Some(file),
        }
    }

    /// 没有浏览器句柄的文件描述
    #[cfg(test)]
    pub fn detached(name: &str, mime_type: &str, size: f64) -> Self {
        Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
            handle: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> Option<&web_sys::File> {
        self.handle.as_ref()
    }

    pub fn size_label(&self) -> String {
        format_size(self.size)
    }
}

impl UploadSource for SelectedFile {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// 人类可读的文件大小
pub fn format_size(bytes: f64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    if !bytes.is_finite() || bytes < 0.0 {
        return "0 B".to_string();
    }
    if bytes >= MB {
        format!("{:.1} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{} B", bytes as u64)
    }
}

/// Object URL，drop 时 revoke
#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    pub fn for_blob(blob: &Blob) -> Option<Self> {
        Url::create_object_url_with_blob(blob)
            .ok()
            .map(|url| Self { url })
    }

    /// 图片预览；PDF 或没有句柄时返回 None
    pub fn preview(file: &SelectedFile) -> Option<Self> {
        if !is_previewable(file.mime_type()) {
            return None;
        }
        Self::for_blob(file.handle()?)
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.url);
    }
}

/// 把字节保存为文件
///
/// 临时 Object URL 在点击后立即释放。
pub fn save_bytes(bytes: &[u8], content_type: &str, filename: &str) -> Result<(), String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let bag = BlobPropertyBag::new();
    bag.set_type(content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)
        .map_err(|e| format!("{:?}", e))?;
    let url = ObjectUrl::for_blob(&blob).ok_or("could not create object URL")?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("document is not available")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "not an anchor element")?;
    anchor.set_href(url.as_str());
    anchor.set_download(filename);

    let body = document.body().ok_or("document has no body")?;
    body.append_child(&anchor).map_err(|e| format!("{:?}", e))?;
    anchor.click();
    anchor.remove();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512.0), "512 B");
        assert_eq!(format_size(2048.0), "2.0 KB");
        assert_eq!(format_size(3.5 * 1024.0 * 1024.0), "3.5 MB");
        assert_eq!(format_size(f64::NAN), "0 B");
    }

    #[test]
    fn test_selected_file_is_an_upload_source() {
        let file = SelectedFile::detached("rx.png", "image/png", 10.0);
        assert_eq!(file.file_name(), "rx.png");
        assert_eq!(file.mime_type(), "image/png");
        assert!(file.handle().is_none());
    }
}
