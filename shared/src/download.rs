//! 下载文件名解析
//!
//! 支持 `filename="…"`、裸 `filename=…` 与 RFC 5987 的 `filename*=UTF-8''…`，
//! 两者同时存在时以 `filename*` 为准。

/// 从 `Content-Disposition` 头中提取文件名
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in split_params(header) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => extended = decode_ext_value(value.trim()),
            "filename" => plain = Some(unquote(value.trim())),
            _ => {}
        }
    }

    extended
        .or(plain)
        .map(|name| sanitize(&name))
        .filter(|name| !name.is_empty())
}

/// 按 `;` 拆分参数，忽略引号内的分号
fn split_params(header: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, ch) in header.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                parts.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&header[start..]);
    parts
}

fn unquote(value: &str) -> String {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    inner.replace("\\\"", "\"")
}

/// `charset'lang'percent-encoded`
fn decode_ext_value(value: &str) -> Option<String> {
    let mut pieces = value.splitn(3, '\'');
    let charset = pieces.next()?;
    let _lang = pieces.next()?;
    let encoded = pieces.next()?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    urlencoding::decode(encoded).ok().map(|s| s.into_owned())
}

/// 去掉路径部分，防止 `../` 之类的名字
fn sanitize(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_filename() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="report-month.pdf""#),
            Some("report-month.pdf".to_string())
        );
    }

    #[test]
    fn test_bare_filename() {
        assert_eq!(
            filename_from_disposition("attachment; filename=report.csv"),
            Some("report.csv".to_string())
        );
    }

    #[test]
    fn test_extended_filename_wins() {
        let header = r#"attachment; filename="fallback.pdf"; filename*=UTF-8''r%C3%A9sum%C3%A9%202024.pdf"#;
        assert_eq!(
            filename_from_disposition(header),
            Some("résumé 2024.pdf".to_string())
        );
    }

    #[test]
    fn test_semicolon_inside_quotes() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="a;b.pdf""#),
            Some("a;b.pdf".to_string())
        );
    }

    #[test]
    fn test_missing_or_unsafe() {
        assert_eq!(filename_from_disposition("inline"), None);
        assert_eq!(filename_from_disposition(r#"attachment; filename="""#), None);
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="../../etc/passwd""#),
            Some("passwd".to_string())
        );
    }
}
