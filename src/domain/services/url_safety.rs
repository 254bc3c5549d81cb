// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::domain::models::import::UrlValidation;
use crate::domain::models::task::ResourceType;

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];
const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// 10.0.0.0/8、172.16.0.0/12、192.168.0.0/16 的点分前缀，只锚定开头，
/// `10.0.0.1.nip.io` 这类以私有地址开头的主机名同样命中
static PRIVATE_HOST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(10(\.\d{1,3}){3}|172\.(1[6-9]|2\d|3[01])(\.\d{1,3}){2}|192\.168(\.\d{1,3}){2})")
        .unwrap()
});

/// 验证资源 URL 是否有效且安全 (防止 SSRF)
///
/// 规则按顺序检查，第一个失败的规则决定原因：
/// 1. 必须能解析为绝对 URL
/// 2. 协议只能是 http 或 https
/// 3. 不能指向本地地址
/// 4. 不能指向私有网络地址
/// 5. 路径必须以 `.m3u8` 或 `.mp4` 结尾（允许带查询参数）
///
/// 只检查 URL 文本本身，不做 DNS 解析；私有地址按主机名前缀匹配。
pub fn validate_resource_url(url_str: &str) -> UrlValidation {
    let parsed = match check_target(url_str) {
        Ok(parsed) => parsed,
        Err(reason) => return UrlValidation::invalid(reason),
    };

    if infer_resource_type(&parsed).is_none() {
        return UrlValidation::invalid("URL必须指向一个 .m3u8 或 .mp4 文件");
    }

    UrlValidation::valid()
}

/// 只做协议与 SSRF 检查（规则 1-4），不限制扩展名
///
/// 手动创建图片任务时使用，成功时返回解析后的 URL。
pub fn check_target(url_str: &str) -> Result<Url, String> {
    let url_str = url_str.trim();
    if url_str.is_empty() {
        return Err("URL不能为空".to_string());
    }

    let parsed = Url::parse(url_str).map_err(|_| "URL格式无效".to_string())?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(format!("不支持的协议: {}:", scheme));
    }

    let host = parsed.host_str().unwrap_or_default();
    if LOOPBACK_HOSTS.contains(&host) {
        return Err("禁止使用本地地址".to_string());
    }

    if PRIVATE_HOST_RE.is_match(host) {
        return Err("禁止使用私有网络地址".to_string());
    }

    Ok(parsed)
}

/// 根据路径扩展名推断资源类型，只识别 `.m3u8` 和 `.mp4`
pub fn infer_resource_type(url: &Url) -> Option<ResourceType> {
    let path = url.path().to_lowercase();
    if path.ends_with(".m3u8") {
        Some(ResourceType::Hls)
    } else if path.ends_with(".mp4") {
        Some(ResourceType::Mp4)
    } else {
        None
    }
}

/// 手动创建任务时的类型识别，额外识别常见图片扩展名
pub fn infer_manual_resource_type(url_str: &str) -> Option<ResourceType> {
    let parsed = Url::parse(url_str.trim()).ok()?;
    infer_resource_type(&parsed).or_else(|| {
        let path = parsed.path().to_lowercase();
        IMAGE_EXTENSIONS
            .iter()
            .any(|ext| path.ends_with(ext))
            .then_some(ResourceType::Image)
    })
}

/// 校验可选的直播间URL：只要求是 http(s) 绝对地址
pub fn is_valid_page_url(url_str: &str) -> bool {
    Url::parse(url_str.trim())
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "url_safety_test.rs"]
mod tests;
