// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rand::{Rng, TryRngCore};
use regex::Regex;
use tracing::warn;

/// 直播间ID补零后的宽度
pub const LIVEROOM_ID_WIDTH: usize = 10;

const SUFFIX_MIN: u32 = 1000;
const SUFFIX_SPAN: u32 = 9000;

static LIVEROOM_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{9,}$").unwrap());
static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{9,10}_.+$").unwrap());

/// 将直播间ID左侧补零到 10 位，超过 10 位的保持原样
pub fn pad_liveroom_id(raw: &str) -> String {
    format!("{:0>width$}", raw.trim(), width = LIVEROOM_ID_WIDTH)
}

/// 直播间ID格式：至少 9 位数字
pub fn is_valid_liveroom_id(id: &str) -> bool {
    LIVEROOM_ID_RE.is_match(id)
}

/// 视频ID格式：9-10 位数字、下划线、任意后缀
pub fn is_valid_video_id(id: &str) -> bool {
    VIDEO_ID_RE.is_match(id)
}

/// 为补零后的直播间ID生成视频ID：`<直播间ID>_<1000-9999>`
///
/// 随机后缀来自操作系统的密码学安全随机源，并做拒绝采样保证均匀分布。
pub fn generate_video_id(padded_liveroom_id: &str) -> String {
    format!("{}_{}", padded_liveroom_id, random_suffix())
}

fn random_suffix() -> u32 {
    match secure_suffix() {
        Ok(n) => n,
        Err(e) => {
            // 非密码学安全，不能用于任何安全相关的场景
            warn!("OS random source unavailable ({}), falling back to thread rng", e);
            rand::rng().random_range(SUFFIX_MIN..SUFFIX_MIN + SUFFIX_SPAN)
        }
    }
}

fn secure_suffix() -> Result<u32, <OsRng as TryRngCore>::Error> {
    // 大于等于该值的样本会造成取模偏差，需要丢弃重抽
    let zone = (1u64 << 32) - ((1u64 << 32) % SUFFIX_SPAN as u64);
    loop {
        let sample = OsRng.try_next_u32()?;
        if (sample as u64) < zone {
            return Ok(SUFFIX_MIN + sample % SUFFIX_SPAN);
        }
    }
}
