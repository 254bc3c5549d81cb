// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 手动创建下载任务请求DTO
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateTaskRequestDto {
    /// 资源URL（必填）
    #[validate(
        length(min = 1, message = "缺少必填字段: resource_url"),
        url(message = "URL格式无效")
    )]
    pub resource_url: String,

    /// 资源类型（hls, mp4, image），缺省时按URL推断
    pub resource_type: Option<String>,

    /// 直播间ID（必填），不足 10 位会补零
    #[validate(length(min = 1, message = "缺少必填字段: liveroom_id"))]
    pub liveroom_id: String,

    /// 直播间标题
    #[validate(length(max = 500))]
    pub liveroom_title: Option<String>,

    /// 直播间URL
    #[validate(url(message = "直播间URL格式无效"))]
    pub liveroom_url: Option<String>,

    /// 视频ID，缺省时自动生成
    pub video_id: Option<String>,
}
