// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use download_center::domain::models::import::{
    CsvRow, COLUMN_LIVEROOM_ID, COLUMN_PLAY_URL, COLUMN_TITLE,
};
use download_center::domain::services::csv_sanitizer::sanitize_for_csv;
use download_center::domain::services::import_validator::CsvImportValidator;
use download_center::domain::services::url_safety::validate_resource_url;
use download_center::domain::services::video_id::{
    generate_video_id, is_valid_liveroom_id, is_valid_video_id, pad_liveroom_id,
};
use download_center::infrastructure::csv::csv_reader::CsvDocument;

fn row(index: usize, id: &str, title: &str, url: &str) -> CsvRow {
    CsvRow::from_pairs(
        index,
        [
            (COLUMN_LIVEROOM_ID, id),
            (COLUMN_TITLE, title),
            (COLUMN_PLAY_URL, url),
        ],
    )
}

/// 接受与拒绝恰好划分所有行，且都保持输入顺序
#[test]
fn accepted_and_rejected_partition_input_in_order() {
    let urls = [
        "http://a.com/v.m3u8",
        "http://localhost/v.m3u8",
        "https://b.com/v.mp4?token=1",
        "ftp://c.com/v.mp4",
        "http://172.20.0.1/v.mp4",
        "https://d.com/v.gif",
    ];
    let rows: Vec<CsvRow> = (0..60)
        .map(|i| row(i, &(i + 1).to_string(), "t", urls[i % urls.len()]))
        .collect();
    let headers: Vec<String> = [COLUMN_LIVEROOM_ID, COLUMN_TITLE, COLUMN_PLAY_URL]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let report = CsvImportValidator::default()
        .validate(&headers, &rows)
        .unwrap();

    assert_eq!(report.total_rows(), rows.len());
    assert_eq!(report.accepted.len(), 20);
    assert_eq!(report.rejected.len(), 40);

    let accepted: Vec<usize> = report.accepted.iter().map(|c| c.row_index).collect();
    let rejected: Vec<usize> = report.rejected.iter().map(|r| r.row_index).collect();
    assert!(accepted.windows(2).all(|w| w[0] < w[1]));
    assert!(rejected.windows(2).all(|w| w[0] < w[1]));

    let mut all: Vec<usize> = accepted.iter().chain(rejected.iter()).copied().collect();
    all.sort_unstable();
    assert_eq!(all, (0..60).collect::<Vec<_>>());

    for candidate in &report.accepted {
        assert!(is_valid_liveroom_id(&candidate.liveroom_id));
        assert!(is_valid_video_id(&candidate.video_id));
        assert!(candidate.video_id.starts_with(&candidate.liveroom_id));
    }
}

#[test]
fn url_rules_apply_in_order() {
    // 协议检查先于地址检查
    assert_eq!(
        validate_resource_url("file://localhost/etc/passwd").reason,
        "不支持的协议: file:"
    );
    // 地址检查先于扩展名检查
    assert_eq!(
        validate_resource_url("http://localhost/index.html").reason,
        "禁止使用本地地址"
    );
    assert_eq!(
        validate_resource_url("http://10.1.2.3/index.html").reason,
        "禁止使用私有网络地址"
    );
    assert!(validate_resource_url("https://cdn.example.com/live/index.m3u8?t=1").is_valid);
}

#[test]
fn sanitized_text_never_starts_with_formula_prefix() {
    for input in ["=1+1", "+cmd", "-2", "@SUM(A1)", "plain", "", "'quoted"] {
        let out = sanitize_for_csv(input);
        assert!(!out.starts_with(&['=', '+', '-', '@'][..]), "{}", out);
        assert!(out.ends_with(input));
    }
}

#[test]
fn padded_ids_are_ten_digits() {
    for raw in ["1", "12", "123456789", "1234567890"] {
        let padded = pad_liveroom_id(raw);
        assert_eq!(padded.len(), 10);
        assert!(padded.ends_with(raw));
        assert!(is_valid_video_id(&generate_video_id(&padded)));
    }
}

#[test]
fn parsed_document_feeds_validator() {
    let content = "直播间ID,标题,播放url\r\n42,标题,https://a.com/v.mp4\r\n";
    let doc = CsvDocument::parse(content.as_bytes()).unwrap();
    let report = CsvImportValidator::default()
        .validate(&doc.headers, &doc.rows)
        .unwrap();
    assert_eq!(report.accepted.len(), 1);
    assert_eq!(report.accepted[0].liveroom_id, "0000000042");
}
