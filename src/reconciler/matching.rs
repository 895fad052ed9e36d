//! ファイル名照合モジュール
//!
//! 参照写真文字列と画像ファイル名を正規化キーに変換し、
//! 3段階の照合（完全一致 → 包含 → 接頭辞・接尾辞除去後の包含）で
//! 対応する画像を探す。

use crate::collector::ImageRecord;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

lazy_static! {
    /// 英数字・ハイフン・アンダースコア・ピリオド以外を除去
    static ref NON_KEY_CHARS: Regex = Regex::new(r"[^\w\-.]").unwrap();
    /// 汎用接頭辞 (img_ / image- / photo / pic)
    static ref GENERIC_PREFIX: Regex = Regex::new(r"^(img|image|photo|pic)[_-]?").unwrap();
    /// 汎用接尾辞
    static ref GENERIC_SUFFIX: Regex = Regex::new(r"[_-]?(img|image|photo|pic)$").unwrap();
}

/// ファイル名を比較キーに正規化する
///
/// 拡張子を除去し、英数字・`-`・`_`・`.` 以外を取り除いて小文字化する。
/// 表記の揺れ（大文字小文字・空白・記号）を吸収するためのキーであり、
/// 表示用の文字列ではない。
pub fn normalize_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.to_string());
    NON_KEY_CHARS.replace_all(&stem, "").to_lowercase()
}

/// 汎用接頭辞・接尾辞（img/image/photo/pic）を除去する
fn strip_generic_affixes(key: &str) -> String {
    let stripped = GENERIC_PREFIX.replace(key, "");
    GENERIC_SUFFIX.replace(&stripped, "").to_string()
}

/// 区切り文字を除いた包含比較用の形
///
/// "plant-02" と "plant02" のような区切りの揺れを包含段階で許容する。
fn squash(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '-' | '_' | '.'))
        .collect()
}

fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// 参照写真に対応する画像を探す
///
/// 段階的に緩い照合を順に試し、最初にヒットした画像を返す。
/// 同段階内の優先順位はファイル名の辞書順（マップの列挙順）。
pub fn find_matching_image<'a>(
    ref_photo: &str,
    images: &'a BTreeMap<String, ImageRecord>,
) -> Option<(&'a str, &'a ImageRecord)> {
    let ref_clean = normalize_filename(ref_photo);
    if ref_clean.is_empty() {
        return None;
    }

    // 1. 完全一致
    for (filename, record) in images {
        if normalize_filename(filename) == ref_clean {
            return Some((filename.as_str(), record));
        }
    }

    // 2. 包含（どちらかがどちらかを含む、区切り文字は無視）
    let ref_squashed = squash(&ref_clean);
    for (filename, record) in images {
        let image_squashed = squash(&normalize_filename(filename));
        if contains_either(&ref_squashed, &image_squashed) {
            return Some((filename.as_str(), record));
        }
    }

    // 3. 汎用接頭辞・接尾辞を除去して包含
    let ref_core = squash(&strip_generic_affixes(&ref_clean));
    if ref_core.is_empty() {
        return None;
    }
    for (filename, record) in images {
        let image_core = squash(&strip_generic_affixes(&normalize_filename(filename)));
        if !image_core.is_empty() && contains_either(&ref_core, &image_core) {
            return Some((filename.as_str(), record));
        }
    }

    None
}
