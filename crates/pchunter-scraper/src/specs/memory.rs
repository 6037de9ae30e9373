//! RAM vs storage.
//!
//! Both are written as `NNgb`. Sizes of exactly 128, 256 or 512 GB are read as
//! storage unless followed by a `ram`/`memory` qualifier; other sizes between
//! 4 and 128 GB are read as RAM.
//!
//! Known limitation: an unqualified `128gb` is always storage, so a 128 GB RAM
//! workstation listing reports its RAM only when the seller writes
//! `128gb ram`.

use std::sync::LazyLock;

use regex::Regex;

static GB_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d+)\s*(?:gb|g|go)\b(?:\s*(ram|memory)\b)?").expect("valid regex")
});
static TB_STORAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([12])\s*(?:tb|t|to)\b").expect("valid regex"));

const RAM_RANGE: std::ops::RangeInclusive<u32> = 4..=128;
const STORAGE_SIZES_GB: [u32; 3] = [128, 256, 512];

/// One `NNgb` occurrence in the text.
struct SizeToken {
    gb: u32,
    ram_qualified: bool,
}

fn size_tokens(q: &str) -> impl Iterator<Item = SizeToken> + '_ {
    GB_SIZE_RE.captures_iter(q).filter_map(|caps| {
        let gb = caps.get(1)?.as_str().parse::<u32>().ok()?;
        Some(SizeToken {
            gb,
            ram_qualified: caps.get(2).is_some(),
        })
    })
}

pub(super) fn extract_ram(q: &str) -> Option<String> {
    size_tokens(q)
        .find(|t| {
            RAM_RANGE.contains(&t.gb) && (t.ram_qualified || !STORAGE_SIZES_GB.contains(&t.gb))
        })
        .map(|t| format!("{}GB", t.gb))
}

/// Terabyte sizes win over any GB storage candidate.
pub(super) fn extract_storage(q: &str) -> Option<String> {
    if let Some(tb) = TB_STORAGE_RE.captures(q).and_then(|caps| caps.get(1)) {
        return Some(format!("{}TB", tb.as_str()));
    }
    size_tokens(q)
        .find(|t| !t.ram_qualified && STORAGE_SIZES_GB.contains(&t.gb))
        .map(|t| format!("{}GB", t.gb))
}
