// src/core/html.rs
// Low-level HTML scanning. Deliberately naive: tag names are matched
// case-insensitively on ASCII, nothing is tokenized.

/// Find the next complete tag block at or after `from` in `lc`, which must be the
/// ASCII-lowercased copy of the document (byte offsets are shared with the original).
/// Returns `(start, end)` from the opening `<` to past the closing tag.
fn next_tag_block_lc(lc: &str, open_tag: &str, close_tag: &str, from: usize) -> Option<(usize, usize)> {
    let start = lc.get(from..)?.find(open_tag)? + from;
    let open_end = lc[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(close_tag)?;
    Some((start, open_end + end_rel + close_tag.len()))
}

/// Given a complete block like `<script ...>INNER</script>`, return INNER.
pub fn inner_after_open_tag(block: &str) -> &str {
    if let (Some(open_end), Some(close_start)) = (block.find('>'), block.rfind('<')) {
        if close_start > open_end {
            return &block[open_end + 1..close_start];
        }
    }
    ""
}

/// Text content of every `<script>` element, in document order.
pub fn script_bodies(doc: &str) -> Vec<&str> {
    // ASCII lowercasing keeps byte offsets valid for `doc`.
    let lc = doc.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_lc(&lc, "<script", "</script>", pos) {
        out.push(inner_after_open_tag(&doc[s..e]));
        pos = e;
    }
    out
}

/// Every script whose text contains `marker`, in document order.
pub fn scripts_containing<'a>(doc: &'a str, marker: &str) -> Vec<&'a str> {
    script_bodies(doc).into_iter().filter(|body| body.contains(marker)).collect()
}
