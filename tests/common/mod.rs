// tests/common/mod.rs
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("thesaurus_scrape_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

pub fn similar(slug: &str, similarity: i64) -> Value {
    json!({
        "term": slug.replace('-', " "),
        "similarity": similarity.to_string(),
        "isVulgar": 0,
        "isInformal": 0,
        "targetTerm": slug.replace('-', " "),
        "targetSlug": slug,
    })
}

/// Word API data with one verb sense.
pub fn word_api(entry: &str, synonyms: &[&str], antonyms: &[&str]) -> Value {
    json!({
        "entry": entry,
        "inflections": [],
        "posTabs": [{
            "definition": format!("definition of {entry}"),
            "pos": "verb",
            "synonyms": synonyms.iter().map(|s| similar(s, 100)).collect::<Vec<_>>(),
            "antonyms": antonyms.iter().map(|s| similar(s, 50)).collect::<Vec<_>>(),
            "isInformal": 0,
            "isVulgar": 0,
            "note": null,
        }],
        "exampleSentences": [],
    })
}

/// A page the way the site renders it: state assigned in one of several scripts,
/// unquoted keys and `undefined` sprinkled in.
pub fn page_for(api: &Value) -> String {
    let search = serde_json::to_string(&json!({ "tunaApiData": api, "pageMeta": null })).unwrap();
    format!(
        r#"<!DOCTYPE html><html><head>
<script src="/static/app.js"></script>
<script>window.dataLayer = window.dataLayer || [];</script>
</head><body><div id="root"></div>
<script>window.INITIAL_STATE = {{config: {{ads: undefined, locale: 'en-US',}}, searchData: {search},}};</script>
</body></html>"#
    )
}
