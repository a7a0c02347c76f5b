// tests/history_file_store.rs
//
// File-backed history: persistence across store instances, read-failure
// tolerance and records written by older dashboard versions.

use std::fs;

use cyberbully_detector::history::{FileKv, KvStore};
use cyberbully_detector::{analyze, HistoryFilter, HistoryStore, KindFilter, KvHistoryStore};

#[test]
fn survives_reopen_and_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    {
        let store = KvHistoryStore::new(FileKv::new(&path));
        store.append(&analyze("first message").unwrap()).unwrap();
        store.append(&analyze("you stupid loser").unwrap()).unwrap();
    }

    let store = KvHistoryStore::new(FileKv::new(&path));
    let all = store.list(&HistoryFilter::default());
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].text, "you stupid loser");
    assert_eq!(all[1].text, "first message");

    let flagged = store.list(&HistoryFilter::default().kind(KindFilter::Bullying));
    assert_eq!(flagged.len(), 1);
}

#[test]
fn default_capacity_is_fifty() {
    let dir = tempfile::tempdir().unwrap();
    let store = KvHistoryStore::new(FileKv::new(dir.path().join("h.json")));
    for i in 0..55 {
        store.append(&analyze(&format!("note {i}")).unwrap()).unwrap();
    }
    let all = store.list(&HistoryFilter::default());
    assert_eq!(all.len(), 50);
    assert_eq!(all[0].text, "note 54");
    assert_eq!(all[49].text, "note 5");
}

#[test]
fn stored_results_are_identical_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("h.json");
    let r = analyze("I hate you so much, go kill yourself").unwrap();

    KvHistoryStore::new(FileKv::new(&path)).append(&r).unwrap();
    let back = KvHistoryStore::new(FileKv::new(&path)).list(&HistoryFilter::default());
    assert_eq!(back, vec![r]);
}

#[test]
fn unreadable_history_is_empty_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("h.json");
    fs::write(&path, "garbage").unwrap();

    let store = KvHistoryStore::new(FileKv::new(&path));
    assert!(store.list(&HistoryFilter::default()).is_empty());
    assert_eq!(store.stats().total, 0);

    // a write replaces the garbage
    store.append(&analyze("after garbage").unwrap()).unwrap();
    assert_eq!(store.list(&HistoryFilter::default()).len(), 1);

    // value present but not a list of results
    let kv = FileKv::new(&path);
    kv.set("analysisResults", "{\"oops\":true}".into()).unwrap();
    let store = KvHistoryStore::new(kv);
    assert!(store.list(&HistoryFilter::default()).is_empty());
}

#[test]
fn reads_records_with_millisecond_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("h.json");
    let records = r#"[{
        "id": "1700000000000",
        "text": "You are so UGLY",
        "isBullying": true,
        "confidence": 0.55,
        "models": {
            "svm": {"prediction": true, "confidence": 0.4},
            "logisticRegression": {"prediction": true, "confidence": 0.75},
            "naiveBayes": {"prediction": true, "confidence": 0.5}
        },
        "preprocessing": {
            "originalTokens": ["you","are","so","ugly"],
            "filteredTokens": ["so","ugly"],
            "stemmedTokens": ["so","ugly"],
            "tfidfVector": [0,0,1.7538,0,0,0,0,0,0,0]
        },
        "timestamp": "2023-11-14T22:13:20.000Z"
    }]"#;
    FileKv::new(&path)
        .set("analysisResults", records.to_string())
        .unwrap();

    let store = KvHistoryStore::new(FileKv::new(&path));
    let found = store.list(&HistoryFilter::default().search("ugly"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].timestamp.timestamp_millis(), 1_700_000_000_000);

    assert!(store.remove("1700000000000").unwrap());
    assert!(store.list(&HistoryFilter::default()).is_empty());
}

#[test]
fn clear_removes_only_history_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("h.json");
    let kv = FileKv::new(&path);
    kv.set("otherKey", "keep me".into()).unwrap();

    let store = KvHistoryStore::new(kv);
    store.append(&analyze("hello").unwrap()).unwrap();
    store.clear().unwrap();
    assert!(store.list(&HistoryFilter::default()).is_empty());
    assert_eq!(
        FileKv::new(&path).get("otherKey").unwrap().as_deref(),
        Some("keep me")
    );
}
