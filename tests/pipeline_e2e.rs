// tests/pipeline_e2e.rs
//
// End-to-end checks of the public analysis API with the built-in lexicon.

use cyberbully_detector::analyze::scoring::negative_score;
use cyberbully_detector::analyze::{remove_stopwords, stem_word, tokenize, vectorize};
use cyberbully_detector::{analyze, AnalysisResult, AnalyzeError, Analyzer, Lexicon};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn preprocessing_examples() {
    assert_eq!(tokenize("  Hello   World  "), vec!["hello", "world"]);
    assert!(tokenize("").is_empty());

    let toks: Vec<String> = ["the", "cat", "is", "here"].iter().map(|s| s.to_string()).collect();
    assert_eq!(remove_stopwords(&toks, Lexicon::builtin()), vec!["cat", "here"]);

    assert_eq!(stem_word("running"), "runn");
    assert_eq!(stem_word("jumped"), "jump");
    assert_eq!(stem_word("this"), "thi");
}

#[test]
fn bullying_message_is_flagged() {
    let text = "I hate you so much, go kill yourself";
    assert!(negative_score(text, Lexicon::builtin()) >= 2);

    let r = analyze(text).unwrap();
    assert!(r.models.svm.prediction);
    assert!(r.models.logistic_regression.prediction);
    assert!(r.models.naive_bayes.prediction);
    assert!(r.is_bullying);
    assert_eq!(r.votes(), 3);

    assert_eq!(
        r.preprocessing.stemmed_tokens,
        vec!["hate", "so", "much,", "go", "kill", "yourself"]
    );
    let v = &r.preprocessing.tfidf_vector;
    assert!(approx(v[0], 100f64.ln() / 6.0));
    assert!(approx(v[5], (100.0f64 / 6.0).ln() / 6.0));
}

#[test]
fn safe_message_is_not_flagged() {
    let r = analyze("Have a wonderful day").unwrap();
    assert!(r.preprocessing.tfidf_vector.iter().all(|x| *x == 0.0));

    assert!(!r.models.svm.prediction);
    assert_eq!(r.models.svm.confidence, 0.0);

    let sig = 1.0 / (1.0 + 1f64.exp());
    assert!(!r.models.logistic_regression.prediction);
    assert!(approx(r.models.logistic_regression.confidence, sig));

    assert!(!r.models.naive_bayes.prediction);
    assert_eq!(r.models.naive_bayes.confidence, 0.0);

    assert!(!r.is_bullying);
    assert!(approx(r.confidence, sig / 3.0));
    assert!((r.confidence - 0.0896).abs() < 1e-3);
}

#[test]
fn overall_confidence_is_mean_of_models() {
    let r = analyze("you ugly dumb loser, nobody would attack a threat like you").unwrap();
    let mean = r.models.iter().map(|m| m.confidence).sum::<f64>() / 3.0;
    assert!(approx(r.confidence, mean));
}

#[test]
fn keyword_count_uses_raw_text_not_tokens() {
    // stemmed token "threaten" feeds the vector; the keyword hit comes from the raw text
    let r = analyze("She threatened them").unwrap();
    assert_eq!(r.preprocessing.filtered_tokens, vec!["threatened"]);
    assert_eq!(r.preprocessing.stemmed_tokens, vec!["threaten"]);
    assert!(r.preprocessing.tfidf_vector[9] > 0.0);
    assert_eq!(negative_score(&r.text, Lexicon::builtin()), 1);
}

#[test]
fn vector_is_deterministic_and_sized() {
    let lx = Lexicon::builtin();
    let toks = tokenize("Stupid stupid ugly people hurting others");
    let a = vectorize(&toks, lx);
    let b = vectorize(&toks, lx);
    assert_eq!(a, b);
    assert_eq!(a.len(), lx.vocabulary().len());
}

#[test]
fn blank_text_is_rejected() {
    assert_eq!(analyze("").unwrap_err(), AnalyzeError::EmptyText);
    assert_eq!(analyze("\n \t").unwrap_err(), AnalyzeError::EmptyText);
}

#[test]
fn odd_inputs_still_produce_results() {
    let long = "wow ".repeat(10_000);
    for text in ["…!!!", "Ünïcödé ДУРАК 愚か", long.as_str(), "s", "ing"] {
        let r = analyze(text).unwrap();
        assert!(r.confidence.is_finite());
        assert!(r.preprocessing.tfidf_vector.iter().all(|x| x.is_finite()));
    }
}

#[test]
fn custom_lexicon_drives_vector_length() {
    let lx = Lexicon::new(
        vec!["the".into()],
        vec!["mean".into(), "rude".into()],
        vec!["mean".into(), "rude".into(), "nasty".into()],
    )
    .unwrap();
    let r = Analyzer::new(&lx).analyze("the rude and nasty kid").unwrap();
    assert_eq!(r.preprocessing.tfidf_vector.len(), 2);
    // "and" is not a stopword in this lexicon
    assert_eq!(r.preprocessing.filtered_tokens, vec!["rude", "and", "nasty", "kid"]);
}

#[test]
fn result_round_trips_through_json() {
    let r = analyze("you are worthless and pathetic").unwrap();
    let s = serde_json::to_string(&r).unwrap();
    let back: AnalysisResult = serde_json::from_str(&s).unwrap();
    assert_eq!(back.id, r.id);
    assert_eq!(back.text, r.text);
    assert_eq!(back.is_bullying, r.is_bullying);
    assert_eq!(back.confidence, r.confidence);
    assert_eq!(back.models, r.models);
    assert_eq!(back.preprocessing, r.preprocessing);
    assert_eq!(back.timestamp, r.timestamp);
}
