use sparkvibe_rs::Mood;
use sparkvibe_rs::fallback::detect_mood;

#[test]
fn keywords_pick_the_mood() {
    let (mood, hits) = detect_mood("I feel great and excited today");
    assert_eq!(mood, Mood::Happy);
    assert_eq!(hits, vec!["great".to_string(), "excited".to_string()]);

    assert_eq!(detect_mood("so TIRED, totally exhausted").0, Mood::Tired);
    assert_eq!(detect_mood("work has me stressed and worried").0, Mood::Anxious);
}

#[test]
fn negated_keywords_do_not_count() {
    let (mood, hits) = detect_mood("not happy, just sad");
    assert_eq!(mood, Mood::Sad);
    assert_eq!(hits, vec!["sad".to_string()]);
}

#[test]
fn no_keywords_is_neutral() {
    let (mood, hits) = detect_mood("went to the shop");
    assert_eq!(mood, Mood::Neutral);
    assert!(hits.is_empty());
    assert_eq!(detect_mood("").0, Mood::Neutral);
}

#[test]
fn ties_go_to_the_earlier_mood() {
    assert_eq!(detect_mood("happy but sad").0, Mood::Happy);
}
