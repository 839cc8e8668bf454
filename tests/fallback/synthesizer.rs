use reqwest::Method;
use serde_json::{Value, json};
use sparkvibe_rs::{Endpoint, Operation, SvError, Synthesized, Synthesizer, User};

use crate::common;

fn keys(v: &Value) -> Vec<String> {
    let mut k: Vec<String> = v.as_object().unwrap().keys().cloned().collect();
    k.sort();
    k
}

#[test]
fn unknown_endpoint_fails_closed() {
    let err = Operation::resolve(&Method::GET, "/definitely-not-a-route", None).unwrap_err();
    assert!(matches!(err, SvError::NoFallback { .. }), "got {err:?}");

    // Known path, wrong method.
    let err = Operation::resolve(&Method::GET, "/auth/signin", None).unwrap_err();
    assert!(matches!(err, SvError::NoFallback { .. }), "got {err:?}");
}

#[test]
fn malformed_payload_is_a_data_error() {
    let err = Operation::resolve(&Method::POST, "/analyze-mood", Some(&json!({"text": 1}))).unwrap_err();
    assert!(matches!(err, SvError::Data(_)), "got {err:?}");
}

#[test]
fn endpoint_lookup_ignores_slashes_and_query() {
    assert_eq!(Endpoint::lookup(&Method::GET, "leaderboard?limit=3"), Some(Endpoint::Leaderboard));
    assert_eq!(Endpoint::lookup(&Method::GET, "/user/profile/"), Some(Endpoint::Profile));
    assert_eq!(
        Operation::resolve(&Method::GET, "/leaderboard?limit=3", None).unwrap(),
        Operation::Leaderboard { limit: Some(3) }
    );
    for ep in Endpoint::ALL {
        assert_eq!(Endpoint::lookup(&ep.method(), ep.path()), Some(ep));
    }
}

#[test]
fn same_input_gives_the_same_shape() {
    let client = common::offline_client(true);
    let synth = Synthesizer::new(None);
    let session = client.session();

    let ops = [
        Operation::Health,
        Operation::Leaderboard { limit: None },
        Operation::Trending,
        Operation::Profile,
        Operation::Notifications,
        Operation::resolve(&Method::POST, "/analyze-mood", Some(&json!({"textInput": "so tired"}))).unwrap(),
        Operation::resolve(&Method::POST, "/generate-capsule", Some(&json!({"mood": "calm"}))).unwrap(),
        Operation::resolve(
            &Method::POST,
            "/generate-vibe-card",
            Some(&json!({"mood": "happy", "title": "Sunrise hike", "points": 40})),
        )
        .unwrap(),
    ];

    for op in &ops {
        let a = synth.synthesize(op, session).unwrap().into_json().unwrap();
        let b = synth.synthesize(op, session).unwrap().into_json().unwrap();
        assert_eq!(keys(&a), keys(&b), "{op:?}");
        assert_eq!(a["fallback"], Value::Bool(true), "{op:?}");
    }
}

#[test]
fn seeded_synthesizers_agree_on_cosmetic_fields() {
    let client = common::offline_client(true);
    let op = Operation::resolve(&Method::POST, "/generate-capsule", Some(&json!({"mood": "anxious"}))).unwrap();

    let a = Synthesizer::new(Some(11)).synthesize(&op, client.session()).unwrap();
    let b = Synthesizer::new(Some(11)).synthesize(&op, client.session()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn leaderboard_includes_the_local_user() {
    let client = common::offline_client(true);
    let mut me = User::new("me-1", "Mina", "mina@example.com");
    me.total_points = 2000;
    client.session().save("tok", &me).unwrap();

    let synth = Synthesizer::new(Some(1));
    let Synthesized::Leaderboard(board) =
        synth.synthesize(&Operation::Leaderboard { limit: Some(2) }, client.session()).unwrap()
    else {
        panic!("expected a leaderboard");
    };

    assert!(board.fallback);
    let mine = board.entries.iter().find(|e| e.user_id == "me-1").expect("local user listed");
    assert_eq!(mine.rank, 4);
    // Two leaders plus the local user, who stays visible past the limit.
    assert_eq!(board.entries.len(), 3);
    let ranks: Vec<u32> = board.entries.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 4]);
}

#[test]
fn demo_sign_in_persists_a_session() {
    let client = common::offline_client(true);
    let op = Operation::resolve(
        &Method::POST,
        "/auth/signin",
        Some(&json!({"email": "jo.doe@example.com", "password": "pw"})),
    )
    .unwrap();

    let Synthesized::Auth(auth) = Synthesizer::new(Some(3)).synthesize(&op, client.session()).unwrap() else {
        panic!("expected an auth response");
    };
    assert!(auth.success && auth.fallback);
    assert!(auth.token.starts_with("demo-token-"));
    assert_eq!(auth.user.id, "demo-jo-doe");
    assert_eq!(auth.user.name, "Jo");
    assert_eq!(client.session().token().unwrap().as_deref(), Some(auth.token.as_str()));
    assert_eq!(client.session().user().unwrap(), Some(auth.user));
}

#[test]
fn vibe_card_escapes_user_text() {
    let client = common::offline_client(true);
    let op = Operation::resolve(
        &Method::POST,
        "/generate-vibe-card",
        Some(&json!({"mood": "calm", "title": "Tea & <quiet>", "userName": "Ana", "template": "sunrise"})),
    )
    .unwrap();

    let Synthesized::VibeCard(card) = Synthesizer::new(Some(3)).synthesize(&op, client.session()).unwrap() else {
        panic!("expected a card");
    };
    assert_eq!(card.template, "sunrise");
    assert!(card.svg.starts_with("<svg"));
    assert!(card.svg.contains("Tea &amp; &lt;quiet&gt;"));
    assert!(!card.svg.contains("<quiet>"));
    assert!(card.viral_score <= 100);
}

#[test]
fn viral_score_components() {
    use sparkvibe_rs::Mood;
    use sparkvibe_rs::fallback::card::viral_score;

    // 40 base + 8 points + 10 title + 15 happy
    assert_eq!(viral_score(Mood::Happy, "Sunrise hike!", 40, false), 73);
    // Points are capped at 30 and the total at 100.
    assert_eq!(viral_score(Mood::Happy, "Sunrise hike!", 10_000, true), 100);
    // Short title, no bonus.
    assert_eq!(viral_score(Mood::Tired, "Nap", 0, false), 43);
}

#[test]
fn rendered_cards_are_complete_documents() {
    use sparkvibe_rs::Mood;
    use sparkvibe_rs::fallback::card::{TEMPLATES, render_svg};

    for template in TEMPLATES {
        let svg = render_svg(template, Mood::Calm, "Evening walk", Some("Ada"), 30);
        assert!(svg.starts_with("<svg"), "{template}");
        assert!(svg.ends_with("</svg>"), "{template}");
        assert!(svg.contains(r##"fill="#FFFFFF""##), "{template}");
        assert!(svg.contains(">Evening walk</text>"), "{template}");
        assert!(svg.contains(">by Ada</text>"), "{template}");
        assert!(svg.contains(">+30 pts</text>"), "{template}");
    }

    let cosmic = render_svg("cosmic", Mood::Happy, "t", None, 0);
    assert_eq!(cosmic.matches("<circle").count(), 5);
    assert!(!cosmic.contains(">by "));
    let unknown = render_svg("neon", Mood::Happy, "t", None, 0);
    assert_eq!(unknown, render_svg("minimal", Mood::Happy, "t", None, 0));
}
