//! SVG vibe-card templates and the viral-score estimate.

use crate::core::Mood;

/// Visual templates, in the order the backend lists them.
pub const TEMPLATES: [&str; 3] = ["cosmic", "sunrise", "minimal"];

const WIDTH: u32 = 600;
const HEIGHT: u32 = 800;

/// Gradient start, gradient end, accent.
const fn palette(mood: Mood) -> (&'static str, &'static str, &'static str) {
    match mood {
        Mood::Happy => ("#FFB347", "#FF6F91", "#FFF3B0"),
        Mood::Sad => ("#4B6CB7", "#182848", "#A8C0FF"),
        Mood::Anxious => ("#8E9EAB", "#5D6D7E", "#EEF2F3"),
        Mood::Angry => ("#CB2D3E", "#EF473A", "#FFD6D6"),
        Mood::Tired => ("#606C88", "#3F4C6B", "#D7DDE8"),
        Mood::Calm => ("#43CEA2", "#185A9D", "#E0FFF4"),
        Mood::Neutral => ("#7F7FD5", "#86A8E7", "#F0F4FF"),
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a card. Unknown template names render as `minimal`.
pub fn render_svg(
    template: &str,
    mood: Mood,
    title: &str,
    user_name: Option<&str>,
    points: u32,
) -> String {
    let (from, to, accent) = palette(mood);
    let font = "Helvetica, Arial, sans-serif";
    let mut svg = String::with_capacity(2048);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    ));
    svg.push_str(&format!(
        r#"<defs><linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0%" stop-color="{from}"/><stop offset="100%" stop-color="{to}"/></linearGradient></defs>"#
    ));
    svg.push_str(&format!(
        r#"<rect width="{WIDTH}" height="{HEIGHT}" rx="32" fill="url(#bg)"/>"#
    ));

    match template {
        "cosmic" => {
            for (x, y, r) in [(80, 90, 3), (510, 140, 2), (440, 60, 4), (120, 620, 2), (520, 700, 3)] {
                svg.push_str(&format!(
                    r#"<circle cx="{x}" cy="{y}" r="{r}" fill="{accent}" opacity="0.8"/>"#
                ));
            }
        }
        "sunrise" => {
            svg.push_str(&format!(
                r#"<circle cx="300" cy="640" r="180" fill="{accent}" opacity="0.35"/>"#
            ));
        }
        _ => {}
    }

    let mood_label = mood.as_str().to_uppercase();
    svg.push_str(&format!(
        r#"<text x="300" y="200" text-anchor="middle" font-family="{font}" font-size="28" fill="{accent}" letter-spacing="6">{mood_label}</text>"#
    ));
    svg.push_str(&format!(
        r##"<text x="300" y="380" text-anchor="middle" font-family="{font}" font-size="40" font-weight="bold" fill="#FFFFFF">{}</text>"##,
        escape_xml(title)
    ));
    if let Some(name) = user_name.filter(|n| !n.trim().is_empty()) {
        svg.push_str(&format!(
            r##"<text x="300" y="440" text-anchor="middle" font-family="{font}" font-size="22" fill="#FFFFFF" opacity="0.85">by {}</text>"##,
            escape_xml(name.trim())
        ));
    }
    svg.push_str(&format!(
        r#"<text x="300" y="520" text-anchor="middle" font-family="{font}" font-size="30" fill="{accent}">+{points} pts</text>"#
    ));
    svg.push_str(&format!(
        r##"<text x="300" y="760" text-anchor="middle" font-family="{font}" font-size="18" fill="#FFFFFF" opacity="0.7">SparkVibe</text></svg>"##
    ));

    svg
}

/// Estimated shareability, 0 to 100.
///
/// Points count up to 30, a title of 10-60 characters adds 10, a named author adds 5, and
/// upbeat moods add the most.
pub fn viral_score(mood: Mood, title: &str, points: u32, named: bool) -> u32 {
    let mood_bonus = match mood {
        Mood::Happy => 15,
        Mood::Calm => 10,
        Mood::Angry | Mood::Neutral => 5,
        Mood::Sad | Mood::Anxious | Mood::Tired => 3,
    };
    let title_len = title.trim().chars().count();
    let title_bonus = if (10..=60).contains(&title_len) { 10 } else { 0 };
    let name_bonus = if named { 5 } else { 0 };

    (40 + (points / 5).min(30) + title_bonus + name_bonus + mood_bonus).min(100)
}
