use prachar::matching::GENERIC_IMAGE_URL;
use prachar::{Catalog, ImageFallbackSelector, MatchPhase, Matcher};

#[test]
fn every_goal_gets_a_complete_entry() {
    let matcher = Matcher::default();
    for goal in ["", "   ", "ROBOT WARS", "क्रिकेट", "zzz_no_match_xyz", "tech fest 2025!!"] {
        let entry = matcher.select_campaign(goal);
        assert_eq!(entry.captions.len(), 3);
        assert!(entry.image_url.starts_with("https://"));
        assert!(!entry.plan.hook.is_empty());
    }
}

#[test]
fn matching_is_deterministic() {
    let matcher = Matcher::default();
    let first = matcher.select_campaign("Hype my college hackathon").clone();
    for _ in 0..10 {
        assert_eq!(matcher.select_campaign("Hype my college hackathon"), &first);
    }
}

#[test]
fn exact_key_beats_fuzzy_rules() {
    let matcher = Matcher::default();
    let matched = matcher.select_with_phase("Python AI Mastery workshop");
    assert_eq!(matched.entry.key, "python ai mastery");
    assert_eq!(matched.phase, MatchPhase::Exact("python ai mastery".into()));
}

#[test]
fn related_triggers_share_a_target() {
    let matcher = Matcher::default();
    let neural = matcher.select_with_phase("neural network basics");
    assert_eq!(neural.phase, MatchPhase::Fuzzy("neural".into()));
    assert_eq!(neural.entry, matcher.select_campaign("python"));
    assert_eq!(neural.entry.key, "python ai mastery");
}

#[test]
fn unmatched_goal_falls_back_to_generic() {
    let matcher = Matcher::default();
    let matched = matcher.select_with_phase("zzz_no_match_xyz");
    assert_eq!(matched.phase, MatchPhase::Default);
    assert_eq!(matched.entry.key, "generic");
}

#[test]
fn fuzzy_rules_follow_declared_order() {
    let matcher = Matcher::default();
    // "robot" 排在 "tech" 之前
    assert_eq!(matcher.select_campaign("robot tech night").key, "kiit robotics");
    assert_eq!(matcher.select_campaign("Annual Dance Night").key, "cultural fest");
    assert_eq!(matcher.select_campaign("build a website").key, "web development");
    assert_eq!(matcher.select_campaign("fitness challenge").key, "sports meet");
}

#[test]
fn image_selection_is_independent_of_catalog_match() {
    let matcher = Matcher::default();
    let selector = ImageFallbackSelector::default();

    let goal = "go racing this weekend";
    assert_eq!(matcher.select_campaign(goal).key, "generic");
    let image = selector.select_fallback_image(goal);
    assert_eq!(selector.select_category(goal).unwrap().name, "drone");
    assert_ne!(image, matcher.select_campaign(goal).image_url);
    assert_eq!(selector.select_fallback_image("nothing here"), GENERIC_IMAGE_URL);
}

#[test]
fn builtin_catalog_passes_validation() {
    let catalog = Catalog::builtin();
    catalog.validate().unwrap();
    let keys: Vec<&str> = catalog.entries().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "kiit robotics",
            "drone racing",
            "python workshop",
            "python ai mastery",
            "tech fest",
            "hackathon",
            "cultural fest",
            "ai workshop",
            "web development",
            "sports meet",
            "generic",
        ]
    );
}
