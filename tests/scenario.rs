use shorefx::{PageModel, ResolverState, Scenario, simulate, waves};

fn fixture() -> (PageModel, Scenario) {
    let model: PageModel = serde_json::from_str(include_str!("data/page.json")).unwrap();
    let scenario: Scenario = serde_json::from_str(include_str!("data/scenario.json")).unwrap();
    (model, scenario)
}

#[test]
fn scenario_settles_images_against_available_set() {
    let (model, scenario) = fixture();
    let report = simulate(&model, &scenario, 7).unwrap();

    let plumber = &report.images["img-plumber"];
    assert_eq!(plumber.state, ResolverState::Succeeded);
    assert_eq!(plumber.source.as_deref(), Some("images/plumber.png"));

    // Malformed data-files fell back to the heading synthesis.
    let boiler = &report.images["img-boiler"];
    assert_eq!(boiler.state, ResolverState::Succeeded);
    assert_eq!(boiler.source.as_deref(), Some("images/Boiler_Repair.png"));

    // Bare path missed, prefixed path hit.
    let icon = &report.images["icon-fb"];
    assert_eq!(icon.state, ResolverState::Succeeded);
    assert_eq!(icon.source.as_deref(), Some("images/fb.svg"));
}

#[test]
fn scenario_events_drive_parallax_and_reveal() {
    let (model, scenario) = fixture();
    let report = simulate(&model, &scenario, 7).unwrap();

    // Last scroll was 300; wave-1 drifted to -12 before it.
    assert_eq!(
        report.dom.style(&"wave-0".to_string(), "transform").as_deref(),
        Some(waves::translate3d(0.0, waves::parallax_offset(300.0, 0)).as_str())
    );
    assert_eq!(
        report.dom.style(&"wave-1".to_string(), "transform").as_deref(),
        Some(waves::translate3d(-12.0, waves::parallax_offset(300.0, 1)).as_str())
    );

    assert!(report.dom.has_class(&"card-plumber".to_string(), "inview"));
    // 0.05 is below the reveal threshold.
    assert!(!report.dom.has_class(&"about".to_string(), "inview"));
}

#[test]
fn simulation_is_deterministic_for_a_fixed_seed() {
    let (model, scenario) = fixture();
    let a = simulate(&model, &scenario, 42).unwrap();
    let b = simulate(&model, &scenario, 42).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn seed_changes_only_wave_draws() {
    let (model, scenario) = fixture();
    let a = simulate(&model, &scenario, 1).unwrap();
    let b = simulate(&model, &scenario, 2).unwrap();
    assert_eq!(
        serde_json::to_string(&a.images).unwrap(),
        serde_json::to_string(&b.images).unwrap()
    );
}
