//! Deterministic simulation of a page's lifetime.
//!
//! A scenario names the image paths the "network" would serve plus an
//! ordered event stream. Image resolution settles the way a browser
//! delivers it: the result for one attempt arrives before the next
//! attempt's source is assigned.

use std::collections::BTreeMap;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    engine::PageEffects,
    error::ShorefxResult,
    fallback::ResolverState,
    page::{MemoryDom, PageModel},
};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    /// Image paths that load successfully; everything else errors.
    #[serde(default)]
    pub available_images: Vec<String>,
    #[serde(default)]
    pub events: Vec<PageEvent>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    ImageLoaded { node: String },
    ImageFailed { node: String },
    Scroll { y: f64 },
    WaveDrift { node: String, x: f64 },
    Intersection { node: String, ratio: f64 },
}

/// Final state of one image element after simulation.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ImageOutcome {
    pub state: ResolverState,
    pub attempts: Vec<String>,
    pub source: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct SimReport {
    pub seed: u64,
    pub images: BTreeMap<String, ImageOutcome>,
    pub dom: MemoryDom,
}

/// Drives every pending resolver to a terminal (or stuck-idle) state
/// against the available-image set.
pub fn settle_images(
    fx: &mut PageEffects<String>,
    dom: &mut MemoryDom,
    available: &[String],
) {
    for node in fx.image_nodes() {
        while let Some(current) = fx.current_attempt(&node).map(str::to_string) {
            if available.iter().any(|a| *a == current) {
                fx.on_image_load(&node);
            } else {
                fx.on_image_error(dom, &node);
            }
        }
    }
}

pub fn apply_event(fx: &mut PageEffects<String>, dom: &mut MemoryDom, event: &PageEvent) {
    match event {
        PageEvent::ImageLoaded { node } => fx.on_image_load(node),
        PageEvent::ImageFailed { node } => fx.on_image_error(dom, node),
        PageEvent::Scroll { y } => fx.on_scroll(dom, *y),
        PageEvent::WaveDrift { node, x } => fx.note_wave_drift(node, *x),
        PageEvent::Intersection { node, ratio } => fx.on_intersection(dom, node, *ratio),
    }
}

/// Initializes the page with a seeded random source, settles image
/// fallback, applies the event stream, and reports the outcome.
pub fn simulate(model: &PageModel, scenario: &Scenario, seed: u64) -> ShorefxResult<SimReport> {
    let mut dom = MemoryDom::from_model(model)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut fx = PageEffects::initialize(&mut dom, &mut rng);

    settle_images(&mut fx, &mut dom, &scenario.available_images);
    for event in &scenario.events {
        apply_event(&mut fx, &mut dom, event);
    }

    let mut images = BTreeMap::new();
    for node in fx.image_nodes() {
        let outcome = ImageOutcome {
            state: fx.resolver_state(&node).unwrap_or(ResolverState::Idle),
            attempts: fx.attempts_for(&node).unwrap_or_default().to_vec(),
            source: dom.source(&node),
        };
        images.insert(node, outcome);
    }

    Ok(SimReport { seed, images, dom })
}

/// Attempt plans per image node, without running the simulation. Wave and
/// reveal wiring still runs; the plans themselves are draw-independent.
pub fn attempt_plans(model: &PageModel) -> ShorefxResult<BTreeMap<String, Vec<String>>> {
    let mut dom = MemoryDom::from_model(model)?;
    let mut rng = StdRng::seed_from_u64(0);
    let fx = PageEffects::initialize(&mut dom, &mut rng);

    let mut plans = BTreeMap::new();
    for node in fx.image_nodes() {
        plans.insert(node.clone(), fx.attempts_for(&node).unwrap_or_default().to_vec());
    }
    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ImageSpec, NodeSpec};

    fn plumber_page() -> PageModel {
        let mut card = NodeSpec::new("c0", &["service-card"]);
        card.attrs
            .insert("data-files".to_string(), r#"["plumber"]"#.to_string());
        card.image = Some(ImageSpec::new("c0-img", &["service-img"]));
        PageModel { nodes: vec![card] }
    }

    #[test]
    fn settling_picks_first_available_attempt() {
        let scenario = Scenario {
            available_images: vec!["images/plumber.png".to_string()],
            events: Vec::new(),
        };
        let report = simulate(&plumber_page(), &scenario, 1).unwrap();
        let img = &report.images["c0-img"];
        assert_eq!(img.state, ResolverState::Succeeded);
        assert_eq!(img.source.as_deref(), Some("images/plumber.png"));
    }

    #[test]
    fn settling_falls_through_to_bare_path() {
        let scenario = Scenario {
            available_images: vec!["plumber.png".to_string()],
            events: Vec::new(),
        };
        let report = simulate(&plumber_page(), &scenario, 1).unwrap();
        let img = &report.images["c0-img"];
        assert_eq!(img.state, ResolverState::Succeeded);
        assert_eq!(img.source.as_deref(), Some("plumber.png"));
    }

    #[test]
    fn exhaustion_leaves_last_failed_source() {
        let report = simulate(&plumber_page(), &Scenario::default(), 1).unwrap();
        let img = &report.images["c0-img"];
        assert_eq!(img.state, ResolverState::Exhausted);
        assert_eq!(img.source.as_deref(), Some("plumber.png"));
    }

    #[test]
    fn plans_list_attempts_in_order() {
        let plans = attempt_plans(&plumber_page()).unwrap();
        assert_eq!(
            plans["c0-img"],
            vec!["images/plumber.png".to_string(), "plumber.png".to_string()]
        );
    }

    #[test]
    fn scenario_json_roundtrip() {
        let s = r#"{
            "available_images": ["images/a.png"],
            "events": [
                {"kind": "scroll", "y": 120.0},
                {"kind": "intersection", "node": "c0", "ratio": 0.5},
                {"kind": "wave_drift", "node": "w0", "x": -3.5}
            ]
        }"#;
        let sc: Scenario = serde_json::from_str(s).unwrap();
        assert_eq!(sc.available_images.len(), 1);
        assert_eq!(sc.events.len(), 3);
        assert!(matches!(sc.events[0], PageEvent::Scroll { y } if y == 120.0));
    }
}
