//! One-pass wiring of the three page behaviors.
//!
//! `PageEffects::initialize` plays the role of the page-ready hook: it
//! builds a fallback resolver per image, draws wave parameters, starts
//! reveal observation, and runs the first parallax pass. After that the
//! host forwards its events through the `on_*` entry points; none of them
//! can fail and none ever tears anything down.

use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;

use crate::{
    candidates::{
        AttemptOrder, CARD_FILES_ATTR, ICON_FALLBACK_ATTR, expand_attempts,
        service_card_candidates, social_icon_candidates,
    },
    dom::Document,
    fallback::{FallbackResolver, ResolverState},
    reveal::{REVEAL_CLASS, REVEAL_TARGET_CLASSES, RevealObserver},
    waves::{self, Direction, WaveParams},
};

pub const SERVICE_CARD_CLASS: &str = "service-card";
pub const SERVICE_IMG_CLASS: &str = "service-img";
pub const SOCIAL_ICON_CLASS: &str = "social-icon";
pub const WAVE_LAYER_CLASS: &str = "wave-layer";

#[derive(Clone, Debug)]
struct WaveLayer<N> {
    node: N,
    index: usize,
    horizontal_px: f64,
    params: WaveParams,
}

pub struct PageEffects<N> {
    resolvers: Vec<(N, FallbackResolver)>,
    waves: Vec<WaveLayer<N>>,
    reveal: RevealObserver<N>,
}

impl<N: Clone + Eq + Hash + Debug> PageEffects<N> {
    #[tracing::instrument(skip_all)]
    pub fn initialize<D, R>(doc: &mut D, rng: &mut R) -> Self
    where
        D: Document<Node = N>,
        R: Rng,
    {
        let mut effects = Self {
            resolvers: Vec::new(),
            waves: Vec::new(),
            reveal: RevealObserver::new(),
        };

        for card in doc.nodes_with_class(SERVICE_CARD_CLASS) {
            let img = doc
                .image_within(&card, SERVICE_IMG_CLASS)
                .or_else(|| doc.first_image_within(&card));
            let Some(img) = img else {
                continue;
            };
            let attr = doc.attribute(&card, CARD_FILES_ATTR);
            let heading = doc.heading_text(&card);
            let candidates = service_card_candidates(attr.as_deref(), heading.as_deref());
            let attempts = expand_attempts(&candidates, AttemptOrder::PrefixedFirst);
            effects.begin_resolution(doc, img, attempts);
        }

        for icon in doc.nodes_with_class(SOCIAL_ICON_CLASS) {
            let attr = doc.attribute(&icon, ICON_FALLBACK_ATTR);
            let src = doc.attribute(&icon, "src");
            let candidates = social_icon_candidates(attr.as_deref(), src.as_deref());
            let attempts = expand_attempts(&candidates, AttemptOrder::BareFirst);
            effects.begin_resolution(doc, icon, attempts);
        }

        for (index, node) in doc
            .nodes_with_class(WAVE_LAYER_CLASS)
            .into_iter()
            .enumerate()
        {
            let params = WaveParams::draw(rng, index);
            doc.set_style(
                &node,
                "animation-duration",
                &waves::duration_style(params.duration_secs),
            );
            if params.direction == Direction::Reverse {
                doc.set_style(&node, "animation-direction", "reverse");
            }
            doc.set_style(&node, "will-change", "transform");
            effects.waves.push(WaveLayer {
                node,
                index,
                horizontal_px: 0.0,
                params,
            });
        }

        for class in REVEAL_TARGET_CLASSES {
            for node in doc.nodes_with_class(class) {
                effects.reveal.observe(node);
            }
        }

        effects.on_scroll(doc, 0.0);
        effects
    }

    fn begin_resolution<D: Document<Node = N>>(
        &mut self,
        doc: &mut D,
        node: N,
        attempts: Vec<String>,
    ) {
        let mut resolver = FallbackResolver::new(attempts);
        if let Some(first) = resolver.start() {
            doc.set_image_source(&node, first);
        }
        self.resolvers.push((node, resolver));
    }

    /// Load success for the image's current attempt.
    pub fn on_image_load(&mut self, node: &N) {
        if let Some((_, resolver)) = self.resolvers.iter_mut().find(|(n, _)| n == node) {
            resolver.on_load();
        }
    }

    /// Load failure for the image's current attempt; assigns the next one
    /// if any remains. Exhaustion is silent.
    pub fn on_image_error<D: Document<Node = N>>(&mut self, doc: &mut D, node: &N) {
        let Some((_, resolver)) = self.resolvers.iter_mut().find(|(n, _)| n == node) else {
            return;
        };
        if let Some(next) = resolver.on_error() {
            doc.set_image_source(node, next);
        }
    }

    /// Recomputes every layer's vertical translation. Unthrottled; runs
    /// once per scroll notification.
    pub fn on_scroll<D: Document<Node = N>>(&mut self, doc: &mut D, scroll_y: f64) {
        for layer in &self.waves {
            let y = waves::parallax_offset(scroll_y, layer.index);
            doc.set_style(
                &layer.node,
                "transform",
                &waves::translate3d(layer.horizontal_px, y),
            );
        }
    }

    /// The host's looping keyframe animation moved a layer horizontally.
    /// Recorded so the next parallax write carries it through; the vertical
    /// component stays this engine's alone.
    pub fn note_wave_drift(&mut self, node: &N, x_px: f64) {
        if let Some(layer) = self.waves.iter_mut().find(|l| &l.node == node) {
            layer.horizontal_px = x_px;
        }
    }

    pub fn on_intersection<D: Document<Node = N>>(
        &mut self,
        doc: &mut D,
        node: &N,
        visible_fraction: f64,
    ) {
        if self.reveal.on_intersection(node, visible_fraction) {
            doc.add_class(node, REVEAL_CLASS);
        }
    }

    /// Image nodes under fallback resolution, in wiring order.
    pub fn image_nodes(&self) -> Vec<N> {
        self.resolvers.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn resolver_state(&self, node: &N) -> Option<ResolverState> {
        self.find_resolver(node).map(FallbackResolver::state)
    }

    pub fn attempts_for(&self, node: &N) -> Option<&[String]> {
        self.find_resolver(node).map(FallbackResolver::attempts)
    }

    pub fn current_attempt(&self, node: &N) -> Option<&str> {
        self.find_resolver(node)?.current_attempt()
    }

    pub fn wave_params(&self) -> Vec<WaveParams> {
        self.waves.iter().map(|l| l.params).collect()
    }

    pub fn watched_count(&self) -> usize {
        self.reveal.watched_count()
    }

    fn find_resolver(&self, node: &N) -> Option<&FallbackResolver> {
        self.resolvers
            .iter()
            .find(|(n, _)| n == node)
            .map(|(_, r)| r)
    }
}
