use gloo::render::{request_animation_frame, AnimationFrame};
use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node, ScrollBehavior, ScrollToOptions,
};

use crate::config::{BehaviorConfig, ConfigError, CONFIG_ELEMENT_ID};
use crate::schedule::FrameScheduler;
use crate::scroll::{ScrollSample, SectionBounds};

const FALLBACK_VIEWPORT_HEIGHT: f64 = 720.0;

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Override block from `<script type="application/json" id="behavior-config">`.
pub fn inline_config() -> Option<Result<BehaviorConfig, ConfigError>> {
    let raw = window()?
        .document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()?;
    Some(BehaviorConfig::from_json(&raw))
}

pub fn html_element(id: &str) -> Option<HtmlElement> {
    window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn element_height(element: Option<&HtmlElement>) -> f64 {
    element
        .map(|element| f64::from(element.offset_height()))
        .unwrap_or(0.0)
}

pub fn section_top(id: &str) -> Option<f64> {
    html_element(id).map(|element| f64::from(element.offset_top()))
}

/// Reads scroll position, header height and viewport height right now.
pub fn sample(header: Option<&HtmlElement>) -> ScrollSample {
    let win = window();
    let scroll_y = win
        .as_ref()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0);
    let viewport_height = win
        .as_ref()
        .and_then(|w| w.inner_height().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_HEIGHT);

    ScrollSample {
        scroll_y,
        header_height: element_height(header),
        viewport_height,
    }
}

/// Bounds of each section that is currently in the document, in order.
pub fn measure_sections<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<SectionBounds> {
    ids.into_iter()
        .filter_map(|id| {
            let element = html_element(id)?;
            Some(SectionBounds::new(
                id,
                f64::from(element.offset_top()),
                f64::from(element.offset_height()),
            ))
        })
        .collect()
}

pub fn scroll_to(top: f64, reduced_motion: bool) {
    let Some(win) = window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(if reduced_motion {
        ScrollBehavior::Auto
    } else {
        ScrollBehavior::Smooth
    });
    win.scroll_to_with_scroll_to_options(&options);
}

pub fn contains_target(container: Option<&Element>, target: Option<EventTarget>) -> bool {
    let (Some(container), Some(target)) = (container, target) else {
        return false;
    };
    let Ok(node) = target.dyn_into::<Node>() else {
        return false;
    };

    container.contains(Some(&node))
}

pub struct AnimationFrames;

impl FrameScheduler for AnimationFrames {
    type Handle = AnimationFrame;

    fn schedule(&self, callback: Box<dyn FnOnce()>) -> Self::Handle {
        request_animation_frame(move |_timestamp| callback())
    }
}

/// Intersection observer over page sections. Disconnects on drop.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    /// `on_entries` receives `(section id, is intersecting)` per entry.
    pub fn new(
        threshold: f64,
        root_margin: &str,
        on_entries: impl Fn(Vec<(String, bool)>) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let reports = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| (entry.target().id(), entry.is_intersecting()))
                    .collect();
                on_entries(reports);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Starts watching every listed section that exists. Returns how many.
    pub fn observe<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        ids.into_iter()
            .filter_map(html_element)
            .map(|element| self.observer.observe(&element))
            .count()
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
