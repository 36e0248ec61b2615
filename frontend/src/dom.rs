use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, NodeList, Window,
};

/// An event listener that stays attached until it is dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<E, F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        Self::register(target, event, false, handler)
    }

    /// Registered with `passive: true`, so the handler can never block native
    /// scrolling. Used for scroll and pointer-move handlers.
    pub fn passive<E, F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        Self::register(target, event, true, handler)
    }

    fn register<E, F>(
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        mut handler: F,
    ) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        }) as Box<dyn FnMut(Event)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Targets of one observer batch that fire now: intersecting and never fired
/// before. `fired` carries that memory across batches, so a target queued
/// twice, or re-entering after unobserve raced a pending batch, fires once.
pub fn first_intersections<T, I>(batch: I, fired: &mut Vec<T>) -> Vec<T>
where
    T: PartialEq + Clone,
    I: IntoIterator<Item = (T, bool)>,
{
    let mut now = Vec::new();
    for (target, intersecting) in batch {
        if intersecting && !fired.contains(&target) {
            fired.push(target.clone());
            now.push(target);
        }
    }
    now
}

/// Intersection observer that fires its handler once per element: the element
/// is unobserved before the handler runs.
pub struct OneShotObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl OneShotObserver {
    pub fn new<F>(threshold: f64, root_margin: &str, mut on_enter: F) -> Result<Self, JsValue>
    where
        F: FnMut(Element) + 'static,
    {
        let mut fired: Vec<Element> = Vec::new();
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            let batch = entries.iter().map(|entry| {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                (entry.target(), entry.is_intersecting())
            });
            for target in first_intersections(batch, &mut fired) {
                observer.unobserve(&target);
                on_enter(target);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for OneShotObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Everything one page effect attached to the DOM. Dropping it detaches all of
/// its listeners and observers.
pub struct Effect {
    name: &'static str,
    listeners: Vec<Listener>,
    observers: Vec<OneShotObserver>,
}

impl Effect {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            listeners: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn listen(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn observe(&mut self, observer: OneShotObserver) {
        self.observers.push(observer);
    }

    pub fn with_listener(mut self, listener: Listener) -> Self {
        self.listen(listener);
        self
    }

    pub fn teardown(self) {
        log::debug!(
            "Tearing down {} ({} listeners, {} observers)",
            self.name,
            self.listeners.len(),
            self.observers.len()
        );
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(document.query_selector_all(selector)?))
}

pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(root.query_selector_all(selector)?))
}

pub fn query_html(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    Ok(query_all(document, selector)?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn first_html(document: &Document, selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    Ok(document
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on { list.add_1(class) } else { list.remove_1(class) };
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn clear_style(element: &HtmlElement, property: &str) {
    let _ = element.style().remove_property(property);
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

pub fn inner_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

/// True when the primary pointer is a mouse or trackpad rather than touch.
pub fn has_fine_pointer(window: &Window) -> bool {
    matches!(window.match_media("(pointer: fine)"), Ok(Some(query)) if query.matches())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_target_fires_on_first_intersection_only() {
        let mut fired = Vec::new();
        assert_eq!(first_intersections([(1, false), (2, true)], &mut fired), vec![2]);
        assert_eq!(first_intersections([(1, true), (2, true)], &mut fired), vec![1]);
        // Further scrolling keeps reporting both; nothing fires again.
        for _ in 0..3 {
            assert!(first_intersections([(1, true), (2, false), (2, true)], &mut fired).is_empty());
        }
        assert_eq!(fired, vec![2, 1]);
    }

    #[test]
    fn duplicate_entries_in_one_batch_fire_once() {
        let mut fired = Vec::new();
        assert_eq!(first_intersections([(7, true), (7, true)], &mut fired), vec![7]);
    }

    #[test]
    fn leaving_the_viewport_never_fires() {
        let mut fired = Vec::new();
        assert!(first_intersections([(3, false), (4, false)], &mut fired).is_empty());
        assert!(fired.is_empty());
    }
}
