use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Number, Object, Reflect};
use web_sys::{Document, Element, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, OneShotObserver};

pub const COUNTER_SELECTOR: &str = ".stat-number[data-count]";
pub const COUNT_ATTRIBUTE: &str = "data-count";

pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// Leading base-10 integer of `raw`, ignoring anything after it
/// (`"250+"` is 250). `None` when there are no digits. Digit runs too long
/// for an integer type still parse, losing precision like `parseInt`.
pub fn parse_target(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().map(|n| sign * n)
}

/// Groups thousands of a whole number with commas. Used when no browser
/// locale is available.
pub fn group_digits(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// `Number.prototype.toLocaleString` called through `Function::call1`, so a
/// malformed locale tag comes back as `None` instead of throwing.
fn locale_string(value: f64, locale: &str) -> Option<String> {
    let number = Number::from(value);
    let prototype = Object::get_prototype_of(&number);
    let method: Function = Reflect::get(&prototype, &JsValue::from_str("toLocaleString"))
        .ok()?
        .dyn_into()
        .ok()?;
    method
        .call1(&number, &JsValue::from_str(locale))
        .ok()?
        .as_string()
}

pub fn format_count(value: f64, locale: Option<&str>) -> String {
    locale
        .and_then(|tag| locale_string(value, tag))
        .unwrap_or_else(|| group_digits(value))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterFrame {
    /// Always a whole number.
    pub value: f64,
    pub done: bool,
}

/// Time-driven count-up. The caller owns the clock and calls `advance` once
/// per frame with the current timestamp in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    start: f64,
    duration: f64,
}

impl CounterAnimation {
    pub fn new(target: f64, start: f64, duration: f64) -> Self {
        Self {
            target,
            start,
            duration,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn advance(&self, now: f64) -> CounterFrame {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return CounterFrame {
                value: self.target,
                done: true,
            };
        }
        CounterFrame {
            value: (ease_out_quart(progress) * self.target).round(),
            done: false,
        }
    }
}

/// Runs the animation on `requestAnimationFrame` until it reports done. The
/// frame closure drops itself on the last frame.
fn run(window: Window, element: Element, animation: CounterAnimation, locale: Option<String>) {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let win = window.clone();

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let CounterFrame { value, done } = animation.advance(now);
        element.set_text_content(Some(&format_count(value, locale.as_deref())));

        if done {
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
        };
    }) as Box<dyn FnMut(f64)>));

    let first = frame.borrow();
    if let Some(callback) = first.as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    };
}

pub fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    let counters = dom::query_all(document, COUNTER_SELECTOR)?;
    if counters.is_empty() {
        return Ok(None);
    }

    let locale = config
        .number_locale
        .clone()
        .or_else(|| window.navigator().language());
    let duration = config.counter_duration_ms;
    let win = window.clone();

    let observer = OneShotObserver::new(config.counter_threshold, "0px", move |el| {
        let Some(target) = el.get_attribute(COUNT_ATTRIBUTE).as_deref().and_then(parse_target) else {
            log::debug!("Skipping counter with unparsable {}", COUNT_ATTRIBUTE);
            return;
        };
        let start = win.performance().map(|p| p.now()).unwrap_or(0.0);
        run(win.clone(), el, CounterAnimation::new(target, start, duration), locale.clone());
    })?;
    for el in &counters {
        observer.observe(el);
    }

    let mut effect = Effect::new("counter");
    effect.observe(observer);
    Ok(Some(effect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!(ease_out_quart(0.5) > 0.9);
    }

    #[test]
    fn parses_leading_integer() {
        assert_eq!(parse_target("250"), Some(250.0));
        assert_eq!(parse_target("  1200+"), Some(1200.0));
        assert_eq!(parse_target("-15"), Some(-15.0));
        assert_eq!(parse_target("12.9"), Some(12.0));
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target("-"), None);
        assert_eq!(parse_target(""), None);
    }

    #[test]
    fn oversized_targets_still_count() {
        assert_eq!(parse_target("99999999999999999999"), Some(1e20));
        assert_eq!(group_digits(1e20), "100,000,000,000,000,000,000");
        let animation = CounterAnimation::new(1e20, 0.0, 2000.0);
        assert_eq!(animation.advance(2000.0).value, 1e20);
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_digits(0.0), "0");
        assert_eq!(group_digits(250.0), "250");
        assert_eq!(group_digits(1000.0), "1,000");
        assert_eq!(group_digits(1234567.0), "1,234,567");
        assert_eq!(group_digits(-98765.0), "-98,765");
    }

    #[test]
    fn format_without_locale_uses_grouping() {
        assert_eq!(format_count(15000.0, None), "15,000");
    }

    #[test]
    fn reaches_exact_target_at_duration() {
        let animation = CounterAnimation::new(250.0, 1000.0, 2000.0);
        assert_eq!(animation.advance(3000.0), CounterFrame { value: 250.0, done: true });
        assert_eq!(animation.advance(9000.0), CounterFrame { value: 250.0, done: true });
        assert!(!animation.advance(2999.0).done);
    }

    #[test]
    fn frames_are_monotonic_and_bounded() {
        let animation = CounterAnimation::new(250.0, 0.0, 2000.0);
        let mut previous = 0.0;
        let mut now = 0.0;
        while now < 2000.0 {
            let frame = animation.advance(now);
            assert!(frame.value >= previous, "dropped at {now}ms");
            assert!(frame.value <= 250.0, "overshot at {now}ms");
            assert!(!frame.done);
            previous = frame.value;
            now += 16.7;
        }
        assert_eq!(format_count(animation.advance(now).value, None), "250");
    }

    #[test]
    fn timestamps_before_start_clamp_to_zero() {
        let animation = CounterAnimation::new(500.0, 100.0, 2000.0);
        assert_eq!(animation.advance(90.0).value, 0.0);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let animation = CounterAnimation::new(42.0, 0.0, 0.0);
        assert_eq!(animation.advance(0.0), CounterFrame { value: 42.0, done: true });
    }
}
