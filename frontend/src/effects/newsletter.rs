use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlElement, HtmlInputElement, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, Listener};

pub const FORM_SELECTOR: &str = ".newsletter-form";

pub const CHECK_ICON: &str = r#"<svg width="18" height="18" viewBox="0 0 18 18" fill="none"><path d="M4 9L8 13L14 5" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;
pub const ARROW_ICON: &str = r#"<svg width="18" height="18" viewBox="0 0 18 18" fill="none"><path d="M3 9H15M15 9L10 4M15 9L10 14" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;
pub const CONFIRMED_BACKGROUND: &str = "var(--green-600)";
pub const CONFIRMED_PLACEHOLDER: &str = "You're in!";
pub const DEFAULT_PLACEHOLDER: &str = "your@email.com";

/// Visual state of the form. There is no subscription request behind it;
/// confirming only changes what the visitor sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Idle,
    Confirmed,
}

/// Look to show after a submit. Native submission is blocked either way;
/// a missing or empty input leaves the form as it is.
pub fn submit_feedback(value: Option<&str>) -> Option<Feedback> {
    match value {
        Some(value) if !value.is_empty() => Some(Feedback::Confirmed),
        _ => None,
    }
}

impl Feedback {
    pub fn icon(self) -> &'static str {
        match self {
            Feedback::Idle => ARROW_ICON,
            Feedback::Confirmed => CHECK_ICON,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Feedback::Idle => DEFAULT_PLACEHOLDER,
            Feedback::Confirmed => CONFIRMED_PLACEHOLDER,
        }
    }

    pub fn background(self) -> Option<&'static str> {
        match self {
            Feedback::Idle => None,
            Feedback::Confirmed => Some(CONFIRMED_BACKGROUND),
        }
    }
}

fn render(feedback: Feedback, input: &HtmlInputElement, button: Option<&HtmlElement>) {
    if let Some(button) = button {
        button.set_inner_html(feedback.icon());
        match feedback.background() {
            Some(value) => dom::set_style(button, "background", value),
            None => dom::clear_style(button, "background"),
        }
    }
    input.set_placeholder(feedback.placeholder());
}

struct NewsletterForm {
    input: Option<HtmlInputElement>,
    button: Option<HtmlElement>,
    revert_ms: u32,
    pending_revert: Option<Timeout>,
}

impl NewsletterForm {
    fn submit(&mut self) {
        let value = self.input.as_ref().map(|input| input.value());
        let (Some(next), Some(input)) = (submit_feedback(value.as_deref()), self.input.clone()) else {
            return;
        };
        render(next, &input, self.button.as_ref());
        input.set_value("");

        let button = self.button.clone();
        // Replacing the handle cancels a revert still pending from an earlier submit.
        self.pending_revert = Some(Timeout::new(self.revert_ms, move || {
            render(Feedback::Idle, &input, button.as_ref());
        }));
    }
}

pub fn mount(_window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    let Some(form) = document.query_selector(FORM_SELECTOR)? else {
        return Ok(None);
    };
    let input = form
        .query_selector("input")?
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    let button = form
        .query_selector("button")?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let mut state = NewsletterForm {
        input,
        button,
        revert_ms: config.newsletter_revert_ms,
        pending_revert: None,
    };

    let listener = Listener::new(&form, "submit", move |e: Event| {
        e.prevent_default();
        state.submit();
    })?;

    Ok(Some(Effect::new("newsletter").with_listener(listener)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_submit_is_ignored() {
        assert_eq!(submit_feedback(Some("")), None);
    }

    #[test]
    fn form_without_input_shows_nothing() {
        assert_eq!(submit_feedback(None), None);
    }

    #[test]
    fn any_value_confirms() {
        assert_eq!(submit_feedback(Some("a@b.c")), Some(Feedback::Confirmed));
        assert_eq!(submit_feedback(Some(" ")), Some(Feedback::Confirmed));
    }

    #[test]
    fn confirmed_look() {
        let confirmed = Feedback::Confirmed;
        assert_eq!(confirmed.icon(), CHECK_ICON);
        assert_eq!(confirmed.placeholder(), "You're in!");
        assert_eq!(confirmed.background(), Some("var(--green-600)"));
    }

    #[test]
    fn idle_look_restores_defaults() {
        let idle = Feedback::Idle;
        assert_eq!(idle.icon(), ARROW_ICON);
        assert_eq!(idle.placeholder(), "your@email.com");
        assert_eq!(idle.background(), None);
    }
}
