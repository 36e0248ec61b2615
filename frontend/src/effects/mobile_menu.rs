use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, Listener};

pub const TOGGLE_ID: &str = "navToggle";
pub const LINKS_ID: &str = "navLinks";
pub const OPEN_CLASS: &str = "open";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuMsg {
    Toggle,
    LinkClicked,
    Escape,
}

impl MenuState {
    pub fn update(self, msg: MenuMsg) -> MenuState {
        match (self, msg) {
            (MenuState::Closed, MenuMsg::Toggle) => MenuState::Open,
            (MenuState::Open, MenuMsg::Toggle) => MenuState::Closed,
            (_, MenuMsg::LinkClicked | MenuMsg::Escape) => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    /// Inline style for each of the three burger bars; `None` clears it.
    /// Open morphs the bars into an "X".
    pub fn bar_styles(self) -> [(&'static str, Option<&'static str>); 3] {
        match self {
            MenuState::Open => [
                ("transform", Some("rotate(45deg) translate(5px, 5px)")),
                ("opacity", Some("0")),
                ("transform", Some("rotate(-45deg) translate(5px, -5px)")),
            ],
            MenuState::Closed => [("transform", None), ("opacity", None), ("transform", None)],
        }
    }

    pub fn body_overflow(self) -> Option<&'static str> {
        match self {
            MenuState::Open => Some("hidden"),
            MenuState::Closed => None,
        }
    }
}

struct MobileMenu {
    state: MenuState,
    links: Element,
    bars: Vec<HtmlElement>,
    body: Option<HtmlElement>,
}

impl MobileMenu {
    fn send(&mut self, msg: MenuMsg) {
        let next = self.state.update(msg);
        if next != self.state {
            self.state = next;
            self.render();
        }
    }

    fn render(&self) {
        dom::set_class(&self.links, OPEN_CLASS, self.state.is_open());

        if let Some(body) = &self.body {
            match self.state.body_overflow() {
                Some(value) => dom::set_style(body, "overflow", value),
                None => dom::clear_style(body, "overflow"),
            }
        }

        for (bar, (property, value)) in self.bars.iter().zip(self.state.bar_styles()) {
            match value {
                Some(value) => dom::set_style(bar, property, value),
                None => dom::clear_style(bar, property),
            }
        }
    }
}

pub fn mount(_window: &Window, document: &Document, _config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    let (Some(toggle), Some(links)) = (
        document.get_element_by_id(TOGGLE_ID),
        document.get_element_by_id(LINKS_ID),
    ) else {
        return Ok(None);
    };

    let bars = dom::query_all_in(&toggle, "span")?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();

    let menu = Rc::new(RefCell::new(MobileMenu {
        state: MenuState::Closed,
        links: links.clone(),
        bars,
        body: document.body(),
    }));

    let mut effect = Effect::new("mobile_menu");

    {
        let menu = menu.clone();
        effect.listen(Listener::new(&toggle, "click", move |_: MouseEvent| {
            menu.borrow_mut().send(MenuMsg::Toggle);
        })?);
    }

    for link in dom::query_all_in(&links, "a")? {
        let menu = menu.clone();
        effect.listen(Listener::new(&link, "click", move |_: MouseEvent| {
            menu.borrow_mut().send(MenuMsg::LinkClicked);
        })?);
    }

    effect.listen(Listener::new(document, "keydown", move |e: KeyboardEvent| {
        if e.key() == "Escape" {
            menu.borrow_mut().send(MenuMsg::Escape);
        }
    })?);

    Ok(Some(effect))
}
