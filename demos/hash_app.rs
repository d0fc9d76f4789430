//! A four-page hash-routed app driven by an in-memory history.
//!
//! Run with `RUST_LOG=hashnav=debug` to watch the router work.

use hashnav::navigation::{MemoryNavigation, RouterView};
use hashnav::{Component, ComponentBase, ComponentPayload, Element, Route, RouteTable, Router, Store};
use serde_json::{Map, Value};

struct Home {
    base: ComponentBase,
}

impl Home {
    fn new() -> Self {
        Self {
            base: ComponentBase::default(),
        }
    }
}

impl Component for Home {
    fn el(&self) -> &Element {
        &self.base.el
    }

    fn render(&mut self) {
        self.base.el.set_attribute("class", "home");
        self.base.el.append(Element::new("h1").with_text("Home"));
    }
}

struct About {
    base: ComponentBase,
}

impl About {
    fn new() -> Self {
        let mut props = Map::new();
        props.insert("email".into(), Value::from("hello@example.com"));
        Self {
            base: ComponentBase::new(ComponentPayload {
                tag_name: Some("section".into()),
                props,
                ..ComponentPayload::default()
            }),
        }
    }
}

impl Component for About {
    fn el(&self) -> &Element {
        &self.base.el
    }

    fn render(&mut self) {
        let email = self.base.props["email"].as_str().unwrap_or_default();
        self.base.el.append(Element::new("h1").with_text("About"));
        self.base.el.append(Element::new("p").with_text(email));
    }
}

struct Music {
    base: ComponentBase,
}

impl Music {
    fn new() -> Self {
        let mut state = Map::new();
        state.insert(
            "tracks".into(),
            Value::from(vec!["Intro", "Theme", "Outro"]),
        );
        Self {
            base: ComponentBase::new(ComponentPayload {
                state,
                ..ComponentPayload::default()
            }),
        }
    }
}

impl Component for Music {
    fn el(&self) -> &Element {
        &self.base.el
    }

    fn render(&mut self) {
        let mut list = Element::new("ul");
        if let Some(tracks) = self.base.state["tracks"].as_array() {
            for track in tracks.iter().filter_map(Value::as_str) {
                list.append(Element::new("li").with_text(track));
            }
        }
        self.base.el.append(Element::new("h1").with_text("Music"));
        self.base.el.append(list);
    }
}

struct NotFound {
    base: ComponentBase,
}

impl Component for NotFound {
    fn el(&self) -> &Element {
        &self.base.el
    }

    fn render(&mut self) {
        self.base.el.append(Element::new("h1").with_text("Sorry.. Page Not Found!"));
    }
}

/// The root component: an empty shell holding the view slot.
struct App {
    base: ComponentBase,
    view: RouterView,
}

impl App {
    fn new(view: RouterView) -> Self {
        Self {
            base: ComponentBase::default(),
            view,
        }
    }

    fn to_html(&self) -> String {
        let mut el = self.base.el.clone();
        el.append(self.view.to_element());
        el.to_html()
    }
}

fn main() -> hashnav::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hashnav=info".into()),
        )
        .init();

    let routes = RouteTable::new(vec![
        Route::new("#/", Home::new)?,
        Route::new("#/music", Music::new)?,
        Route::new("#/about", About::new)?,
        Route::new(".*", || NotFound {
            base: ComponentBase::default(),
        })?,
    ]);

    let nav = MemoryNavigation::new("/");
    let view = RouterView::new();
    let app = App::new(view.clone());
    let router = Router::new(routes, nav.clone(), view);

    let store = Store::new([("visits", 0u32)]);
    store.subscribe("visits", |visits| println!("   [store] visits: {visits}"));

    router.start();
    println!("{:<24} {}", nav.url(), app.to_html());

    for hash in ["#/music?sort=asc", "#/about", "#/nope"] {
        nav.set_hash(hash);
        store.update("visits", |visits| *visits += 1);
        println!("{:<24} {}", nav.url(), app.to_html());
        println!("   [state] {}", nav.state().unwrap_or_default().to_json());
    }

    nav.back();
    println!("{:<24} {}  (back)", nav.url(), app.to_html());

    nav.push("#/");
    println!("{:<24} {}  (push, not rendered)", nav.url(), app.to_html());

    Ok(())
}
