use super::query::{split_hash, QueryMap};
use crate::component::{Component, ComponentFactory};
use crate::error::{Error, Result};
use regex::Regex;

/// A path pattern bound to the component it mounts.
#[derive(Debug, Clone)]
pub struct Route {
    pattern: String,
    matcher: Regex,
    component: ComponentFactory,
}

impl Route {
    /// Compile `pattern` and bind it to `constructor`.
    ///
    /// The pattern is a regular expression matched anywhere in the hash path
    /// but anchored at its end, with an optional trailing slash.
    pub fn new<F, C>(pattern: &str, constructor: F) -> Result<Self>
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Component + 'static,
    {
        Self::with_factory(pattern, ComponentFactory::new(constructor))
    }

    pub fn with_factory(pattern: &str, component: ComponentFactory) -> Result<Self> {
        let matcher = Regex::new(&format!("{pattern}/?$")).map_err(|source| {
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
            component,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, hash_path: &str) -> bool {
        self.matcher.is_match(hash_path)
    }

    pub fn component(&self) -> &ComponentFactory {
        &self.component
    }
}

/// What a render pass should mount for a given hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountDecision {
    pub hash_path: String,
    pub query: QueryMap,
    /// Index of the winning route in its table.
    pub route: Option<usize>,
}

/// Ordered, immutable list of routes. The first matching route wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Index of the first route matching `hash_path`.
    pub fn find(&self, hash_path: &str) -> Option<usize> {
        self.routes.iter().position(|route| route.matches(hash_path))
    }

    /// Resolve a full hash (path plus optional query) without side effects.
    pub fn resolve(&self, hash: &str) -> MountDecision {
        let (hash_path, query_string) = split_hash(hash);
        MountDecision {
            hash_path: hash_path.to_string(),
            query: QueryMap::parse(query_string),
            route: self.find(hash_path),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}

impl FromIterator<Route> for RouteTable {
    fn from_iter<T: IntoIterator<Item = Route>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Element;

    struct Page(Element);

    impl Component for Page {
        fn el(&self) -> &Element {
            &self.0
        }
    }

    fn page(name: &'static str) -> impl Fn() -> Page + Send + Sync + 'static {
        move || Page(Element::new("div").with_text(name))
    }

    fn table() -> RouteTable {
        RouteTable::new(vec![
            Route::new("#/", page("home")).unwrap(),
            Route::new("#/music", page("music")).unwrap(),
            Route::new("#/about", page("about")).unwrap(),
            Route::new(".*", page("not found")).unwrap(),
        ])
    }

    #[test]
    fn first_match_wins() {
        let table = table();
        assert_eq!(table.find("#/"), Some(0));
        assert_eq!(table.find("#/music"), Some(1));
        assert_eq!(table.find("#/about"), Some(2));
        assert_eq!(table.find("#/bogus"), Some(3));
    }

    #[test]
    fn trailing_slash_is_optional() {
        let table = table();
        assert_eq!(table.find("#/music/"), Some(1));
        assert_eq!(table.find("#/about/"), Some(2));
    }

    #[test]
    fn pattern_is_end_anchored_only() {
        let route = Route::new("#/about", page("about")).unwrap();
        assert!(route.matches("#/x#/about"));
        assert!(!route.matches("#/about/team"));
    }

    #[test]
    fn resolve_ignores_query_for_matching() {
        let decision = table().resolve("#/music?x=1");
        assert_eq!(decision.hash_path, "#/music");
        assert_eq!(decision.route, Some(1));
        assert_eq!(decision.query, [("x", "1")].into_iter().collect::<QueryMap>());
    }

    #[test]
    fn no_catch_all_means_no_match() {
        let table = RouteTable::new(vec![Route::new("#/", page("home")).unwrap()]);
        let decision = table.resolve("#/missing");
        assert_eq!(decision.route, None);
        assert!(decision.query.is_empty());
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = Route::new("#/(", page("broken")).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "#/("));
    }
}
