//! Search query parsing.
//!
//! A raw query such as `"style:portrait scene:outdoor sunset"` is split into
//! structured [`TagPredicate`]s (`facet:value` tokens) and a free-text residual
//! (`"sunset"`). Combined with a [`LocationFilter`] it forms the active
//! [`Query`].

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Location selector value meaning "no location filter".
pub const ALL_LOCATIONS: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Style,
    Scene,
    Lighting,
    Shot,
    Object,
}

impl Facet {
    pub const ALL: [Facet; 5] = [
        Facet::Style,
        Facet::Scene,
        Facet::Lighting,
        Facet::Shot,
        Facet::Object,
    ];

    /// Token prefix used in queries (`style:`, `shot:`, ...).
    pub fn prefix(&self) -> &'static str {
        match self {
            Facet::Style => "style",
            Facet::Scene => "scene",
            Facet::Lighting => "lighting",
            Facet::Shot => "shot",
            Facet::Object => "object",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facet::ALL
            .into_iter()
            .find(|facet| facet.prefix() == s)
            .ok_or_else(|| format!("Unknown facet: {}", s))
    }
}

/// A `facet:value` constraint. The value is stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagPredicate {
    pub facet: Facet,
    pub value: String,
}

impl TagPredicate {
    pub fn new(facet: Facet, value: impl Into<String>) -> Self {
        Self {
            facet,
            value: value.into().to_lowercase(),
        }
    }

    /// Parses a single token. Only the first two `:`-separated parts count,
    /// both must be non-empty and the facet must be known.
    pub fn parse_token(token: &str) -> Option<Self> {
        if !token.contains(':') {
            return None;
        }
        let mut parts = token.split(':');
        let facet = parts.next().filter(|s| !s.is_empty())?;
        let value = parts.next().filter(|s| !s.is_empty())?;
        let facet = Facet::from_str(facet).ok()?;
        Some(Self::new(facet, value))
    }
}

impl fmt::Display for TagPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.facet, self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    raw: String,
    predicates: Vec<TagPredicate>,
    free_text: String,
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        let mut predicates = Vec::new();
        let mut residual = Vec::new();

        for token in normalized.split_whitespace() {
            match TagPredicate::parse_token(token) {
                Some(predicate) => predicates.push(predicate),
                None => residual.push(token),
            }
        }

        Self {
            raw: raw.to_string(),
            predicates,
            free_text: residual.join(" "),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn predicates(&self) -> &[TagPredicate] {
        &self.predicates
    }

    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    /// Whether this query participates in filtering at all. Short free-text
    /// queries without predicates fall back to the plain location filter.
    pub fn is_active(&self, min_len: usize) -> bool {
        !self.predicates.is_empty() || self.raw.trim().chars().count() >= min_len
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "lowercase")]
pub enum LocationFilter {
    #[default]
    All,
    Only(String),
}

impl LocationFilter {
    pub fn only(location: impl Into<String>) -> Self {
        LocationFilter::Only(location.into())
    }

    /// Maps the selector value from the location bar; `"all"` clears the filter.
    pub fn from_selector(value: &str) -> Self {
        if value == ALL_LOCATIONS {
            LocationFilter::All
        } else {
            LocationFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, location: &str) -> bool {
        match self {
            LocationFilter::All => true,
            LocationFilter::Only(wanted) => wanted == location,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    pub location: LocationFilter,
    pub search: SearchQuery,
}

impl Query {
    pub fn new(location: LocationFilter, raw_search: &str) -> Self {
        Self {
            location,
            search: SearchQuery::parse(raw_search),
        }
    }

    pub fn with_search(mut self, raw_search: &str) -> Self {
        self.search = SearchQuery::parse(raw_search);
        self
    }

    pub fn with_location(mut self, location: LocationFilter) -> Self {
        self.location = location;
        self
    }
}

/// Appends a `facet:value` token to the current search input.
pub fn insert_tag(current: &str, tag: &str) -> String {
    let current = current.trim();
    if current.is_empty() {
        tag.to_string()
    } else {
        format!("{} {}", current, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_predicates_and_free_text() {
        let q = SearchQuery::parse("  Style:Portrait sunset  OVER object:tree ");
        assert_eq!(
            q.predicates(),
            &[
                TagPredicate::new(Facet::Style, "portrait"),
                TagPredicate::new(Facet::Object, "tree"),
            ]
        );
        assert_eq!(q.free_text(), "sunset over");
    }

    #[test]
    fn half_empty_tokens_stay_free_text() {
        let q = SearchQuery::parse("style: :night");
        assert!(q.predicates().is_empty());
        assert_eq!(q.free_text(), "style: :night");
    }

    #[test]
    fn unknown_facet_is_free_text() {
        let q = SearchQuery::parse("camera:leica 12:30");
        assert!(q.predicates().is_empty());
        assert_eq!(q.free_text(), "camera:leica 12:30");
    }

    #[test]
    fn only_first_two_parts_of_token_count() {
        let q = SearchQuery::parse("shot:close:up");
        assert_eq!(q.predicates(), &[TagPredicate::new(Facet::Shot, "close")]);
    }

    #[test]
    fn short_query_is_inactive() {
        assert!(!SearchQuery::parse(" a ").is_active(2));
        assert!(!SearchQuery::parse("").is_active(2));
        assert!(SearchQuery::parse("ab").is_active(2));
        assert!(SearchQuery::parse("shot:x").is_active(10));
    }

    #[test]
    fn location_selector() {
        assert_eq!(LocationFilter::from_selector("all"), LocationFilter::All);
        assert!(LocationFilter::from_selector("Rome").matches("Rome"));
        assert!(!LocationFilter::from_selector("Rome").matches("rome"));
    }

    #[test]
    fn insert_tag_appends_with_space() {
        assert_eq!(insert_tag("", "style:street"), "style:street");
        assert_eq!(insert_tag(" sunset  ", "scene:outdoor"), "sunset scene:outdoor");
    }

    #[test]
    fn facet_round_trips_through_prefix() {
        for facet in Facet::ALL {
            assert_eq!(facet.prefix().parse::<Facet>().unwrap(), facet);
        }
        assert!("colour".parse::<Facet>().is_err());
    }
}
