use pagecraft_markup::Element;
use std::fmt;
use std::sync::Arc;

/// Decides whether an imported element belongs to a component type
#[derive(Clone)]
pub enum Recognizer {
    /// Any of these tag names (case-insensitive)
    TagName(Vec<String>),
    /// Element carries this class
    Class(String),
    /// Element carries this attribute with a non-empty value
    Attribute(String),
    AnyOf(Vec<Recognizer>),
    Custom(Arc<dyn Fn(&Element) -> bool + Send + Sync>),
}

impl Recognizer {
    pub fn tag_names<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Recognizer::TagName(tags.into_iter().map(Into::into).collect())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Recognizer::Class(name.into())
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Recognizer::Attribute(name.into())
    }

    pub fn custom(predicate: impl Fn(&Element) -> bool + Send + Sync + 'static) -> Self {
        Recognizer::Custom(Arc::new(predicate))
    }

    pub fn or(self, other: Recognizer) -> Self {
        match self {
            Recognizer::AnyOf(mut all) => {
                all.push(other);
                Recognizer::AnyOf(all)
            }
            first => Recognizer::AnyOf(vec![first, other]),
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Recognizer::TagName(tags) => element.has_tag_name(tags.as_slice()),
            Recognizer::Class(name) => element.has_class(name),
            Recognizer::Attribute(name) => element.has_attribute(name),
            Recognizer::AnyOf(all) => all.iter().any(|r| r.matches(element)),
            Recognizer::Custom(predicate) => predicate(element),
        }
    }
}

impl fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recognizer::TagName(tags) => f.debug_tuple("TagName").field(tags).finish(),
            Recognizer::Class(name) => f.debug_tuple("Class").field(name).finish(),
            Recognizer::Attribute(name) => f.debug_tuple("Attribute").field(name).finish(),
            Recognizer::AnyOf(all) => f.debug_tuple("AnyOf").field(all).finish(),
            Recognizer::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_tags() {
        let r = Recognizer::tag_names(["H1", "H2", "H3", "H4", "H5", "H6"]);
        assert!(r.matches(&Element::new("h2")));
        assert!(!r.matches(&Element::new("p")));
    }

    #[test]
    fn test_class_or_attribute() {
        let r = Recognizer::class("gjs-icon").or(Recognizer::attribute("data-type-icon"));
        assert!(r.matches(&Element::new("span").with_attribute("class", "x gjs-icon")));
        assert!(r.matches(&Element::new("span").with_attribute("data-type-icon", "true")));
        assert!(!r.matches(&Element::new("span").with_attribute("data-type-icon", "")));
    }
}
