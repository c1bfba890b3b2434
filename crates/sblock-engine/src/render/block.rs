use html_escape::encode_double_quoted_attribute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Generic block container.
    Div,
    /// Link; used by buttons.
    Anchor,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Anchor => "a",
        }
    }
}

/// Attribute list that keeps insertion order.
///
/// Setting an existing name overwrites its value where it stands; removing
/// leaves the order of the remaining entries untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.0.iter().position(|(n, _)| n == name)?;
        Some(self.0.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Renderer output: a tag, its attributes and already-rendered inner markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub tag: Tag,
    pub attributes: Attributes,
    pub inner: String,
}

impl RenderedBlock {
    pub fn new(tag: Tag, inner: impl Into<String>) -> Self {
        Self {
            tag,
            attributes: Attributes::default(),
            inner: inner.into(),
        }
    }

    /// Serializes to HTML, escaping every attribute value.
    ///
    /// Empty values are written as bare attribute names. A `div` puts its
    /// inner block markup on its own lines; an anchor wraps it inline.
    pub fn write_html(&self, out: &mut String) {
        let name = self.tag.name();
        out.push('<');
        out.push_str(name);
        for (attr, value) in self.attributes.iter() {
            out.push(' ');
            out.push_str(attr);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&encode_double_quoted_attribute(value));
                out.push('"');
            }
        }
        out.push('>');
        if self.tag == Tag::Div {
            out.push('\n');
        }
        out.push_str(&self.inner);
        out.push_str("</");
        out.push_str(name);
        out.push_str(">\n");
    }

    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.inner.len() + 64);
        self.write_html(&mut out);
        out
    }
}
