//! The help-document model mutated alongside the build descriptor.

/// Generated reference documentation for a project: getting-started links
/// and free-form titled sections. Transformation rules that add build
/// content couple a doc mutation to it, so docs and build stay consistent
/// by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HelpDocument {
    links: Vec<Link>,
    sections: Vec<Section>,
}

/// A reference link in the getting-started block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub description: String,
}

/// A titled free-form section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: String,
}

impl HelpDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference link. Identical links are deduplicated.
    pub fn add_link(&mut self, href: impl Into<String>, description: impl Into<String>) {
        let link = Link {
            href: href.into(),
            description: description.into(),
        };
        if !self.links.contains(&link) {
            self.links.push(link);
        }
    }

    pub fn add_section(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.sections.push(Section {
            title: title.into(),
            body: body.into(),
        });
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.sections.is_empty()
    }
}
