//! Ordered multimap of relation name to links.

use crate::domain::link::Link;

#[derive(Debug, Clone, PartialEq)]
struct Relation {
    name: String,
    links: Vec<Link>,
    as_array: bool,
}

/// Links attached to a resource or collection, grouped by relation.
///
/// Relations keep the order in which they were first added, and links within
/// a relation keep their insertion order. A relation with a single link
/// renders as an object unless it was added with [`LinkCollection::add_as_array`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkCollection {
    relations: Vec<Relation>,
}

impl LinkCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a link to its relation.
    pub fn add(&mut self, link: Link) {
        match self.position(link.relation()) {
            Some(i) => self.relations[i].links.push(link),
            None => self.relations.push(Relation {
                name: link.relation().to_string(),
                links: vec![link],
                as_array: false,
            }),
        }
    }

    /// Appends a link and marks its relation to always render as an array.
    pub fn add_as_array(&mut self, link: Link) {
        let relation = link.relation().to_string();
        self.add(link);
        if let Some(i) = self.position(&relation) {
            self.relations[i].as_array = true;
        }
    }

    pub fn add_all(&mut self, links: impl IntoIterator<Item = Link>) {
        for link in links {
            self.add(link);
        }
    }

    /// Replaces every link of the relation with `link`.
    pub fn set(&mut self, link: Link) {
        match self.position(link.relation()) {
            Some(i) => self.relations[i].links = vec![link],
            None => self.add(link),
        }
    }

    /// Builder-style [`LinkCollection::add`].
    pub fn with(mut self, link: Link) -> Self {
        self.add(link);
        self
    }

    pub fn get(&self, relation: &str) -> Option<&[Link]> {
        self.position(relation)
            .map(|i| self.relations[i].links.as_slice())
    }

    /// First link of a relation.
    pub fn first(&self, relation: &str) -> Option<&Link> {
        self.get(relation).and_then(|links| links.first())
    }

    pub fn has(&self, relation: &str) -> bool {
        self.position(relation).is_some()
    }

    /// Removes a relation and returns its links.
    pub fn remove(&mut self, relation: &str) -> Option<Vec<Link>> {
        self.position(relation)
            .map(|i| self.relations.remove(i).links)
    }

    /// Number of relations.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Iterates relations in order as `(name, links, render_as_array)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Link], bool)> {
        self.relations
            .iter()
            .map(|r| (r.name.as_str(), r.links.as_slice(), r.as_array))
    }

    fn position(&self, relation: &str) -> Option<usize> {
        self.relations.iter().position(|r| r.name == relation)
    }
}
