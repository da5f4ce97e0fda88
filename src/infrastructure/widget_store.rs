//! In-memory widget catalog backing the demo service.

use serde::Serialize;
use serde_json::json;

use crate::domain::{CollectionItem, PaginatorAdapter};

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Widget {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub manufacturer_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
    pub country: String,
}

const COLORS: [&str; 4] = ["red", "green", "blue", "black"];

const MANUFACTURERS: [(&str, &str); 3] = [
    ("Acme Corporation", "US"),
    ("Globex", "DE"),
    ("Initech", "JP"),
];

/// Read-only store seeded at startup.
///
/// Also serves as the paginator source for `GET /widgets`: only the
/// requested page is ever materialized.
#[derive(Debug, Clone)]
pub struct WidgetStore {
    widgets: Vec<Widget>,
    manufacturers: Vec<Manufacturer>,
}

impl WidgetStore {
    pub fn new(widgets: Vec<Widget>, manufacturers: Vec<Manufacturer>) -> Self {
        Self {
            widgets,
            manufacturers,
        }
    }

    /// Generates `count` widgets with ids `1..=count`, spread over a fixed set of manufacturers.
    pub fn seeded(count: usize) -> Self {
        let manufacturers = MANUFACTURERS
            .iter()
            .zip(1..)
            .map(|((name, country), id)| Manufacturer {
                id,
                name: name.to_string(),
                country: country.to_string(),
            })
            .collect::<Vec<_>>();

        let widgets = (1..=count as i64)
            .map(|id| Widget {
                id,
                name: format!("Widget {id}"),
                color: COLORS[(id as usize - 1) % COLORS.len()].to_string(),
                manufacturer_id: (id - 1) % manufacturers.len() as i64 + 1,
            })
            .collect();

        Self::new(widgets, manufacturers)
    }

    pub fn widget(&self, id: i64) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn manufacturer(&self, id: i64) -> Option<&Manufacturer> {
        self.manufacturers.iter().find(|m| m.id == id)
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }
}

impl PaginatorAdapter for WidgetStore {
    fn count(&self) -> usize {
        self.widgets.len()
    }

    fn slice(&self, offset: usize, limit: usize) -> Vec<CollectionItem> {
        tracing::debug!(offset, limit, "Slicing widget catalog");

        self.widgets
            .iter()
            .skip(offset)
            .take(limit)
            .map(|w| {
                CollectionItem::Raw(json!({
                    "id": w.id,
                    "name": w.name,
                    "color": w.color,
                }))
            })
            .collect()
    }
}
