use tracing::warn;

/// Built-in goal categories, in catalog order.
pub const DEFAULT_CATEGORIES: [&str; 5] =
    ["Education", "Home Purchase", "Car", "Travel", "Wedding"];

/// Fixed, ordered list of selectable goal categories.
///
/// Immutable after construction. Every goal row's selector offers a blank
/// "unselected" entry followed by these labels in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    labels: Vec<String>,
}

impl CategoryCatalog {
    /// Builds a catalog from configured labels.
    ///
    /// Blank labels and repeated labels are dropped with a warning (first
    /// occurrence wins, order preserved). An empty result falls back to the
    /// built-in catalog.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            let trimmed = label.trim();
            if trimmed.is_empty() {
                warn!("dropping blank category label from configured catalog");
                continue;
            }
            if kept.iter().any(|existing| existing == trimmed) {
                warn!("dropping duplicate category label '{trimmed}' from configured catalog");
                continue;
            }
            kept.push(trimmed.to_string());
        }

        if kept.is_empty() {
            return Self::default();
        }

        Self { labels: kept }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self {
            labels: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
