//! Reading-order sort for irregularly placed sprites.
//!
//! Components are clustered into rows by vertical center, then read left to
//! right within each row. A component joins the *first* open row, in creation
//! order, whose mean center is within `row_gap`; rows are never searched for
//! the nearest mean.

use crate::types::{Component, DEFAULT_ROW_GAP};

/// Orders components left-to-right, top-to-bottom.
#[derive(Debug, Clone, Copy)]
pub struct RowMajorSorter {
    pub row_gap: u32,
}

impl Default for RowMajorSorter {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_GAP)
    }
}

/// A row being built: running mean of member centers plus the members.
struct Row {
    mean: f64,
    members: Vec<Component>,
}

impl Row {
    fn push(&mut self, component: Component) {
        self.members.push(component);
        let sum: f64 = self.members.iter().map(Component::center_y).sum();
        self.mean = sum / self.members.len() as f64;
    }
}

impl RowMajorSorter {
    pub fn new(row_gap: u32) -> Self {
        Self { row_gap }
    }

    /// Sort components into reading order.
    pub fn sort(&self, components: Vec<Component>) -> Vec<Component> {
        self.rows(components).into_iter().flatten().collect()
    }

    /// Cluster components into rows, top row first, each row sorted by `min_x`.
    pub fn rows(&self, mut components: Vec<Component>) -> Vec<Vec<Component>> {
        components.sort_by(|a, b| {
            a.center_y()
                .total_cmp(&b.center_y())
                .then_with(|| a.min_x.cmp(&b.min_x))
        });

        let gap = self.row_gap as f64;
        let mut rows: Vec<Row> = Vec::new();

        for component in components {
            let center = component.center_y();
            match rows.iter_mut().find(|row| (center - row.mean).abs() <= gap) {
                Some(row) => row.push(component),
                None => rows.push(Row {
                    mean: center,
                    members: vec![component],
                }),
            }
        }

        rows.sort_by(|a, b| a.mean.total_cmp(&b.mean));

        rows.into_iter()
            .map(|mut row| {
                row.members.sort_by_key(|c| c.min_x);
                row.members
            })
            .collect()
    }
}
