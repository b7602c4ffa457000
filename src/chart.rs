//! Maps category aggregates into renderer-agnostic chart series.
//!
//! Two shapes are produced: a share series for proportion-style charts (pie)
//! and a magnitude series for comparison-style charts (bars). Neither shape
//! knows anything about pixels; the rendering layer maps entries to visuals.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::aggregation::CategoryAggregate;

/// Slices below this share of the window total get their inline label
/// suppressed. They still render in legends and count towards totals.
pub const INLINE_LABEL_MIN_SHARE: f64 = 0.05;

/// One slice or bar of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeriesEntry {
    /// The display name of the entry.
    pub name: String,
    /// The entry's value. Entries of a series always sum to the window total.
    pub value: f64,
    /// The color token the rendering layer should use, if the palette or
    /// color map provided one.
    pub display_color: Option<String>,
    /// Whether the slice is too small for an inline label. Suppressed slices
    /// are never excluded from the series or from percentage-of-total math.
    pub suppress_inline_label: bool,
}

/// A fixed ordered list of color tokens supplied by the rendering layer.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Create a palette from an ordered list of color tokens.
    pub fn new<S: Into<String>>(colors: impl IntoIterator<Item = S>) -> Self {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
        }
    }

    /// The color for a series position, wrapping modulo the palette length.
    /// Returns `None` for an empty palette.
    pub fn color_at(&self, index: usize) -> Option<&str> {
        if self.colors.is_empty() {
            None
        } else {
            Some(self.colors[index % self.colors.len()].as_str())
        }
    }
}

/// Projects [CategoryAggregate] sets into chart series shapes.
#[derive(Debug, Clone, Default)]
pub struct ChartProjector {
    palette: Palette,
    color_map: HashMap<String, String>,
}

impl ChartProjector {
    /// Create a projector that assigns colors from `palette` by position
    /// index.
    ///
    /// Positional assignment means the same category can receive a different
    /// color when ordering changes between invocations. Callers that need a
    /// stable color per category should add an explicit map with
    /// [ChartProjector::with_color_map].
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            color_map: HashMap::new(),
        }
    }

    /// Pin categories to colors. Mapped categories keep their color across
    /// invocations regardless of position; unmapped categories fall back to
    /// positional palette assignment.
    pub fn with_color_map(mut self, color_map: HashMap<String, String>) -> Self {
        self.color_map = color_map;
        self
    }

    /// Project `aggregates` into a share series for proportion-style charts.
    ///
    /// Entries are sorted by descending current sum, ties broken by category
    /// name ascending, so the projection is deterministic. Entry values sum
    /// exactly to the window's expense total.
    pub fn share_series(
        &self,
        aggregates: &BTreeMap<String, CategoryAggregate>,
    ) -> Vec<ChartSeriesEntry> {
        let mut ordered: Vec<&CategoryAggregate> = aggregates.values().collect();
        ordered.sort_by(|a, b| {
            b.current_sum
                .partial_cmp(&a.current_sum)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });

        let total: f64 = ordered.iter().map(|aggregate| aggregate.current_sum).sum();

        ordered
            .into_iter()
            .enumerate()
            .map(|(index, aggregate)| ChartSeriesEntry {
                name: aggregate.category.clone(),
                value: aggregate.current_sum,
                display_color: self.color_for(&aggregate.category, index),
                suppress_inline_label: is_below_label_threshold(aggregate.current_sum, total),
            })
            .collect()
    }

    /// Project `aggregates` into a magnitude series for comparison-style
    /// charts.
    ///
    /// The caller controls the ordering (e.g. chronological for
    /// month-over-month bars) and supplies the display label per aggregate;
    /// the given order is preserved.
    pub fn magnitude_series<F>(
        &self,
        aggregates: &[CategoryAggregate],
        label: F,
    ) -> Vec<ChartSeriesEntry>
    where
        F: Fn(&CategoryAggregate) -> String,
    {
        let total: f64 = aggregates
            .iter()
            .map(|aggregate| aggregate.current_sum)
            .sum();

        aggregates
            .iter()
            .enumerate()
            .map(|(index, aggregate)| ChartSeriesEntry {
                name: label(aggregate),
                value: aggregate.current_sum,
                display_color: self.color_for(&aggregate.category, index),
                suppress_inline_label: is_below_label_threshold(aggregate.current_sum, total),
            })
            .collect()
    }

    /// Order `aggregates` by descending current sum and assign display
    /// colors, for tabular trend views.
    pub fn trend_rows(
        &self,
        aggregates: &BTreeMap<String, CategoryAggregate>,
    ) -> Vec<CategoryAggregate> {
        let mut rows: Vec<CategoryAggregate> = aggregates.values().cloned().collect();
        rows.sort_by(|a, b| {
            b.current_sum
                .partial_cmp(&a.current_sum)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });

        for (index, row) in rows.iter_mut().enumerate() {
            row.display_color = self.color_for(&row.category, index);
        }

        rows
    }

    fn color_for(&self, category: &str, index: usize) -> Option<String> {
        self.color_map
            .get(category)
            .cloned()
            .or_else(|| self.palette.color_at(index).map(str::to_owned))
    }
}

fn is_below_label_threshold(value: f64, total: f64) -> bool {
    total > 0.0 && value / total < INLINE_LABEL_MIN_SHARE
}
