//! Pagination of wrapped text into height-limited pages.
//!
//! The renderer wraps a logical text into display lines; styles are still
//! keyed by logical position. [`Paginator::paginate`] first re-keys the
//! styles to wrapped coordinates with an [`AlignmentMap`], then groups
//! consecutive lines into pages whose accumulated height reaches the
//! desired page height.
//!
//! # Example
//!
//! ```
//! use labeltext::model::StyleMap;
//! use labeltext::paginate::{LineHeights, Paginator};
//!
//! fn main() -> labeltext::Result<()> {
//!     let lines = ["a", "b", "c"];
//!     let pages = Paginator::new(15.0).paginate(
//!         &lines,
//!         &LineHeights::Uniform(10.0),
//!         &StyleMap::new(),
//!         "a b c",
//!     )?;
//!
//!     assert_eq!(pages.len(), 2);
//!     assert_eq!(pages[0].text(), "a\nb");
//!     Ok(())
//! }
//! ```

mod align;
mod page;

pub use align::AlignmentMap;
pub use page::{page_label, PageGroup};

use std::ops::Range;

use crate::error::{Error, Result};
use crate::model::StyleMap;

/// Rendered height of each wrapped line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineHeights {
    /// One height per wrapped line
    PerLine(Vec<f64>),
    /// The same height for every line
    Uniform(f64),
}

impl LineHeights {
    fn resolve(&self, line_count: usize) -> Result<Vec<f64>> {
        match self {
            LineHeights::PerLine(heights) if heights.len() != line_count => {
                Err(Error::LineHeightMismatch {
                    lines: line_count,
                    heights: heights.len(),
                })
            }
            LineHeights::PerLine(heights) => Ok(heights.clone()),
            LineHeights::Uniform(height) => Ok(vec![*height; line_count]),
        }
    }
}

/// Splits wrapped text into pages of a desired height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paginator {
    desired_height: f64,
}

impl Paginator {
    /// Create a paginator for pages of `desired_height`.
    pub fn new(desired_height: f64) -> Self {
        Self { desired_height }
    }

    /// Height budget of one page.
    pub fn desired_height(&self) -> f64 {
        self.desired_height
    }

    /// Split wrapped lines into pages, carrying their styles along.
    ///
    /// `styles` is keyed by position in `original_text`; every returned page
    /// has its styles keyed by its own wrapped lines, starting at 0.
    pub fn paginate<S: AsRef<str>>(
        &self,
        wrapped_lines: &[S],
        heights: &LineHeights,
        styles: &StyleMap,
        original_text: &str,
    ) -> Result<Vec<PageGroup>> {
        let heights = heights.resolve(wrapped_lines.len())?;

        let alignment = AlignmentMap::build(original_text, wrapped_lines);
        let wrapped_styles = alignment.reindex(styles);

        let pages = self
            .partition(&heights)
            .into_iter()
            .map(|range| PageGroup {
                start_line: range.start,
                lines: wrapped_lines[range.clone()]
                    .iter()
                    .map(|line| line.as_ref().to_string())
                    .collect(),
                height: heights[range.clone()].iter().sum(),
                styles: wrapped_styles.slice_lines(range),
            })
            .collect();

        Ok(pages)
    }

    /// Group line indices into pages.
    ///
    /// A page closes once its accumulated height reaches the desired height,
    /// or at the last line. Every page holds at least one line.
    pub fn partition(&self, heights: &[f64]) -> Vec<Range<usize>> {
        let mut pages = Vec::new();
        let mut start = 0;
        let mut total = 0.0;

        for (index, height) in heights.iter().enumerate() {
            total += height;
            if total >= self.desired_height || index + 1 == heights.len() {
                log::debug!(
                    "Closing page {} at line {} (height {:.1} of {:.1})",
                    pages.len() + 1,
                    index,
                    total,
                    self.desired_height
                );
                pages.push(start..index + 1);
                start = index + 1;
                total = 0.0;
            }
        }
        pages
    }
}
