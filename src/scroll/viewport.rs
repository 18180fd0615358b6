//! Viewport observation.
//!
//! Turns section geometry plus a scroll offset into the four values
//! [`ScrollStore::update_from_scroll`] expects. Units are whatever the view
//! layer measures in (terminal rows for the presenter).

use super::state::{clamp_unit, Direction};
use super::store::ScrollStore;
use crate::model::SectionId;

/// Fraction of the viewport height, from the top, where reading happens.
///
/// A section becomes current once its top edge crosses this line.
pub const READING_LINE: f64 = 1.0 / 3.0;

/// Layout of one section in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionInfo {
    pub id: SectionId,
    pub index: usize,
    pub top: f64,
    pub height: f64,
}

impl SectionInfo {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// One measurement, ready for the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSample {
    pub section: Option<SectionId>,
    pub progress: f64,
    pub global_progress: f64,
    pub direction: Option<Direction>,
}

/// Section geometry plus the last observed offset.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    sections: Vec<SectionInfo>,
    document_height: f64,
    last_offset: Option<f64>,
}

impl Viewport {
    /// `sections` may come in any order; they are kept sorted by `top`.
    pub fn new(mut sections: Vec<SectionInfo>, document_height: f64) -> Self {
        sections.sort_by(|a, b| a.top.total_cmp(&b.top));
        Self {
            sections,
            document_height: document_height.max(0.0),
            last_offset: None,
        }
    }

    /// Lay sections out back to back starting at 0, followed by `trailing`
    /// space that belongs to no section.
    pub fn stacked<I>(heights: I, trailing: f64) -> Self
    where
        I: IntoIterator<Item = (SectionId, f64)>,
    {
        let mut top = 0.0;
        let sections = heights
            .into_iter()
            .enumerate()
            .map(|(index, (id, height))| {
                let info = SectionInfo {
                    id,
                    index,
                    top,
                    height,
                };
                top += height;
                info
            })
            .collect();
        Self::new(sections, top + trailing.max(0.0))
    }

    pub fn sections(&self) -> &[SectionInfo] {
        &self.sections
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    pub fn section(&self, id: &SectionId) -> Option<&SectionInfo> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Offset that puts `id`'s top edge on the reading line.
    pub fn offset_for(&self, id: &SectionId, viewport_height: f64) -> Option<f64> {
        self.section(id)
            .map(|s| (s.top - viewport_height * READING_LINE).max(0.0))
    }

    /// Largest useful scroll offset.
    pub fn max_offset(&self, viewport_height: f64) -> f64 {
        (self.document_height - viewport_height).max(0.0)
    }

    /// Measure the viewport at `offset` and remember the offset for the
    /// next direction computation.
    pub fn measure(&mut self, offset: f64, viewport_height: f64) -> ScrollSample {
        let reading_line = offset + viewport_height * READING_LINE;

        let current = self.sections.iter().rev().find(|s| s.top <= reading_line);
        let progress = match current {
            Some(s) if s.height > 0.0 => clamp_unit((reading_line - s.top) / s.height),
            Some(_) => 1.0,
            None => 0.0,
        };

        // Denominator floored at one row so short documents stay finite.
        let global_progress = clamp_unit(offset / self.max_offset(viewport_height).max(1.0));

        let direction = self
            .last_offset
            .and_then(|last| Direction::from_delta(offset - last));
        self.last_offset = Some(offset);

        ScrollSample {
            section: current.map(|s| s.id.clone()),
            progress,
            global_progress,
            direction,
        }
    }

    /// Measure and forward the sample to `store`.
    pub fn observe(
        &mut self,
        store: &ScrollStore,
        offset: f64,
        viewport_height: f64,
    ) -> ScrollSample {
        let sample = self.measure(offset, viewport_height);
        store.update_from_scroll(
            sample.section.clone(),
            sample.progress,
            sample.global_progress,
            sample.direction,
        );
        sample
    }
}
