use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::animation::{Animated, SegmentVisual};
use crate::render::Color;

use super::{JoinPartition, SegmentKey, count_join, keyed_join};

/// Vertical nudge applied to segments as they enter.
pub const ENTER_OFFSET_PX: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelElement {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Row labels keyed by label text. Labels have no exit animation.
#[derive(Debug, Clone, Default)]
pub struct LabelLayer {
    elements: IndexMap<String, LabelElement>,
}

impl LabelLayer {
    pub fn reconcile(&mut self, targets: Vec<(String, LabelElement)>) -> JoinPartition<String> {
        let keys: Vec<String> = targets.iter().map(|(key, _)| key.clone()).collect();
        let partition = keyed_join(&self.elements, &keys);
        self.elements = targets.into_iter().collect();
        partition
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LabelElement> {
        self.elements.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelElement)> + '_ {
        self.elements.iter().map(|(key, label)| (key.as_str(), label))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowBackground {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub alternate: bool,
}

/// Row background slots, joined by count only.
#[derive(Debug, Clone, Default)]
pub struct RowLayer {
    rows: Vec<RowBackground>,
}

impl RowLayer {
    pub fn reconcile(&mut self, rows: Vec<RowBackground>) -> JoinPartition<usize> {
        let partition = count_join(self.rows.len(), rows.len());
        self.rows = rows;
        partition
    }

    #[must_use]
    pub fn rows(&self) -> &[RowBackground] {
        &self.rows
    }

    /// Height of the stacked row slots, which defines the scrollable content.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.rows.iter().map(|row| row.height).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentElement {
    pub record_index: usize,
    pub visual: Animated<SegmentVisual>,
    /// Row parity flag captured when the segment entered.
    pub alternate: bool,
    pub cursor: Option<String>,
    pub exiting: bool,
}

/// Desired end state of one segment for the current render.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTarget {
    pub key: SegmentKey,
    pub record_index: usize,
    pub resting: SegmentVisual,
    /// Fill used for the first frame of an entering segment.
    pub enter_fill: Color,
    pub alternate: bool,
    pub cursor: Option<String>,
}

/// Bar segments keyed by identity, with animated enter/update/exit.
#[derive(Debug, Clone, Default)]
pub struct SegmentLayer {
    elements: IndexMap<SegmentKey, SegmentElement>,
}

impl SegmentLayer {
    pub fn reconcile(
        &mut self,
        targets: Vec<SegmentTarget>,
        duration_ms: f64,
    ) -> JoinPartition<SegmentKey> {
        let keys: Vec<SegmentKey> = targets.iter().map(|target| target.key.clone()).collect();
        let mut partition = keyed_join(&self.elements, &keys);
        // Segments already fading out keep their original exit tween.
        partition
            .exit
            .retain(|key| self.elements.get(key).is_some_and(|element| !element.exiting));

        for target in targets {
            if let Some(element) = self.elements.get_mut(&target.key) {
                element.record_index = target.record_index;
                element.cursor = target.cursor;
                element.exiting = false;
                element.visual.transition_to(target.resting, duration_ms);
                continue;
            }

            let entering = SegmentVisual {
                translate_y: ENTER_OFFSET_PX,
                opacity: 0.0,
                fill: target.enter_fill,
                ..target.resting
            };
            let mut visual = Animated::new(entering);
            visual.transition_to(target.resting, duration_ms);
            self.elements.insert(
                target.key,
                SegmentElement {
                    record_index: target.record_index,
                    visual,
                    alternate: target.alternate,
                    cursor: target.cursor,
                    exiting: false,
                },
            );
        }

        for key in &partition.exit {
            if let Some(element) = self.elements.get_mut(key) {
                element.exiting = true;
                let faded = SegmentVisual {
                    opacity: 0.0,
                    ..element.visual.current()
                };
                element.visual.transition_to(faded, duration_ms);
            }
        }

        partition
    }

    /// Advances every segment tween by `dt_ms`.
    pub fn advance(&mut self, dt_ms: f64) {
        for element in self.elements.values_mut() {
            element.visual.advance(dt_ms);
        }
    }

    /// Removes exiting segments whose fade has completed.
    pub fn drain_finished_exits(&mut self) -> Vec<SegmentKey> {
        let finished: Vec<SegmentKey> = self
            .elements
            .iter()
            .filter(|(_, element)| element.exiting && !element.visual.is_animating())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &finished {
            self.elements.shift_remove(key);
        }
        if !finished.is_empty() {
            trace!(removed = finished.len(), "removed exited segments");
        }
        finished
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.elements
            .values()
            .any(|element| element.visual.is_animating())
    }

    #[must_use]
    pub fn get(&self, key: &SegmentKey) -> Option<&SegmentElement> {
        self.elements.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SegmentKey, &SegmentElement)> + '_ {
        self.elements.iter()
    }
}
