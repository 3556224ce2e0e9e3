use std::collections::HashMap;

use tracing::warn;

use crate::{
    error::{ReferenceKind, ResolveError},
    model::{Anchor, Element, Placement, TimelineElement, VideoProject},
};

/// Lengths of original media files in seconds, keyed by file path
pub type KnownDurations = HashMap<String, f64>;

/// Numeric position of one placement on the output timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    /// `None` when the referenced media has not been measured
    pub duration: Option<f64>,
}

impl Span {
    /// End instant; an unknown duration counts as zero
    pub fn end(&self) -> f64 {
        self.start + self.duration.unwrap_or(0.0)
    }
}

/// How long a placement plays
///
/// Extracts last `end - start`, textual elements the placement's own duration
/// (or `default_text_duration`), originals whatever `known` says about their file.
pub fn placement_duration(
    project: &VideoProject,
    placement: &TimelineElement,
    known: &KnownDurations,
    default_text_duration: f64,
) -> Option<f64> {
    let element = project.element(&placement.element)?;
    match element {
        Element::Text(_) | Element::Subtitle(_) => Some(
            placement
                .duration
                .map_or(default_text_duration, |d| d.as_seconds()),
        ),
        Element::VideoExtract(_) | Element::AudioExtract(_) => element.intrinsic_duration(),
        Element::Video(_) | Element::Audio(_) => {
            let duration = element.file_path().and_then(|path| known.get(path).copied());
            if duration.is_none() {
                warn!("No known duration for {}, counting it as 0s", element.name());
            }
            duration
        }
    }
}

struct Scheduler<'a> {
    project: &'a VideoProject,
    durations: Vec<Option<f64>>,
    starts: Vec<Option<f64>>,
    visiting: Vec<bool>,
}

impl<'a> Scheduler<'a> {
    fn new(project: &'a VideoProject, durations: Vec<Option<f64>>) -> Self {
        let count = project.timeline.len();
        Self {
            project,
            durations,
            starts: vec![None; count],
            visiting: vec![false; count],
        }
    }

    fn end_of(&mut self, index: usize, path: &mut Vec<String>) -> Result<f64, ResolveError> {
        let start = self.start_of(index, path)?;
        Ok(start + self.durations[index].unwrap_or(0.0))
    }

    fn start_of(&mut self, index: usize, path: &mut Vec<String>) -> Result<f64, ResolveError> {
        if let Some(start) = self.starts[index] {
            return Ok(start);
        }

        let project = self.project;
        let placement = &project.timeline[index];
        path.push(placement.name.clone());
        if self.visiting[index] {
            return Err(ResolveError::CyclicRelation { path: path.clone() });
        }
        self.visiting[index] = true;

        let start = match &placement.placement {
            Placement::Fixed { at } => at.as_seconds(),
            Placement::Relative { relative_to, anchor, offset } => {
                let (target, _) = project.placement(relative_to).ok_or_else(|| {
                    ResolveError::MissingReference {
                        kind: ReferenceKind::Placement,
                        name: relative_to.clone(),
                    }
                })?;
                let base = match anchor {
                    Anchor::Start => self.start_of(target, path)?,
                    Anchor::End => self.end_of(target, path)?,
                };
                base + offset.map_or(0.0, |o| o.as_seconds())
            }
            Placement::Implicit if index == 0 => 0.0,
            Placement::Implicit => self.end_of(index - 1, path)?,
        };

        self.visiting[index] = false;
        path.pop();
        self.starts[index] = Some(start);
        Ok(start)
    }
}

/// Resolve every placement to a numeric span, in timeline order
pub fn schedule(
    project: &VideoProject,
    known: &KnownDurations,
    default_text_duration: f64,
) -> Result<Vec<Span>, ResolveError> {
    let durations: Vec<Option<f64>> = project
        .timeline
        .iter()
        .map(|te| placement_duration(project, te, known, default_text_duration))
        .collect();

    let mut scheduler = Scheduler::new(project, durations);
    let mut spans = Vec::with_capacity(project.timeline.len());
    for index in 0..project.timeline.len() {
        let start = scheduler.start_of(index, &mut Vec::new())?;
        spans.push(Span { start, duration: scheduler.durations[index] });
    }
    Ok(spans)
}

/// Reject placement chains that loop back on themselves
///
/// Start instants depend on other placements through relative anchors and
/// through the implicit "after previous" rule; both edges are followed.
pub fn check_acyclic(project: &VideoProject) -> Result<(), ResolveError> {
    let durations = vec![None; project.timeline.len()];
    let mut scheduler = Scheduler::new(project, durations);
    for index in 0..project.timeline.len() {
        scheduler.start_of(index, &mut Vec::new())?;
    }
    Ok(())
}
