use std::collections::HashSet;

use tracing::debug;

use crate::model::{
    AudioExtract, AudioOriginal, CategoryOption, Element, Group, TextualElement, VideoExtract,
    VideoOriginal, VideoProject,
};

/// Merge element-local options with group-sourced ones
///
/// The first option seen for each de-duplication key wins, and local options
/// are walked first, so they always take precedence over a group. Winners are
/// then ordered in two tiers: kinds with a canonical rank first (by rank),
/// every other kind after them in the order the walk found them.
pub fn merge_options<'a, O>(local: &'a [O], group_sourced: impl IntoIterator<Item = &'a O>) -> Vec<O>
where
    O: CategoryOption + 'a,
{
    let mut seen = HashSet::new();
    let mut winners: Vec<O> = local
        .iter()
        .chain(group_sourced)
        .filter(|option| seen.insert(option.dedup_key()))
        .cloned()
        .collect();

    // stable: unranked kinds keep their relative order
    winners.sort_by_key(|option| match O::canonical_rank(option.kind()) {
        Some(rank) => (0, rank),
        None => (1, 0),
    });
    winners
}

/// Options of every group naming `element`, groups in project order
fn group_options<'a, O: 'a>(
    groups: impl Iterator<Item = &'a Group<O>>,
    element: &'a str,
) -> impl Iterator<Item = &'a O> {
    groups
        .filter(move |group| group.applies_to(element))
        .flat_map(|group| group.options.iter())
}

/// Return a copy of `element` carrying its resolved option list
pub fn resolve_element(element: &Element, project: &VideoProject) -> Element {
    let name = element.name();
    let resolved = match element {
        Element::Video(video) => Element::Video(VideoOriginal {
            options: merge_options(&video.options, group_options(project.video_groups(), name)),
            ..video.clone()
        }),
        Element::VideoExtract(video) => Element::VideoExtract(VideoExtract {
            options: merge_options(&video.options, group_options(project.video_groups(), name)),
            ..video.clone()
        }),
        Element::Audio(audio) => Element::Audio(AudioOriginal {
            options: merge_options(&audio.options, group_options(project.audio_groups(), name)),
            ..audio.clone()
        }),
        Element::AudioExtract(audio) => Element::AudioExtract(AudioExtract {
            options: merge_options(&audio.options, group_options(project.audio_groups(), name)),
            ..audio.clone()
        }),
        Element::Text(text) => Element::Text(resolve_textual(text, project)),
        Element::Subtitle(text) => Element::Subtitle(resolve_textual(text, project)),
    };
    debug!("Resolved options for {}", name);
    resolved
}

fn resolve_textual(text: &TextualElement, project: &VideoProject) -> TextualElement {
    TextualElement {
        options: merge_options(&text.options, group_options(project.text_groups(), &text.name)),
        ..text.clone()
    }
}

/// Resolve every element of the project, in declaration order
pub fn resolve_all(project: &VideoProject) -> Vec<Element> {
    project
        .elements
        .iter()
        .map(|element| resolve_element(element, project))
        .collect()
}
