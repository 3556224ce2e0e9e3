use crate::{
    codegen::{python, ScriptWriter},
    config::GeneratorConfig,
    error::{GenerateError, Result},
    model::{Anchor, Element, ElementCategory, Placement, TimelineElement},
    resolve::ResolvedProject,
};

fn element_of<'a>(
    project: &'a ResolvedProject,
    placement: &TimelineElement,
) -> Result<&'a Element> {
    project.element_of(placement).ok_or_else(|| {
        GenerateError::MissingElementReference {
            placement: placement.name.clone(),
        }
        .into()
    })
}

/// Right-hand side that positions `element` according to its placement
fn start_expression(
    index: usize,
    placement: &TimelineElement,
    timeline: &[TimelineElement],
) -> Option<String> {
    match &placement.placement {
        Placement::Fixed { at } => Some(python::number(at.as_seconds())),
        Placement::Relative { relative_to, anchor, offset } => {
            let attribute = match anchor {
                Anchor::Start => "start",
                Anchor::End => "end",
            };
            let mut expression = format!("{}.{}", python::placement_identifier(relative_to), attribute);
            if let Some(offset) = offset {
                expression.push_str(&format!(
                    " {} {}",
                    offset.sign().symbol(),
                    python::number(offset.magnitude().as_seconds())
                ));
            }
            Some(expression)
        }
        Placement::Implicit if index == 0 => None,
        Placement::Implicit => Some(format!(
            "{}.end",
            python::placement_identifier(&timeline[index - 1].name)
        )),
    }
}

/// One assignment per placement, in timeline order
pub fn compile_placements(
    project: &ResolvedProject,
    config: &GeneratorConfig,
    writer: &mut ScriptWriter,
) -> Result<()> {
    let timeline = project.timeline();
    for (index, placement) in timeline.iter().enumerate() {
        let element = element_of(project, placement)?;

        let mut statement = format!(
            "{} = {}",
            python::placement_identifier(&placement.name),
            element.name()
        );
        if let Some(start) = start_expression(index, placement, timeline) {
            statement.push_str(&format!(".with_start({})", start));
        }
        if element.is_textual() {
            let duration = placement
                .duration
                .map_or(config.default_text_duration, |d| d.as_seconds());
            statement.push_str(&format!(".with_duration({})", python::number(duration)));
        }
        writer.add_line(&statement);
    }
    Ok(())
}

/// Final visual composite, optional audio mix and the export call
pub fn compile_composition(
    project: &ResolvedProject,
    config: &GeneratorConfig,
    writer: &mut ScriptWriter,
) -> Result<()> {
    let mut visual = Vec::new();
    let mut audible = Vec::new();
    let mut has_audio_element = false;

    for placement in project.by_layer() {
        let element = element_of(project, placement)?;
        let identifier = python::placement_identifier(&placement.name);
        match element.category() {
            ElementCategory::Video => {
                audible.push(format!("{}.audio", identifier));
                visual.push(identifier);
            }
            ElementCategory::Textual => visual.push(identifier),
            ElementCategory::Audio => {
                has_audio_element = true;
                audible.push(identifier);
            }
        }
    }

    writer.comment("Concatenate all clips");
    writer.add_line(&format!(
        "final_video = moviepy.CompositeVideoClip([{}], size=({}, {}))",
        visual.join(", "),
        config.canvas.width,
        config.canvas.height
    ));
    writer.blank_line();

    if has_audio_element {
        writer.comment("Concatenate all audios");
        writer.add_line(&format!(
            "final_audio = moviepy.CompositeAudioClip([{}])",
            audible.join(", ")
        ));
        writer.blank_line();
        writer.comment("Assign audio's concatenation to the final video");
        writer.add_line("final_video.audio = final_audio");
        writer.blank_line();
    }

    writer.comment("Export the final video");
    writer.add_line(&format!(
        "final_video.write_videofile({})",
        python::string_literal(&format!("{}.mp4", project.output_name()))
    ));
    Ok(())
}
