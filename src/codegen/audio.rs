use tracing::debug;

use crate::{
    codegen::{python, ScriptWriter},
    model::{AudioOption, Element},
};

/// Load or cut one audio element and apply its options
pub fn compile_audio(element: &Element, writer: &mut ScriptWriter) {
    let (name, options) = match element {
        Element::Audio(audio) => {
            writer.comment("Load the audio clip");
            writer.add_line(&format!(
                "{} = moviepy.AudioFileClip({})",
                audio.name,
                python::string_literal(&audio.path)
            ));
            (&audio.name, &audio.options)
        }
        Element::AudioExtract(extract) => {
            writer.comment("Extract a subclip from the audio");
            writer.add_line(&format!(
                "{} = {}.subclipped({}, {})",
                extract.name,
                extract.source,
                python::number(extract.start.as_seconds()),
                python::number(extract.end.as_seconds())
            ));
            (&extract.name, &extract.options)
        }
        _ => return,
    };

    for option in options {
        compile_audio_option(name, option, writer);
    }
    writer.blank_line();
    debug!("Compiled audio element {}", name);
}

fn compile_audio_option(name: &str, option: &AudioOption, writer: &mut ScriptWriter) {
    let (comment, variable, constructor) = match option {
        AudioOption::Volume(volume) => (
            "Apply audio volume effect",
            "new_volume",
            format!(
                "moviepy.audio.fx.MultiplyStereoVolume(left={v}, right={v})",
                v = python::number(*volume)
            ),
        ),
        AudioOption::FadeIn(duration) => (
            "Apply fade in effect",
            "fade_in",
            format!("moviepy.audio.fx.AudioFadeIn({})", python::number(*duration)),
        ),
        AudioOption::FadeOut(duration) => (
            "Apply fade out effect",
            "fade_out",
            format!("moviepy.audio.fx.AudioFadeOut({})", python::number(*duration)),
        ),
        AudioOption::StereoVolume(stereo) => (
            "Apply stereo volume effect",
            "stereo_volume",
            format!(
                "moviepy.audio.fx.MultiplyStereoVolume(left={}, right={})",
                python::number(stereo.left),
                python::number(stereo.right)
            ),
        ),
        AudioOption::Normalize => (
            "Apply normalize effect",
            "normalize_effect",
            "moviepy.audio.fx.AudioNormalize()".to_string(),
        ),
    };

    writer.comment(comment);
    writer.add_line(&format!("{} = {}", variable, constructor));
    writer.add_line(&format!("{n} = {}.apply({n})", variable, n = name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AudioExtract, AudioOriginal, StereoVolume};

    #[test]
    fn test_audio_original_with_options() {
        let element = Element::Audio(AudioOriginal {
            name: "music".into(),
            path: "m.mp3".into(),
            options: vec![
                AudioOption::Volume(1.5),
                AudioOption::FadeIn(2.0),
                AudioOption::StereoVolume(StereoVolume { left: 0.5, right: 1.0 }),
                AudioOption::Normalize,
            ],
        });
        let mut writer = ScriptWriter::new();
        compile_audio(&element, &mut writer);

        let expected = "\
# Load the audio clip
music = moviepy.AudioFileClip(\"m.mp3\")
# Apply audio volume effect
new_volume = moviepy.audio.fx.MultiplyStereoVolume(left=1.5, right=1.5)
music = new_volume.apply(music)
# Apply fade in effect
fade_in = moviepy.audio.fx.AudioFadeIn(2)
music = fade_in.apply(music)
# Apply stereo volume effect
stereo_volume = moviepy.audio.fx.MultiplyStereoVolume(left=0.5, right=1)
music = stereo_volume.apply(music)
# Apply normalize effect
normalize_effect = moviepy.audio.fx.AudioNormalize()
music = normalize_effect.apply(music)

";
        assert_eq!(writer.into_output(), expected);
    }

    #[test]
    fn test_audio_extract() {
        let element = Element::AudioExtract(AudioExtract {
            name: "chorus".into(),
            source: "music".into(),
            start: "00:30".parse().unwrap(),
            end: "00:45.5".parse().unwrap(),
            options: vec![AudioOption::FadeOut(1.5)],
        });
        let mut writer = ScriptWriter::new();
        compile_audio(&element, &mut writer);
        let code = writer.into_output();

        assert!(code.contains("chorus = music.subclipped(30, 45.5)\n"));
        assert!(code.contains("fade_out = moviepy.audio.fx.AudioFadeOut(1.5)\nchorus = fade_out.apply(chorus)\n"));
    }
}
