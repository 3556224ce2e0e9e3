use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{ModelError, Result},
    model::{AudioOption, Element, TextOption, TimelineElement, VideoOption},
};

/// Root of a parsed program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoProject {
    /// Output file stem; the script writes `<output_name>.mp4`
    pub output_name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub groups: Vec<GroupOption>,
    #[serde(default)]
    pub timeline: Vec<TimelineElement>,
}

/// A named set of option values applied to a list of element references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GroupOption {
    Video(Group<VideoOption>),
    Audio(Group<AudioOption>),
    Text(Group<TextOption>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group<O> {
    pub name: String,
    /// Names of the elements the options apply to
    pub elements: Vec<String>,
    #[serde(default = "Vec::new")]
    pub options: Vec<O>,
}

impl<O> Group<O> {
    pub fn applies_to(&self, element: &str) -> bool {
        self.elements.iter().any(|name| name == element)
    }
}

impl GroupOption {
    pub fn name(&self) -> &str {
        match self {
            GroupOption::Video(g) => &g.name,
            GroupOption::Audio(g) => &g.name,
            GroupOption::Text(g) => &g.name,
        }
    }

    pub fn element_names(&self) -> &[String] {
        match self {
            GroupOption::Video(g) => &g.elements,
            GroupOption::Audio(g) => &g.elements,
            GroupOption::Text(g) => &g.elements,
        }
    }
}

impl VideoProject {
    /// Parse a project from its JSON form
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a project from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ModelError::ProjectNotFound { path: path.display().to_string() })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name() == name)
    }

    /// Placement by name, together with its declaration index
    pub fn placement(&self, name: &str) -> Option<(usize, &TimelineElement)> {
        self.timeline.iter().enumerate().find(|(_, te)| te.name == name)
    }

    pub fn video_groups(&self) -> impl Iterator<Item = &Group<VideoOption>> {
        self.groups.iter().filter_map(|g| match g {
            GroupOption::Video(group) => Some(group),
            _ => None,
        })
    }

    pub fn audio_groups(&self) -> impl Iterator<Item = &Group<AudioOption>> {
        self.groups.iter().filter_map(|g| match g {
            GroupOption::Audio(group) => Some(group),
            _ => None,
        })
    }

    pub fn text_groups(&self) -> impl Iterator<Item = &Group<TextOption>> {
        self.groups.iter().filter_map(|g| match g {
            GroupOption::Text(group) => Some(group),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PROJECT: &str = r##"{
        "output_name": "holiday",
        "elements": [
            {"type": "video", "name": "v1", "path": "a.mp4"},
            {"type": "audio", "name": "music", "path": "m.mp3"}
        ],
        "groups": [
            {"type": "audio", "name": "loud", "elements": ["music"],
             "options": [{"kind": "volume", "value": 1.5}]}
        ],
        "timeline": [
            {"name": "#1", "element": "v1"},
            {"name": "#2", "element": "music", "placement": {"relative_to": "#1", "anchor": "start"}}
        ]
    }"##;

    #[test]
    fn test_project_lookup() {
        let project = VideoProject::from_json_str(PROJECT).unwrap();
        assert_eq!(project.output_name, "holiday");
        assert!(project.element("music").is_some());
        assert!(project.element("nope").is_none());
        assert_eq!(project.placement("#2").map(|(i, _)| i), Some(1));
        assert_eq!(project.audio_groups().count(), 1);
        assert!(project.audio_groups().all(|g| g.applies_to("music")));
        assert_eq!(project.video_groups().count(), 0);
    }

    #[test]
    fn test_project_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(PROJECT.as_bytes()).unwrap();

        let project = VideoProject::from_file(file.path()).unwrap();
        assert_eq!(project.timeline.len(), 2);

        let missing = VideoProject::from_file("/definitely/not/here.json");
        assert!(missing.is_err());
    }
}
