use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Researcher profile shown in the side panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub field: String,
    pub institution: String,
    pub interests: Vec<String>,
    pub email: String,
    pub github: String,
    /// Local image file shown under the profile (png or jpeg).
    pub picture: Option<std::path::PathBuf>,
    pub picture_caption: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Xadilam Mbambisa".to_string(),
            field: "Physics & Computer Science".to_string(),
            institution: "Walter Sisulu University".to_string(),
            interests: [
                "Astrophysics",
                "Space Physics",
                "Quantum Mechanics",
                "AI in Science",
                "Data Analysis",
                "Scientific Computing",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            email: "xadilammbambisa@gmail.com".to_string(),
            github: "https://github.com/xadilammbambisa-jpg".to_string(),
            picture: None,
            picture_caption: "Exploring the Universe".to_string(),
        }
    }
}

impl Profile {
    /// Window title, e.g. "Xadilam's Research Profile".
    pub fn window_title(&self) -> String {
        let first = self.name.split_whitespace().next().unwrap_or("Researcher");
        format!("{first}'s Research Profile")
    }

    /// `file://` URI egui's image loaders understand.
    pub fn picture_uri(&self) -> Option<String> {
        self.picture
            .as_ref()
            .map(|p| format!("file://{}", p.display()))
    }
}
