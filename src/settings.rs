use image::Rgba;

/// Source of the editor-wide defaults a selection snapshots when it is created.
pub trait SettingsProvider {
    fn fill_color(&self) -> Rgba<u8>;

    /// Dash colours of the selection outline.
    fn outline_colors(&self) -> [Rgba<u8>; 2] {
        [Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 255])]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fill_color: [u8; 4],
    pub outline_colors: [[u8; 4]; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fill_color: [255, 255, 255, 255],
            outline_colors: [[0, 0, 0, 255], [255, 255, 255, 255]],
        }
    }
}

impl SettingsProvider for Settings {
    fn fill_color(&self) -> Rgba<u8> {
        Rgba(self.fill_color)
    }

    fn outline_colors(&self) -> [Rgba<u8>; 2] {
        self.outline_colors.map(Rgba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"fill_color":[1,2,3,4]}"#).unwrap();
        assert_eq!(settings.fill_color(), Rgba([1, 2, 3, 4]));
        assert_eq!(
            settings.outline_colors(),
            Settings::default().outline_colors()
        );
    }
}
