use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Startup options of an [`Instance`](crate::Instance). Every field has a
/// default, so a JSON document only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    pub font_path: String,
    pub shader_path: String,
    pub texture_path: String,
    /// Base resolution the integer scale is computed against.
    pub default_width: u32,
    pub default_height: u32,
    /// Debounce delay for resize notifications, in milliseconds.
    pub resize_delay: u64,
    pub desired_scale: u32,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            font_path: "assets/fonts/".into(),
            shader_path: "assets/shaders/".into(),
            texture_path: "assets/textures/".into(),
            default_width: fenestra_core::BASE_WIDTH,
            default_height: fenestra_core::BASE_HEIGHT,
            resize_delay: 50,
            desired_scale: 2,
        }
    }
}

impl InstanceConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_delay)
    }
}
