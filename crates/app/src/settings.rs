use log::warn;
use spotter_domain::Weight;

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Rest of newly added exercises in seconds.
    pub default_rest: u32,
    /// Change of the rest duration per button press in seconds.
    pub rest_step: u32,
    /// Body weight in kg, added to the volume of body weight exercises.
    pub body_weight: f32,
    pub discard_unstarted_sets_on_finish: bool,
}

impl Settings {
    pub const MAX_REST: u32 = 3600;
    pub const MAX_REST_STEP: u32 = 300;

    /// Settings with every value moved into its valid range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let default = Self::default();
        Self {
            default_rest: self.default_rest.min(Self::MAX_REST),
            rest_step: self.rest_step.clamp(1, Self::MAX_REST_STEP),
            body_weight: if Weight::new(self.body_weight).is_ok() {
                self.body_weight
            } else {
                warn!("invalid body weight {} kg in settings", self.body_weight);
                default.body_weight
            },
            ..self
        }
    }

    #[must_use]
    pub fn body_weight(&self) -> Weight {
        Weight::new(self.body_weight).unwrap_or(Weight::ZERO)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_rest: 90,
            rest_step: 15,
            body_weight: 0.0,
            discard_unstarted_sets_on_finish: true,
        }
    }
}
