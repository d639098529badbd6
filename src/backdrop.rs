use crate::environment::Theme;
use crate::ports::EnvironmentProvider;
use log::info;

/// The active background. New games start at night.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Backdrop {
    current: Theme,
}

impl Backdrop {
    pub fn new(current: Theme) -> Self {
        Self { current }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if theme != self.current {
            info!("background changed to {}", theme.name());
        }
        self.current = theme;
    }

    /// Accepts any id; unknown ids land on the neutral day theme.
    pub fn set_theme_id(&mut self, id: &str) {
        self.set_theme(Theme::from_id(id));
    }

    pub fn cycle(&mut self) -> Theme {
        self.set_theme(self.current.next());
        self.current
    }
}

impl EnvironmentProvider for Backdrop {
    fn theme(&self) -> Theme {
        self.current
    }

    fn reset(&mut self) {
        self.current = Theme::default();
    }
}
