#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

impl ButtonVariant {
    pub fn fill(self) -> egui::Color32 {
        match self {
            ButtonVariant::Primary => egui::Color32::from_rgb(192, 38, 211),
            ButtonVariant::Secondary => egui::Color32::from_rgb(109, 40, 217),
        }
    }
}

pub struct ActionButton<'a> {
    text: &'a str,
    variant: ButtonVariant,
    disabled: bool,
    min_width: f32,
}

impl<'a> ActionButton<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            variant: ButtonVariant::Primary,
            disabled: false,
            min_width: 0.0,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn min_width(mut self, min_width: f32) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn fill(&self) -> egui::Color32 {
        if self.disabled {
            self.variant.fill().gamma_multiply(0.5)
        } else {
            self.variant.fill()
        }
    }

    /// True only for a click on an enabled button.
    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let button = egui::Button::new(
            egui::RichText::new(self.text)
                .strong()
                .color(egui::Color32::WHITE),
        )
        .fill(self.fill())
        .corner_radius(6.0)
        .min_size(egui::vec2(self.min_width, 36.0));

        let response = ui.add_enabled(!self.disabled, button);
        if self.disabled {
            let _ = response.on_hover_cursor(egui::CursorIcon::NotAllowed);
            return false;
        }
        response.clicked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_button_is_dimmed() {
        let enabled = ActionButton::new("Submit");
        let disabled = ActionButton::new("Submit").disabled(true);
        assert_eq!(enabled.fill(), ButtonVariant::Primary.fill());
        assert_ne!(disabled.fill(), enabled.fill());
    }

    #[test]
    fn variants_have_distinct_fills() {
        assert_ne!(
            ButtonVariant::Primary.fill(),
            ButtonVariant::Secondary.fill()
        );
        assert_eq!(
            ActionButton::new("Retry")
                .variant(ButtonVariant::Secondary)
                .fill(),
            ButtonVariant::Secondary.fill()
        );
    }
}
