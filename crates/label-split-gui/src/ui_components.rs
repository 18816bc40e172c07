use eframe::egui;

/// Builder for a labeled single-line text field holding a number
pub struct NumberField<'a> {
    label: &'a str,
    text: &'a mut String,
    suffix: Option<&'a str>,
    hint: Option<&'a str>,
}

impl<'a> NumberField<'a> {
    pub fn new(label: &'a str, text: &'a mut String) -> Self {
        Self {
            label,
            text,
            suffix: None,
            hint: None,
        }
    }

    pub fn suffix(mut self, suffix: &'a str) -> Self {
        self.suffix = Some(suffix);
        self
    }

    /// Placeholder shown while the field is empty
    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Show the field in a grid row; returns true if the text changed
    pub fn show(self, ui: &mut egui::Ui) -> bool {
        ui.label(self.label);
        let changed = ui
            .horizontal(|ui| {
                let mut edit = egui::TextEdit::singleline(self.text).desired_width(70.0);
                if let Some(hint) = self.hint {
                    edit = edit.hint_text(hint);
                }
                let changed = ui.add(edit).changed();
                if let Some(suffix) = self.suffix {
                    ui.label(suffix);
                }
                changed
            })
            .inner;
        ui.end_row();
        changed
    }
}

/// Enum selector using ComboBox
pub fn enum_selector<T>(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    value: &mut T,
    options: &[(T, &str)],
) -> bool
where
    T: PartialEq + Clone,
{
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);

        let current_text = options
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, text)| *text)
            .unwrap_or("Custom");

        egui::ComboBox::from_id_salt(id)
            .selected_text(current_text)
            .show_ui(ui, |ui| {
                for (option_value, option_text) in options {
                    if ui
                        .selectable_value(value, option_value.clone(), *option_text)
                        .changed()
                    {
                        changed = true;
                    }
                }
            });
    });
    changed
}

/// Section separator used between side panel groups
pub fn section_gap(ui: &mut egui::Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}
