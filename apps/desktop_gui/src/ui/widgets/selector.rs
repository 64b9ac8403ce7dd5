//! Searchable dropdown.
//!
//! The open flag and filter text live in egui memory under the widget id, so
//! every instance opens and closes on its own.

use shared::domain::{OptionId, SelectOption};

pub const DEFAULT_PLACEHOLDER: &str = "Select an option";
pub const INVALID_OPTION_TEXT: &str = "Invalid option";
pub const NO_RESULTS_TEXT: &str = "No results found";
const SEARCH_HINT: &str = "Search...";
const ROW_HEIGHT: f32 = 26.0;
const LIST_MAX_HEIGHT: f32 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerLabel<'a> {
    Placeholder(&'a str),
    Selected(&'a str),
    Invalid,
}

impl<'a> TriggerLabel<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            TriggerLabel::Placeholder(text) | TriggerLabel::Selected(text) => text,
            TriggerLabel::Invalid => INVALID_OPTION_TEXT,
        }
    }
}

pub fn trigger_label<'a>(
    options: &'a [SelectOption],
    selected_id: Option<OptionId>,
    placeholder: &'a str,
) -> TriggerLabel<'a> {
    let Some(selected_id) = selected_id else {
        return TriggerLabel::Placeholder(placeholder);
    };

    options
        .iter()
        .find(|option| option.id == selected_id)
        .map(|option| TriggerLabel::Selected(option.label.as_str()))
        .unwrap_or(TriggerLabel::Invalid)
}

#[derive(Debug, PartialEq, Eq)]
pub enum FilteredOptions<'a> {
    Rows(Vec<&'a SelectOption>),
    NoResults,
}

/// Case-insensitive substring match on labels; a blank filter keeps everything.
pub fn filter_options<'a>(options: &'a [SelectOption], filter: &str) -> FilteredOptions<'a> {
    let needle = filter.trim().to_lowercase();
    let rows: Vec<&SelectOption> = if needle.is_empty() {
        options.iter().collect()
    } else {
        options
            .iter()
            .filter(|option| option.label.to_lowercase().contains(&needle))
            .collect()
    };

    if rows.is_empty() {
        FilteredOptions::NoResults
    } else {
        FilteredOptions::Rows(rows)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorMemory {
    pub open: bool,
    pub filter: String,
}

impl SelectorMemory {
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open = true;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.filter.clear();
    }

    pub fn choose(&mut self, option: SelectOption, on_select: impl FnOnce(SelectOption)) {
        self.close();
        on_select(option);
    }
}

pub struct SearchableSelector<'a> {
    id_salt: &'a str,
    options: &'a [SelectOption],
    selected_id: Option<OptionId>,
    placeholder: &'a str,
    label: Option<&'a str>,
    width: f32,
}

impl<'a> SearchableSelector<'a> {
    pub fn new(id_salt: &'a str, options: &'a [SelectOption]) -> Self {
        Self {
            id_salt,
            options,
            selected_id: None,
            placeholder: DEFAULT_PLACEHOLDER,
            label: None,
            width: 240.0,
        }
    }

    pub fn selected(mut self, selected_id: Option<OptionId>) -> Self {
        self.selected_id = selected_id;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// `on_select` runs at most once per frame, only when a row is chosen.
    pub fn show(self, ui: &mut egui::Ui, on_select: impl FnOnce(SelectOption)) -> egui::Response {
        let id = ui.make_persistent_id(self.id_salt);
        let mut memory = ui
            .data_mut(|data| data.get_temp::<SelectorMemory>(id))
            .unwrap_or_default();

        if let Some(label) = self.label {
            ui.label(egui::RichText::new(label).strong());
        }

        let label = trigger_label(self.options, self.selected_id, self.placeholder);
        let caption = format!("{}  ⏷", label.text());
        let caption = match label {
            TriggerLabel::Selected(_) => egui::RichText::new(caption),
            TriggerLabel::Placeholder(_) => egui::RichText::new(caption).weak(),
            TriggerLabel::Invalid => {
                egui::RichText::new(caption).color(ui.visuals().error_fg_color)
            }
        };
        let trigger = ui.add_sized([self.width, 32.0], egui::Button::new(caption));

        let mut just_opened = false;
        if trigger.clicked() {
            memory.toggle();
            just_opened = memory.open;
        }

        let mut chosen: Option<SelectOption> = None;
        let mut popup_rect = None;
        if memory.open {
            let options = self.options;
            let selected_id = self.selected_id;
            let width = self.width;
            let area = egui::Area::new(id.with("popup"))
                .order(egui::Order::Foreground)
                .fixed_pos(trigger.rect.left_bottom() + egui::vec2(0.0, 4.0))
                .show(ui.ctx(), |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.set_width(width);
                        let search = ui.add(
                            egui::TextEdit::singleline(&mut memory.filter)
                                .hint_text(SEARCH_HINT)
                                .desired_width(f32::INFINITY),
                        );
                        if just_opened {
                            search.request_focus();
                        }

                        egui::ScrollArea::vertical()
                            .max_height(LIST_MAX_HEIGHT)
                            .show(ui, |ui| match filter_options(options, &memory.filter) {
                                FilteredOptions::Rows(rows) => {
                                    ui.with_layout(
                                        egui::Layout::top_down_justified(egui::Align::LEFT),
                                        |ui| {
                                            ui.spacing_mut().interact_size.y = ROW_HEIGHT;
                                            for option in rows {
                                                let is_selected = Some(option.id) == selected_id;
                                                if ui
                                                    .selectable_label(
                                                        is_selected,
                                                        option.label.as_str(),
                                                    )
                                                    .clicked()
                                                {
                                                    chosen = Some(option.clone());
                                                }
                                            }
                                        },
                                    );
                                }
                                FilteredOptions::NoResults => {
                                    ui.label(egui::RichText::new(NO_RESULTS_TEXT).weak());
                                }
                            });
                    });
                });
            popup_rect = Some(area.response.rect);
        }

        if let Some(option) = chosen {
            memory.choose(option, on_select);
        } else if memory.open && !trigger.clicked() {
            let pressed_outside = ui.input(|input| {
                input.pointer.any_pressed()
                    && input.pointer.interact_pos().is_some_and(|pos| {
                        !trigger.rect.contains(pos)
                            && !popup_rect.is_some_and(|rect: egui::Rect| rect.contains(pos))
                    })
            });
            if pressed_outside {
                memory.close();
            }
        }

        ui.data_mut(|data| data.insert_temp(id, memory));
        trigger
    }
}
