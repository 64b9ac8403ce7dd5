use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Country;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::{dispatch_backend_command, run_effects};
use crate::controller::reducer::{
    Capability, SelectionAction, SelectionPhase, SelectionState, Transition,
};
use crate::ui::map::show_location_map;
use crate::ui::widgets::{ActionButton, ButtonVariant, SearchableSelector};

pub const APP_TITLE: &str = "Ultimate Dropdown";

#[derive(Debug, Clone)]
struct StatusBanner {
    title: &'static str,
    message: String,
}

impl From<&UiError> for StatusBanner {
    fn from(value: &UiError) -> Self {
        Self {
            title: err_label(value.category()),
            message: value.message().to_string(),
        }
    }
}

/// Page-level boundary: the selection form only renders once countries are in.
#[derive(Debug, Clone)]
enum AppViewState {
    LoadingCountries,
    CountriesFailed(UiError),
    Ready,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view_state: AppViewState,
    countries: Vec<Country>,
    selection: SelectionState,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        capability: Capability,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            view_state: AppViewState::LoadingCountries,
            countries: Vec::new(),
            selection: SelectionState::new(capability),
            status: "Starting".to_string(),
            status_banner: None,
        };
        app.request_countries();
        app
    }

    fn request_countries(&mut self) {
        self.view_state = AppViewState::LoadingCountries;
        dispatch_backend_command(&self.cmd_tx, BackendCommand::LoadCountries, &mut self.status);
    }

    fn apply(&mut self, action: SelectionAction) {
        let Transition { state, effects } = self.selection.reduce(action);
        self.selection = state;
        tracing::trace!(
            phase = ?self.selection.phase(),
            states_generation = self.selection.states_generation(),
            confirmation_generation = self.selection.confirmation_generation(),
            "selection updated"
        );

        for err in run_effects(&self.cmd_tx, effects, &mut self.status) {
            self.status_banner = Some(StatusBanner::from(&UiError::from(&err)));
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::CountriesLoaded(Ok(countries)) => {
                    self.status = format!("Loaded {} countries", countries.len());
                    self.countries = countries;
                    self.view_state = AppViewState::Ready;
                }
                UiEvent::CountriesLoaded(Err(err)) => {
                    tracing::error!("country list unavailable: {err}");
                    self.view_state = AppViewState::CountriesFailed(UiError::from_message(
                        UiErrorContext::LoadCountries,
                        err.to_string(),
                    ));
                }
                UiEvent::StatesLoaded {
                    country_id,
                    generation,
                    result,
                } => self.apply(SelectionAction::StatesLoaded {
                    country_id,
                    generation,
                    result,
                }),
                UiEvent::LocationResolved { generation, result } => {
                    self.apply(SelectionAction::LocationResolved { generation, result })
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    if err.context() == UiErrorContext::BackendStartup {
                        self.status = err.message().to_string();
                    }
                    self.status_banner = Some(StatusBanner::from(&err));
                }
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };

        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new(banner.title)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                    ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            });
    }

    fn show_countries_failed(&mut self, ui: &mut egui::Ui, err: &UiError) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(
                egui::RichText::new("Could not load countries")
                    .strong()
                    .size(18.0),
            );
            ui.label(egui::RichText::new(err.message()).color(ui.visuals().error_fg_color));
            ui.add_space(12.0);
            if ActionButton::new("Retry").min_width(120.0).show(ui) {
                self.request_countries();
            }
        });
    }

    fn show_selection_form(&mut self, ui: &mut egui::Ui) {
        let mut picked_country = None;
        let mut picked_state = None;
        let mut submitted = false;
        let mut start_over = false;

        ui.horizontal_wrapped(|ui| {
            SearchableSelector::new("country-selector", &self.countries)
                .selected(self.selection.selected_country().map(|country| country.id))
                .placeholder("Select a country")
                .label("Country")
                .width(260.0)
                .show(ui, |country| picked_country = Some(country));

            if self.selection.is_loading_states() {
                ui.spinner();
                ui.label(egui::RichText::new("Loading states...").weak());
            } else if !self.selection.available_states().is_empty() {
                SearchableSelector::new("state-selector", self.selection.available_states())
                    .selected(self.selection.selected_state().map(|state| state.id))
                    .placeholder("Select a state")
                    .label("State")
                    .width(260.0)
                    .show(ui, |state| picked_state = Some(state));
            }

            if self.selection.selected_country().is_some() && !self.selection.is_loading_states()
            {
                submitted = ActionButton::new("Submit")
                    .min_width(120.0)
                    .disabled(!self.selection.can_submit())
                    .show(ui);
            }

            if self.selection.phase() != SelectionPhase::Empty {
                start_over = ActionButton::new("Start over")
                    .variant(ButtonVariant::Secondary)
                    .min_width(120.0)
                    .show(ui);
            }
        });

        if let Some(country) = picked_country {
            tracing::debug!(country_id = country.id.0, "country selected");
            self.apply(SelectionAction::SelectCountry(country));
        }
        if let Some(state) = picked_state {
            self.apply(SelectionAction::SelectState(state));
        }
        if submitted {
            self.apply(SelectionAction::Submit);
        }
        if start_over {
            self.apply(SelectionAction::Reset);
        }

        if let Some(summary) = self.selection.confirmed_summary() {
            ui.add_space(16.0);
            ui.label(egui::RichText::new(summary).strong().size(16.0));
        }

        if self.selection.capability() == Capability::WithMap {
            if let Some(location) = self.selection.resolved_location() {
                ui.add_space(12.0);
                show_location_map(ui, location);
            }
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(egui::RichText::new(&self.status).weak());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading(egui::RichText::new(APP_TITLE).strong().size(32.0));
                ui.add_space(16.0);
            });

            self.show_status_banner(ui);
            ui.add_space(8.0);

            match self.view_state.clone() {
                AppViewState::LoadingCountries => {
                    ui.vertical_centered(|ui| {
                        ui.spinner();
                        ui.label("Loading countries...");
                    });
                }
                AppViewState::CountriesFailed(err) => self.show_countries_failed(ui, &err),
                AppViewState::Ready => self.show_selection_form(ui),
            }
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
