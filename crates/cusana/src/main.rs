//! Cusana - desktop email client for a REST mail-storage service.
//!
//! Built with Rust and the iced GUI framework. All mail state lives in the
//! [`MailController`] from `cusana-core`; this binary renders its snapshots
//! and turns user input into controller intents.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod message;
mod model;
mod style;
mod view;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cusana_core::{HttpMailStore, MailController, SelectionHint, ViewState};
use iced::keyboard::{self, Key, Modifiers};
use iced::widget::{column, container, row, text};
use iced::{Element, Length, Subscription, Task};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use message::{KeyboardAction, Message};
use model::AppSettings;
use style::widgets::palette;

/// How often snapshots are refreshed while something is pending.
const TICK: Duration = Duration::from_millis(100);

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cusana=info,cusana_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cusana");

    iced::application(Cusana::new, Cusana::update, Cusana::view)
        .title("Cusana")
        .subscription(Cusana::subscription)
        .run()
}

/// Main application state.
#[derive(Default)]
struct Cusana {
    /// Mail state controller; `None` until settings are loaded.
    controller: Option<MailController>,
    /// Last snapshot of the controller's view state.
    view: ViewState,
    /// Persisted settings.
    settings: AppSettings,
    /// Where settings are read from and written to.
    settings_path: PathBuf,
    /// Controller intents started but not yet finished.
    in_flight: usize,
    /// Why the mail store could not be set up.
    startup_error: Option<String>,
}

impl Cusana {
    /// Create initial application state.
    fn new() -> (Self, Task<Message>) {
        let app = Self {
            settings_path: AppSettings::default_path(),
            ..Self::default()
        };
        app.apply_theme();

        let path = app.settings_path.clone();
        let load = Task::perform(
            async move { AppSettings::load(&path).await.map_err(|e| format!("{e:#}")) },
            Message::SettingsLoaded,
        );
        (app, load)
    }

    fn apply_theme(&self) {
        palette::set_theme(self.settings.theme_mode);
    }

    /// Builds the controller from settings and starts the initial load.
    fn connect(&mut self) -> Task<Message> {
        let config = self.settings.client.clone().with_env_overrides();
        match HttpMailStore::from_config(&config) {
            Ok(store) => {
                info!("Using mail store at {}", store.base_url());
                self.controller = Some(MailController::new(Arc::new(store), config));
                self.startup_error = None;
                self.run(|c| async move { c.mount().await })
            }
            Err(e) => {
                error!("Cannot use mail store {}: {}", config.api_url, e);
                self.startup_error = Some(format!("Cannot connect to {}: {e}", config.api_url));
                Task::none()
            }
        }
    }

    /// Starts a controller intent and reports back with [`Message::Synced`].
    fn run<F, Fut, T>(&mut self, intent: F) -> Task<Message>
    where
        F: FnOnce(MailController) -> Fut,
        Fut: Future<Output = cusana_core::Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let Some(controller) = self.controller.clone() else {
            return Task::none();
        };
        self.in_flight += 1;
        Task::perform(intent(controller), |result| {
            Message::Synced(result.map(drop).map_err(|e| e.to_string()))
        })
    }

    /// Applies a synchronous controller change and re-renders.
    fn apply(&mut self, change: impl FnOnce(&MailController)) {
        if let Some(controller) = &self.controller {
            change(controller);
        }
        self.sync();
    }

    fn sync(&mut self) {
        if let Some(controller) = &self.controller {
            self.view = controller.snapshot();
        }
    }

    fn save_settings(&self) -> Task<Message> {
        let settings = self.settings.clone();
        let path = self.settings_path.clone();
        Task::perform(
            async move { settings.save(&path).await.map_err(|e| format!("{e:#}")) },
            Message::SettingsSaved,
        )
    }

    /// Update state based on message.
    #[allow(clippy::needless_pass_by_value)]
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SettingsLoaded(result) => {
                self.settings = result.unwrap_or_else(|e| {
                    warn!("Failed to load settings, using defaults: {}", e);
                    AppSettings::default()
                });
                self.apply_theme();
                return self.connect();
            }
            Message::SettingsSaved(result) => {
                if let Err(e) = result {
                    warn!("Failed to save settings: {}", e);
                }
            }
            Message::ToggleTheme => {
                self.settings.theme_mode = self.settings.theme_mode.toggled();
                self.apply_theme();
                info!("Theme changed to {:?}", self.settings.theme_mode);
                return self.save_settings();
            }
            Message::ToggleSidebar => {
                self.settings.sidebar_collapsed = !self.settings.sidebar_collapsed;
                return self.save_settings();
            }

            Message::SelectFilter(filter) => {
                return self.run(move |c| async move { c.set_filter(filter).await });
            }
            Message::SearchChanged(raw) => {
                self.view.search_input.clone_from(&raw);
                return self.run(move |c| async move { c.search(raw).await });
            }
            Message::Refresh => {
                return self.run(|c| async move { c.refresh_list(SelectionHint::Retain).await });
            }
            Message::SelectEmail(id) => {
                return self.run(move |c| async move { c.select(&id).await });
            }

            Message::ToggleRead(id) => {
                return self.run(move |c| async move { c.toggle_read(&id).await });
            }
            Message::ToggleArchived(id) => {
                return self.run(move |c| async move { c.toggle_archived(&id).await });
            }
            Message::Forward(id) => {
                return self.run(move |c| async move { c.start_forward(&id).await });
            }
            Message::DeleteEmail(id) => {
                return self.run(move |c| async move { c.delete(&id).await });
            }
            Message::OpenAttachment(link) => {
                let url = self.controller.as_ref().map_or_else(
                    || self.settings.client.resolve_link(&link),
                    |c| c.config().resolve_link(&link),
                );
                debug!("Opening attachment {}", url);
                if let Err(e) = opener::open(&url) {
                    warn!("Failed to open {}: {}", url, e);
                }
            }

            Message::OpenCompose => self.apply(MailController::open_compose),
            Message::CloseCompose => self.apply(MailController::close_compose),
            Message::ComposeEdited(field, value) => {
                self.apply(|c| c.edit_compose(field, value));
            }
            Message::SendCompose => {
                return self.run(|c| async move { c.send_compose().await });
            }

            Message::ReplyEdited(draft) => self.apply(|c| c.edit_reply(draft)),
            Message::ClearReply => self.apply(MailController::clear_reply),
            Message::SendReply => {
                return self.run(|c| async move { c.send_reply().await });
            }

            Message::DismissBanner(id) => self.apply(|c| c.dismiss_banner(id)),

            Message::Synced(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                if let Err(e) = result {
                    debug!("Intent finished with error: {}", e);
                }
                self.sync();
            }
            Message::Tick => self.sync(),

            Message::KeyPressed(action) => return self.handle_keyboard(action),
            Message::Ignored => {}
        }
        Task::none()
    }

    fn handle_keyboard(&mut self, action: KeyboardAction) -> Task<Message> {
        match action {
            KeyboardAction::ComposeNew => self.apply(MailController::open_compose),
            KeyboardAction::FocusSearch => {
                return iced::widget::operation::focus(view::SEARCH_INPUT);
            }
            KeyboardAction::Cancel => {
                if self.view.compose.open {
                    self.apply(MailController::close_compose);
                }
            }
            KeyboardAction::Delete => {
                if !self.view.compose.open
                    && let Some(id) = self.view.selected_id.clone()
                {
                    return self.update(Message::DeleteEmail(id));
                }
            }
            KeyboardAction::Refresh => return self.update(Message::Refresh),
            KeyboardAction::ToggleSidebar => return self.update(Message::ToggleSidebar),
        }
        Task::none()
    }

    /// Render current state as UI.
    fn view(&self) -> Element<'_, Message> {
        if self.controller.is_none() {
            return self.view_startup();
        }

        let state = &self.view;
        let panes = row![view::view_message_list(state), view::view_message_view(state)]
            .height(Length::Fill);
        let main = column![
            view::view_header(&state.search_input, self.settings.theme_mode),
            panes
        ]
        .width(Length::Fill);

        let mut layout: Element<'static, Message> = row![
            view::view_sidebar(state, self.settings.sidebar_collapsed),
            main
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

        if state.compose.open {
            layout = view::view_compose_modal(layout, &state.compose, state.loading.sending_new());
        }
        if let Some(banner) = &state.banner {
            layout = view::view_banner(layout, banner);
        }
        layout
    }

    /// Shown until the controller exists.
    fn view_startup(&self) -> Element<'_, Message> {
        let note = self
            .startup_error
            .clone()
            .unwrap_or_else(|| "Loading...".to_string());

        container(text(note).size(15).style(|_theme| {
            let p = palette::current();
            text::Style {
                color: Some(p.text_secondary),
            }
        }))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(style::widgets::message_content_style)
        .into()
    }

    /// Keyboard shortcuts, plus a tick while anything is pending.
    fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::listen().map(|event| {
            if let keyboard::Event::KeyPressed { key, modifiers, .. } = event {
                handle_key_press(key, modifiers).unwrap_or(Message::Ignored)
            } else {
                Message::Ignored
            }
        });

        if self.in_flight > 0 || self.view.banner.is_some() {
            Subscription::batch([keys, iced::time::every(TICK).map(|_| Message::Tick)])
        } else {
            keys
        }
    }
}

/// Handle keyboard shortcuts and return appropriate message.
fn handle_key_press(key: Key, modifiers: Modifiers) -> Option<Message> {
    let ctrl = modifiers.command(); // Ctrl on Linux/Windows, Cmd on macOS

    match key {
        Key::Character(c) if ctrl && c.as_str() == "n" => {
            Some(Message::KeyPressed(KeyboardAction::ComposeNew))
        }
        Key::Character(c) if ctrl && c.as_str() == "k" => {
            Some(Message::KeyPressed(KeyboardAction::FocusSearch))
        }
        Key::Character(c) if ctrl && c.as_str() == "b" => {
            Some(Message::KeyPressed(KeyboardAction::ToggleSidebar))
        }
        Key::Named(keyboard::key::Named::Escape) => {
            Some(Message::KeyPressed(KeyboardAction::Cancel))
        }
        Key::Named(keyboard::key::Named::Delete) => {
            Some(Message::KeyPressed(KeyboardAction::Delete))
        }
        Key::Named(keyboard::key::Named::F5) => Some(Message::KeyPressed(KeyboardAction::Refresh)),
        _ => None,
    }
}
