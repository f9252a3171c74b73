//! Helmsight Iced application.

use iced::widget::{button, column, row, rule, text};
use iced::{Alignment, Element, Subscription, Task, Theme};

use helmsight_common::{AppConfig, Command, HistoryResponse, fetch_history, refresh_delay};

use crate::demo;
use crate::message::{Message, Page};
use crate::stream::{self, CommandLink};
use crate::table::RowTable;
use crate::view::history::{HistoryState, history_view};
use crate::view::readings::{ReadingRow, readings_view};
use crate::view::theme;
use crate::view::wind::{WindState, wind_view};

/// The main Helmsight application.
pub struct Helmsight {
    /// Application configuration.
    config: AppConfig,
    /// Running against simulated instruments.
    demo: bool,
    /// Currently shown page.
    page: Page,
    /// Command handle, held while the wind link is up.
    wind_link: Option<CommandLink>,
    /// Data socket connection state.
    data_connected: bool,
    /// Wind page state.
    wind: WindState,
    /// Generic readings table.
    readings: RowTable<ReadingRow>,
    /// History page state.
    history: HistoryState,
}

impl Helmsight {
    /// Boot the application (called by iced::application).
    pub fn boot(config: AppConfig, demo: bool) -> (Self, Task<Message>) {
        let app = Self {
            config,
            demo,
            page: Page::default(),
            wind_link: None,
            data_connected: false,
            wind: WindState::default(),
            readings: RowTable::new(),
            history: HistoryState::new(),
        };

        (app, Task::none())
    }

    /// Get the window title.
    pub fn title(&self) -> String {
        if self.demo {
            "Helmsight - demo".to_string()
        } else {
            format!("Helmsight - {}", self.config.device.host)
        }
    }

    /// Handle incoming messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WindConnected(link) => {
                tracing::info!("Wind link up");
                self.wind_link = Some(link);
            }

            Message::WindDisconnected(error) => {
                tracing::debug!(error = %error, "Wind link down");
                self.wind_link = None;
            }

            Message::WindSensors(snapshot) => {
                self.wind.sensors.reconcile(&snapshot);
            }

            Message::MastheadUpdated(masthead) => {
                self.wind.masthead = Some(masthead);
            }

            Message::DataConnected => {
                self.data_connected = true;
            }

            Message::DataDisconnected(error) => {
                tracing::debug!(error = %error, "Data link down");
                self.data_connected = false;
            }

            Message::ReadingsReceived(snapshot) => {
                self.readings.reconcile(&snapshot);
            }

            Message::ReloadRequested => {
                tracing::info!("Discarding live state for reload");
                self.wind.clear();
                self.readings.clear();
                self.wind_link = None;
            }

            Message::PageSelected(page) => {
                self.page = page;
                // Entering the history page (re)starts its polling loop.
                if page == Page::History {
                    return self.start_history_load();
                }
            }

            Message::PositionPicked(sensor, position) => {
                if let Some(sensor_row) = self.wind.sensors.get_mut(&sensor) {
                    sensor_row.position = position;
                }
                self.send_command(Command::SetPosition { sensor, position });
            }

            Message::OffsetEdited(sensor, value) => {
                if let Some(sensor_row) = self.wind.sensors.get_mut(&sensor) {
                    sensor_row.offset_input = value;
                }
            }

            Message::OffsetSubmitted(sensor) => {
                let Some(sensor_row) = self.wind.sensors.get(&sensor) else {
                    return Task::none();
                };
                match sensor_row.offset_input.trim().parse::<f64>() {
                    Ok(degrees) => self.send_command(Command::SetOffset { sensor, degrees }),
                    Err(_) => {
                        tracing::warn!(
                            sensor = %sensor,
                            input = %sensor_row.offset_input,
                            "Ignoring unparsable offset"
                        );
                    }
                }
            }

            Message::ScanRequested => {
                self.send_command(Command::Scan);
            }

            Message::HistoryItemPicked(item) => {
                self.history.item = item;
                return self.start_history_load();
            }

            Message::HistoryRangePicked(range) => {
                self.history.range = range;
                return self.start_history_load();
            }

            Message::HistoryRefreshRequested => {
                return self.start_history_load();
            }

            Message::HistoryFetched(generation, result) => {
                return self.on_history_fetched(generation, result);
            }

            Message::HistoryPollFired(generation) => {
                if generation == self.history.generation {
                    return self.fetch_task(generation);
                }
            }
        }

        Task::none()
    }

    /// Create subscriptions for the live sockets (or their demo
    /// stand-ins).
    pub fn subscription(&self) -> Subscription<Message> {
        if self.demo {
            Subscription::batch([demo::wind_subscription(), demo::readings_subscription()])
        } else {
            Subscription::batch([
                stream::wind_subscription(self.config.device.clone()),
                stream::data_subscription(self.config.device.clone()),
            ])
        }
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        let page: Element<'_, Message> = match self.page {
            Page::Wind => wind_view(&self.wind),
            Page::Readings => readings_view(&self.readings),
            Page::History => history_view(&self.history),
        };

        column![self.render_header(), rule::horizontal(1), page].into()
    }

    /// Get the application theme.
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn render_header(&self) -> Element<'_, Message> {
        let title = text("Helmsight").size(24);

        let mut nav = row![].spacing(8);
        for page in Page::ALL {
            let style = if self.page == *page {
                iced::widget::button::primary
            } else {
                iced::widget::button::secondary
            };
            nav = nav.push(
                button(text(page.label()).size(14))
                    .on_press(Message::PageSelected(*page))
                    .style(style),
            );
        }

        let connected = self.wind_link.is_some() || self.data_connected;
        let status = if connected {
            text("Connected").size(14).style(|t: &Theme| text::Style {
                color: Some(theme::colors(t).success()),
            })
        } else {
            text("Disconnected").size(14).style(|t: &Theme| text::Style {
                color: Some(theme::colors(t).danger()),
            })
        };

        row![title, nav, status]
            .spacing(20)
            .padding(10)
            .align_y(Alignment::Center)
            .into()
    }

    fn send_command(&self, command: Command) {
        match &self.wind_link {
            Some(link) => link.send(command),
            None => tracing::warn!(command = ?command, "No wind link; command dropped"),
        }
    }

    /// Start a fresh history query cycle, superseding any in-flight
    /// response or pending re-poll timer.
    fn start_history_load(&mut self) -> Task<Message> {
        let generation = self.history.restart();
        self.fetch_task(generation)
    }

    fn fetch_task(&self, generation: u64) -> Task<Message> {
        let item = self.history.item;
        let range = self.history.range;

        if self.demo {
            return Task::perform(
                async move {
                    tokio::time::sleep(std::time::Duration::from_millis(150)).await;
                    Ok::<HistoryResponse, String>(demo::history(item, range))
                },
                move |result| Message::HistoryFetched(generation, result),
            );
        }

        let host = self.config.device.host.clone();
        Task::perform(
            async move {
                fetch_history(&host, item, range)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |result| Message::HistoryFetched(generation, result),
        )
    }

    fn on_history_fetched(
        &mut self,
        generation: u64,
        result: Result<HistoryResponse, String>,
    ) -> Task<Message> {
        if generation != self.history.generation {
            tracing::debug!(generation, "Ignoring superseded history response");
            return Task::none();
        }

        match result {
            Ok(response) => {
                let delay = refresh_delay(response.total_time);
                self.history.plot(&response);

                // The polling loop re-arms only after a successful plot;
                // a failure leaves it paused until the user refreshes.
                Task::perform(
                    async move { tokio::time::sleep(delay).await },
                    move |_| Message::HistoryPollFired(generation),
                )
            }
            Err(error) => {
                tracing::error!(error = %error, "History query failed; polling paused");
                Task::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    fn boot_app() -> Helmsight {
        Helmsight::boot(AppConfig::default(), true).0
    }

    #[test]
    fn test_snapshot_messages_drive_tables() {
        let mut app = boot_app();

        let snapshot = mock::wind_snapshot(&[
            ("aa:aa", mock::wind_reading(Some(12.0), 4.0, 100)),
            ("bb:bb", mock::wind_reading(None, 2.0, 80)),
        ]);
        let _ = app.update(Message::WindSensors(snapshot));
        assert_eq!(app.wind.sensors.len(), 2);

        let _ = app.update(Message::WindSensors(mock::wind_snapshot(&[])));
        assert!(app.wind.sensors.is_empty());
    }

    #[test]
    fn test_reload_discards_live_state() {
        let mut app = boot_app();
        let _ = app.update(Message::MastheadUpdated(mock::masthead(Some(90.0), 5.0)));
        let _ = app.update(Message::ReadingsReceived(mock::reading_snapshot(&[(
            "GPS Speed",
            mock::reading(4.0, "gps", 10),
        )])));

        let _ = app.update(Message::ReloadRequested);
        assert!(app.wind.masthead.is_none());
        assert!(app.readings.is_empty());
    }

    #[test]
    fn test_history_fetch_applies_current_generation_only() {
        let mut app = boot_app();
        let _ = app.update(Message::PageSelected(Page::History));
        let generation = app.history.generation;

        // A response from a superseded query is ignored.
        let stale = mock::history_response(300.0, &[(10.0, Some(1.0))]);
        let _ = app.update(Message::HistoryFetched(generation + 1, Ok(stale)));
        assert!(app.history.total_time.is_none());

        let fresh = mock::history_response(300.0, &[(10.0, Some(1.0))]);
        let _ = app.update(Message::HistoryFetched(generation, Ok(fresh)));
        assert_eq!(app.history.total_time, Some(300.0));
        assert_eq!(app.history.chart.segments().len(), 1);
    }

    #[test]
    fn test_history_fetch_failure_keeps_last_plot() {
        let mut app = boot_app();
        let _ = app.update(Message::PageSelected(Page::History));
        let generation = app.history.generation;

        let response = mock::history_response(300.0, &[(10.0, Some(1.0))]);
        let _ = app.update(Message::HistoryFetched(generation, Ok(response)));

        let _ = app.update(Message::HistoryFetched(
            generation,
            Err("connection refused".to_string()),
        ));
        assert_eq!(app.history.chart.segments().len(), 1);
        assert_eq!(app.history.total_time, Some(300.0));
    }

    #[test]
    fn test_offset_edit_tracks_input() {
        let mut app = boot_app();
        let snapshot = mock::wind_snapshot(&[("aa:aa", mock::wind_reading(Some(1.0), 1.0, 10))]);
        let _ = app.update(Message::WindSensors(snapshot.clone()));

        let _ = app.update(Message::OffsetEdited(
            "aa:aa".to_string(),
            "15".to_string(),
        ));
        assert_eq!(
            app.wind.sensors.get("aa:aa").unwrap().offset_input,
            "15"
        );

        // The in-progress edit survives the next snapshot.
        let _ = app.update(Message::WindSensors(snapshot));
        assert_eq!(
            app.wind.sensors.get("aa:aa").unwrap().offset_input,
            "15"
        );
    }
}
