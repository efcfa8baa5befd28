use iced::keyboard::{self, key};
use iced::widget::image::Handle;
use iced::widget::{
    button, center, column, image, mouse_area, opaque, row, scrollable, stack, text, text_input,
    Space,
};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

mod api;
mod config;
mod state;
mod ui;

use api::pexels::PexelsClient;
use api::ProviderError;
use config::Config;
use state::data::{ImageRecord, ResultPage};
use state::favorites::Favorites;
use state::fetch::{Applied, FetchCoordinator, FetchRequest};
use state::session::{SessionContext, UserIdentity};

/// Load state of one photo's display bytes, keyed by image id.
#[derive(Debug, Clone)]
pub enum ThumbnailState {
    /// Bytes requested, response pending
    Loading,
    /// Decoded and ready to draw
    Ready(Handle),
    /// The fetch failed; a placeholder is drawn instead
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Explore,
    Favorites,
}

/// Main application state
struct VisualVault {
    /// Authenticated provider client
    client: PexelsClient,
    /// Search-and-paginate bookkeeping for the Explore tab
    fetch: FetchCoordinator,
    /// Persisted favorites collection
    favorites: Favorites,
    /// Optional signed-in identity, display concern only
    session: SessionContext,
    /// Signed-in user's avatar, once its bytes arrive
    avatar: Option<Handle>,
    /// Per-photo image-load state machines
    thumbnails: HashMap<String, ThumbnailState>,
    /// Live contents of the search box
    search_input: String,
    active_tab: Tab,
    /// Photo currently open in the modal viewer
    viewer: Option<ImageRecord>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    SearchInputChanged(String),
    SearchSubmitted,
    TabSelected(Tab),
    LoadMore,
    /// A provider page settled; the id ties it to the request that issued it
    PageFetched(u64, Result<ResultPage, ProviderError>),
    /// Display bytes for one photo settled
    ThumbnailFetched(String, Result<Handle, ProviderError>),
    /// The signed-in user's avatar bytes settled
    AvatarFetched(Result<Handle, ProviderError>),
    OpenViewer(ImageRecord),
    CloseViewer,
    ToggleFavorite(ImageRecord),
    DownloadImage(ImageRecord),
    DownloadFinished(Result<PathBuf, String>),
    SignOut,
}

impl VisualVault {
    /// Create a new instance of the application and kick off the
    /// initial curated fetch.
    fn new() -> (Self, Task<Message>) {
        let config = Config::build();

        let mut session = SessionContext::new();
        if let Some(profile) = config.profile {
            session.sign_in(UserIdentity {
                display_name: profile.display_name,
                avatar_url: profile.avatar_url,
            });
        }

        let favorites = Favorites::open_default();
        println!("📁 Loaded {} favorites", favorites.len());

        let mut app = VisualVault {
            client: PexelsClient::new(config.api_key),
            fetch: FetchCoordinator::new(),
            favorites,
            session,
            avatar: None,
            thumbnails: HashMap::new(),
            search_input: String::new(),
            active_tab: Tab::Explore,
            viewer: None,
            status: "Loading curated photos…".to_string(),
        };

        let request = app.fetch.begin_browse();
        let mut tasks = vec![app.run_fetch(request)];

        if let Some(url) = app
            .session
            .user()
            .and_then(|user| user.avatar_url.clone())
        {
            tasks.push(Task::perform(
                async move { api::fetch_image_bytes(url).await.map(Handle::from_bytes) },
                Message::AvatarFetched,
            ));
        }

        (app, Task::batch(tasks))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchInputChanged(value) => {
                self.search_input = value;
                Task::none()
            }
            Message::SearchSubmitted => match self.fetch.submit_query(&self.search_input) {
                Some(request) => {
                    self.active_tab = Tab::Explore;
                    self.status = format!("Searching for \"{}\"…", request.query);
                    self.run_fetch(request)
                }
                None => Task::none(),
            },
            Message::TabSelected(tab) => {
                self.active_tab = tab;
                match tab {
                    Tab::Favorites => {
                        self.status = if self.favorites.is_empty() {
                            "No favorites yet. Save some images first!".to_string()
                        } else {
                            format!("Viewing {} favorites", self.favorites.len())
                        };
                        let images = self.favorites.images().to_vec();
                        self.request_thumbnails(&images)
                    }
                    Tab::Explore => {
                        if self.fetch.images().is_empty() && !self.fetch.is_loading() {
                            self.status = "Loading curated photos…".to_string();
                            let request = self.fetch.begin_browse();
                            return self.run_fetch(request);
                        }
                        Task::none()
                    }
                }
            }
            Message::LoadMore => match self.fetch.begin_load_more() {
                Some(request) => self.run_fetch(request),
                None => Task::none(),
            },
            Message::PageFetched(id, outcome) => match self.fetch.apply(id, outcome) {
                Applied::Updated => {
                    self.status = if self.fetch.images().is_empty() {
                        "No images found.".to_string()
                    } else {
                        format!("Showing {} photos", self.fetch.images().len())
                    };
                    let images = self.fetch.images().to_vec();
                    prune_thumbnails(
                        &mut self.thumbnails,
                        &images,
                        self.favorites.images(),
                        self.viewer.as_ref(),
                    );
                    self.request_thumbnails(&images)
                }
                Applied::Failed => {
                    self.status = "Failed to load images. Please try again.".to_string();
                    Task::none()
                }
                Applied::Stale => Task::none(),
            },
            Message::ThumbnailFetched(id, outcome) => {
                let next = match outcome {
                    Ok(handle) => ThumbnailState::Ready(handle),
                    Err(e) => {
                        eprintln!("⚠️  Could not load image {id}: {e}");
                        ThumbnailState::Failed
                    }
                };
                self.thumbnails.insert(id, next);
                Task::none()
            }
            Message::AvatarFetched(outcome) => {
                match outcome {
                    Ok(handle) => self.avatar = Some(handle),
                    Err(e) => eprintln!("⚠️  Could not load avatar: {e}"),
                }
                Task::none()
            }
            Message::OpenViewer(record) => {
                let task = self.request_thumbnails(std::slice::from_ref(&record));
                self.viewer = Some(record);
                task
            }
            Message::CloseViewer => {
                self.viewer = None;
                Task::none()
            }
            Message::ToggleFavorite(record) => {
                let saved = self.favorites.toggle(&record);
                self.status = if saved {
                    "Added to favorites".to_string()
                } else {
                    "Removed from favorites".to_string()
                };
                Task::none()
            }
            Message::DownloadImage(record) => {
                // Native picker runs synchronously, like the rest of the UI thread
                let chosen = FileDialog::new()
                    .set_title("Save photo")
                    .set_file_name(format!("visual-vault-{}.jpg", record.id))
                    .save_file();

                match chosen {
                    Some(path) => {
                        self.status = "Downloading…".to_string();
                        Task::perform(
                            download_image(record.url, path),
                            Message::DownloadFinished,
                        )
                    }
                    None => Task::none(),
                }
            }
            Message::DownloadFinished(result) => {
                self.status = match result {
                    Ok(path) => format!("Saved to {}", path.display()),
                    Err(e) => {
                        eprintln!("⚠️  Download failed: {e}");
                        "Failed to download image".to_string()
                    }
                };
                Task::none()
            }
            Message::SignOut => {
                self.session.sign_out();
                self.avatar = None;
                self.status = "Signed out".to_string();
                Task::none()
            }
        }
    }

    /// Run one provider fetch in the background, tagging the response
    /// with its request id so stale pages can be discarded.
    fn run_fetch(&self, request: FetchRequest) -> Task<Message> {
        let FetchRequest { id, query, page } = request;
        Task::perform(self.client.clone().load_page(query, page), move |outcome| {
            Message::PageFetched(id, outcome)
        })
    }

    /// Start byte fetches for every photo that has no load state yet.
    fn request_thumbnails(&mut self, images: &[ImageRecord]) -> Task<Message> {
        let mut fetches = Vec::new();
        for record in images {
            if self.thumbnails.contains_key(&record.id) {
                continue;
            }
            self.thumbnails
                .insert(record.id.clone(), ThumbnailState::Loading);

            let id = record.id.clone();
            let url = record.url.clone();
            fetches.push(Task::perform(
                async move { api::fetch_image_bytes(url).await.map(Handle::from_bytes) },
                move |outcome| Message::ThumbnailFetched(id.clone(), outcome),
            ));
        }
        Task::batch(fetches)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let body = match self.active_tab {
            Tab::Explore => ui::grid::image_grid(
                self.fetch.images(),
                &self.thumbnails,
                &self.favorites,
                self.fetch.is_loading(),
                self.fetch.has_more(),
            ),
            Tab::Favorites => ui::grid::image_grid(
                self.favorites.images(),
                &self.thumbnails,
                &self.favorites,
                false,
                false,
            ),
        };

        let base = column![
            self.view_header(),
            self.view_tabs(),
            scrollable(body).height(Length::Fill).width(Length::Fill),
            text(&self.status).size(14),
        ]
        .spacing(10)
        .padding(12);

        match &self.viewer {
            Some(record) => {
                let handle = match self.thumbnails.get(&record.id) {
                    Some(ThumbnailState::Ready(handle)) => Some(handle),
                    _ => None,
                };
                let modal =
                    ui::viewer::image_viewer(record, handle, self.favorites.is_saved(&record.id));
                stack![
                    base,
                    opaque(
                        mouse_area(center(opaque(modal))).on_press(Message::CloseViewer)
                    )
                ]
                .into()
            }
            None => base.into(),
        }
    }

    fn view_header(&self) -> Element<Message> {
        let search = text_input("Search for images...", &self.search_input)
            .on_input(Message::SearchInputChanged)
            .on_submit(Message::SearchSubmitted)
            .padding(8)
            .width(Length::Fixed(360.0));

        let mut header = row![
            text("Visual Vault").size(28),
            Space::with_width(Length::Fill),
            search,
            button("Search").on_press(Message::SearchSubmitted).padding(8),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        if let Some(user) = self.session.user() {
            if let Some(avatar) = &self.avatar {
                header = header.push(
                    image(avatar.clone())
                        .width(Length::Fixed(28.0))
                        .height(Length::Fixed(28.0)),
                );
            }
            header = header.push(text(&user.display_name).size(14));
            header = header.push(
                button(text("Sign out").size(14))
                    .on_press(Message::SignOut)
                    .style(button::text),
            );
        }

        header.into()
    }

    fn view_tabs(&self) -> Element<Message> {
        let favorites_label = if self.favorites.is_empty() {
            "Favorites".to_string()
        } else {
            format!("Favorites ({})", self.favorites.len())
        };

        row![
            tab_button("Explore".to_string(), self.active_tab == Tab::Explore, Tab::Explore),
            tab_button(favorites_label, self.active_tab == Tab::Favorites, Tab::Favorites),
        ]
        .spacing(4)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Escape closes the viewer.
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|pressed, _modifiers| match pressed {
            keyboard::Key::Named(key::Named::Escape) => Some(Message::CloseViewer),
            _ => None,
        })
    }
}

/// Drop cached image bytes for photos no longer reachable from any view.
///
/// Called when a fresh page replaces the result list; without this the
/// per-photo map would keep every decoded photo of the session alive.
/// Entries still reachable through the current results, the favorites
/// collection or the open viewer are kept.
fn prune_thumbnails(
    thumbnails: &mut HashMap<String, ThumbnailState>,
    results: &[ImageRecord],
    favorites: &[ImageRecord],
    viewer: Option<&ImageRecord>,
) {
    let reachable: HashSet<&str> = results
        .iter()
        .chain(favorites)
        .chain(viewer)
        .map(|record| record.id.as_str())
        .collect();
    thumbnails.retain(|id, _| reachable.contains(id.as_str()));
}

fn tab_button<'a>(label: String, active: bool, tab: Tab) -> Element<'a, Message> {
    button(text(label))
        .on_press(Message::TabSelected(tab))
        .style(if active { button::primary } else { button::text })
        .padding(8)
        .into()
}

fn main() -> iced::Result {
    iced::application("Visual Vault", VisualVault::update, VisualVault::view)
        .subscription(VisualVault::subscription)
        .theme(VisualVault::theme)
        .centered()
        .run_with(VisualVault::new)
}

/// Fetch a photo's bytes and save them to the chosen path.
/// Decoding runs in a background thread to avoid blocking the UI.
async fn download_image(url: String, path: PathBuf) -> Result<PathBuf, String> {
    let bytes = api::fetch_image_bytes(url).await.map_err(|e| e.to_string())?;

    // Spawn blocking because decode + encode is CPU-intensive
    tokio::task::spawn_blocking(move || {
        let decoded = ::image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
        decoded.save(&path).map_err(|e| e.to_string())?;
        Ok(path)
    })
    .await
    .map_err(|e| e.to_string())?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            url: format!("https://images.example/{id}.jpg"),
            alt: format!("photo {id}"),
            photographer: None,
            width: 1920,
            height: 1080,
        }
    }

    fn ready() -> ThumbnailState {
        ThumbnailState::Ready(Handle::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xD9]))
    }

    #[test]
    fn prune_drops_photos_from_superseded_searches() {
        let mut thumbnails = HashMap::new();
        thumbnails.insert("old".to_string(), ready());
        thumbnails.insert("result".to_string(), ready());
        thumbnails.insert("saved".to_string(), ThumbnailState::Loading);
        thumbnails.insert("viewed".to_string(), ThumbnailState::Failed);

        let results = [record("result")];
        let favorites = [record("saved")];
        let viewed = record("viewed");

        prune_thumbnails(&mut thumbnails, &results, &favorites, Some(&viewed));

        assert!(!thumbnails.contains_key("old"));
        assert!(thumbnails.contains_key("result"));
        assert!(thumbnails.contains_key("saved"));
        assert!(thumbnails.contains_key("viewed"));
    }

    #[test]
    fn prune_with_no_views_empties_the_map() {
        let mut thumbnails = HashMap::new();
        thumbnails.insert("a".to_string(), ready());
        thumbnails.insert("b".to_string(), ready());

        prune_thumbnails(&mut thumbnails, &[], &[], None);

        assert!(thumbnails.is_empty());
    }
}
