//! Card grid for search results and favorites
//!
//! Cards flow into a wrap layout sized by each photo's aspect ratio,
//! which gives a lightweight masonry feel without a dedicated layout
//! pass. While a fetch is in flight a few gray skeleton cards pad the
//! end of the grid.

use std::collections::HashMap;

use iced::widget::{button, column, container, image, row, text, Space};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::state::data::ImageRecord;
use crate::state::favorites::Favorites;
use crate::{Message, ThumbnailState};

const CARD_WIDTH: f32 = 280.0;
const CARD_MIN_HEIGHT: f32 = 180.0;
const CARD_MAX_HEIGHT: f32 = 560.0;

/// Placeholder cards shown while a page is loading
const SKELETON_COUNT: usize = 8;

/// Render the grid for one tab.
pub fn image_grid<'a>(
    images: &'a [ImageRecord],
    thumbnails: &'a HashMap<String, ThumbnailState>,
    favorites: &'a Favorites,
    loading: bool,
    has_more: bool,
) -> Element<'a, Message> {
    if images.is_empty() && !loading {
        return empty_state();
    }

    let mut cards: Vec<Element<'a, Message>> = images
        .iter()
        .map(|record| card(record, thumbnails.get(&record.id), favorites.is_saved(&record.id)))
        .collect();

    if loading {
        for _ in 0..SKELETON_COUNT {
            cards.push(skeleton());
        }
    }

    let grid = Wrap::with_elements(cards).spacing(12.0).line_spacing(12.0);

    let mut content = column![grid]
        .spacing(24)
        .padding(16)
        .width(Length::Fill)
        .align_x(Alignment::Center);

    if has_more && !images.is_empty() {
        content = content.push(load_more_button(loading));
    }

    content.into()
}

fn card<'a>(
    record: &'a ImageRecord,
    thumbnail: Option<&'a ThumbnailState>,
    is_saved: bool,
) -> Element<'a, Message> {
    let height = (CARD_WIDTH / record.aspect_ratio()).clamp(CARD_MIN_HEIGHT, CARD_MAX_HEIGHT);

    let picture: Element<'a, Message> = match thumbnail {
        Some(ThumbnailState::Ready(handle)) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        Some(ThumbnailState::Failed) => container(text("Image unavailable").size(14))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
        _ => container(text("Loading…").size(14))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let picture = button(picture)
        .on_press(Message::OpenViewer(record.clone()))
        .padding(0)
        .style(button::text)
        .width(Length::Fill)
        .height(Length::Fixed(height));

    let caption = match &record.photographer {
        Some(name) => format!("Photo by {name}"),
        None => "Beautiful image".to_string(),
    };

    let save_label = if is_saved { "♥ Saved" } else { "♡ Save" };
    let footer = row![
        text(caption).size(13).width(Length::Fill),
        button(text(save_label).size(13))
            .on_press(Message::ToggleFavorite(record.clone()))
            .style(if is_saved { button::primary } else { button::secondary })
            .padding(6),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    container(column![picture, footer].spacing(6))
        .width(Length::Fixed(CARD_WIDTH))
        .padding(6)
        .style(container::rounded_box)
        .into()
}

fn skeleton<'a>() -> Element<'a, Message> {
    container(Space::new(Length::Fill, Length::Fill))
        .width(Length::Fixed(CARD_WIDTH))
        .height(Length::Fixed(300.0))
        .style(container::rounded_box)
        .into()
}

fn load_more_button<'a>(loading: bool) -> Element<'a, Message> {
    let label = if loading { "Loading..." } else { "Load More" };
    let mut load_more = button(text(label)).padding(10);
    if !loading {
        load_more = load_more.on_press(Message::LoadMore);
    }
    load_more.into()
}

fn empty_state<'a>() -> Element<'a, Message> {
    column![
        text("No images found").size(24),
        text("Search for something else or explore trending images").size(14),
    ]
    .spacing(8)
    .padding(64)
    .width(Length::Fill)
    .align_x(Alignment::Center)
    .into()
}
