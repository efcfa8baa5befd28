//! Full-size image viewer
//!
//! Content of the modal overlay: the photo (or a placeholder while its
//! bytes are still on the way), alt text and attribution, plus the
//! save and download actions. The overlay plumbing (backdrop, outside
//! click, Escape) lives in `main.rs`.

use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, ContentFit, Element, Length};

use crate::state::data::ImageRecord;
use crate::Message;

const VIEWER_WIDTH: f32 = 880.0;
const PICTURE_HEIGHT: f32 = 560.0;

pub fn image_viewer<'a>(
    record: &'a ImageRecord,
    handle: Option<&'a image::Handle>,
    is_saved: bool,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(PICTURE_HEIGHT))
            .content_fit(ContentFit::Contain)
            .into(),
        None => container(text("Loading full image…").size(16))
            .width(Length::Fill)
            .height(Length::Fixed(PICTURE_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let mut credit = column![text(&record.alt).size(18)].spacing(4);
    if let Some(name) = &record.photographer {
        credit = credit.push(text(format!("Photo by {name}")).size(14));
    }

    let save_label = if is_saved { "♥ Saved" } else { "♡ Save" };
    let actions = row![
        button(text(save_label))
            .on_press(Message::ToggleFavorite(record.clone()))
            .style(if is_saved { button::primary } else { button::secondary })
            .padding(8),
        button(text("Download"))
            .on_press(Message::DownloadImage(record.clone()))
            .style(button::secondary)
            .padding(8),
        button(text("Close"))
            .on_press(Message::CloseViewer)
            .style(button::text)
            .padding(8),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    container(column![picture, credit, actions].spacing(12))
        .width(Length::Fixed(VIEWER_WIDTH))
        .padding(16)
        .style(container::rounded_box)
        .into()
}
