//! Shared types for the clubdeck workspace: slide records, club records,
//! presentation themes, and EMU/point unit helpers.

pub mod theme;
pub mod types;
pub mod units;

pub use theme::{Theme, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU};
pub use types::{ClubRecord, DeckOutline, SlideContent, TitleSlide};
pub use units::{centi_points, emu_from_inches, Rgb};
