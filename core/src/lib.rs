//! Generation pipeline for club presentations: prompt construction, marker
//! parsing of model replies, image lookup, and deck assembly.

pub mod club;
pub mod config;
pub mod error;
pub mod generate;
pub mod media;
pub mod parse;
pub mod prompts;
pub mod slidesgpt;

pub use config::Config;
pub use error::{CoreError, Result};
pub use generate::{Completion, DeckRequest, Generator};
pub use slidesgpt::{ClubWorkflowOptions, SlidesGptClient};
