//! Deck generation pipeline: one completion for the title slide, one per
//! content slide with a bounded retry loop, then image lookup and the
//! final package write.

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use clubdeck_common::{DeckOutline, SlideContent, Theme, TitleSlide};
use clubdeck_openrouter::{ChatClient, ChatMessage};
use clubdeck_pptx::DeckBuilder;
use clubdeck_serpapi::ImageSearchClient;

use crate::error::Result;
use crate::{media, parse, prompts};

/// Attempts per content slide before taking the fallback record.
const MAX_ATTEMPTS: u32 = 3;
const TITLE_MAX_TOKENS: u32 = 100;
const SLIDE_MAX_TOKENS: u32 = 300;

/// Bullet budget a reply must meet to be accepted as-is.
const MAX_BULLET_LINES: usize = 6;
const MAX_BULLET_CHARS: usize = 90;

/// Seam over the chat-completion call so the pipeline can be driven by a
/// scripted backend in tests.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> anyhow::Result<String>;
}

#[async_trait]
impl Completion for ChatClient {
    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> anyhow::Result<String> {
        ChatClient::complete(self, messages, max_tokens).await
    }
}

#[derive(Debug, Clone)]
pub struct DeckRequest {
    pub club_type: String,
    pub topic: String,
    pub week: u32,
}

/// True when the parsed slide fits a content box without shrinking below
/// readable sizes: few lines, each short enough for one row.
pub fn fits(slide: &SlideContent) -> bool {
    slide.bullets.len() <= MAX_BULLET_LINES
        && slide.bullets.iter().all(|b| b.chars().count() <= MAX_BULLET_CHARS)
}

fn fallback_slide(club_type: &str, slide_topic: &str) -> SlideContent {
    SlideContent {
        title: slide_topic.to_string(),
        bullets: vec![format!("Key points about {slide_topic}.")],
        notes: format!("Speaker notes for {slide_topic}."),
        image_term: format!("{club_type} {slide_topic} illustration"),
    }
}

/// The five fixed section topics every deck covers.
pub fn slide_topics(topic: &str) -> [String; 5] {
    [
        format!("Introduction to {topic}"),
        format!("Key Concepts of {topic}"),
        format!("Examples and Applications of {topic}"),
        format!("Hands-on Practice with {topic}"),
        "Summary and Next Steps".to_string(),
    ]
}

pub struct Generator {
    chat: Box<dyn Completion>,
}

impl Generator {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat: Box::new(chat) }
    }

    pub fn with_backend(chat: Box<dyn Completion>) -> Self {
        Self { chat }
    }

    async fn title_slide(&self, req: &DeckRequest) -> TitleSlide {
        let default_title = format!("{} - Week {}", req.club_type, req.week);
        let default_subtitle = format!("Topic: {}", req.topic);
        let messages = [
            ChatMessage::system(prompts::system_prompt(&req.club_type)),
            ChatMessage::user(prompts::title_prompt(&req.club_type, &req.topic, req.week)),
        ];
        match self.chat.complete(&messages, TITLE_MAX_TOKENS).await {
            Ok(reply) => {
                tracing::debug!(reply = %reply, "title slide reply");
                parse::parse_title_content(&reply, &default_title, &default_subtitle)
            }
            Err(e) => {
                tracing::warn!(error = %e, "title completion failed, using defaults");
                TitleSlide { title: default_title, subtitle: default_subtitle }
            }
        }
    }

    /// One content slide. Replies that overflow the bullet budget or reuse
    /// an image term already taken by this deck are rejected and the model
    /// is asked again, up to the attempt cap.
    async fn content_slide(
        &self,
        req: &DeckRequest,
        slide_topic: &str,
        used_image_terms: &mut HashSet<String>,
    ) -> SlideContent {
        let messages = [
            ChatMessage::system(prompts::generic_system_prompt()),
            ChatMessage::user(prompts::slide_prompt(slide_topic, &req.club_type)),
        ];

        for attempt in 1..=MAX_ATTEMPTS {
            match self.chat.complete(&messages, SLIDE_MAX_TOKENS).await {
                Ok(reply) => {
                    tracing::debug!(slide_topic, attempt, reply = %reply, "slide reply");
                    let slide = parse::parse_slide_content(&reply);
                    if !fits(&slide) {
                        tracing::debug!(slide_topic, attempt, "reply overflows bullet budget, retrying");
                        continue;
                    }
                    if used_image_terms.contains(&slide.image_term) {
                        tracing::debug!(
                            slide_topic,
                            attempt,
                            term = %slide.image_term,
                            "image term already used in this deck, asking for a new one"
                        );
                        continue;
                    }
                    used_image_terms.insert(slide.image_term.clone());
                    return slide;
                }
                Err(e) => {
                    tracing::warn!(slide_topic, attempt, error = %e, "slide completion failed");
                }
            }
        }

        tracing::warn!(slide_topic, "falling back to fixed slide content");
        fallback_slide(&req.club_type, slide_topic)
    }

    pub async fn generate_outline(&self, req: &DeckRequest) -> Result<DeckOutline> {
        let title_slide = self.title_slide(req).await;

        let mut used_image_terms = HashSet::new();
        let mut content_slides = Vec::new();
        for slide_topic in slide_topics(&req.topic) {
            let slide = self.content_slide(req, &slide_topic, &mut used_image_terms).await;
            content_slides.push(slide);
        }

        tracing::info!(slides = content_slides.len(), "generated deck outline");
        Ok(DeckOutline { title_slide, content_slides })
    }

    /// Full pipeline: outline, one image per content slide when a search
    /// client is available, package write. Image failures degrade to a
    /// text-only slide.
    pub async fn generate_presentation(
        &self,
        req: &DeckRequest,
        theme: &'static Theme,
        images: Option<&ImageSearchClient>,
        out_path: &Path,
    ) -> Result<()> {
        let outline = self.generate_outline(req).await?;

        let mut deck = DeckBuilder::new(theme);
        deck.add_title_slide(outline.title_slide.title.clone(), outline.title_slide.subtitle.clone());

        for slide in &outline.content_slides {
            let image = match images {
                Some(client) => match client.first_image_url(&slide.image_term).await {
                    Ok(Some(url)) => match media::fetch_slide_image(&url).await {
                        Ok(img) => Some(img),
                        Err(e) => {
                            tracing::warn!(url = %url, error = %e, "image download failed, continuing without it");
                            None
                        }
                    },
                    Ok(None) => None,
                    Err(e) => {
                        tracing::warn!(term = %slide.image_term, error = %e, "image search failed");
                        None
                    }
                },
                None => None,
            };
            deck.add_content_slide(&slide.title, &slide.bullets, &slide.notes, image);
        }

        deck.save(out_path)?;
        tracing::info!(path = %out_path.display(), slides = deck.slide_count(), "presentation written");
        Ok(())
    }
}
