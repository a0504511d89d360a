//! Minimal Open XML presentation writer.
//!
//! Builds a `.pptx` package from scratch: content types, relationship
//! parts, a slide master with two layouts, a theme derived from the deck
//! theme, notes slides for speaker notes, and JPEG media for embedded
//! pictures. Slides position their shapes explicitly, so the master and
//! layouts stay bare.

pub mod fit;
pub mod parts;
pub mod slide;

use std::io::{Cursor, Write};
use std::path::Path;

use clubdeck_common::Theme;
use thiserror::Error;
use zip::write::FileOptions;
use zip::ZipWriter;

#[derive(Error, Debug)]
pub enum PptxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, PptxError>;

/// JPEG bytes ready to be placed in `ppt/media/`.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub data: Vec<u8>,
}

#[derive(Debug)]
enum Slide {
    Title {
        title: String,
        subtitle: String,
    },
    Content {
        title: String,
        bullets: Vec<String>,
        notes: String,
        image: Option<EmbeddedImage>,
    },
}

pub struct DeckBuilder {
    theme: &'static Theme,
    slides: Vec<Slide>,
}

impl DeckBuilder {
    pub fn new(theme: &'static Theme) -> Self {
        Self { theme, slides: Vec::new() }
    }

    pub fn add_title_slide(&mut self, title: impl Into<String>, subtitle: impl Into<String>) -> &mut Self {
        self.slides.push(Slide::Title { title: title.into(), subtitle: subtitle.into() });
        self
    }

    /// Empty bullet lines are dropped here rather than rendered as blank
    /// paragraphs.
    pub fn add_content_slide(
        &mut self,
        title: impl Into<String>,
        bullets: &[String],
        notes: impl Into<String>,
        image: Option<EmbeddedImage>,
    ) -> &mut Self {
        let bullets: Vec<String> = bullets
            .iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        self.slides.push(Slide::Content { title: title.into(), bullets, notes: notes.into(), image });
        self
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Serialize the package into memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let has_media = self.slides.iter().any(|s| matches!(s, Slide::Content { image: Some(_), .. }));

        let mut put = |zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, content: &[u8]| -> Result<()> {
            zip.start_file(name, options)?;
            zip.write_all(content)?;
            Ok(())
        };

        put(&mut zip, "[Content_Types].xml", parts::content_types_xml(self.slides.len(), has_media).as_bytes())?;
        put(&mut zip, "_rels/.rels", parts::root_rels_xml().as_bytes())?;
        put(&mut zip, "ppt/presentation.xml", parts::presentation_xml(self.slides.len()).as_bytes())?;
        put(&mut zip, "ppt/_rels/presentation.xml.rels", parts::presentation_rels_xml(self.slides.len()).as_bytes())?;
        put(&mut zip, "ppt/slideMasters/slideMaster1.xml", parts::slide_master_xml().as_bytes())?;
        put(&mut zip, "ppt/slideMasters/_rels/slideMaster1.xml.rels", parts::slide_master_rels_xml().as_bytes())?;
        put(&mut zip, "ppt/slideLayouts/slideLayout1.xml", parts::slide_layout_xml("title", "Title Slide").as_bytes())?;
        put(&mut zip, "ppt/slideLayouts/slideLayout2.xml", parts::slide_layout_xml("obj", "Title and Content").as_bytes())?;
        put(&mut zip, "ppt/slideLayouts/_rels/slideLayout1.xml.rels", parts::slide_layout_rels_xml().as_bytes())?;
        put(&mut zip, "ppt/slideLayouts/_rels/slideLayout2.xml.rels", parts::slide_layout_rels_xml().as_bytes())?;
        put(&mut zip, "ppt/notesMasters/notesMaster1.xml", parts::notes_master_xml().as_bytes())?;
        put(&mut zip, "ppt/notesMasters/_rels/notesMaster1.xml.rels", parts::notes_master_rels_xml().as_bytes())?;
        put(&mut zip, "ppt/theme/theme1.xml", parts::theme_xml(self.theme).as_bytes())?;
        put(&mut zip, "ppt/theme/theme2.xml", parts::theme_xml(self.theme).as_bytes())?;

        let mut image_counter = 0usize;
        for (idx, s) in self.slides.iter().enumerate() {
            let n = idx + 1;
            let (slide_xml, layout, notes, image) = match s {
                Slide::Title { title, subtitle } => {
                    (slide::title_slide_xml(self.theme, title, subtitle), 1, String::new(), None)
                }
                Slide::Content { title, bullets, notes, image } => (
                    slide::content_slide_xml(self.theme, title, bullets, image.is_some()),
                    2,
                    notes.clone(),
                    image.as_ref(),
                ),
            };

            let image_name = image.map(|_| {
                image_counter += 1;
                format!("image{image_counter}.jpeg")
            });

            put(&mut zip, &format!("ppt/slides/slide{n}.xml"), slide_xml.as_bytes())?;
            put(
                &mut zip,
                &format!("ppt/slides/_rels/slide{n}.xml.rels"),
                slide::slide_rels_xml(n, layout, image_name.as_deref()).as_bytes(),
            )?;
            put(&mut zip, &format!("ppt/notesSlides/notesSlide{n}.xml"), slide::notes_slide_xml(&notes).as_bytes())?;
            put(
                &mut zip,
                &format!("ppt/notesSlides/_rels/notesSlide{n}.xml.rels"),
                slide::notes_slide_rels_xml(n).as_bytes(),
            )?;
            if let (Some(name), Some(img)) = (image_name.as_deref(), image) {
                put(&mut zip, &format!("ppt/media/{name}"), &img.data)?;
            }
        }

        let cursor = zip.finish()?;
        tracing::debug!(slides = self.slides.len(), bytes = cursor.get_ref().len(), "deck serialized");
        Ok(cursor.into_inner())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    fn sample_deck() -> Vec<u8> {
        let mut builder = DeckBuilder::new(Theme::get("modern").unwrap());
        builder.add_title_slide("Python Club", "Week 1 - Variables & Types");
        builder.add_content_slide(
            "Introduction",
            &["What a variable is".to_string(), "".to_string(), "Types you will meet".to_string()],
            "Welcome everyone!\nAsk who has coded before.",
            None,
        );
        builder.to_bytes().unwrap()
    }

    #[test]
    fn package_contains_required_parts() {
        let bytes = sample_deck();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slideLayouts/slideLayout2.xml",
            "ppt/notesMasters/notesMaster1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/notesSlides/notesSlide2.xml",
        ] {
            assert!(archive.by_name(part).is_ok(), "missing part {part}");
        }
    }

    #[test]
    fn slide_parts_are_well_formed_xml() {
        let bytes = sample_deck();
        for part in ["ppt/presentation.xml", "ppt/slides/slide1.xml", "ppt/slides/slide2.xml"] {
            let xml = read_part(&bytes, part);
            let mut reader = quick_xml::Reader::from_str(&xml);
            loop {
                match reader.read_event() {
                    Ok(quick_xml::events::Event::Eof) => break,
                    Ok(_) => {}
                    Err(e) => panic!("{part} is not well-formed: {e}"),
                }
            }
        }
    }

    #[test]
    fn subtitle_ampersand_is_escaped_in_slide_xml() {
        let bytes = sample_deck();
        let xml = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(xml.contains("Variables &amp; Types"));
    }

    #[test]
    fn empty_bullets_are_dropped_before_rendering() {
        let bytes = sample_deck();
        let xml = read_part(&bytes, "ppt/slides/slide2.xml");
        assert_eq!(xml.matches("<a:buChar").count(), 2);
    }

    #[test]
    fn notes_text_lands_in_the_notes_slide() {
        let bytes = sample_deck();
        let xml = read_part(&bytes, "ppt/notesSlides/notesSlide2.xml");
        assert!(xml.contains("Welcome everyone!"));
        assert!(xml.contains("Ask who has coded before."));
    }

    #[test]
    fn embedded_image_gets_media_part_and_relationship() {
        let mut builder = DeckBuilder::new(Theme::get("dark").unwrap());
        builder.add_content_slide(
            "With picture",
            &["a point".to_string()],
            "",
            Some(EmbeddedImage { data: vec![0xFF, 0xD8, 0xFF, 0xE0] }),
        );
        let bytes = builder.to_bytes().unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes.clone())).unwrap();
        assert!(archive.by_name("ppt/media/image1.jpeg").is_ok());
        let rels = read_part(&bytes, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains("../media/image1.jpeg"));
        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(types.contains("image/jpeg"));
    }
}
