//! Per-slide XML: explicitly positioned title, body, and picture shapes.
//!
//! All placement math mirrors the layout rules of the club generator: a
//! uniform theme margin, the body text on the left, and the illustrative
//! image on the right clamped inside the bottom margin.

use clubdeck_common::units::centi_points;
use clubdeck_common::{Theme, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU};

use crate::fit;
use crate::parts::{escape_xml, sp_tree_header, NS_A, NS_P, NS_R, REL_IMAGE, REL_NOTES_MASTER, REL_NOTES_SLIDE, REL_SLIDE, REL_SLIDE_LAYOUT, XML_DECL};

const TITLE_SLIDE_TITLE_TOP: i64 = 1_828_800; // 2 in
const TITLE_SLIDE_SUBTITLE_TOP: i64 = 3_429_000; // 3.75 in
const CONTENT_TITLE_HEIGHT: i64 = 1_143_000; // 1.25 in

fn xfrm(x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(
        "<a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>"
    )
}

fn text_run(text: &str, size_pt: u32, color_hex: &str, font: &str, bold: bool) -> String {
    let b = if bold { " b=\"1\"" } else { "" };
    format!(
        "<a:r><a:rPr lang=\"en-US\" sz=\"{}\"{b}><a:solidFill><a:srgbClr val=\"{color_hex}\"/></a:solidFill>\
         <a:latin typeface=\"{}\"/></a:rPr><a:t>{}</a:t></a:r>",
        centi_points(size_pt),
        escape_xml(font),
        escape_xml(text)
    )
}

fn text_shape(
    id: u32,
    name: &str,
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
    paragraphs: &str,
) -> String {
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{}\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr><p:nvPr/></p:nvSpPr>\
         <p:spPr>{}</p:spPr>\
         <p:txBody><a:bodyPr wrap=\"square\"><a:normAutofit/></a:bodyPr><a:lstStyle/>{paragraphs}</p:txBody>\
         </p:sp>",
        escape_xml(name),
        xfrm(x, y, cx, cy)
    )
}

fn bullet_paragraph(text: &str, size_pt: u32, theme: &Theme) -> String {
    format!(
        "<a:p><a:pPr marL=\"285750\" indent=\"-285750\">\
         <a:buClr><a:srgbClr val=\"{}\"/></a:buClr>\
         <a:buFont typeface=\"Arial\"/><a:buChar char=\"\u{2022}\"/></a:pPr>{}</a:p>",
        theme.accent_color.hex(),
        text_run(text, size_pt, &theme.text_color.hex(), theme.font_family, false)
    )
}

fn picture_shape(id: u32, rel_id: &str, x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(
        "<p:pic><p:nvPicPr><p:cNvPr id=\"{id}\" name=\"Picture {id}\"/>\
         <p:cNvPicPr/><p:nvPr/></p:nvPicPr>\
         <p:blipFill><a:blip r:embed=\"{rel_id}\"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>\
         <p:spPr>{}</p:spPr></p:pic>",
        xfrm(x, y, cx, cy)
    )
}

fn background(theme: &Theme) -> String {
    format!(
        "<p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>",
        theme.background.hex()
    )
}

fn wrap_slide(theme: &Theme, shapes: &str) -> String {
    format!(
        "{XML_DECL}<p:sld xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:cSld>{}<p:spTree>{}{shapes}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>",
        background(theme),
        sp_tree_header()
    )
}

pub fn title_slide_xml(theme: &Theme, title: &str, subtitle: &str) -> String {
    let margin = theme.margin;
    let width = SLIDE_WIDTH_EMU - 2 * margin;
    let title_para = format!(
        "<a:p><a:pPr algn=\"ctr\"/>{}</a:p>",
        text_run(title, theme.title_size, &theme.title_color.hex(), theme.font_family, true)
    );
    let subtitle_para = format!(
        "<a:p><a:pPr algn=\"ctr\"/>{}</a:p>",
        text_run(subtitle, theme.subtitle_size, &theme.text_color.hex(), theme.font_family, false)
    );
    let shapes = format!(
        "{}{}",
        text_shape(2, "Title 1", margin, TITLE_SLIDE_TITLE_TOP, width, 1_257_300, &title_para),
        text_shape(3, "Subtitle 2", margin, TITLE_SLIDE_SUBTITLE_TOP, width, 914_400, &subtitle_para),
    );
    wrap_slide(theme, &shapes)
}

pub fn content_slide_xml(theme: &Theme, title: &str, bullets: &[String], has_image: bool) -> String {
    let margin = theme.margin;
    let text_top = margin * 5 / 2;

    let image_width = if has_image { theme.image_width } else { 0 };
    // Slightly tighter right margin when an image shares the slide.
    let text_width = if has_image {
        SLIDE_WIDTH_EMU - image_width - margin * 5 / 2
    } else {
        SLIDE_WIDTH_EMU - 2 * margin
    };
    let text_height = SLIDE_HEIGHT_EMU - text_top - margin;

    let title_para = format!(
        "<a:p>{}</a:p>",
        text_run(title, theme.title_size, &theme.title_color.hex(), theme.font_family, true)
    );
    let mut shapes = text_shape(
        2,
        "Title 1",
        margin,
        margin / 2,
        SLIDE_WIDTH_EMU - 2 * margin,
        CONTENT_TITLE_HEIGHT,
        &title_para,
    );

    let size = fit::fit_font_size(bullets, text_width, text_height, theme.bullet_size);
    if fit::overflows(bullets, text_width, text_height, size) {
        tracing::warn!(
            slide_title = title,
            font_pt = size,
            "bullet text still overflows after shrinking to the minimum size"
        );
    }
    let paragraphs: String = bullets.iter().map(|b| bullet_paragraph(b, size, theme)).collect();
    shapes.push_str(&text_shape(3, "Content 2", margin, text_top, text_width, text_height, &paragraphs));

    if has_image {
        let image_left = SLIDE_WIDTH_EMU - theme.image_width - margin;
        let mut image_top = text_top;
        if image_top + theme.image_height > SLIDE_HEIGHT_EMU - margin {
            image_top = SLIDE_HEIGHT_EMU - theme.image_height - margin;
        }
        if image_top < text_top {
            image_top = text_top;
        }
        shapes.push_str(&picture_shape(4, "rId3", image_left, image_top, theme.image_width, theme.image_height));
    }

    wrap_slide(theme, &shapes)
}

pub fn slide_rels_xml(slide_number: usize, layout: usize, image_name: Option<&str>) -> String {
    let mut xml = format!(
        "{XML_DECL}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"{REL_SLIDE_LAYOUT}\" Target=\"../slideLayouts/slideLayout{layout}.xml\"/>\
         <Relationship Id=\"rId2\" Type=\"{REL_NOTES_SLIDE}\" Target=\"../notesSlides/notesSlide{slide_number}.xml\"/>"
    );
    if let Some(name) = image_name {
        xml.push_str(&format!(
            "<Relationship Id=\"rId3\" Type=\"{REL_IMAGE}\" Target=\"../media/{name}\"/>"
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

pub fn notes_slide_xml(notes: &str) -> String {
    let paragraphs: String = notes
        .lines()
        .map(|line| format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>", escape_xml(line)))
        .collect();
    let body = if paragraphs.is_empty() {
        "<a:p><a:endParaRPr lang=\"en-US\"/></a:p>".to_string()
    } else {
        paragraphs
    };
    format!(
        "{XML_DECL}<p:notes xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:cSld><p:spTree>{}\
         <p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"Notes Placeholder 1\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph type=\"body\" idx=\"1\"/></p:nvPr></p:nvSpPr>\
         <p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{body}</p:txBody></p:sp>\
         </p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:notes>",
        sp_tree_header()
    )
}

pub fn notes_slide_rels_xml(slide_number: usize) -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"{REL_NOTES_MASTER}\" Target=\"../notesMasters/notesMaster1.xml\"/>\
         <Relationship Id=\"rId2\" Type=\"{REL_SLIDE}\" Target=\"../slides/slide{slide_number}.xml\"/>\
         </Relationships>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clubdeck_common::Theme;

    #[test]
    fn title_text_is_escaped() {
        let theme = Theme::default_theme();
        let xml = title_slide_xml(theme, "Q&A <Week 3>", "Bits & Bobs");
        assert!(xml.contains("Q&amp;A &lt;Week 3&gt;"));
        assert!(!xml.contains("Q&A"));
    }

    #[test]
    fn content_slide_without_image_uses_full_width_box() {
        let theme = Theme::default_theme();
        let bullets = vec!["one".to_string(), "two".to_string()];
        let xml = content_slide_xml(theme, "Intro", &bullets, false);
        // 10in - 2 * 1in margin
        assert!(xml.contains("cx=\"7315200\""));
        assert!(!xml.contains("<p:pic>"));
    }

    #[test]
    fn content_slide_with_image_reserves_room_and_embeds_rid3() {
        let theme = Theme::default_theme();
        let bullets = vec!["one".to_string()];
        let xml = content_slide_xml(theme, "Intro", &bullets, true);
        assert!(xml.contains("<p:pic>"));
        assert!(xml.contains("r:embed=\"rId3\""));
        // image flush against the right margin: 10in - 4in - 1in = 5in
        assert!(xml.contains("x=\"4572000\""));
    }

    #[test]
    fn notes_lines_become_paragraphs() {
        let xml = notes_slide_xml("first line\nsecond line");
        assert!(xml.contains("<a:t>first line</a:t>"));
        assert!(xml.contains("<a:t>second line</a:t>"));
    }

    #[test]
    fn slide_rels_include_image_only_when_present() {
        let with = slide_rels_xml(2, 2, Some("image1.jpeg"));
        assert!(with.contains("media/image1.jpeg"));
        let without = slide_rels_xml(2, 2, None);
        assert!(!without.contains("media/"));
    }
}
