//! Text to markup transcoding
//!
//! Report text arrives raw: line breaks, tabs, runs of spaces and, for
//! objects that allow it, inline HTML tags. Each target markup needs its own
//! escaping, and the whitespace rules only work when the scanner sees raw
//! adjacency, so the conversion is a single pass over the characters.

use folio_core::Color;

const DEFAULT_FONT_SIZE: &str = "13px;";

/// Escaping rule-set of the target markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkupDialect {
    /// HTML body text
    #[default]
    PlainHtml,
    /// XML attribute or element text (spreadsheet and word-processor XML)
    Xml,
    /// OpenDocument text (`text:` namespace elements)
    OpenDocumentText,
}

/// How inline tag-like substrings in the source text are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextRenderMode {
    /// Everything is text; markup metacharacters are escaped
    #[default]
    Default,
    /// Text already carries HTML tags, which must not be escaped again
    HtmlTagsPassthrough,
}

/// Converts raw text into one markup dialect
///
/// # Examples
/// ```
/// use folio_encoding::{MarkupDialect, MarkupTranscoder};
///
/// let html = MarkupTranscoder::new(MarkupDialect::PlainHtml).encode("a  <b>");
/// assert_eq!(html, "a&nbsp;&nbsp;&lt;b&gt;");
///
/// let xml = MarkupTranscoder::new(MarkupDialect::Xml).encode("a  b\r\nc");
/// assert_eq!(xml, "a  b&#10;c");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupTranscoder<'a> {
    dialect: MarkupDialect,
    render_mode: TextRenderMode,
    excel2007: bool,
    font_size: &'a str,
}

impl<'a> MarkupTranscoder<'a> {
    pub fn new(dialect: MarkupDialect) -> Self {
        Self {
            dialect,
            render_mode: TextRenderMode::Default,
            excel2007: false,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn with_render_mode(mut self, render_mode: TextRenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Target Office 2007+ XML, which takes typographic characters literally
    /// and wants tabs as character references
    pub fn with_excel2007(mut self, excel2007: bool) -> Self {
        self.excel2007 = excel2007;
        self
    }

    /// CSS length used for the height of HTML paragraph breaks, including
    /// its trailing `;` (default `13px;`)
    pub fn with_font_size(mut self, font_size: &'a str) -> Self {
        self.font_size = font_size;
        self
    }

    /// Encode `text` in this transcoder's dialect
    pub fn encode(&self, text: &str) -> String {
        let html = self.dialect == MarkupDialect::PlainHtml;
        let odt = self.dialect == MarkupDialect::OpenDocumentText;
        let passthrough = self.render_mode == TextRenderMode::HtmlTagsPassthrough;

        let mut normalized = text.replace('\u{0B}', "\n");
        if html {
            normalized = normalized.replace("\r\n", "\n").replace('\r', "\n");
        }

        let chars: Vec<char> = normalized.chars().collect();
        let len = chars.len();
        let mut out = String::with_capacity(normalized.len());
        let mut line_breaks = 0usize;
        let mut i = 0;

        while i < len {
            let c = chars[i];
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();

            let tag_end = if odt && passthrough && c == '<' {
                chars[i..].iter().position(|&ch| ch == '>').map(|p| i + p)
            } else {
                None
            };

            if html
                && c == ' '
                && (i == 0 || i == len - 1 || prev == Some(' ') || next == Some(' '))
            {
                out.push_str("&nbsp;");
            } else if let Some(end) = tag_end {
                out.extend(&chars[i..=end]);
                i = end;
            } else if (c == '\r' && next == Some('\n')) || (html && c == '\n') {
                self.push_line_break(&mut out, i == 0 && c == '\n', line_breaks);
                line_breaks += 1;
                if !html {
                    // skip the '\n' of "\r\n"
                    i += 1;
                }
            } else {
                line_breaks = 0;
                if odt && c == ' ' {
                    let run = chars[i..].iter().take_while(|&&ch| ch == ' ').count();
                    out.push_str(&format!("<text:s text:c=\"{}\"/>", run));
                    i += run - 1;
                } else {
                    self.push_char(&mut out, c);
                }
            }
            i += 1;
        }

        out
    }

    fn push_line_break(&self, out: &mut String, leading: bool, line_breaks: usize) {
        match self.dialect {
            MarkupDialect::Xml => out.push_str("&#10;"),
            MarkupDialect::OpenDocumentText => out.push_str("<text:line-break />"),
            MarkupDialect::PlainHtml => {
                if leading {
                    out.push_str(&format!(
                        "<p style=\"margin-top:{}margin-bottom:0px\"></p>",
                        self.font_size
                    ));
                }
                if line_breaks == 0 {
                    out.push_str("<p style=\"margin-top:0px;margin-bottom:0px;\"></p>");
                } else {
                    out.push_str(&format!(
                        "<p style=\"margin-top:0px;height:{}margin-bottom:0px\"></p>",
                        self.font_size
                    ));
                }
            }
        }
    }

    fn push_char(&self, out: &mut String, c: char) {
        let odt = self.dialect == MarkupDialect::OpenDocumentText;
        let named_entities = !self.excel2007 && !odt;
        let escape = self.render_mode == TextRenderMode::Default;

        match c {
            '\t' if odt => out.push_str("<text:tab/>"),
            '\\' => out.push_str("&#92;"),
            '~' if named_entities => out.push_str("&tilde;"),
            '€' if named_entities => out.push_str("&euro;"),
            '‹' if named_entities => out.push_str("&lsaquo;"),
            '›' if named_entities => out.push_str("&rsaquo;"),
            'ˆ' if named_entities => out.push_str("&circ;"),
            '&' if escape => out.push_str("&amp;"),
            '"' if escape => out.push_str("&quot;"),
            '<' if escape => out.push_str("&lt;"),
            '>' if escape => out.push_str("&gt;"),
            '\t' if self.excel2007 => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
}

/// Encode text for an HTML body
pub fn html_string(text: &str, render_mode: TextRenderMode) -> String {
    MarkupTranscoder::new(MarkupDialect::PlainHtml)
        .with_render_mode(render_mode)
        .encode(text)
}

/// Encode text for generic XML
pub fn xml_string(text: &str, render_mode: TextRenderMode) -> String {
    MarkupTranscoder::new(MarkupDialect::Xml)
        .with_render_mode(render_mode)
        .encode(text)
}

/// Encode text for Office 2007+ XML parts
pub fn excel2007_string(text: &str, render_mode: TextRenderMode) -> String {
    MarkupTranscoder::new(MarkupDialect::Xml)
        .with_render_mode(render_mode)
        .with_excel2007(true)
        .encode(text)
}

/// Encode text for OpenDocument `text:p` content
pub fn odt_string(text: &str, render_mode: TextRenderMode) -> String {
    MarkupTranscoder::new(MarkupDialect::OpenDocumentText)
        .with_render_mode(render_mode)
        .encode(text)
}

/// CSS color value: `rgb(r, g, b)`, or `rgba(r, g, b, a)` when translucent
pub fn html_color(color: Color) -> String {
    if color.is_opaque() {
        format!("rgb({}, {}, {})", color.r, color.g, color.b)
    } else {
        let alpha = f64::from(color.a) / 255.0;
        format!("rgba({}, {}, {}, {:.2})", color.r, color.g, color.b, alpha)
    }
}

/// Hex color code `#RRGGBB`, ignoring alpha
pub fn html_color_code(color: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BREAK_FIRST: &str = "<p style=\"margin-top:0px;margin-bottom:0px;\"></p>";
    const BREAK_NEXT: &str = "<p style=\"margin-top:0px;height:13px;margin-bottom:0px\"></p>";

    fn html(text: &str) -> String {
        html_string(text, TextRenderMode::Default)
    }

    fn xml(text: &str) -> String {
        xml_string(text, TextRenderMode::Default)
    }

    fn odt(text: &str) -> String {
        odt_string(text, TextRenderMode::Default)
    }

    #[test]
    fn test_double_space() {
        assert_eq!(html("a  b"), "a&nbsp;&nbsp;b");
        assert_eq!(xml("a  b"), "a  b");
        assert_eq!(odt("a  b"), "a<text:s text:c=\"2\"/>b");
    }

    #[test]
    fn test_single_spaces() {
        assert_eq!(html("a b"), "a b");
        assert_eq!(html(" a b "), "&nbsp;a b&nbsp;");
        assert_eq!(html(" "), "&nbsp;");
        assert_eq!(odt("a b"), "a<text:s text:c=\"1\"/>b");
    }

    #[test]
    fn test_html_paragraph_breaks() {
        assert_eq!(
            html("a\r\n\r\nb"),
            format!("a{}{}b", BREAK_FIRST, BREAK_NEXT)
        );
        // Text between breaks resets the count
        assert_eq!(
            html("a\nb\nc"),
            format!("a{}b{}c", BREAK_FIRST, BREAK_FIRST)
        );
        // Bare CR is a break in HTML too
        assert_eq!(html("a\rb"), format!("a{}b", BREAK_FIRST));
    }

    #[test]
    fn test_html_leading_break() {
        assert_eq!(
            html("\nx"),
            format!(
                "<p style=\"margin-top:13px;margin-bottom:0px\"></p>{}x",
                BREAK_FIRST
            )
        );
    }

    #[test]
    fn test_html_font_size() {
        let out = MarkupTranscoder::new(MarkupDialect::PlainHtml)
            .with_font_size("20px;")
            .encode("a\n\nb");
        assert!(out.contains("height:20px;margin-bottom:0px"));
    }

    #[test]
    fn test_xml_and_odt_breaks() {
        assert_eq!(xml("a\r\nb"), "a&#10;b");
        assert_eq!(xml("a\nb"), "a\nb");
        assert_eq!(odt("a\r\nb"), "a<text:line-break />b");
        assert_eq!(xml("a\u{0B}b"), "a\nb");
        assert_eq!(html("a\u{0B}b"), format!("a{}b", BREAK_FIRST));
    }

    #[test]
    fn test_tabs() {
        assert_eq!(odt("a\tb"), "a<text:tab/>b");
        assert_eq!(html("a\tb"), "a\tb");
        assert_eq!(excel2007_string("a\tb", TextRenderMode::Default), "a&#9;b");
    }

    #[test]
    fn test_metacharacters() {
        assert_eq!(html("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
        assert_eq!(xml("x<y"), "x&lt;y");
        assert_eq!(html("C:\\temp"), "C:&#92;temp");
    }

    #[test]
    fn test_passthrough_keeps_tags() {
        assert_eq!(
            html_string("<b>bold</b> & more", TextRenderMode::HtmlTagsPassthrough),
            "<b>bold</b> & more"
        );
        assert_eq!(
            odt_string("<b>x y</b> z", TextRenderMode::HtmlTagsPassthrough),
            "<b>x<text:s text:c=\"1\"/>y</b><text:s text:c=\"1\"/>z"
        );
        // An unclosed tag-open is just a character
        assert_eq!(
            odt_string("1 <2", TextRenderMode::HtmlTagsPassthrough),
            "1<text:s text:c=\"1\"/><2"
        );
    }

    #[test]
    fn test_typographic_entities() {
        assert_eq!(html("~€‹›ˆ"), "&tilde;&euro;&lsaquo;&rsaquo;&circ;");
        assert_eq!(xml("~€"), "&tilde;&euro;");
        assert_eq!(excel2007_string("~€", TextRenderMode::Default), "~€");
        assert_eq!(odt("~€"), "~€");
    }

    #[test]
    fn test_empty_and_unicode() {
        assert_eq!(html(""), "");
        assert_eq!(xml("Grüße 日本"), "Grüße 日本");
    }

    #[test]
    fn test_html_colors() {
        assert_eq!(html_color(Color::rgb(255, 0, 10)), "rgb(255, 0, 10)");
        assert_eq!(html_color(Color::argb(128, 1, 2, 3)), "rgba(1, 2, 3, 0.50)");
        assert_eq!(html_color_code(Color::rgb(255, 0, 10)), "#FF000A");
    }
}
