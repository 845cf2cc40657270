//! Reference HTML exporter: one absolutely positioned box per object

use std::io::Write;

use folio::prelude::*;
use folio::text::float_to_string;
use folio::{html_color, html_color_code};

/// Writes prepared pages as a static HTML outline
#[derive(Debug, Default)]
pub struct OutlineHtml {
    title: String,
}

impl OutlineHtml {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self { title: title.into() }
    }
}

fn mm(value: f32, zoom: f32) -> String {
    format!("{}mm", float_to_string(f64::from(value * zoom), 2))
}

impl Exporter for OutlineHtml {
    fn file_filter(&self) -> &str {
        "HTML file (*.html)|*.html"
    }

    fn start(&mut self, run: &mut ExportRun<'_>) -> ExportResult<()> {
        let title = folio::html_string(&self.title, TextRenderMode::Default);
        write!(
            run,
            "<!DOCTYPE html>\r\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head><body>\r\n"
        )?;
        Ok(())
    }

    fn page_begin(&mut self, run: &mut ExportRun<'_>, page: &Page) -> ExportResult<()> {
        let zoom = run.options().zoom;
        let number = run.current_page().map_or(0, |index| index + 1);
        write!(
            run,
            "<div class=\"page\" data-page=\"{}\" style=\"position:relative;width:{};height:{};\">\r\n",
            number,
            mm(page.width, zoom),
            mm(page.height, zoom)
        )?;
        Ok(())
    }

    fn band(&mut self, run: &mut ExportRun<'_>, band: &Band) -> ExportResult<()> {
        let zoom = run.options().zoom;
        for object in &band.objects {
            let Some(text) = object.text.as_deref() else {
                continue;
            };
            let mode = if object.html_tags {
                TextRenderMode::HtmlTagsPassthrough
            } else {
                TextRenderMode::Default
            };
            let background = object
                .fill
                .map(|fill| format!("background:{};", html_color(fill)))
                .unwrap_or_default();
            write!(
                run,
                "<div style=\"position:absolute;left:{};top:{};width:{};height:{};color:{};{}\">{}</div>\r\n",
                mm(object.bounds.left, zoom),
                mm(band.top + object.bounds.top, zoom),
                mm(object.bounds.width, zoom),
                mm(object.bounds.height, zoom),
                html_color_code(object.text_color),
                background,
                folio::html_string(text, mode)
            )?;
        }
        Ok(())
    }

    fn page_end(&mut self, run: &mut ExportRun<'_>, _page: &Page) -> ExportResult<()> {
        write!(run, "</div>\r\n")?;
        Ok(())
    }

    fn finish(&mut self, run: &mut ExportRun<'_>) -> ExportResult<()> {
        write!(run, "</body></html>\r\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::Color;

    #[test]
    fn test_outline_html() {
        let page = Page::new(210.0, 297.0).with_band(
            Band::new("Data", BandKind::Data, 20.0, 10.0).with_object(ReportObject {
                fill: Some(Color::rgb(255, 255, 0)),
                ..ReportObject::text("Text1", Rect::new(5.0, 1.5, 40.0, 8.0), "a  b")
            }),
        );
        let mut report = Report::new(MemoryPages::new(vec![page]));
        let mut out: Vec<u8> = Vec::new();
        ExportEngine::new(OutlineHtml::new("Q&A"))
            .export(&mut report, &mut out)
            .unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(html.contains("<title>Q&amp;A</title>"));
        assert!(html.contains("data-page=\"1\" style=\"position:relative;width:210mm;height:297mm;\""));
        assert!(html.contains(
            "left:5mm;top:21.5mm;width:40mm;height:8mm;color:#000000;background:rgb(255, 255, 0);\">a&nbsp;&nbsp;b</div>"
        ));
        assert!(html.ends_with("</body></html>\r\n"));
    }
}
