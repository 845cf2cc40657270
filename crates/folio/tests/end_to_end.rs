//! End-to-end export tests through the public facade

use std::fs;
use std::io::{self, Read, Write};

use flate2::read::ZlibDecoder;
use folio::prelude::*;
use folio::{cell_reference, compress, xml_string, TEMP_EXPORT_DIR};
use pretty_assertions::assert_eq;

/// Records page hooks and stages a scratch file per page
#[derive(Default)]
struct Trace {
    begun: Vec<usize>,
    ended: Vec<usize>,
    finished: bool,
}

impl Exporter for Trace {
    fn page_begin(&mut self, run: &mut ExportRun<'_>, _page: &Page) -> ExportResult<()> {
        if let Some(index) = run.current_page() {
            self.begun.push(index);
        }
        run.create_temp_file()?.write_all(b"page")?;
        Ok(())
    }

    fn page_end(&mut self, run: &mut ExportRun<'_>, _page: &Page) -> ExportResult<()> {
        if let Some(index) = run.current_page() {
            self.ended.push(index);
        }
        Ok(())
    }

    fn finish(&mut self, _run: &mut ExportRun<'_>) -> ExportResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Minimal spreadsheet XML writer: one row per band, one cell per object
#[derive(Default)]
struct SheetXml {
    row: u32,
}

impl Exporter for SheetXml {
    fn file_filter(&self) -> &str {
        "Excel 2007 file (*.xlsx)|*.xlsx"
    }

    fn start(&mut self, run: &mut ExportRun<'_>) -> ExportResult<()> {
        write!(run, "<sheetData>")?;
        Ok(())
    }

    fn band(&mut self, run: &mut ExportRun<'_>, band: &Band) -> ExportResult<()> {
        self.row += 1;
        write!(run, "<row r=\"{}\">", self.row)?;
        for (i, object) in band.objects.iter().enumerate() {
            let reference = cell_reference(i as u32 + 1, self.row)?;
            let text = object.text.as_deref().unwrap_or_default();
            let style = object
                .format
                .as_ref()
                .map(|format| folio::number_format(format))
                .unwrap_or_default();
            write!(
                run,
                "<c r=\"{}\" fmt=\"{}\"><v>{}</v></c>",
                reference,
                style,
                xml_string(text, TextRenderMode::Default)
            )?;
        }
        write!(run, "</row>")?;
        Ok(())
    }

    fn finish(&mut self, run: &mut ExportRun<'_>) -> ExportResult<()> {
        write!(run, "</sheetData>")?;
        Ok(())
    }
}

fn text_page(text: &str) -> Page {
    Page::new(210.0, 297.0).with_band(
        Band::new("Data", BandKind::Data, 0.0, 10.0).with_object(ReportObject::text(
            "Text1",
            Rect::new(0.0, 0.0, 50.0, 10.0),
            text,
        )),
    )
}

#[test]
fn exports_selected_pages_in_order_and_cleans_up() {
    let root = tempfile::tempdir().unwrap();
    let mut report = Report::new(MemoryPages::new(vec![
        text_page("one"),
        text_page("two"),
        text_page("three"),
    ]));

    let options = ExportOptions {
        temp_root: Some(root.path().to_path_buf()),
        ..ExportOptions::pages("1,3")
    };
    let mut engine = ExportEngine::new(Trace::default()).with_options(options);
    let stats = engine.export(&mut report, io::sink()).unwrap();

    let trace = engine.exporter();
    assert_eq!(trace.begun, vec![0, 2]);
    assert_eq!(trace.ended, vec![0, 2]);
    assert!(trace.finished);
    assert_eq!(stats.pages_exported, 2);

    let leftovers = fs::read_dir(root.path().join(TEMP_EXPORT_DIR))
        .unwrap()
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn writes_spreadsheet_cells() {
    let page = Page::new(210.0, 297.0)
        .with_band(
            Band::new("Header", BandKind::PageHeader, 0.0, 10.0)
                .with_object(ReportObject::text("Name", Rect::new(0.0, 0.0, 30.0, 10.0), "Item"))
                .with_object(ReportObject::text("Price", Rect::new(30.0, 0.0, 30.0, 10.0), "Price & tax")),
        )
        .with_band(
            Band::new("Data", BandKind::Data, 10.0, 10.0)
                .with_object(ReportObject::text("Name", Rect::new(0.0, 0.0, 30.0, 10.0), "Tea"))
                .with_object(
                    ReportObject::text("Price", Rect::new(30.0, 0.0, 30.0, 10.0), "4.50")
                        .with_format(ValueFormat::currency("$", 2)),
                ),
        );
    let mut report = Report::new(MemoryPages::new(vec![page]));
    let mut out: Vec<u8> = Vec::new();

    let mut engine = ExportEngine::new(SheetXml::default());
    engine.export(&mut report, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        concat!(
            "<sheetData>",
            "<row r=\"1\"><c r=\"A1\" fmt=\"\"><v>Item</v></c><c r=\"B1\" fmt=\"\"><v>Price &amp; tax</v></c></row>",
            "<row r=\"2\"><c r=\"A2\" fmt=\"\"><v>Tea</v></c>",
            "<c r=\"B2\" fmt=\"&quot;$&quot;#,##0.00;(&quot;$&quot;#,##0.00)\"><v>4.50</v></c></row>",
            "</sheetData>"
        )
    );
    assert_eq!(engine.exporter().file_extension(), Some(".xlsx"));
}

#[test]
fn compressed_stream_round_trips() {
    let data = "folio ".repeat(500);
    let envelope = compress(data.as_bytes()).unwrap();
    assert_eq!(&envelope[..2], &[0x78, 0xDA]);
    assert_eq!(
        &envelope[envelope.len() - 4..],
        &folio::adler32(1, data.as_bytes()).to_be_bytes()
    );

    let mut inflated = String::new();
    ZlibDecoder::new(&envelope[..])
        .read_to_string(&mut inflated)
        .unwrap();
    assert_eq!(inflated, data);
}
