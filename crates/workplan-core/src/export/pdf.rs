//! A minimal PDF writer for image-only pages.

use std::io::Write;

use super::{ComposedPage, DocumentComposer, PageSize};
use crate::error::{Result, WorkplanError};

const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Longest run or literal a `/RunLengthDecode` length byte can describe.
const MAX_RUN: usize = 128;
const END_OF_DATA: u8 = 128;

/// Encodes `data` for the `/RunLengthDecode` filter.
///
/// Captured pages are mostly flat background, so long runs of one byte
/// collapse to two bytes per 128.
fn run_length_encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() / 16 + 2);
    let mut i = 0;
    while i < data.len() {
        let run = data[i..]
            .iter()
            .take(MAX_RUN)
            .take_while(|&&b| b == data[i])
            .count();
        if run >= 2 {
            out.push((257 - run) as u8);
            out.push(data[i]);
            i += run;
            continue;
        }

        let start = i;
        while i < data.len() && i - start < MAX_RUN {
            if i + 1 < data.len() && data[i] == data[i + 1] {
                break;
            }
            i += 1;
        }
        out.push((i - start - 1) as u8);
        out.extend_from_slice(&data[start..i]);
    }
    out.push(END_OF_DATA);
    out
}

/// Writes each [`ComposedPage`] as one PDF page holding its image as an
/// RGB XObject, run-length encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfComposer;

/// Object numbers: 1 catalog, 2 page tree, then three per page
/// (page, content stream, image).
fn page_object(index: usize) -> usize {
    3 + index * 3
}

struct PdfWriter {
    out: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            out,
            offsets: Vec::new(),
        }
    }

    fn begin_object(&mut self, number: usize) -> std::io::Result<()> {
        if self.offsets.len() < number {
            self.offsets.resize(number, 0);
        }
        self.offsets[number - 1] = self.out.len();
        writeln!(self.out, "{number} 0 obj")
    }

    fn object(&mut self, number: usize, body: &str) -> std::io::Result<()> {
        self.begin_object(number)?;
        writeln!(self.out, "{body}\nendobj")
    }

    fn stream(&mut self, number: usize, dict: &str, data: &[u8]) -> std::io::Result<()> {
        self.begin_object(number)?;
        write!(self.out, "<< {dict} /Length {} >>\nstream\n", data.len())?;
        self.out.extend_from_slice(data);
        writeln!(self.out, "\nendstream\nendobj")
    }

    fn finish(mut self) -> std::io::Result<Vec<u8>> {
        let xref = self.out.len();
        let count = self.offsets.len() + 1;
        write!(self.out, "xref\n0 {count}\n0000000000 65535 f \n")?;
        for offset in &self.offsets {
            writeln!(self.out, "{offset:010} 00000 n ")?;
        }
        writeln!(
            self.out,
            "trailer\n<< /Size {count} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF"
        )?;
        Ok(self.out)
    }
}

impl PdfComposer {
    fn write(page: PageSize, pages: &[ComposedPage]) -> std::io::Result<Vec<u8>> {
        let page_w = page.width_mm * POINTS_PER_MM;
        let page_h = page.height_mm * POINTS_PER_MM;
        let mut pdf = PdfWriter::new();

        pdf.object(1, "<< /Type /Catalog /Pages 2 0 R >>")?;
        let kids: Vec<String> = (0..pages.len())
            .map(|i| format!("{} 0 R", page_object(i)))
            .collect();
        pdf.object(
            2,
            &format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            ),
        )?;

        for (index, composed) in pages.iter().enumerate() {
            let page_no = page_object(index);
            let content_no = page_no + 1;
            let image_no = page_no + 2;
            let image = &composed.image;

            pdf.object(
                page_no,
                &format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {page_w:.2} {page_h:.2}] \
                     /Resources << /XObject << /Im0 {image_no} 0 R >> >> /Contents {content_no} 0 R >>"
                ),
            )?;

            let w = image.width_mm * POINTS_PER_MM;
            let h = image.height_mm * POINTS_PER_MM;
            let x = image.x_mm * POINTS_PER_MM;
            let y = page_h - (image.y_mm * POINTS_PER_MM) - h;
            let content = format!("q {w:.2} 0 0 {h:.2} {x:.2} {y:.2} cm /Im0 Do Q");
            pdf.stream(content_no, "", content.as_bytes())?;

            pdf.stream(
                image_no,
                &format!(
                    "/Type /XObject /Subtype /Image /Width {} /Height {} \
                     /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /RunLengthDecode",
                    image.raster.width, image.raster.height
                ),
                &run_length_encode(&image.raster.pixels),
            )?;
        }

        pdf.finish()
    }
}

impl DocumentComposer for PdfComposer {
    fn compose(&self, page: PageSize, pages: &[ComposedPage]) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(WorkplanError::compose("nothing to compose"));
        }
        Self::write(page, pages).map_err(|e| WorkplanError::compose(e.to_string()))
    }
}
