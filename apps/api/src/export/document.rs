//! One-page PDF composition.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::export::page::{fit_to_page, PageFormat};
use crate::export::raster::Bitmap;
use crate::export::ExportError;

const IMAGE_NAME: &str = "Im0";

/// Wraps a bitmap into a paginated document.
pub trait DocumentComposer: Send + Sync {
    fn media_type(&self) -> &'static str;
    fn extension(&self) -> &'static str;
    fn compose(&self, bitmap: &Bitmap, page: PageFormat, title: &str) -> Result<Vec<u8>, ExportError>;
}

/// Writes a single page holding the bitmap as a Flate-compressed DeviceRGB
/// image, scaled to fit and anchored to the top edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfComposer;

impl DocumentComposer for PdfComposer {
    fn media_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn compose(&self, bitmap: &Bitmap, page: PageFormat, title: &str) -> Result<Vec<u8>, ExportError> {
        let compose_err = |e: lopdf::Error| ExportError::Compose(e.to_string());

        let (page_w, page_h) = page.size_pt();
        let placement = fit_to_page(bitmap.width(), bitmap.height(), page);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(bitmap.width()),
                "Height" => i64::from(bitmap.height()),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            bitmap.image.as_raw().clone(),
        );
        image.compress().map_err(compose_err)?;
        let image_id = doc.add_object(image);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        placement.width.into(),
                        0.into(),
                        0.into(),
                        placement.height.into(),
                        placement.x.into(),
                        placement.y.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().map_err(compose_err)?));

        let resources_id = doc.add_object(dictionary! {
            "XObject" => dictionary! { IMAGE_NAME => image_id },
        });
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), page_w.into(), page_h.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(title),
            "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut out = Vec::new();
        doc.save_to(&mut out)
            .map_err(|e| ExportError::Compose(format!("failed to write PDF: {e}")))?;
        Ok(out)
    }
}

/// PDF text string: literal when ASCII, UTF-16BE with BOM otherwise.
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(value.encode_utf16().flat_map(|unit| unit.to_be_bytes()));
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn bitmap(w: u32, h: u32) -> Bitmap {
        Bitmap {
            image: RgbImage::from_pixel(w, h, Rgb([255, 255, 255])),
        }
    }

    #[test]
    fn test_single_page_pdf() {
        let bytes = PdfComposer.compose(&bitmap(160, 90), PageFormat::A4, "Jane Doe").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let page_id = pages[&1];
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box.len(), 4);
    }

    #[test]
    fn test_image_is_embedded_compressed() {
        let bytes = PdfComposer.compose(&bitmap(40, 40), PageFormat::Letter, "CV").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        let image = doc
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .find(|s| {
                s.dict
                    .get(b"Subtype")
                    .and_then(|v| v.as_name())
                    .map(|n| n == b"Image")
                    .unwrap_or(false)
            })
            .expect("image xobject");
        assert_eq!(image.dict.get(b"Width").unwrap().as_i64().unwrap(), 40);
        assert_eq!(
            image.dict.get(b"Filter").unwrap().as_name().unwrap(),
            b"FlateDecode"
        );
    }

    #[test]
    fn test_non_ascii_title_is_utf16() {
        match text_string("José") {
            Object::String(bytes, _) => assert_eq!(&bytes[..2], &[0xFE, 0xFF]),
            other => panic!("unexpected {other:?}"),
        }
    }
}
