use crate::error::{Error, NoMimeType};
use ::image::{imageops, imageops::FilterType, DynamicImage, ImageFormat, RgbaImage};
use log::debug;
use std::{io::Cursor, path::Path};

/// WhatsApp stickers are squares with this edge length.
pub const STICKER_SIZE: u32 = 512;

/// generic image struct cotaining, the image data and its file name
#[derive(Clone, Debug)]
pub struct Image {
	pub file_name: String,
	pub data: Vec<u8>
}

impl Image {
	pub fn mime_type(&self) -> Result<String, NoMimeType> {
		let extension = Path::new(&self.file_name)
			.extension()
			.and_then(|extension| extension.to_str())
			.filter(|extension| !extension.is_empty())
			.ok_or_else(|| NoMimeType(self.file_name.clone()))?;
		Ok(format!("image/{}", extension.to_ascii_lowercase()))
	}
}

/// Converts downloaded stickers to the format stored next to the manifest.
pub trait Transcoder {
	async fn transcode(&self, image: Image) -> Result<Image, Error>;
}

/// Keep stickers as they are.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl Transcoder for Passthrough {
	async fn transcode(&self, image: Image) -> Result<Image, Error> {
		Ok(image)
	}
}

/// Scale stickers to fit a transparent `size`×`size` square and encode them as webp.
#[derive(Clone, Copy, Debug)]
pub struct WebpTranscoder {
	pub size: u32
}

impl Default for WebpTranscoder {
	fn default() -> Self {
		Self { size: STICKER_SIZE }
	}
}

impl WebpTranscoder {
	fn convert(size: u32, data: &[u8]) -> Result<Vec<u8>, ::image::ImageError> {
		let image = ::image::load_from_memory(data)?;
		let resized = image.resize(size, size, FilterType::Lanczos3).to_rgba8();
		let mut canvas = RgbaImage::new(size, size);
		let x = (size - resized.width()) / 2;
		let y = (size - resized.height()) / 2;
		imageops::overlay(&mut canvas, &resized, x.into(), y.into());
		let mut webp = Vec::new();
		DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut webp), ImageFormat::WebP)?;
		Ok(webp)
	}
}

impl Transcoder for WebpTranscoder {
	async fn transcode(&self, mut image: Image) -> Result<Image, Error> {
		let size = self.size.max(1);
		tokio::task::spawn_blocking(move || -> Result<Image, Error> {
			debug!("convert {} to {size}x{size} webp", image.file_name);
			image.data = Self::convert(size, &image.data)?;
			image.file_name = Path::new(&image.file_name)
				.with_extension("webp")
				.to_string_lossy()
				.into_owned();
			Ok(image)
		})
		.await?
	}
}
