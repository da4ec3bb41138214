use crate::error::{Result, VisionError};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use std::path::{Path, PathBuf};

/// Image formats the endpoint accepts inside a data URI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    /// Detects the format from the file signature.
    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0x89, b'P', b'N', b'G', ..] => Some(ImageFormat::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
            [b'G', b'I', b'F', b'8', ..] => Some(ImageFormat::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => {
                Some(ImageFormat::Webp)
            }
            _ => None,
        }
    }

    /// Extension first, then the file signature, then PNG.
    fn detect(path: &Path, bytes: &[u8]) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension)
            .or_else(|| ImageFormat::from_magic_bytes(bytes))
            .unwrap_or_default()
    }
}

/// A local image read once and held as base64 text.
#[derive(Clone, Debug)]
pub struct EncodedImage {
    path: PathBuf,
    format: ImageFormat,
    data: String,
}

impl EncodedImage {
    /// Reads the whole file at `path` and base64-encodes it.
    ///
    /// Fails with [`VisionError::FileNotFound`] when the path does not name a
    /// regular file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(VisionError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VisionError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(VisionError::ImageRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| VisionError::ImageRead {
                path: path.to_path_buf(),
                source,
            })?;

        let format = ImageFormat::detect(path, &bytes);
        log::debug!(
            "Read {} bytes from {} as {}",
            bytes.len(),
            path.display(),
            format.mime_type()
        );

        let mut image = Self::from_bytes(&bytes, format);
        image.path = path.to_path_buf();
        Ok(image)
    }

    pub fn from_bytes(bytes: &[u8], format: ImageFormat) -> Self {
        Self {
            path: PathBuf::new(),
            format,
            data: BASE64.encode(bytes),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn as_base64(&self) -> &str {
        &self.data
    }

    /// Renders `data:image/<fmt>;base64,<payload>`.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.data)
    }

    /// Decodes the payload back into the original bytes.
    pub fn decode(&self) -> std::result::Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(&self.data)
    }

    /// Size of the original image in bytes.
    pub fn byte_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        self.data.len() / 4 * 3 - padding
    }
}
