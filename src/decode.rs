use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::RgbImage;
use image::error::{ImageError, ParameterError, ParameterErrorKind};

use crate::error::{Error, Result};

/// 支持的图片格式，只根据扩展名判断，不检查文件头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    WebP,
    Tiff,
}

impl ImageFormat {
    /// 从扩展名（不区分大小写）推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            "webp" => Some(Self::WebP),
            "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnsupportedFormat { path: path.to_path_buf() })
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
        }
    }
}

/// 解码后的 8 位 RGB 图像，宽高均大于 0
#[derive(Debug, Clone)]
pub struct CanonicalImage(RgbImage);

impl CanonicalImage {
    /// 宽或高为 0 时返回 `None`
    pub fn new(image: RgbImage) -> Option<Self> {
        if image.width() == 0 || image.height() == 0 {
            return None;
        }
        Some(Self(image))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.0
    }
}

/// 读取并解码图片
///
/// 先检查扩展名，不支持的格式直接返回 [`Error::UnsupportedFormat`]，不会打开文件。
/// 文件句柄只在本函数内存活。
pub fn decode<P: AsRef<Path>>(path: P) -> Result<CanonicalImage> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let decode_err = |source| Error::Decode { path: path.to_path_buf(), source };

    let file = File::open(path).map_err(|e| decode_err(ImageError::IoError(e)))?;
    let image = image::load(BufReader::new(file), format.into()).map_err(decode_err)?;

    CanonicalImage::new(image.into_rgb8()).ok_or_else(|| {
        decode_err(ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        )))
    })
}
