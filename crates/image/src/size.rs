/// Shape of the stock photo used when no thumbnail is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Square(i64),
    Frame { width: i64, height: i64 },
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::Frame {
            width: 640,
            height: 400,
        }
    }
}

impl ImageSize {
    pub fn square(side: Option<i64>) -> Self {
        Self::Square(side.unwrap_or(512))
    }

    pub fn frame(width: Option<i64>, height: Option<i64>) -> Self {
        Self::Frame {
            width: width.unwrap_or(640),
            height: height.unwrap_or(400),
        }
    }

    /// Width and height clamped to what the photo service accepts.
    pub fn dimensions(&self) -> (i64, i64) {
        match *self {
            Self::Square(side) => {
                let side = side.clamp(64, 1600);
                (side, side)
            }
            Self::Frame { width, height } => (width.clamp(64, 1920), height.clamp(64, 1080)),
        }
    }
}

pub fn stock_photo_url(name: &str, size: ImageSize) -> String {
    let (width, height) = size.dimensions();
    let query: String =
        url::form_urlencoded::byte_serialize(format!("{} dish food", name.trim()).as_bytes())
            .collect();

    format!("https://source.unsplash.com/{width}x{height}/?{query}")
}
