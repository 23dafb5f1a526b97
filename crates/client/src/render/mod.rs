//! Thumbnail grid rendering.
//!
//! Downloads a batch of result images, shrinks each to fit a 50px square and
//! composes them onto a fixed 4x6 grid with the redeemable token printed under
//! every cell. The finished grid is returned as PNG bytes.

pub mod font;
pub mod layout;

use image::imageops::{self, FilterType};
use image::{ImageError, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use gridpick_core::{AppConfig, Error};

use crate::fetch::{FetchClient, FetchConfig, ThumbnailFetcher};
use layout::{CANVAS_HEIGHT, CANVAS_WIDTH, CELLS, THUMB_SIDE};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CAPTION_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Default cap on simultaneous thumbnail downloads.
const DEFAULT_CONCURRENCY: usize = 8;

/// Renders result batches as captioned thumbnail grids.
#[derive(Clone)]
pub struct GridRenderer {
    fetcher: Arc<dyn ThumbnailFetcher>,
    concurrency: usize,
}

impl GridRenderer {
    pub fn new(fetcher: Arc<dyn ThumbnailFetcher>, concurrency: usize) -> Self {
        Self { fetcher, concurrency: concurrency.max(1) }
    }

    /// Build a renderer backed by an HTTP [`FetchClient`].
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let client = FetchClient::new(FetchConfig::from(config))?;
        Ok(Self::new(Arc::new(client), config.render_concurrency))
    }

    pub fn with_fetcher(fetcher: Arc<dyn ThumbnailFetcher>) -> Self {
        Self::new(fetcher, DEFAULT_CONCURRENCY)
    }

    /// Render `urls` as a grid whose first cell carries index `start`.
    ///
    /// All thumbnails must load; the first fetch or decode failure fails the
    /// whole render.
    pub async fn render_grid(&self, urls: &[String], slug: &str, start: usize) -> Result<Vec<u8>, Error> {
        if urls.len() > CELLS {
            return Err(Error::InvalidInput(format!("batch of {} exceeds {} grid cells", urls.len(), CELLS)));
        }

        let started = Instant::now();
        let thumbs = self.load_thumbnails(urls).await?;
        let grid = compose_grid(&thumbs, slug, start);
        let png = encode_png(&grid)?;

        tracing::debug!(
            slug,
            start,
            cells = urls.len(),
            bytes = png.len(),
            render_ms = started.elapsed().as_millis() as u64,
            "rendered grid"
        );

        Ok(png)
    }

    async fn load_thumbnails(&self, urls: &[String]) -> Result<Vec<RgbaImage>, Error> {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for (position, url) in urls.iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let permits = Arc::clone(&permits);
            let url = url.clone();

            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| Error::RenderFailed(format!("{url}: {e}")))?;
                let bytes = fetcher
                    .fetch_image(&url)
                    .await
                    .map_err(|e| Error::RenderFailed(format!("{url}: {e}")))?;
                let thumb = thumbnail(&bytes).map_err(|e| Error::RenderFailed(format!("{url}: {e}")))?;
                Ok::<_, Error>((position, thumb))
            });
        }

        let mut slots: Vec<Option<RgbaImage>> = vec![None; urls.len()];
        while let Some(joined) = tasks.join_next().await {
            let (position, thumb) = joined.map_err(|e| Error::RenderFailed(format!("thumbnail task: {e}")))??;
            slots[position] = Some(thumb);
        }

        slots
            .into_iter()
            .map(|slot| slot.ok_or_else(|| Error::InvariantViolation("thumbnail slot left empty".to_string())))
            .collect()
    }
}

/// Decode an image and shrink it to fit a [`THUMB_SIDE`] square.
///
/// Aspect ratio is preserved. Images already within bounds keep their size.
pub fn thumbnail(bytes: &[u8]) -> Result<RgbaImage, ImageError> {
    let image = image::load_from_memory(bytes)?;
    let image = if image.width() > THUMB_SIDE || image.height() > THUMB_SIDE {
        image.resize(THUMB_SIDE, THUMB_SIDE, FilterType::Triangle)
    } else {
        image
    };
    Ok(image.to_rgba8())
}

/// Place thumbnails and captions on a blank canvas.
///
/// Thumbnail `i` fills cell `i` in row-major order; cells past the end of
/// `thumbs` stay blank.
pub fn compose_grid(thumbs: &[RgbaImage], slug: &str, start: usize) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);

    for (thumb, cell) in thumbs.iter().zip(layout::cells(thumbs.len(), slug, start)) {
        let (x, y) = cell.origin;
        imageops::overlay(&mut canvas, thumb, i64::from(x), i64::from(y));

        let (cx, cy) = cell.caption_origin;
        font::draw_text(&mut canvas, cx, cy, &cell.label, CAPTION_COLOR);
    }

    canvas
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, Error> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| Error::RenderFailed(format!("png encode: {e}")))?;
    Ok(buffer.into_inner())
}
