//! Off-thread preview rendering.
//!
//! The renderer runs on a worker thread over an owned copy of the design.
//! Results come back over a channel and are drained on the caller's thread
//! with [`PreviewRunner::poll`]; only the answer to the latest request is
//! kept.

use image::{Rgba, RgbaImage};
use reportforge_core::RenderError;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::model::{Design, Element, MAX_PAGE_SIZE};

/// One rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    pub page_index: usize,
    pub image: RgbaImage,
}

impl PageImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Compiles and fills a design into a page image
pub trait ReportRenderer: Send + Sync {
    fn render(&self, design: &Design) -> Result<PageImage, RenderError>;
}

const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BAND_LINE: Rgba<u8> = Rgba([180, 180, 180, 255]);
const ELEMENT_LINE: Rgba<u8> = Rgba([32, 32, 32, 255]);

/// Draws the page with band separators and element outlines.
///
/// Stands in for a full reporting engine; no data is filled.
#[derive(Debug, Clone, Default)]
pub struct OutlineRenderer;

impl OutlineRenderer {
    pub fn new() -> Self {
        Self
    }

    fn draw_element(image: &mut RgbaImage, element: &Element, origin: (i32, i32)) {
        let x = origin.0 + element.x;
        let y = origin.1 + element.y;
        draw_rect(image, x, y, element.width, element.height, ELEMENT_LINE);
        if let Some(children) = element.children() {
            for child in children {
                Self::draw_element(image, child, (x, y));
            }
        }
    }
}

impl ReportRenderer for OutlineRenderer {
    fn render(&self, design: &Design) -> Result<PageImage, RenderError> {
        if design.page_width <= 0 || design.page_height <= 0 {
            return Err(RenderError::Compile(format!(
                "page size {}x{} has no area",
                design.page_width, design.page_height
            )));
        }
        if design.page_width > MAX_PAGE_SIZE || design.page_height > MAX_PAGE_SIZE {
            return Err(RenderError::Compile(format!(
                "page size {}x{} exceeds {}",
                design.page_width, design.page_height, MAX_PAGE_SIZE
            )));
        }
        let mut image =
            RgbaImage::from_pixel(design.page_width as u32, design.page_height as u32, PAPER);

        let left = design.margins.left;
        let width = design.page_width - design.margins.left - design.margins.right;
        let mut top = design.margins.top;
        for band in &design.bands {
            draw_hline(&mut image, left, left + width, top + band.height, BAND_LINE);
            for element in &band.elements {
                Self::draw_element(&mut image, element, (left, top));
            }
            top += band.height;
        }

        Ok(PageImage {
            page_index: 0,
            image,
        })
    }
}

fn put(image: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_hline(image: &mut RgbaImage, x0: i32, x1: i32, y: i32, color: Rgba<u8>) {
    for x in x0..x1 {
        put(image, x, y, color);
    }
}

fn draw_rect(image: &mut RgbaImage, x: i32, y: i32, w: i32, h: i32, color: Rgba<u8>) {
    let right = x + w.max(1) - 1;
    let bottom = y + h.max(1) - 1;
    draw_hline(image, x, right + 1, y, color);
    draw_hline(image, x, right + 1, bottom, color);
    for yy in y..=bottom {
        put(image, x, yy, color);
        put(image, right, yy, color);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Result of one preview request
#[derive(Debug)]
pub struct PreviewResult {
    pub request: u64,
    pub result: Result<PageImage, RenderError>,
}

/// Runs a renderer on worker threads
pub struct PreviewRunner {
    renderer: Arc<dyn ReportRenderer>,
    sender: Sender<PreviewResult>,
    receiver: Receiver<PreviewResult>,
    next_request: u64,
    latest: Option<u64>,
}

impl PreviewRunner {
    pub fn new(renderer: Arc<dyn ReportRenderer>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            renderer,
            sender,
            receiver,
            next_request: 1,
            latest: None,
        }
    }

    /// Start rendering a snapshot of `design`, returning the request id
    pub fn request(&mut self, design: Design) -> Result<u64, RenderError> {
        let request = self.next_request;
        self.next_request += 1;

        let renderer = Arc::clone(&self.renderer);
        let sender = self.sender.clone();
        thread::Builder::new()
            .name(format!("preview-{}", request))
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| renderer.render(&design)))
                    .unwrap_or_else(|payload| {
                        let message = panic_message(payload.as_ref());
                        tracing::error!("Preview request {} panicked: {}", request, message);
                        Err(RenderError::Panicked(message))
                    });
                // The runner may have been dropped meanwhile
                let _ = sender.send(PreviewResult { request, result });
            })
            .map_err(|e| {
                tracing::error!("Failed to start preview worker: {}", e);
                RenderError::WorkerGone
            })?;

        tracing::debug!("Preview request {} started", request);
        self.latest = Some(request);
        Ok(request)
    }

    /// True while the latest request has not been answered
    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// Drain finished work; returns the latest request's result once it
    /// arrives. Answers to superseded requests are discarded.
    pub fn poll(&mut self) -> Option<PreviewResult> {
        loop {
            match self.receiver.try_recv() {
                Ok(done) if Some(done.request) == self.latest => {
                    self.latest = None;
                    return Some(done);
                }
                Ok(stale) => {
                    tracing::debug!("Dropping superseded preview {}", stale.request);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }
}

impl Default for PreviewRunner {
    fn default() -> Self {
        Self::new(Arc::new(OutlineRenderer::new()))
    }
}

impl std::fmt::Debug for PreviewRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewRunner")
            .field("next_request", &self.next_request)
            .field("latest", &self.latest)
            .finish()
    }
}
