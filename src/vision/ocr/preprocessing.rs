// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for PaddleOCR

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use ndarray::Array4;

/// Target size for PaddleOCR detection model
pub const OCR_INPUT_SIZE: u32 = 640;

/// Recognition model input height
pub const REC_INPUT_HEIGHT: u32 = 48;

/// Maximum width for recognition model input
pub const REC_MAX_WIDTH: u32 = 320;

/// Minimum width for recognition model input
pub const REC_MIN_WIDTH: u32 = 4;

/// Detection normalization (ImageNet)
pub const DET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const DET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Recognition normalization maps pixels into [-1, 1]
pub const REC_MEAN: [f32; 3] = [0.5, 0.5, 0.5];
pub const REC_STD: [f32; 3] = [0.5, 0.5, 0.5];

const PAD_GRAY: Rgb<u8> = Rgb([128, 128, 128]);

/// Preprocess an image for OCR detection
///
/// Resizes into a gray-padded `OCR_INPUT_SIZE` square, normalizes with
/// ImageNet mean/std and returns an NCHW tensor `[1, 3, 640, 640]` together
/// with the mapping needed to project detections back.
pub fn preprocess_for_detection(image: &DynamicImage) -> (Array4<f32>, PreprocessInfo) {
    let info = PreprocessInfo::new(image, OCR_INPUT_SIZE);
    let padded = resize_with_padding(image, OCR_INPUT_SIZE).to_rgb8();
    (to_nchw(&padded, DET_MEAN, DET_STD), info)
}

/// Preprocess a cropped text line for recognition
///
/// Height is fixed at 48, width follows the aspect ratio within
/// `[REC_MIN_WIDTH, REC_MAX_WIDTH]`. No padding; the model takes dynamic width.
pub fn preprocess_for_recognition(image: &DynamicImage) -> Array4<f32> {
    let (orig_w, orig_h) = image.dimensions();

    let scale = REC_INPUT_HEIGHT as f32 / orig_h.max(1) as f32;
    let new_width = ((orig_w as f32 * scale).round() as u32).clamp(REC_MIN_WIDTH, REC_MAX_WIDTH);

    let resized = image
        .resize_exact(
            new_width,
            REC_INPUT_HEIGHT,
            image::imageops::FilterType::Triangle,
        )
        .to_rgb8();

    to_nchw(&resized, REC_MEAN, REC_STD)
}

/// Crop an axis-aligned `[left, top, right, bottom]` region
///
/// Coordinates are clamped to the image; a degenerate box still yields a
/// 1x1 crop so recognition never sees an empty image.
pub fn crop_region(image: &DynamicImage, bbox: [f32; 4]) -> DynamicImage {
    let (width, height) = image.dimensions();
    let max_x = width.saturating_sub(1) as f32;
    let max_y = height.saturating_sub(1) as f32;

    let left = bbox[0].clamp(0.0, max_x) as u32;
    let top = bbox[1].clamp(0.0, max_y) as u32;
    let right = bbox[2].clamp(0.0, width as f32) as u32;
    let bottom = bbox[3].clamp(0.0, height as f32) as u32;

    let crop_w = right.saturating_sub(left).max(1);
    let crop_h = bottom.saturating_sub(top).max(1);

    image.crop_imm(left, top, crop_w, crop_h)
}

/// Resize image with aspect ratio preservation and padding
///
/// The image is scaled to fit within target_size x target_size, centered,
/// and padded with gray (128).
pub fn resize_with_padding(image: &DynamicImage, target_size: u32) -> DynamicImage {
    let (orig_w, orig_h) = image.dimensions();

    if orig_w == 0 || orig_h == 0 {
        return DynamicImage::ImageRgb8(RgbImage::from_pixel(target_size, target_size, PAD_GRAY));
    }

    let info = PreprocessInfo::new(image, target_size);
    let new_w = ((orig_w as f32 * info.scale).round() as u32).clamp(1, target_size);
    let new_h = ((orig_h as f32 * info.scale).round() as u32).clamp(1, target_size);

    let resized = image
        .resize_exact(new_w, new_h, image::imageops::FilterType::Triangle)
        .to_rgb8();

    let mut output = RgbImage::from_pixel(target_size, target_size, PAD_GRAY);
    image::imageops::replace(
        &mut output,
        &resized,
        info.offset_x as i64,
        info.offset_y as i64,
    );

    DynamicImage::ImageRgb8(output)
}

fn to_nchw(rgb: &RgbImage, mean: [f32; 3], std: [f32; 3]) -> Array4<f32> {
    let (width, height) = rgb.dimensions();
    let mut tensor = Array4::zeros((1, 3, height as usize, width as usize));

    for (x, y, pixel) in rgb.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, c, y as usize, x as usize]] = (pixel[c] as f32 / 255.0 - mean[c]) / std[c];
        }
    }

    tensor
}

/// Scale and padding applied during detection preprocessing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessInfo {
    pub scale: f32,
    pub offset_x: u32,
    pub offset_y: u32,
    pub original_width: u32,
    pub original_height: u32,
}

impl PreprocessInfo {
    pub fn new(image: &DynamicImage, target_size: u32) -> Self {
        let (orig_w, orig_h) = image.dimensions();

        if orig_w == 0 || orig_h == 0 {
            return Self {
                scale: 1.0,
                offset_x: 0,
                offset_y: 0,
                original_width: orig_w,
                original_height: orig_h,
            };
        }

        let scale = (target_size as f32 / orig_w as f32).min(target_size as f32 / orig_h as f32);
        let new_w = ((orig_w as f32 * scale).round() as u32).min(target_size);
        let new_h = ((orig_h as f32 * scale).round() as u32).min(target_size);

        Self {
            scale,
            offset_x: (target_size - new_w) / 2,
            offset_y: (target_size - new_h) / 2,
            original_width: orig_w,
            original_height: orig_h,
        }
    }

    /// Map a coordinate from preprocessed space back to original image space
    pub fn map_to_original(&self, x: f32, y: f32) -> (f32, f32) {
        let orig_x = (x - self.offset_x as f32) / self.scale;
        let orig_y = (y - self.offset_y as f32) / self.scale;
        (orig_x, orig_y)
    }
}
