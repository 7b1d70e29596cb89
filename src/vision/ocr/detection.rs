// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PaddleOCR text detection model
//!
//! Runs the DB detection network and turns its probability map into
//! axis-aligned text boxes in original image coordinates.

use anyhow::{Context, Result};
use ndarray::{Array4, ArrayView2, Axis, Ix2};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::preprocessing::PreprocessInfo;

/// Components smaller than this many pixels are noise
const MIN_COMPONENT_PIXELS: usize = 10;

/// Boxes with a side at or below this many pixels are dropped
const MIN_BOX_SIDE: f32 = 3.0;

/// Two boxes whose tops differ by less than this sit on the same line
const LINE_TOLERANCE: f32 = 10.0;

/// A detected text box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    /// `[left, top, right, bottom]` in original image pixels
    pub bbox: [f32; 4],
    /// Mean probability inside the detected component (0.0-1.0)
    pub score: f32,
}

impl TextBox {
    pub fn width(&self) -> f32 {
        self.bbox[2] - self.bbox[0]
    }

    pub fn height(&self) -> f32 {
        self.bbox[3] - self.bbox[1]
    }

    pub fn is_valid(&self) -> bool {
        self.width() > MIN_BOX_SIDE && self.height() > MIN_BOX_SIDE
    }

    /// Corners clockwise from top-left
    pub fn polygon(&self) -> [[f32; 2]; 4] {
        let [left, top, right, bottom] = self.bbox;
        [[left, top], [right, top], [right, bottom], [left, bottom]]
    }
}

/// Thresholds for DB post-processing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// Pixel threshold on the probability map
    pub thresh: f32,
    /// Minimum mean probability of a kept box
    pub box_thresh: f32,
    /// Expansion ratio: each side grows by `area * ratio / perimeter`
    pub unclip_ratio: f32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            thresh: 0.3,
            box_thresh: 0.6,
            unclip_ratio: 1.5,
        }
    }
}

/// PaddleOCR text detection model
///
/// Runs on CPU; the session is shared behind a mutex.
#[derive(Clone)]
pub struct OcrDetectionModel {
    session: Arc<Mutex<Session>>,
    input_name: String,
    params: DetectionParams,
}

impl std::fmt::Debug for OcrDetectionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrDetectionModel")
            .field("input_name", &self.input_name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl OcrDetectionModel {
    /// Load the detection model (det_model.onnx)
    pub fn new<P: AsRef<Path>>(model_path: P, params: DetectionParams) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("OCR detection model not found: {}", model_path.display());
        }

        info!("Loading OCR detection model from {}", model_path.display());

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .with_context(|| {
                format!(
                    "Failed to load OCR detection model from {}",
                    model_path.display()
                )
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "x".to_string());

        debug!("Detection model loaded - input: {}", input_name);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            params,
        })
    }

    /// Detect text boxes in a tensor produced by `preprocess_for_detection`
    pub fn detect(&self, input: &Array4<f32>, info: &PreprocessInfo) -> Result<Vec<TextBox>> {
        let shape = input.shape();
        if shape.len() != 4 || shape[0] != 1 || shape[1] != 3 {
            anyhow::bail!("Invalid input shape: {:?}, expected [1, 3, H, W]", shape);
        }
        let input_size = (shape[2], shape[3]);

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Detection session lock poisoned"))?;

        let input_value =
            Value::from_array(input.to_owned()).context("Failed to create input tensor")?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_value])
            .context("Detection inference failed")?;

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        debug!("Detection output shape: {:?}", output_tensor.shape());

        // [1, 1, H, W] or [1, H, W] -> [H, W]
        let mut prob_map = output_tensor.view();
        while prob_map.ndim() > 2 {
            prob_map = prob_map.index_axis_move(Axis(0), 0);
        }
        let prob_map = prob_map
            .into_dimensionality::<Ix2>()
            .context("Unexpected detection output rank")?;

        let boxes = db_postprocess(prob_map, &self.params, info, input_size);
        debug!("Detected {} text regions", boxes.len());

        Ok(boxes)
    }
}

/// Turn a probability map into text boxes in original image coordinates
///
/// `input_size` is the `(height, width)` of the tensor fed to the model;
/// the map may be smaller and is scaled up accordingly.
pub fn db_postprocess(
    prob_map: ArrayView2<f32>,
    params: &DetectionParams,
    info: &PreprocessInfo,
    input_size: (usize, usize),
) -> Vec<TextBox> {
    let (map_h, map_w) = prob_map.dim();
    if map_h == 0 || map_w == 0 {
        return Vec::new();
    }

    let scale_y = input_size.0 as f32 / map_h as f32;
    let scale_x = input_size.1 as f32 / map_w as f32;
    let orig_w = info.original_width as f32;
    let orig_h = info.original_height as f32;

    let mut visited = vec![false; map_h * map_w];
    let mut boxes = Vec::new();

    for y in 0..map_h {
        for x in 0..map_w {
            if visited[y * map_w + x] || prob_map[[y, x]] <= params.thresh {
                continue;
            }

            let component = flood_fill(&prob_map, &mut visited, x, y, params.thresh);
            if component.count < MIN_COMPONENT_PIXELS {
                continue;
            }

            let score = component.sum / component.count as f32;
            if score < params.box_thresh {
                continue;
            }

            let [left, top, right, bottom] = unclip(
                [
                    component.min_x as f32,
                    component.min_y as f32,
                    (component.max_x + 1) as f32,
                    (component.max_y + 1) as f32,
                ],
                params.unclip_ratio,
            );

            let (left, top) = info.map_to_original(left * scale_x, top * scale_y);
            let (right, bottom) = info.map_to_original(right * scale_x, bottom * scale_y);

            let text_box = TextBox {
                bbox: [
                    left.clamp(0.0, orig_w).round(),
                    top.clamp(0.0, orig_h).round(),
                    right.clamp(0.0, orig_w).round(),
                    bottom.clamp(0.0, orig_h).round(),
                ],
                score,
            };

            if text_box.is_valid() {
                boxes.push(text_box);
            }
        }
    }

    sort_reading_order(&mut boxes);
    boxes
}

/// Grow a rectangle on every side by `area * ratio / perimeter`
pub fn unclip(bbox: [f32; 4], ratio: f32) -> [f32; 4] {
    let width = bbox[2] - bbox[0];
    let height = bbox[3] - bbox[1];
    let perimeter = 2.0 * (width + height);
    if perimeter <= 0.0 {
        return bbox;
    }

    let distance = width * height * ratio / perimeter;
    [
        bbox[0] - distance,
        bbox[1] - distance,
        bbox[2] + distance,
        bbox[3] + distance,
    ]
}

/// Top-to-bottom, then left-to-right within a line
fn sort_reading_order(boxes: &mut [TextBox]) {
    boxes.sort_by(|a, b| a.bbox[1].total_cmp(&b.bbox[1]).then(a.bbox[0].total_cmp(&b.bbox[0])));

    for i in 0..boxes.len() {
        let mut j = i;
        while j > 0
            && (boxes[j].bbox[1] - boxes[j - 1].bbox[1]).abs() < LINE_TOLERANCE
            && boxes[j].bbox[0] < boxes[j - 1].bbox[0]
        {
            boxes.swap(j, j - 1);
            j -= 1;
        }
    }
}

struct Component {
    min_x: usize,
    max_x: usize,
    min_y: usize,
    max_y: usize,
    count: usize,
    sum: f32,
}

/// 4-connected flood fill over pixels strictly above `thresh`
fn flood_fill(
    prob_map: &ArrayView2<f32>,
    visited: &mut [bool],
    start_x: usize,
    start_y: usize,
    thresh: f32,
) -> Component {
    let (height, width) = prob_map.dim();
    let mut stack = vec![(start_x, start_y)];
    let mut component = Component {
        min_x: start_x,
        max_x: start_x,
        min_y: start_y,
        max_y: start_y,
        count: 0,
        sum: 0.0,
    };

    while let Some((x, y)) = stack.pop() {
        let idx = y * width + x;
        if visited[idx] {
            continue;
        }

        let prob = prob_map[[y, x]];
        if prob <= thresh {
            continue;
        }

        visited[idx] = true;
        component.count += 1;
        component.sum += prob;
        component.min_x = component.min_x.min(x);
        component.max_x = component.max_x.max(x);
        component.min_y = component.min_y.min(y);
        component.max_y = component.max_y.max(y);

        if x > 0 {
            stack.push((x - 1, y));
        }
        if x + 1 < width {
            stack.push((x + 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if y + 1 < height {
            stack.push((x, y + 1));
        }
    }

    component
}
