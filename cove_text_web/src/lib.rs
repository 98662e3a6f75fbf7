// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web/WASM label measurement.
//!
//! Bar labels in the browser are measured with an offscreen canvas, the same
//! way the chart editor checks whether a value fits inside its bar. On
//! non-`wasm32` targets [`CanvasTextMeasurer`] falls back to
//! [`HeuristicTextMeasurer`] so geometry code can be shared unchanged.

#![no_std]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
use alloc::string::String;
use cove_text::{HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};

/// A measurer backed by HTML Canvas 2D text metrics.
#[derive(Clone, Debug)]
pub struct CanvasTextMeasurer {
    #[cfg(target_arch = "wasm32")]
    ctx: web_sys::CanvasRenderingContext2d,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for CanvasTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasTextMeasurer {
    /// Builds the CSS `font` shorthand assigned to the canvas context.
    #[cfg_attr(
        not(target_arch = "wasm32"),
        allow(dead_code, reason = "only the canvas path assigns fonts")
    )]
    fn css_font(style: &TextStyle) -> alloc::string::String {
        alloc::format!(
            "{} {}px {}",
            style.font_weight.0,
            style.font_size,
            style.font_family.as_css_family()
        )
    }

    /// Creates a measurer using a fresh offscreen canvas.
    ///
    /// This requires a browser-like environment with `window` and `document`.
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Result<Self, wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast as _;

        let window = web_sys::window()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("cove_text_web: missing window"))?;
        let document = window
            .document()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("cove_text_web: missing document"))?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("cove_text_web: missing 2d context"))?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Wraps an existing canvas 2D context.
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn from_canvas_context(ctx: web_sys::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Returns the computed `font` of `document.body`, if available.
    ///
    /// Used when the embedder wants labels measured in the page's active font
    /// rather than a style chosen by the chart.
    #[cfg(target_arch = "wasm32")]
    pub fn body_font() -> Option<String> {
        let window = web_sys::window()?;
        let body = window.document()?.body()?;
        let style = window.get_computed_style(&body).ok()??;
        style.get_property_value("font").ok()
    }

    /// Creates a measurer that always uses the heuristic.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl TextMeasurer for CanvasTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        #[cfg(target_arch = "wasm32")]
        {
            self.ctx.set_font(&Self::css_font(style));
            let Ok(metrics) = self.ctx.measure_text(text) else {
                return HeuristicTextMeasurer.measure(text, style);
            };

            // Older engines report zero bounding boxes; fall back to em ratios.
            let ascent = match metrics.actual_bounding_box_ascent() {
                a if a > 0.0 => a,
                _ => 0.8 * style.font_size,
            };
            let descent = match metrics.actual_bounding_box_descent() {
                d if d > 0.0 => d,
                _ => 0.2 * style.font_size,
            };
            TextMetrics {
                advance_width: metrics.width(),
                ascent,
                descent,
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        HeuristicTextMeasurer.measure(text, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_font_lists_weight_size_and_family() {
        let font = CanvasTextMeasurer::css_font(&TextStyle::new(14.0));
        assert_eq!(font, "400 14px sans-serif");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_builds_match_heuristic() {
        let style = TextStyle::new(16.0);
        let m = CanvasTextMeasurer::new();
        assert_eq!(
            m.measure("42%", &style),
            HeuristicTextMeasurer.measure("42%", &style)
        );
    }
}
