use blueprint_core::{environment, NativeView, ScreenScaleKey};
use blueprint_ui::{Element, ElementContent, Measurable, Rect, Size, SizeConstraint, ViewDescription};

const DEFAULT_FONT_SIZE: f32 = 16.0;
const GLYPH_ADVANCE_PER_POINT: f32 = 0.5;
const LINE_HEIGHT_PER_POINT: f32 = 1.25;

/// Native view displaying a run of text.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LabelView {
    pub text: String,
    pub number_of_lines: usize,
    pub font_size: f32,
}

impl NativeView for LabelView {}

/// Displays text, wrapping onto as many lines as allowed.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    /// Maximum number of lines; `0` means unlimited.
    pub number_of_lines: usize,
    pub font_size: f32,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            number_of_lines: 0,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn number_of_lines(mut self, lines: usize) -> Self {
        self.number_of_lines = lines;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }
}

struct TextMeasurer {
    glyphs: usize,
    number_of_lines: usize,
    font_size: f32,
    rounding_scale: f32,
}

impl Measurable for TextMeasurer {
    fn measure(&self, constraint: SizeConstraint) -> Size {
        if self.glyphs == 0 {
            return Size::ZERO;
        }
        let advance = self.font_size * GLYPH_ADVANCE_PER_POINT;
        let max_width = constraint.width.maximum();
        let glyphs_per_line = if max_width.is_finite() && advance > 0.0 {
            ((max_width / advance).floor() as usize).max(1)
        } else {
            self.glyphs
        };

        let mut lines = self.glyphs.div_ceil(glyphs_per_line);
        if self.number_of_lines > 0 {
            lines = lines.min(self.number_of_lines);
        }
        let width = self.glyphs.min(glyphs_per_line) as f32 * advance;
        let height = lines as f32 * self.font_size * LINE_HEIGHT_PER_POINT;

        Size::new(
            round_up(width, self.rounding_scale),
            round_up(height, self.rounding_scale),
        )
    }
}

/// Rounds `value` up to the next multiple of one physical pixel.
fn round_up(value: f32, scale: f32) -> f32 {
    if scale <= 0.0 {
        return value.ceil();
    }
    (value * scale).ceil() / scale
}

impl Element for Label {
    fn content(&self) -> ElementContent {
        ElementContent::measuring(TextMeasurer {
            glyphs: self.text.chars().count(),
            number_of_lines: self.number_of_lines,
            font_size: self.font_size,
            rounding_scale: environment::<ScreenScaleKey>(),
        })
    }

    fn backing_view_description(
        &self,
        _bounds: Rect,
        _subtree_extent: Option<Rect>,
    ) -> Option<ViewDescription> {
        let label = self.clone();
        Some(ViewDescription::of::<LabelView>().configure(move |view: &mut LabelView| {
            view.text.clone_from(&label.text);
            view.number_of_lines = label.number_of_lines;
            view.font_size = label.font_size;
        }))
    }
}
