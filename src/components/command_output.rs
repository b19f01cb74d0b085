use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::theme::ResolvedTheme;

// ---------------------------------------------------------------------------
// CommandOutput component
// ---------------------------------------------------------------------------

/// Pre-rendered job output block: the tail of the stream that fits the
/// available rows, split into lines.
pub struct RenderedCommandOutput {
    pub lines: Vec<String>,
    pub text_fg: Color,
    pub border_fg: Color,
}

impl RenderedCommandOutput {
    /// Build the output block, keeping only the last `visible_lines` lines.
    pub fn build(
        output: &str,
        visible_lines: usize,
        theme: &ResolvedTheme,
        depth: ColorDepth,
    ) -> Self {
        let all: Vec<&str> = output.lines().collect();
        let start = all.len().saturating_sub(visible_lines);
        let lines = all[start..].iter().map(|l| (*l).to_owned()).collect();

        Self {
            lines,
            text_fg: theme.text_secondary.to_crossterm_color(depth),
            border_fg: theme.border_faint.to_crossterm_color(depth),
        }
    }
}

#[derive(Default, Props)]
pub struct CommandOutputProps {
    pub output: Option<RenderedCommandOutput>,
}

#[component]
pub fn CommandOutput(props: &mut CommandOutputProps) -> impl Into<AnyElement<'static>> {
    let Some(out) = props.output.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Single,
            border_edges: Edges::Left,
            border_color: out.border_fg,
            padding_left: 1,
            margin_bottom: 1,
            overflow: Overflow::Hidden,
        ) {
            #(out.lines.into_iter().enumerate().map(|(i, line)| {
                element! {
                    View(key: i) {
                        Text(content: line, color: out.text_fg, wrap: TextWrap::NoWrap)
                    }
                }
            }))
        }
    }
    .into_any()
}
