use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::components::command_output::{CommandOutput, RenderedCommandOutput};
use crate::components::commit_card::{CommitCard, RenderedCommitCard};
use crate::deploy::ProjectedState;
use crate::theme::ResolvedTheme;

// ---------------------------------------------------------------------------
// DeployModal component
// ---------------------------------------------------------------------------

/// An inline error message shown inside the modal.
pub struct RenderedAlert {
    pub text: String,
    pub fg: Color,
}

/// The modal's single action button.
pub struct RenderedButton {
    pub label: String,
    pub fg: Color,
}

/// Pre-rendered deploy modal: a direct projection of [`ProjectedState`],
/// with no state of its own.
pub struct RenderedDeployModal {
    pub title: String,
    pub card: Option<RenderedCommitCard>,
    pub output: Option<RenderedCommandOutput>,
    pub alerts: Vec<RenderedAlert>,
    pub button: RenderedButton,
    pub hint: String,
    pub title_fg: Color,
    pub border_fg: Color,
    pub hint_fg: Color,
    pub modal_width: u16,
}

/// Maximum job-output lines kept visible inside the modal.
const OUTPUT_LINES: usize = 12;

impl RenderedDeployModal {
    pub fn build(
        state: &ProjectedState,
        error_msg: Option<&str>,
        theme: &ResolvedTheme,
        depth: ColorDepth,
        width: u16,
    ) -> Self {
        let modal_width = (width.saturating_mul(3) / 5).clamp(34, 64).min(width);
        let content_width = modal_width.saturating_sub(4);

        let card = state
            .commit
            .as_ref()
            .map(|commit| RenderedCommitCard::build(commit, theme, depth, content_width));

        let output = state
            .job_output
            .as_deref()
            .map(|text| RenderedCommandOutput::build(text, OUTPUT_LINES, theme, depth));

        let error_fg = theme.text_error.to_crossterm_color(depth);
        let mut alerts = Vec::new();
        if let Some(msg) = error_msg {
            alerts.push(RenderedAlert {
                text: msg.to_owned(),
                fg: error_fg,
            });
        }
        if let Some(msg) = &state.job_error {
            alerts.push(RenderedAlert {
                text: msg.clone(),
                fg: error_fg,
            });
        }

        let (label, button_color) = if state.deployed {
            ("Continue", theme.accent)
        } else if state.deploying {
            ("Deploying\u{2026}", theme.text_warning)
        } else if state.deploy_disabled {
            ("Deploy", theme.text_faint)
        } else {
            ("Deploy", theme.accent)
        };

        let hint = if state.deployed {
            "enter: continue".to_owned()
        } else {
            "enter: deploy \u{00b7} esc: close".to_owned()
        };

        Self {
            title: "Deploy commit?".to_owned(),
            card,
            output,
            alerts,
            button: RenderedButton {
                label: format!("[ {label} ]"),
                fg: button_color.to_crossterm_color(depth),
            },
            hint,
            title_fg: theme.text_primary.to_crossterm_color(depth),
            border_fg: theme.border_primary.to_crossterm_color(depth),
            hint_fg: theme.text_faint.to_crossterm_color(depth),
            modal_width,
        }
    }
}

#[derive(Default, Props)]
pub struct DeployModalProps {
    pub modal: Option<RenderedDeployModal>,
    pub width: u16,
    pub height: u16,
}

#[component]
pub fn DeployModal(props: &mut DeployModalProps) -> impl Into<AnyElement<'static>> {
    let Some(modal) = props.modal.take() else {
        return element! { View }.into_any();
    };

    let width = u32::from(props.width);
    let height = u32::from(props.height);
    let modal_width = u32::from(modal.modal_width);
    let pad_left = width.saturating_sub(modal_width) / 2;

    element! {
        View(
            width,
            height,
            position: Position::Absolute,
        ) {
            View(
                margin_left: pad_left,
                margin_top: 2,
                width: modal_width,
                flex_direction: FlexDirection::Column,
                border_style: BorderStyle::Round,
                border_color: modal.border_fg,
                padding_left: 1,
                padding_right: 1,
                overflow: Overflow::Hidden,
            ) {
                View(padding_bottom: 1) {
                    Text(
                        content: modal.title,
                        color: modal.title_fg,
                        weight: Weight::Bold,
                        wrap: TextWrap::NoWrap,
                    )
                }
                CommitCard(card: modal.card)
                CommandOutput(output: modal.output)
                #(modal.alerts.into_iter().enumerate().map(|(i, alert)| {
                    element! {
                        View(key: i) {
                            Text(content: alert.text, color: alert.fg, wrap: TextWrap::Wrap)
                        }
                    }
                }))
                View(padding_top: 1) {
                    Text(
                        content: modal.button.label,
                        color: modal.button.fg,
                        weight: Weight::Bold,
                        wrap: TextWrap::NoWrap,
                    )
                    View(flex_grow: 1.0)
                    Text(content: modal.hint, color: modal.hint_fg, wrap: TextWrap::NoWrap)
                }
            }
        }
    }
    .into_any()
}
