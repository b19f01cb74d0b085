use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::theme::ResolvedTheme;
use crate::types::Commit;
use crate::util::{expand_emoji, format_relative_time, truncate_to_width};

// ---------------------------------------------------------------------------
// CommitCard component
// ---------------------------------------------------------------------------

/// Pre-rendered commit data (all owned, no lifetime issues).
pub struct RenderedCommitCard {
    pub sha_label: String,
    pub summary: String,
    pub meta: String,
    pub sha_fg: Color,
    pub summary_fg: Color,
    pub meta_fg: Color,
}

impl RenderedCommitCard {
    /// Build the card for one commit, fitted to `width` columns.
    pub fn build(commit: &Commit, theme: &ResolvedTheme, depth: ColorDepth, width: u16) -> Self {
        let summary = expand_emoji(commit.summary());
        let summary = truncate_to_width(&summary, usize::from(width.saturating_sub(2)));

        let mut meta_parts: Vec<String> = Vec::new();
        if let Some(author) = &commit.author_name {
            meta_parts.push(author.clone());
        }
        if let Some(date) = &commit.committed_date {
            meta_parts.push(format_relative_time(date));
        }

        Self {
            sha_label: commit.short_sha().to_owned(),
            summary,
            meta: meta_parts.join(" \u{00b7} "),
            sha_fg: theme.accent.to_crossterm_color(depth),
            summary_fg: theme.text_primary.to_crossterm_color(depth),
            meta_fg: theme.text_faint.to_crossterm_color(depth),
        }
    }
}

#[derive(Default, Props)]
pub struct CommitCardProps {
    pub card: Option<RenderedCommitCard>,
}

#[component]
pub fn CommitCard(props: &mut CommitCardProps) -> impl Into<AnyElement<'static>> {
    let Some(card) = props.card.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(flex_direction: FlexDirection::Column, padding_bottom: 1) {
            View {
                Text(content: card.sha_label, color: card.sha_fg, wrap: TextWrap::NoWrap)
                Text(content: "  ", wrap: TextWrap::NoWrap)
                Text(
                    content: card.summary,
                    color: card.summary_fg,
                    weight: Weight::Bold,
                    wrap: TextWrap::NoWrap,
                )
            }
            #((!card.meta.is_empty()).then(|| {
                element! {
                    Text(content: card.meta, color: card.meta_fg, wrap: TextWrap::NoWrap)
                }
            }))
        }
    }
    .into_any()
}
