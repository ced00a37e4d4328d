use std::fmt::Write;

use crate::command::types::{StreamMode, ViewType};
use crate::engine::types::{ContentObject, FeedEntry};

/// What the page is being rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub view_type: ViewType,
    pub mode: StreamMode,
}

pub trait EntryRenderer: Send + Sync {
    /// Markup of one entry on the wall.
    fn render_wall_entry(
        &self,
        ctx: &RenderContext,
        entry: &FeedEntry,
        object: &ContentObject,
    ) -> String;

    /// Plain text of one entry in the mail digest.
    fn render_mail_entry(
        &self,
        ctx: &RenderContext,
        entry: &FeedEntry,
        object: &ContentObject,
    ) -> String;
}

/// Default renderer producing escaped HTML fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupRenderer;

impl EntryRenderer for MarkupRenderer {
    fn render_wall_entry(
        &self,
        ctx: &RenderContext,
        entry: &FeedEntry,
        object: &ContentObject,
    ) -> String {
        let mut out = String::with_capacity(256 + object.wall_text.len());
        let _ = write!(
            out,
            "<div class=\"wall-entry\" id=\"wallEntry_{}\" data-view=\"{}\" data-mode=\"{}\" data-model=\"{}\"",
            entry.id,
            ctx.view_type,
            ctx.mode.as_str(),
            escape(&object.model),
        );
        if entry.sticked {
            out.push_str(" data-sticked=\"1\"");
        }
        let created = entry.created_at.to_rfc3339();
        let _ = write!(
            out,
            "><div class=\"wall-entry-header\"><a class=\"author\" href=\"/u/{}\">{}</a> \
<time class=\"time\" datetime=\"{created}\">{created}</time></div>\
<div class=\"wall-entry-content\">{}</div></div>\n",
            escape(&object.author.guid),
            escape(&object.author.display_name),
            escape(&object.wall_text),
        );
        out
    }

    fn render_mail_entry(
        &self,
        _ctx: &RenderContext,
        _entry: &FeedEntry,
        object: &ContentObject,
    ) -> String {
        format!("{}\n", object.mail_text)
    }
}

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
