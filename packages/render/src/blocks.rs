use crate::escape::escape_html;
use crate::style::render_style_sheet;
use crate::types::{BlockType, Device, PropertyBlock, PropertyBlockTableData, PropertyStyle};

/// Literal heading rendered on every notice block.
const NOTICE_TITLE: &str = "予告広告";

/// Render an ordered block list to an HTML fragment.
///
/// Only `isPublic` blocks appear, in ascending `order`. Operator text is
/// escaped; `custom` blocks are injected verbatim.
pub fn render_blocks(blocks: &[PropertyBlock], style: &PropertyStyle) -> String {
    let mut visible: Vec<&PropertyBlock> = blocks.iter().filter(|b| b.is_public).collect();
    visible.sort_by_key(|b| b.order);

    let items: Vec<String> = visible
        .iter()
        .map(|block| match block.block_type {
            BlockType::Separator => render_separator(),
            BlockType::Caption => render_caption(block.contents.as_deref()),
            BlockType::Custom => render_custom(block.contents.as_deref()),
            BlockType::Notice => render_notice(block.contents.as_deref(), style),
            BlockType::Table => render_table(block.data.as_ref(), style),
        })
        .collect();

    items.join("\n")
}

/// Render the full servable page: stylesheet followed by the block fragment.
/// This is the body delivered by the public endpoint and the admin preview.
pub fn render_document(
    blocks: &[PropertyBlock],
    style: &PropertyStyle,
    device: Option<Device>,
) -> String {
    let css = render_style_sheet(style, device);
    let html = render_blocks(blocks, style);
    format!("<style>\n{css}</style>\n{html}")
}

fn render_separator() -> String {
    r#"<hr class="novo-separator" />"#.to_string()
}

fn render_caption(contents: Option<&str>) -> String {
    let text = escape_html(contents.unwrap_or(""));
    format!(r#"<p class="novo-caption">{text}</p>"#)
}

fn render_custom(contents: Option<&str>) -> String {
    // Intentionally unescaped: custom blocks are author-supplied markup.
    let markup = contents.unwrap_or("");
    format!("<div>{markup}</div>")
}

fn render_notice(contents: Option<&str>, style: &PropertyStyle) -> String {
    let variant = serde_variant(&style.notice.variant);
    let text = escape_html(contents.unwrap_or(""));
    format!(
        "<div class=\"novo-notice\" data-novo-variant=\"{variant}\">\n\
         <p class=\"novo-notice-title\">{NOTICE_TITLE}</p>\n\
         <p class=\"novo-notice-content\">{text}</p>\n\
         </div>"
    )
}

fn render_table(data: Option<&PropertyBlockTableData>, style: &PropertyStyle) -> String {
    let Some(data) = data else {
        return String::new();
    };

    let variant = serde_variant(&style.table.variant);
    let mut out = format!(
        "<div class=\"novo-table-wrapper\" data-novo-variant=\"{variant}\" \
         data-novo-outline=\"{outline}\" data-novo-separator=\"{separator}\">",
        outline = style.table.outline,
        separator = style.table.separator,
    );

    if let Some(subject) = &data.subject {
        out.push_str(&format!(
            "\n<p class=\"novo-table-subject\">{}</p>",
            escape_html(subject)
        ));
    }
    if let Some(description) = &data.description {
        out.push_str(&format!(
            "\n<p class=\"novo-table-description\">{}</p>",
            escape_html(description)
        ));
    }

    out.push_str("\n<dl class=\"novo-table\">");
    for row in &data.table {
        out.push_str(&format!(
            "\n<div class=\"novo-table-content\">\n\
             <dt class=\"novo-table-label\">{label}</dt>\n\
             <dd class=\"novo-table-value\">{value}</dd>\n\
             </div>",
            label = escape_html(&row.label),
            value = escape_html(row.value.as_deref().unwrap_or("")),
        ));
    }
    out.push_str("\n</dl>");

    if let Some(caption) = &data.caption {
        out.push_str(&format!(
            "\n<p class=\"novo-table-caption\">{}</p>",
            escape_html(caption)
        ));
    }

    out.push_str("\n</div>");
    out
}

/// Lowercase wire name of a unit serde enum variant.
fn serde_variant<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}
