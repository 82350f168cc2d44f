use crate::types::{Device, NoticeVariant, PropertyStyle, TableVariant};

/// Width below which table rows stack label over value (39rem ≈ 624px).
const TABLE_BREAKPOINT: &str = "39rem";

/// Width above which `flex` notices lay title and content side by side.
const NOTICE_BREAKPOINT: &str = "48rem";

/// Translucent tint of a color at ≈6% opacity.
///
/// Appends the `0f` alpha suffix; 3-digit colors are expanded to 6 digits
/// first since `#rgb` + a two-digit alpha is not a valid CSS color.
fn tint(color: &str) -> String {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() == 3 {
        let mut expanded = String::with_capacity(9);
        expanded.push('#');
        for c in hex.chars() {
            expanded.push(c);
            expanded.push(c);
        }
        expanded.push_str("0f");
        expanded
    } else {
        format!("#{hex}0f")
    }
}

/// Generate the stylesheet for a property page.
///
/// Pure and deterministic: the same `(style, device)` pair always yields
/// byte-identical CSS, which is what keeps the public endpoint, the SSR
/// preview and the in-browser preview visually in agreement. `device`
/// overrides the table breakpoint to always-stacked for `mobile`.
pub fn render_style_sheet(style: &PropertyStyle, device: Option<Device>) -> String {
    let caption = &style.caption;
    let notice = &style.notice;
    let separator = &style.separator;
    let table = &style.table;

    let mobile = device == Some(Device::Mobile);

    let notice_border = match notice.variant {
        NoticeVariant::Outline => "currentColor 1px solid",
        _ => "none",
    };
    let notice_padding = match notice.variant {
        NoticeVariant::Outline | NoticeVariant::Fill => "1rem",
        _ => "0",
    };
    let notice_background = match notice.variant {
        NoticeVariant::Fill => tint(&notice.color),
        _ => "transparent".to_string(),
    };
    let notice_direction = match notice.variant {
        NoticeVariant::Flex => "row",
        _ => "column",
    };
    let notice_title_border = match notice.variant {
        NoticeVariant::Flex => "currentColor 1px solid",
        _ => "none",
    };
    let notice_title_padding = match notice.variant {
        NoticeVariant::Flex => "0.75rem 0.5rem",
        _ => "0",
    };
    let notice_content_border = match notice.variant {
        NoticeVariant::Separator => "currentColor 1px solid",
        _ => "none",
    };
    let notice_content_padding = match notice.variant {
        NoticeVariant::Separator => "0.5rem",
        _ => "0",
    };

    let table_border = if table.outline {
        "currentColor 1px solid"
    } else {
        "none"
    };
    let row_separator = if table.separator {
        "currentColor 1px solid"
    } else {
        "none"
    };
    let row_columns = if mobile {
        "repeat(1, minmax(0, 1fr))"
    } else {
        "1fr 3fr"
    };
    let odd_background = match table.variant {
        TableVariant::Odd => tint(&table.color),
        _ => "transparent".to_string(),
    };
    let even_background = match table.variant {
        TableVariant::Even => tint(&table.color),
        _ => "transparent".to_string(),
    };
    let label_background = match table.variant {
        TableVariant::Label => tint(&table.color),
        _ => "transparent".to_string(),
    };
    let value_background = match table.variant {
        TableVariant::Value => tint(&table.color),
        _ => "transparent".to_string(),
    };
    // Divider between label and value: vertical on wide viewports, horizontal
    // once rows stack. A mobile device override stacks unconditionally.
    let value_border_top = if table.separator && mobile {
        row_separator
    } else {
        "none"
    };
    let value_border_left = if mobile { "none" } else { row_separator };

    format!(
        "#novo {{
  width: 100%;
}}

#novo > * {{
  margin-bottom: 32px;
}}

.novo-caption {{
  color: {caption_color};
  font-size: {caption_font_size}px;
}}

.novo-separator {{
  background-color: {separator_color};
  height: {separator_weight}px;
  border: none;
}}

.novo-notice {{
  color: {notice_color};
  border: {notice_border};
  font-size: {notice_font_size}px;
  display: flex;
  align-items: start;
  column-gap: 0.75rem;
  row-gap: 0.5rem;
  padding: {notice_padding};
  background-color: {notice_background};
  flex-direction: column;

  @media (min-width: {notice_breakpoint}) {{
    flex-direction: {notice_direction};
  }}
}}

.novo-notice-title {{
  width: fit-content;
  font-size: 1.2em;
  flex-shrink: 0;
  border: {notice_title_border};
  padding: {notice_title_padding};
}}

.novo-notice-content {{
  border-top: {notice_content_border};
  padding-top: {notice_content_padding};
  white-space: pre-wrap;
  line-height: 1.625;
}}

.novo-table-wrapper {{
  color: {table_color};
  font-size: {table_font_size}px;
}}

.novo-table {{
  display: flex;
  flex-direction: column;
  border: {table_border};
}}

.novo-table-subject {{
  margin-bottom: 0.5rem;
}}

.novo-table-content:not(:first-child) {{
  border-top: {row_separator};
}}

.novo-table-content {{
  display: grid;
  flex-direction: column;

  @media (min-width: {table_breakpoint}) {{
    grid-template-columns: {row_columns};
  }}
}}

.novo-table-content:nth-child(odd) {{
  background-color: {odd_background};
}}

.novo-table-content:nth-child(even) {{
  background-color: {even_background};
}}

.novo-table-label {{
  padding: 0.5rem;
  background-color: {label_background};
}}

.novo-table-value {{
  padding: 0.5rem;
  background-color: {value_background};
  border-top: {value_border_top};

  @media (max-width: {table_breakpoint}) {{
    border-top: {row_separator};
  }}

  @media (min-width: {table_breakpoint}) {{
    border-left: {value_border_left};
  }}
}}

.novo-table-caption {{
  font-size: 0.8em;
  display: block;
  margin-top: 0.5rem;
}}
",
        caption_color = caption.color,
        caption_font_size = caption.font_size,
        separator_color = separator.color,
        separator_weight = separator.weight,
        notice_color = notice.color,
        notice_font_size = notice.font_size,
        notice_breakpoint = NOTICE_BREAKPOINT,
        table_color = table.color,
        table_font_size = table.font_size,
        table_breakpoint = TABLE_BREAKPOINT,
    )
}
