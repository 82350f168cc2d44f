use serde::{Deserialize, Serialize};

/// One content unit on a property overview page.
///
/// The serde shape (camelCase, `type` tag) is the persisted document shape;
/// production snapshots (`fixedData`) are JSON arrays of this type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// Render position. Ascending, unique within a property, gaps allowed.
    pub order: i32,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    /// Table payload. Only meaningful for `type = table`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PropertyBlockTableData>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Caption,
    Notice,
    Separator,
    Table,
    Custom,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Caption => "caption",
            BlockType::Notice => "notice",
            BlockType::Separator => "separator",
            BlockType::Table => "table",
            BlockType::Custom => "custom",
        }
    }
}

impl std::str::FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "caption" => Ok(BlockType::Caption),
            "notice" => Ok(BlockType::Notice),
            "separator" => Ok(BlockType::Separator),
            "table" => Ok(BlockType::Table),
            "custom" => Ok(BlockType::Custom),
            other => Err(format!("unknown block type '{other}'")),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyBlockTableData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Footer note rendered below the rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub table: Vec<TableRow>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TableRow {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Style configuration for the four block families.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyStyle {
    pub caption: CaptionStyle,
    pub notice: NoticeStyle,
    pub separator: SeparatorStyle,
    pub table: TableStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaptionStyle {
    /// Leading-`#` 3 or 6 hex digit color.
    pub color: String,
    /// Pixels, 10..=32.
    pub font_size: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoticeStyle {
    pub color: String,
    pub font_size: u8,
    pub variant: NoticeVariant,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    #[default]
    Default,
    Flex,
    Outline,
    Fill,
    Separator,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeparatorStyle {
    pub color: String,
    /// Rule thickness in pixels, 1..=10.
    pub weight: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableStyle {
    pub color: String,
    pub font_size: u8,
    /// 1px border around the whole table.
    pub outline: bool,
    /// Dividing rules between rows / columns.
    pub separator: bool,
    pub variant: TableVariant,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TableVariant {
    #[default]
    Default,
    Even,
    Odd,
    Label,
    Value,
}

impl Default for PropertyStyle {
    fn default() -> Self {
        PropertyStyle {
            caption: CaptionStyle {
                color: "#000000".into(),
                font_size: 16,
            },
            notice: NoticeStyle {
                color: "#000000".into(),
                font_size: 16,
                variant: NoticeVariant::Default,
            },
            separator: SeparatorStyle {
                color: "#000000".into(),
                weight: 1,
            },
            table: TableStyle {
                color: "#000000".into(),
                font_size: 16,
                outline: false,
                separator: false,
                variant: TableVariant::Default,
            },
        }
    }
}

/// Target viewport for the preview renderer. The public endpoint renders
/// without a device, leaving breakpoints to real media queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Desktop,
    Tablet,
    Mobile,
}

/// Parse a serialized block array (the `fixedData` snapshot format).
pub fn parse_blocks_json(json: &str) -> Result<Vec<PropertyBlock>, serde_json::Error> {
    serde_json::from_str(json)
}
