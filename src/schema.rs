use crate::error::{Result, StockLedgerError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rows × columns of raw text cells. Row 0 is the header row.
pub type RawSheet = Vec<Vec<String>>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum ColumnRole {
    BroughtForward,
    Received,
    Sold,
    Waste,
    Ignored,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayBlock {
    /// 1-based day number, in column order.
    pub day_number: u32,
    pub start_column: usize,
    pub date_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDayRecord {
    pub date: String,
    pub code: String,
    pub name: String,
    pub category: String,
    pub brought_forward: f64,
    pub received: f64,
    pub sold: f64,
    pub waste: f64,
    /// Not clamped: a negative value means the sheet's own figures disagree.
    pub remain: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayResult {
    pub day_number: u32,
    pub date_label: String,
    /// True when any product has a nonzero figure written in this day's block.
    pub has_activity: bool,
    pub products: Vec<ProductDayRecord>,
}

impl DayResult {
    pub fn product(&self, code: &str) -> Option<&ProductDayRecord> {
        self.products.iter().find(|p| p.code == code)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct HeaderVocabulary {
    #[schemars(description = "Keywords marking the opening balance column (e.g. 'ยกมา', 'brought forward').")]
    pub brought_forward: Vec<String>,

    #[schemars(description = "Keywords marking received stock columns (e.g. 'รับ', 'received', 'total').")]
    pub received: Vec<String>,

    #[schemars(description = "Keywords marking sold / deducted-from-stock columns (e.g. 'ขาย', 'sold').")]
    pub sold: Vec<String>,

    #[schemars(description = "Keywords marking waste / discarded columns (e.g. 'ทิ้ง', 'waste').")]
    pub waste: Vec<String>,
}

impl Default for HeaderVocabulary {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|w| w.to_string()).collect()
        }

        Self {
            brought_forward: words(&["ยกมา", "คงเหลือยกมา", "brought forward", "b/f", "opening"]),
            received: words(&["รับ", "รวม", "received", "total"]),
            sold: words(&["ขาย", "ตัดสต็อก", "หักสต็อก", "sold", "deduct"]),
            waste: words(&["ทิ้ง", "เสีย", "waste", "discard"]),
        }
    }
}

impl HeaderVocabulary {
    /// Keyword lists in the order they are tried against a header.
    pub fn in_priority_order(&self) -> [(ColumnRole, &[String]); 4] {
        [
            (ColumnRole::BroughtForward, self.brought_forward.as_slice()),
            (ColumnRole::Waste, self.waste.as_slice()),
            (ColumnRole::Sold, self.sold.as_slice()),
            (ColumnRole::Received, self.received.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct LedgerConfig {
    #[serde(default = "default_base_offset")]
    #[schemars(description = "Index of the first per-day column. Columns before it hold product identity fields.")]
    pub base_offset: usize,

    #[serde(default = "default_block_width")]
    #[schemars(description = "Number of columns in each day block.")]
    pub block_width: usize,

    #[serde(default = "default_max_days")]
    #[schemars(description = "Upper bound on the number of day blocks read from one sheet.")]
    pub max_days: usize,

    #[serde(default)]
    pub category_column: usize,

    #[serde(default = "default_code_column")]
    pub code_column: usize,

    #[serde(default = "default_name_column")]
    pub name_column: usize,

    #[serde(default)]
    pub vocabulary: HeaderVocabulary,
}

fn default_base_offset() -> usize {
    8
}

fn default_block_width() -> usize {
    8
}

fn default_max_days() -> usize {
    31
}

fn default_code_column() -> usize {
    1
}

fn default_name_column() -> usize {
    2
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_offset: default_base_offset(),
            block_width: default_block_width(),
            max_days: default_max_days(),
            category_column: 0,
            code_column: default_code_column(),
            name_column: default_name_column(),
            vocabulary: HeaderVocabulary::default(),
        }
    }
}

impl LedgerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LedgerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_width == 0 {
            return Err(StockLedgerError::InvalidConfig(
                "block_width must be at least 1".to_string(),
            ));
        }

        if self.max_days == 0 {
            return Err(StockLedgerError::InvalidConfig(
                "max_days must be at least 1".to_string(),
            ));
        }

        for (field, column) in [
            ("category_column", self.category_column),
            ("code_column", self.code_column),
            ("name_column", self.name_column),
        ] {
            if column >= self.base_offset {
                return Err(StockLedgerError::InvalidConfig(format!(
                    "{} ({}) must lie before base_offset ({})",
                    field, column, self.base_offset
                )));
            }
        }

        for (role, keywords) in self.vocabulary.in_priority_order() {
            if keywords.is_empty() {
                return Err(StockLedgerError::InvalidConfig(format!(
                    "vocabulary for {:?} is empty",
                    role
                )));
            }
            if keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(StockLedgerError::InvalidConfig(format!(
                    "vocabulary for {:?} contains a blank keyword",
                    role
                )));
            }
        }

        Ok(())
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(LedgerConfig)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_generation() {
        let schema_json = LedgerConfig::schema_as_json().unwrap();
        assert!(schema_json.contains("base_offset"));
        assert!(schema_json.contains("vocabulary"));
        assert!(schema_json.contains("brought_forward"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = LedgerConfig::from_json(r#"{ "max_days": 7 }"#).unwrap();
        assert_eq!(config.max_days, 7);
        assert_eq!(config.base_offset, 8);
        assert_eq!(config.code_column, 1);
        assert_eq!(config.vocabulary, HeaderVocabulary::default());
    }

    #[test]
    fn test_custom_vocabulary() {
        let json = r#"{
            "vocabulary": {
                "brought_forward": ["opening"],
                "received": ["in"],
                "sold": ["out"],
                "waste": ["spoiled"]
            }
        }"#;
        let config = LedgerConfig::from_json(json).unwrap();
        assert_eq!(config.vocabulary.waste, vec!["spoiled".to_string()]);
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = LedgerConfig::default();
        config.block_width = 0;
        assert!(config.validate().is_err());

        let mut config = LedgerConfig::default();
        config.name_column = 8;
        assert!(config.validate().is_err());

        let mut config = LedgerConfig::default();
        config.vocabulary.sold.clear();
        assert!(config.validate().is_err());

        let mut config = LedgerConfig::default();
        config.vocabulary.received.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = ProductDayRecord {
            date: "1 Mar".to_string(),
            code: "A01".to_string(),
            name: "Croissant".to_string(),
            category: "Bakery".to_string(),
            brought_forward: 10.0,
            received: 5.0,
            sold: 3.0,
            waste: 0.0,
            remain: 12.0,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"broughtForward\":10.0"));
    }
}
