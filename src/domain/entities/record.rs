use serde::{Deserialize, Serialize};

pub const FILE_NAME: &str = "File Name";
pub const BRAND_NAME: &str = "Brand Name";
pub const MEDIA_TYPE: &str = "Media Type";
pub const AD_TYPE: &str = "Ad Type";
pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const IMPRESSION: &str = "Impression (ad contact)";

/// Columns of the long-format record table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordField {
    FileName,
    BrandName,
    MediaType,
    AdType,
    Year,
    Month,
    Impression,
}

impl RecordField {
    pub const ALL: [RecordField; 7] = [
        RecordField::FileName,
        RecordField::BrandName,
        RecordField::MediaType,
        RecordField::AdType,
        RecordField::Year,
        RecordField::Month,
        RecordField::Impression,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecordField::FileName => FILE_NAME,
            RecordField::BrandName => BRAND_NAME,
            RecordField::MediaType => MEDIA_TYPE,
            RecordField::AdType => AD_TYPE,
            RecordField::Year => YEAR,
            RecordField::Month => MONTH,
            RecordField::Impression => IMPRESSION,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.label() == label)
    }
}

/// Which leading dimension columns a source sheet carries. Enabled columns
/// occupy indices `0..k` in the fixed order Brand, Media Type, Ad Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub include_brand: bool,
    pub include_media_type: bool,
    pub include_ad_type: bool,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            include_brand: true,
            include_media_type: true,
            include_ad_type: true,
        }
    }
}

impl ColumnConfig {
    pub fn brand_only() -> Self {
        Self {
            include_brand: true,
            include_media_type: false,
            include_ad_type: false,
        }
    }

    pub fn dimension_count(&self) -> usize {
        [
            self.include_brand,
            self.include_media_type,
            self.include_ad_type,
        ]
        .into_iter()
        .filter(|enabled| *enabled)
        .count()
    }

    /// Record columns produced under this configuration.
    pub fn fields(&self) -> Vec<RecordField> {
        RecordField::ALL
            .into_iter()
            .filter(|field| match field {
                RecordField::BrandName => self.include_brand,
                RecordField::MediaType => self.include_media_type,
                RecordField::AdType => self.include_ad_type,
                _ => true,
            })
            .collect()
    }
}

/// A header cell recognised as `<year> <month>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodColumn {
    pub column_index: usize,
    pub year: String,
    pub month: String,
}

/// One long-format row: a single (dimensions, period) measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformedRecord {
    #[serde(rename = "File Name")]
    pub file_name: String,
    #[serde(rename = "Brand Name", skip_serializing_if = "Option::is_none", default)]
    pub brand_name: Option<String>,
    #[serde(rename = "Media Type", skip_serializing_if = "Option::is_none", default)]
    pub media_type: Option<String>,
    #[serde(rename = "Ad Type", skip_serializing_if = "Option::is_none", default)]
    pub ad_type: Option<String>,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Month")]
    pub month: String,
    /// Raw measure text, kept as found so separators survive export.
    #[serde(rename = "Impression (ad contact)")]
    pub impression: String,
}

impl TransformedRecord {
    pub fn get(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::FileName => Some(&self.file_name),
            RecordField::BrandName => self.brand_name.as_deref(),
            RecordField::MediaType => self.media_type.as_deref(),
            RecordField::AdType => self.ad_type.as_deref(),
            RecordField::Year => Some(&self.year),
            RecordField::Month => Some(&self.month),
            RecordField::Impression => Some(&self.impression),
        }
    }

    pub fn has(&self, field: RecordField) -> bool {
        self.get(field).is_some()
    }

    /// Overwrites a field. Returns `false` when the field is absent from
    /// this record's shape; absent dimensions are never materialised.
    pub fn set(&mut self, field: RecordField, value: String) -> bool {
        let slot = match field {
            RecordField::FileName => &mut self.file_name,
            RecordField::BrandName => match self.brand_name.as_mut() {
                Some(slot) => slot,
                None => return false,
            },
            RecordField::MediaType => match self.media_type.as_mut() {
                Some(slot) => slot,
                None => return false,
            },
            RecordField::AdType => match self.ad_type.as_mut() {
                Some(slot) => slot,
                None => return false,
            },
            RecordField::Year => &mut self.year,
            RecordField::Month => &mut self.month,
            RecordField::Impression => &mut self.impression,
        };
        *slot = value;
        true
    }

    pub fn fields(&self) -> Vec<RecordField> {
        RecordField::ALL
            .into_iter()
            .filter(|field| self.has(*field))
            .collect()
    }
}
