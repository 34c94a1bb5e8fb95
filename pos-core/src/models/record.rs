use super::{Map, OpeningWindow};

/// The upstream feed's identifier for a point of sale.
///
/// It is globally unique and is the key everything aggregates on. The feed
/// emits it as either a JSON string or a JSON integer; both are accepted and
/// kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct PointOfSaleId(pub String);

impl std::fmt::Display for PointOfSaleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PointOfSaleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PointOfSaleId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PointOfSaleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_untagged::UntaggedEnumVisitor::new()
            .string(|id| Ok(Self(id.to_owned())))
            .i64(|id| Ok(Self(id.to_string())))
            .u64(|id| Ok(Self(id.to_string())))
            .deserialize(deserializer)
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for PointOfSaleId {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "PointOfSaleId".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
        })
    }
}

/// The descriptive fields of a point of sale, as stored in `points_of_sale`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PointOfSale {
    /// Feed identifier
    pub id: PointOfSaleId,
    /// The kind of point of sale, as named by the feed
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Display name
    pub name: String,
    /// Street address, if the feed provides one
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: Option<String>,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Bit flags describing the services offered
    pub services: i64,
    /// Bit flags describing the accepted payment methods
    pub pay_methods: i64,
    /// Free-form remarks, if any
    #[cfg_attr(feature = "serde", serde(default))]
    pub remarks: Option<String>,
    /// A link to more information, if any
    #[cfg_attr(feature = "serde", serde(default))]
    pub link: Option<String>,
}

/// One point of sale together with the windows that matched a query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfSaleRecord {
    /// The point of sale itself
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub point_of_sale: PointOfSale,
    /// Windows in the order their rows were returned
    #[cfg_attr(feature = "serde", serde(rename = "openingHours"))]
    pub windows: Vec<OpeningWindow>,
}

/// A row of the one-to-many join between points of sale and their windows.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    /// The point of sale, repeated once per window
    pub point_of_sale: PointOfSale,
    /// Exactly one of its windows
    pub window: OpeningWindow,
}

/// Fold joined rows into one record per point of sale.
///
/// Records appear in the order their id was first seen, and each record's
/// windows appear in row order. No row is dropped: the number of windows in a
/// record equals the number of rows with its id. The descriptive fields are
/// taken from the first row of each id.
pub fn aggregate(
    rows: impl IntoIterator<Item = JoinedRow>,
) -> Map<PointOfSaleId, PointOfSaleRecord> {
    let mut records = Map::default();
    for JoinedRow {
        point_of_sale,
        window,
    } in rows
    {
        records
            .entry(point_of_sale.id.clone())
            .or_insert_with(|| PointOfSaleRecord {
                point_of_sale,
                windows: Vec::new(),
            })
            .windows
            .push(window);
    }
    records
}
